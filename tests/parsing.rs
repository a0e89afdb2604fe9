//! Data-driven scenario suite, grounded in the teacher's own `tests/data.rs` (a
//! `serde_json`-deserialized fixture list of parse scenarios), trimmed down from the teacher's
//! full web-platform-tests fixture to a hand-picked set of scenarios covering this crate's own
//! worked examples and edge cases.

use serde_json::Value;
use whatwg_url::Url;

fn cases() -> Vec<Value> {
    let raw = include_str!("fixtures/urltestdata.json");
    let parsed: Value = serde_json::from_str(raw).expect("fixture JSON must parse");
    parsed
        .as_array()
        .expect("fixture must be a JSON array")
        .iter()
        .filter(|entry| !entry.is_string()) // leading comment string
        .cloned()
        .collect()
}

fn str_field<'a>(entry: &'a Value, key: &str) -> &'a str {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing {:?} in {}", key, entry))
}

#[test]
fn fixture_scenarios() {
    for entry in cases() {
        let input = str_field(&entry, "input");
        let base = entry.get("base").and_then(Value::as_str);

        let base_url = base.map(|b| Url::parse(b).unwrap_or_else(|e| panic!("bad fixture base {:?}: {}", b, e)));
        let result = match &base_url {
            Some(base_url) => base_url.join(input),
            None => Url::parse(input),
        };

        if entry.get("failure").and_then(Value::as_bool).unwrap_or(false) {
            assert!(
                result.is_err(),
                "expected {:?} (base {:?}) to fail, got {:?}",
                input,
                base,
                result.map(|u| u.into_string())
            );
            continue;
        }

        let url = result.unwrap_or_else(|e| panic!("failed to parse {:?} (base {:?}): {}", input, base, e));

        assert_eq!(url.as_str(), str_field(&entry, "href"), "href for {:?}", input);
        assert_eq!(
            &url.as_str()[..url.scheme().len() + 1],
            str_field(&entry, "protocol"),
            "protocol for {:?}",
            input
        );
        assert_eq!(url.username(), str_field(&entry, "username"), "username for {:?}", input);
        assert_eq!(url.password().unwrap_or(""), str_field(&entry, "password"), "password for {:?}", input);
        assert_eq!(url.host_str().unwrap_or(""), str_field(&entry, "hostname"), "hostname for {:?}", input);
        assert_eq!(
            url.port().map(|p| p.to_string()).unwrap_or_default(),
            str_field(&entry, "port"),
            "port for {:?}",
            input
        );
        assert_eq!(url.path(), str_field(&entry, "pathname"), "pathname for {:?}", input);
        assert_eq!(url.query().unwrap_or(""), str_field(&entry, "search"), "search for {:?}", input);
        assert_eq!(url.fragment().unwrap_or(""), str_field(&entry, "hash"), "hash for {:?}", input);
    }
}
