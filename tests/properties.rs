//! Universal properties that must hold for every input, checked with `quickcheck`. The teacher
//! predates `quickcheck` in its own dev-dependencies; reaching for it here follows the broader
//! example pack's use of the same crate for wire-format round-trip properties (`hyperium/http`).

use quickcheck::{quickcheck, Gen, TestResult};
use whatwg_url::Url;

/// A small alphabet biased toward characters that actually exercise scheme/authority/path/
/// percent-encoding logic, rather than `String::arbitrary`'s uniform-over-`char` distribution
/// (which would spend nearly every case on bytes this parser rejects in the first few characters).
#[derive(Clone, Debug)]
struct UrlLikeInput(String);

impl quickcheck::Arbitrary for UrlLikeInput {
    fn arbitrary(g: &mut Gen) -> Self {
        const ALPHABET: &[char] = &[
            'h', 't', 'p', 's', 'f', 'w', 'o', ':', '/', '?', '#', '@', '.', '-', '_', '%', '2', '0', '~',
            'a', 'b', 'c', '1', '[', ']', 'A', ' ', '\\', '\t', '\n',
        ];
        let len = usize::arbitrary(g) % 40;
        let s: String = (0..len).map(|_| *g.choose(ALPHABET).unwrap()).collect();
        UrlLikeInput(s)
    }
}

quickcheck! {
    /// Property 4: parse never panics on arbitrary input, with or without a base.
    fn never_panics(input: UrlLikeInput, base: UrlLikeInput) -> bool {
        let base_url = Url::parse(&base.0).ok();
        let _ = match &base_url {
            Some(b) => b.join(&input.0),
            None => Url::parse(&input.0),
        };
        true
    }

    /// Property 1 + 2: round-tripping a successfully parsed URL through its serialization is
    /// lossless and idempotent.
    fn round_trip_and_idempotent(input: UrlLikeInput) -> TestResult {
        let url = match Url::parse(&input.0) {
            Ok(url) => url,
            Err(_) => return TestResult::discard(),
        };
        let reparsed = match Url::parse(url.as_str()) {
            Ok(u) => u,
            Err(_) => return TestResult::failed(),
        };
        TestResult::from_bool(reparsed == url && reparsed.as_str() == url.as_str())
    }

    /// Property 3: two URLs are equal iff their serializations are byte-equal.
    fn equality_is_serialization_equality(a: UrlLikeInput, b: UrlLikeInput) -> TestResult {
        let (ua, ub) = match (Url::parse(&a.0), Url::parse(&b.0)) {
            (Ok(ua), Ok(ub)) => (ua, ub),
            _ => return TestResult::discard(),
        };
        TestResult::from_bool((ua == ub) == (ua.as_str() == ub.as_str()))
    }

    /// Property 9: a successfully parsed hierarchical path never contains `.`/`..` as a whole
    /// segment, and is never longer than the original input path.
    fn path_is_normalized(input: UrlLikeInput) -> TestResult {
        let url = match Url::parse(&input.0) {
            Ok(url) => url,
            Err(_) => return TestResult::discard(),
        };
        if url.cannot_be_a_base() {
            return TestResult::discard();
        }
        let segments = match url.path_segments() {
            Some(s) => s,
            None => return TestResult::discard(),
        };
        TestResult::from_bool(segments.clone().all(|s| s != "." && s != ".."))
    }
}

#[test]
fn form_encoding_round_trip_without_substitution_conflict() {
    fn check(bytes: Vec<u8>) -> bool {
        let encoded: String = whatwg_url::form_urlencoded::byte_serialize(&bytes).collect();
        let decoded: Vec<u8> = whatwg_url::form_urlencoded::parse(
            format!("x={}", encoded).as_bytes(),
        )
        .next()
        .map(|(_, v)| v.as_bytes().to_vec())
        .unwrap_or_default();
        decoded == bytes
    }
    quickcheck(check as fn(Vec<u8>) -> bool);
}

#[test]
fn canonical_ipv6_embedded_ipv4_forms_agree() {
    let a = Url::parse("http://[::127.0.0.1]/").unwrap();
    let b = Url::parse("http://[::7f00:1]/").unwrap();
    assert_eq!(a.host_str(), b.host_str());
}
