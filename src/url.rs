//! The [`Url`] value type: an owned, already-serialized string plus the component offsets
//! needed to slice it back apart, and the public parsing/resolution/mutation API built on it.
//!
//! Grounded in the teacher's historical `Url` (a `scheme`/`scheme_data`/`query`/`fragment`
//! struct with a `UrlParser` builder), replaced with a single contiguous buffer plus numeric
//! offsets: every accessor is a slice into `serialization`, so nothing is duplicated between the
//! stored string and the values `scheme()`/`host_str()`/`path()` hand back.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::error::{ParseError, SyntaxViolation};
use crate::host::{Host, HostInternal, ParsedHost};
use crate::net::{Ipv4Addr, Ipv6Addr};
use crate::parser;
use crate::scheme::SchemeKind;
use crate::writer::{Metrics, Serializer as WriteSerializer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Flags {
    pub(crate) has_authority: bool,
    pub(crate) has_opaque_path: bool,
    /// Whether the path was written with a leading `/.` sigil to keep its first segment from
    /// being misread as part of the authority (an empty-authority URL whose path would otherwise
    /// start with `//`, or a scheme-less path that would otherwise read back as a scheme).
    pub(crate) has_path_sigil: bool,
    /// Set whenever the query was last written by [`Url::query_pairs_mut`] or
    /// `set_query_from_pairs`: the query string is known to be valid
    /// `x-www-form-urlencoded`, as opposed to arbitrary text that happens to contain `&`/`=`.
    pub(crate) query_is_known_form_encoded: bool,
}

/// A parsed, normalized URL.
///
/// Cheap to clone relative to re-parsing (one `String` allocation), and every accessor borrows
/// out of the single internal buffer rather than materializing a new string.
#[derive(Clone)]
pub struct Url {
    pub(crate) serialization: String,
    pub(crate) scheme_end: u32,
    pub(crate) username_end: u32,
    pub(crate) host_start: u32,
    pub(crate) host_end: u32,
    pub(crate) host: HostInternal,
    pub(crate) port: Option<u16>,
    pub(crate) path_start: u32,
    pub(crate) query_start: Option<u32>,
    pub(crate) fragment_start: Option<u32>,
    pub(crate) scheme_kind: SchemeKind,
    pub(crate) flags: Flags,
}

/// A base URL and an optional syntax-violation callback, reused across any number of `parse`
/// calls. Grounded in the teacher's `UrlParser::new().base_url(...)`.
pub struct ParseOptions<'a> {
    base_url: Option<&'a Url>,
    violation_fn: Option<&'a mut dyn FnMut(SyntaxViolation)>,
}

impl<'a> ParseOptions<'a> {
    pub fn base_url(mut self, base: Option<&'a Url>) -> Self {
        self.base_url = base;
        self
    }

    pub fn syntax_violation_callback(mut self, f: Option<&'a mut dyn FnMut(SyntaxViolation)>) -> Self {
        self.violation_fn = f;
        self
    }

    pub fn parse(self, input: &str) -> Result<Url, ParseError> {
        parser::parse(input, self.base_url, self.violation_fn)
    }
}

impl Url {
    /// Parses `input` as an absolute URL, with no base to resolve a relative reference against.
    pub fn parse(input: &str) -> Result<Url, ParseError> {
        parser::parse(input, None, None)
    }

    /// Starts a [`ParseOptions`] builder for parsing with a base URL or a violation callback.
    pub fn options<'a>() -> ParseOptions<'a> {
        ParseOptions { base_url: None, violation_fn: None }
    }

    /// Parses `input`, resolving it against `self` as a base URL if it is a relative reference.
    pub fn join(&self, input: &str) -> Result<Url, ParseError> {
        Url::options().base_url(Some(self)).parse(input)
    }

    /// The whole serialization, e.g. `"https://example.com/a?b#c"`.
    pub fn as_str(&self) -> &str {
        &self.serialization
    }

    pub fn into_string(self) -> String {
        self.serialization
    }

    pub fn scheme(&self) -> &str {
        &self.serialization[..self.scheme_end as usize]
    }

    pub(crate) fn scheme_kind(&self) -> SchemeKind {
        self.scheme_kind
    }

    pub fn is_special(&self) -> bool {
        self.scheme_kind.is_special()
    }

    pub fn has_authority(&self) -> bool {
        self.flags.has_authority
    }

    /// True for a "cannot be a base" URL, e.g. `mailto:a@example.com`: its path is an opaque
    /// string rather than a `/`-separated list, and `path_segments()` returns `None`.
    pub fn cannot_be_a_base(&self) -> bool {
        self.flags.has_opaque_path
    }

    pub fn username(&self) -> &str {
        if !self.has_authority() {
            return "";
        }
        let end = self.username_password_split();
        &self.serialization[self.scheme_end as usize + 3..end]
    }

    pub fn password(&self) -> Option<&str> {
        if !self.has_authority() {
            return None;
        }
        let start = self.username_password_split();
        if start < self.username_end as usize {
            Some(&self.serialization[start + 1..self.username_end as usize])
        } else {
            None
        }
    }

    /// Index of the `:` separating username from password, or of `username_end` itself when
    /// there is no password.
    fn username_password_split(&self) -> usize {
        let slice = &self.serialization[self.scheme_end as usize + 3..self.username_end as usize];
        match slice.find(':') {
            Some(i) => self.scheme_end as usize + 3 + i,
            None => self.username_end as usize,
        }
    }

    pub fn has_host(&self) -> bool {
        !matches!(self.host, HostInternal::None)
    }

    pub fn host_str(&self) -> Option<&str> {
        if self.has_host() {
            Some(&self.serialization[self.host_start as usize..self.host_end as usize])
        } else {
            None
        }
    }

    pub fn host(&self) -> Option<Host<&str>> {
        match &self.host {
            HostInternal::None => None,
            HostInternal::Domain => {
                let s = self.host_str().unwrap_or("");
                if self.is_special() {
                    Some(Host::Domain(s))
                } else {
                    Some(Host::Opaque(s))
                }
            }
            HostInternal::Ipv4(addr) => Some(Host::Ipv4(*addr)),
            HostInternal::Ipv6(addr) => Some(Host::Ipv6(*addr)),
        }
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// `port()`, falling back to the scheme's default port.
    pub fn port_or_known_default(&self) -> Option<u16> {
        self.port.or_else(|| self.scheme_kind.default_port())
    }

    /// The host as a domain name, or `None` for an IP address, an opaque (non-special-scheme)
    /// host, or no host at all.
    pub fn domain(&self) -> Option<&str> {
        match self.host {
            HostInternal::Domain if self.is_special() => self.host_str(),
            _ => None,
        }
    }

    /// The path, including the leading `/` for a hierarchical URL, or the whole opaque string
    /// for a "cannot be a base" URL.
    pub fn path(&self) -> &str {
        let end = self
            .query_start
            .or(self.fragment_start)
            .unwrap_or(self.serialization.len() as u32);
        &self.serialization[self.path_start as usize..end as usize]
    }

    /// `None` for an opaque path; otherwise the path's `/`-separated segments, each
    /// percent-decoded on demand, none of which contain a `/`.
    pub fn path_segments(&self) -> Option<PathSegments<'_>> {
        if self.cannot_be_a_base() {
            return None;
        }
        let path = self.path();
        let path = path.strip_prefix('/').unwrap_or(path);
        Some(PathSegments { inner: path.split('/') })
    }

    pub fn query(&self) -> Option<&str> {
        let start = self.query_start?;
        let end = self.fragment_start.unwrap_or(self.serialization.len() as u32);
        Some(&self.serialization[start as usize + 1..end as usize])
    }

    pub fn query_pairs(&self) -> crate::form_urlencoded::Parse<'_> {
        crate::form_urlencoded::parse(self.query().unwrap_or("").as_bytes())
    }

    /// Starts building a fresh, form-encoded query string one pair at a time, writing directly
    /// into this URL; call `.finish()` when done. Any existing query is discarded immediately,
    /// the same as `set_query_from_pairs`'s batch form.
    pub fn query_pairs_mut(&mut self) -> crate::form_urlencoded::Serializer<UrlQuery<'_>> {
        let fragment = self.fragment().map(alloc::string::ToString::to_string);
        let before_query = self.query_start.or(self.fragment_start).unwrap_or(self.serialization.len() as u32);
        self.serialization.truncate(before_query as usize);
        self.fragment_start = None;
        self.query_start = Some(before_query);
        self.serialization.push('?');
        crate::form_urlencoded::Serializer::new(UrlQuery { url: self, fragment })
    }

    pub fn fragment(&self) -> Option<&str> {
        let start = self.fragment_start?;
        Some(&self.serialization[start as usize + 1..])
    }

    /// Replaces the query string with the serialization of `pairs`, dropping any existing query.
    pub fn set_query_from_pairs<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = crate::form_urlencoded::Serializer::new(String::new());
        for (k, v) in pairs {
            serializer.append_pair(k.as_ref(), v.as_ref());
        }
        self.set_query(Some(&serializer.finish()));
        self.flags.query_is_known_form_encoded = true;
    }

    /// Replaces the query string verbatim (already-decoded text; this percent-encodes it).
    pub fn set_query(&mut self, query: Option<&str>) {
        let before_query = self.query_start.or(self.fragment_start).unwrap_or(self.serialization.len() as u32);
        let old_fragment: Option<String> = self.fragment().map(alloc::string::ToString::to_string);

        let mut buf = String::with_capacity(self.serialization.len());
        buf.push_str(&self.serialization[..before_query as usize]);

        self.query_start = query.map(|query| {
            let start = buf.len() as u32;
            buf.push('?');
            let set = if self.is_special() { &crate::encode_set::SPECIAL_QUERY } else { &crate::encode_set::QUERY };
            crate::encode_set::encode_to_string(query.as_bytes(), set, crate::encode_set::NoSubstitution, &mut buf);
            start
        });

        self.fragment_start = old_fragment.map(|fragment| {
            let start = buf.len() as u32;
            buf.push('#');
            crate::encode_set::encode_to_string(fragment.as_bytes(), &crate::encode_set::FRAGMENT, crate::encode_set::NoSubstitution, &mut buf);
            start
        });

        self.serialization = buf;
        self.flags.query_is_known_form_encoded = false;
    }

    /// Replaces the fragment, or removes it when `fragment` is `None`.
    pub fn set_fragment(&mut self, fragment: Option<&str>) {
        let cut = self.fragment_start.unwrap_or(self.serialization.len() as u32) as usize;
        self.serialization.truncate(cut);
        self.fragment_start = None;
        if let Some(fragment) = fragment {
            let start = self.serialization.len() as u32;
            self.serialization.push('#');
            crate::encode_set::encode_to_string(
                fragment.as_bytes(),
                &crate::encode_set::FRAGMENT,
                crate::encode_set::NoSubstitution,
                &mut self.serialization,
            );
            self.fragment_start = Some(start);
        }
    }

    /// Replaces the scheme, lenient the way every setter in this block is: a syntactically
    /// invalid scheme, or one that would change whether the URL is special, leaves `self`
    /// untouched and returns `Err(())` rather than an error describing why.
    pub fn set_scheme(&mut self, scheme: &str) -> Result<(), ()> {
        if !is_valid_scheme_syntax(scheme) {
            return Err(());
        }
        let new_kind = SchemeKind::classify(scheme);
        if new_kind.is_special() != self.scheme_kind.is_special() {
            return Err(());
        }
        if new_kind.is_file() && (!self.username().is_empty() || self.password().is_some() || self.port.is_some()) {
            return Err(());
        }
        let lower = scheme.to_ascii_lowercase();
        self.splice_and_shift(0, self.scheme_end, &lower);
        self.scheme_end = lower.len() as u32;
        self.scheme_kind = new_kind;
        Ok(())
    }

    /// Replaces the username, re-encoding it. Fails, leaving `self` unchanged, on a URL with no
    /// host to attach credentials to (an opaque path, or an empty host).
    pub fn set_username(&mut self, username: &str) -> Result<(), ()> {
        if !self.can_set_userinfo() {
            return Err(());
        }
        let password = self.password().map(alloc::string::ToString::to_string);
        self.write_userinfo(username, password.as_deref());
        Ok(())
    }

    /// Replaces the password, or removes it when `password` is `None`.
    pub fn set_password(&mut self, password: Option<&str>) -> Result<(), ()> {
        if !self.can_set_userinfo() {
            return Err(());
        }
        let username = alloc::string::ToString::to_string(self.username());
        self.write_userinfo(&username, password);
        Ok(())
    }

    fn can_set_userinfo(&self) -> bool {
        self.has_authority() && !self.cannot_be_a_base() && self.has_host()
    }

    /// Rewrites the `userinfo@` region between the authority sigil and the host, inserting or
    /// dropping the `@` as needed.
    fn write_userinfo(&mut self, username: &str, password: Option<&str>) {
        let region_start = self.scheme_end + 3;
        let region_end = self.host_start;
        let has_userinfo = !username.is_empty() || password.is_some();

        let mut buf = String::new();
        let username_len = if has_userinfo {
            crate::encode_set::encode_to_string(username.as_bytes(), &crate::encode_set::USERINFO, crate::encode_set::NoSubstitution, &mut buf);
            let username_len = buf.len();
            if let Some(pw) = password {
                buf.push(':');
                crate::encode_set::encode_to_string(pw.as_bytes(), &crate::encode_set::USERINFO, crate::encode_set::NoSubstitution, &mut buf);
            }
            buf.push('@');
            username_len
        } else {
            0
        };

        self.splice_and_shift(region_start, region_end, &buf);
        self.username_end = region_start + username_len as u32;
    }

    /// Replaces the host. `None` removes it, which only a non-special scheme without an opaque
    /// path allows. Reuses the same host grammar `Url::parse` uses, so anything accepted there
    /// (a domain, an IPv4/IPv6 literal, or — for a non-special scheme — an opaque host string)
    /// is accepted here.
    pub fn set_host(&mut self, host: Option<&str>) -> Result<(), ()> {
        if self.cannot_be_a_base() || !self.has_authority() {
            return Err(());
        }
        match host {
            None => {
                if self.is_special() {
                    return Err(());
                }
                self.write_host_internal(ParsedHost::Empty, "");
            }
            Some(text) => {
                let parsed = ParsedHost::parse(text, self.scheme_kind).map_err(|_| ())?;
                if matches!(parsed, ParsedHost::Empty) && self.is_special() {
                    return Err(());
                }
                self.write_host_internal(parsed, text);
            }
        }
        Ok(())
    }

    /// Replaces the host with an already-parsed IP address, skipping text parsing entirely.
    pub fn set_ip_host(&mut self, address: crate::net::IpAddr) -> Result<(), ()> {
        if self.cannot_be_a_base() || !self.has_authority() {
            return Err(());
        }
        let parsed = match address {
            crate::net::IpAddr::V4(v4) => ParsedHost::Ipv4(u32::from(v4)),
            crate::net::IpAddr::V6(v6) => ParsedHost::Ipv6(v6.segments()),
        };
        self.write_host_internal(parsed, "");
        Ok(())
    }

    fn write_host_internal(&mut self, parsed: ParsedHost, raw: &str) {
        let mut metrics = Metrics::new();
        parser::write_host(&mut metrics, raw, &parsed);
        let mut ser = WriteSerializer::with_capacity(metrics.total_len());
        parser::write_host(&mut ser, raw, &parsed);
        let new_host = ser.into_string();

        let host_start = self.host_start;
        self.splice_and_shift(host_start, self.host_end, &new_host);
        self.host_start = host_start;
        self.host_end = host_start + new_host.len() as u32;
        self.host = parser::to_host_internal(&parsed);
    }

    /// Replaces the port, or removes it when `port` is `None`. Fails on a URL with no host (a
    /// port needs something to attach to) or a `file:` URL (which never carries one). A port
    /// equal to the scheme's default is dropped, same as during parsing.
    pub fn set_port(&mut self, port: Option<u16>) -> Result<(), ()> {
        if !self.has_authority() || !self.has_host() || self.scheme_kind.is_file() {
            return Err(());
        }
        let port = port.filter(|&p| Some(p) != self.scheme_kind.default_port());
        let mut buf = String::new();
        if let Some(p) = port {
            buf.push(':');
            let _ = core::fmt::Write::write_fmt(&mut buf, format_args!("{}", p));
        }
        self.splice_and_shift(self.host_end, self.path_start, &buf);
        self.port = port;
        Ok(())
    }

    /// Replaces the path, normalizing and percent-encoding it the same way a fresh parse would.
    /// Fails on an opaque-path ("cannot be a base") URL, which has no hierarchical path to set.
    pub fn set_path(&mut self, path: &str) -> Result<(), ()> {
        if self.cannot_be_a_base() {
            return Err(());
        }
        let (new_path, has_path_sigil) =
            parser::rewrite_path(path, self.has_authority(), self.scheme_kind.is_file(), self.is_special());
        let path_start = self.path_start;
        let old_end = self.query_start.or(self.fragment_start).unwrap_or(self.serialization.len() as u32);
        self.splice_and_shift(path_start, old_end, &new_path);
        self.path_start = path_start;
        self.flags.has_path_sigil = has_path_sigil;
        Ok(())
    }

    /// Replaces the bytes of `self.serialization` in `start..end` with `new_text`, then shifts
    /// every stored offset at or past `end` by however much the length changed. The offsets that
    /// bound the edited region itself (e.g. `host_start`/`host_end` for a host edit) may come out
    /// of this pointing at the wrong end of the new text; every caller that edits across such a
    /// boundary re-pins the fields it owns immediately afterward.
    fn splice_and_shift(&mut self, start: u32, end: u32, new_text: &str) {
        let delta = new_text.len() as i64 - (end as i64 - start as i64);
        self.serialization.replace_range(start as usize..end as usize, new_text);
        let shift = |offset: u32| -> u32 {
            if offset >= end {
                (offset as i64 + delta) as u32
            } else {
                offset
            }
        };
        self.scheme_end = shift(self.scheme_end);
        self.username_end = shift(self.username_end);
        self.host_start = shift(self.host_start);
        self.host_end = shift(self.host_end);
        self.path_start = shift(self.path_start);
        self.query_start = self.query_start.map(shift);
        self.fragment_start = self.fragment_start.map(shift);
    }
}

fn is_valid_scheme_syntax(s: &str) -> bool {
    let bytes = s.as_bytes();
    !bytes.is_empty()
        && bytes[0].is_ascii_alphabetic()
        && bytes[1..].iter().all(|&b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.')
}

/// A [`crate::form_urlencoded::Target`] that writes a fresh query directly into a [`Url`]'s
/// buffer, restoring the fragment (if any) and marking the query form-encoded when `finish()`
/// runs. Returned (wrapped in a [`crate::form_urlencoded::Serializer`]) by [`Url::query_pairs_mut`].
pub struct UrlQuery<'a> {
    url: &'a mut Url,
    fragment: Option<String>,
}

impl<'a> crate::form_urlencoded::Target for UrlQuery<'a> {
    type Finished = ();

    fn as_mut_string(&mut self) -> &mut String {
        &mut self.url.serialization
    }

    fn finish(self) {
        let url = self.url;
        url.fragment_start = self.fragment.map(|fragment| {
            let start = url.serialization.len() as u32;
            url.serialization.push('#');
            crate::encode_set::encode_to_string(
                fragment.as_bytes(),
                &crate::encode_set::FRAGMENT,
                crate::encode_set::NoSubstitution,
                &mut url.serialization,
            );
            start
        });
        url.flags.query_is_known_form_encoded = true;
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialization)
    }
}

impl fmt::Debug for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Url").field(&self.serialization).finish()
    }
}

impl FromStr for Url {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Url, ParseError> {
        Url::parse(input)
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Url) -> bool {
        self.serialization == other.serialization
    }
}

impl Eq for Url {}

impl Hash for Url {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialization.hash(state);
    }
}

impl PartialOrd for Url {
    fn partial_cmp(&self, other: &Url) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Url {
    fn cmp(&self, other: &Url) -> Ordering {
        self.serialization.cmp(&other.serialization)
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.serialization
    }
}

/// An IP address or domain name host, borrowing from a `Url` rather than owning.
pub type HostRef<'a> = Host<&'a str>;

/// A path's `/`-separated, percent-decoded segments, returned by [`Url::path_segments`].
#[derive(Clone)]
pub struct PathSegments<'a> {
    inner: core::str::Split<'a, char>,
}

impl<'a> Iterator for PathSegments<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(decode_path_segment)
    }
}

impl<'a> DoubleEndedIterator for PathSegments<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(decode_path_segment)
    }
}

fn decode_path_segment(segment: &str) -> Cow<'_, str> {
    if !segment.as_bytes().contains(&b'%') {
        return Cow::Borrowed(segment);
    }
    let bytes: Vec<u8> = crate::encode_set::PercentDecode::new(segment.as_bytes(), crate::encode_set::NoSubstitution).collect();
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Url, D::Error> {
        let s = <Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        Url::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_http_url() {
        let url = Url::parse("https://example.com/a/b?q=1#frag").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/a/b");
        assert_eq!(url.query(), Some("q=1"));
        assert_eq!(url.fragment(), Some("frag"));
    }

    #[test]
    fn join_resolves_relative_reference() {
        let base = Url::parse("http://servo.example/rust-url/index.html").unwrap();
        let joined = base.join("../main.css").unwrap();
        assert_eq!(joined.as_str(), "http://servo.example/main.css");
    }

    #[test]
    fn display_matches_as_str() {
        let url = Url::parse("ftp://example.com/").unwrap();
        assert_eq!(alloc::format!("{}", url), url.as_str());
    }
}
