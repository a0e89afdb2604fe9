//! Parsing and serializing `application/x-www-form-urlencoded` name/value pairs, the format
//! used by a URL's query string.
//!
//! Adapted from the teacher's `parse_bytes`/`serialize` pair, dropping the non-UTF-8
//! `encoding_override` machinery (this crate only ever targets UTF-8) and replacing the
//! `Vec<(String, String)>` return value with a lazy iterator plus a capacity-aware builder.

use alloc::borrow::Cow;
use alloc::string::String;

use crate::encode_set::{self, FORM_URLENCODED, FormSubstitution, NoSubstitution, PercentDecode};

/// An iterator over the decoded `(name, value)` pairs of a `x-www-form-urlencoded` byte string.
#[derive(Clone)]
pub struct Parse<'a> {
    input: &'a [u8],
}

/// Parses `input` as `application/x-www-form-urlencoded` and returns an iterator of decoded
/// `(name, value)` pairs, in the order they appear. An empty piece between two `&`s (or at
/// either end) yields nothing; a piece with no `=` yields an empty value.
pub fn parse(input: &[u8]) -> Parse<'_> {
    Parse { input }
}

impl<'a> Iterator for Parse<'a> {
    type Item = (Cow<'a, str>, Cow<'a, str>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.input.is_empty() {
                return None;
            }
            let piece;
            match self.input.iter().position(|&b| b == b'&') {
                Some(i) => {
                    piece = &self.input[..i];
                    self.input = &self.input[i + 1..];
                }
                None => {
                    piece = self.input;
                    self.input = &[];
                }
            }
            if piece.is_empty() {
                continue;
            }
            let (name, value) = match piece.iter().position(|&b| b == b'=') {
                Some(i) => (&piece[..i], &piece[i + 1..]),
                None => (piece, &b""[..]),
            };
            return Some((decode(name), decode(value)));
        }
    }
}

fn decode(input: &[u8]) -> Cow<'_, str> {
    if input.iter().any(|&b| b == b'+' || b == b'%') {
        let bytes: alloc::vec::Vec<u8> = PercentDecode::new(input, FormSubstitution).collect();
        Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
    } else {
        Cow::Borrowed(core::str::from_utf8(input).unwrap_or(""))
    }
}

/// Percent-encodes `input` the way a form field's name or value is encoded: space becomes `+`
/// rather than `%20`, and the reserved/unreserved byte classification follows
/// [`FORM_URLENCODED`]. Every yielded `char` is ASCII, since `PercentEncode` never emits
/// anything else.
pub fn byte_serialize(input: &[u8]) -> impl Iterator<Item = char> + '_ {
    encode_set::PercentEncode::new(input, &FORM_URLENCODED, FormSubstitution).map(|byte| byte as char)
}

/// Where a [`Serializer`] writes its encoded output. [`String`] is the plain standalone target;
/// [`crate::url::UrlQuery`] writes straight into a [`crate::Url`]'s query component so
/// [`crate::Url::query_pairs_mut`] can mutate a URL in place instead of handing back a string for
/// the caller to pass to `set_query`.
pub trait Target {
    type Finished;
    fn as_mut_string(&mut self) -> &mut String;
    fn finish(self) -> Self::Finished;
}

impl Target for String {
    type Finished = String;

    fn as_mut_string(&mut self) -> &mut String {
        self
    }

    fn finish(self) -> String {
        self
    }
}

/// Builds a `x-www-form-urlencoded` string one pair at a time, into any [`Target`].
pub struct Serializer<T: Target> {
    target: T,
    start: usize,
}

impl<T: Target> Serializer<T> {
    pub fn new(mut target: T) -> Self {
        let start = target.as_mut_string().len();
        Serializer { target, start }
    }

    pub fn append_pair(&mut self, name: &str, value: &str) -> &mut Self {
        self.push_separator();
        let buf = self.target.as_mut_string();
        encode_set::encode_to_string(name.as_bytes(), &FORM_URLENCODED, FormSubstitution, buf);
        buf.push('=');
        encode_set::encode_to_string(value.as_bytes(), &FORM_URLENCODED, FormSubstitution, buf);
        self
    }

    pub fn append_key_only(&mut self, name: &str) -> &mut Self {
        self.push_separator();
        let buf = self.target.as_mut_string();
        encode_set::encode_to_string(name.as_bytes(), &FORM_URLENCODED, FormSubstitution, buf);
        self
    }

    fn push_separator(&mut self) {
        if self.target.as_mut_string().len() > self.start {
            self.target.as_mut_string().push('&');
        }
    }

    pub fn finish(self) -> T::Finished {
        self.target.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn parses_plus_as_space() {
        let pairs: Vec<_> = parse(b"a+b=c+d").collect();
        assert_eq!(pairs, vec![(Cow::Borrowed("a b"), Cow::Borrowed("c d"))]);
    }

    #[test]
    fn skips_empty_pieces() {
        let pairs: Vec<_> = parse(b"a=1&&b=2&").collect();
        assert_eq!(
            pairs,
            vec![
                (Cow::Borrowed("a"), Cow::Borrowed("1")),
                (Cow::Borrowed("b"), Cow::Borrowed("2")),
            ]
        );
    }

    #[test]
    fn missing_equals_yields_empty_value() {
        let pairs: Vec<_> = parse(b"standalone").collect();
        assert_eq!(pairs, vec![(Cow::Borrowed("standalone"), Cow::Borrowed(""))]);
    }

    #[test]
    fn percent_decodes_name_and_value() {
        let pairs: Vec<_> = parse(b"na%6De=va%6Cue").collect();
        assert_eq!(pairs, vec![(Cow::Borrowed("name"), Cow::Borrowed("value"))]);
    }

    #[test]
    fn serializer_joins_with_ampersand() {
        let mut ser = Serializer::new(String::new());
        ser.append_pair("q", "rust url").append_pair("lang", "en");
        assert_eq!(ser.finish(), "q=rust+url&lang=en");
    }

    #[test]
    fn byte_serialize_matches_parse() {
        let encoded: String = byte_serialize(b"a b+c").collect();
        assert_eq!(encoded, "a+b%2Bc");
        let pairs: Vec<_> = parse(alloc::format!("x={}", encoded).as_bytes()).collect();
        assert_eq!(pairs[0].1, "a b+c");
    }
}
