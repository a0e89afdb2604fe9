//! Two sinks that both consume the same sequence of "write this component" calls: [`Metrics`]
//! only counts bytes, [`Serializer`] actually builds the string. The parser runs every URL
//! through [`Metrics`] first to size a `String` with `with_capacity`, then through [`Serializer`]
//! to fill it, so the final allocation is exact and the component offsets recorded by both
//! passes line up byte-for-byte.

use alloc::string::String;
use core::fmt;

use crate::encode_set::{self, AsciiSet, NoSubstitution, PercentEncode};
use crate::net::{Ipv4Addr, Ipv6Addr};

/// Something that can receive a URL's pieces in order. Every method returns the byte offset
/// *after* whatever it wrote, so callers can stash component boundaries without a separate
/// length query.
pub(crate) trait Sink {
    fn write_str(&mut self, s: &str) -> u32;
    /// Percent-encodes `bytes` against `set` before writing.
    fn write_encoded(&mut self, bytes: &[u8], set: &'static AsciiSet) -> u32;
    /// Writes `s` with any ASCII uppercase bytes folded to lowercase. Byte count is unchanged.
    fn write_lowercased(&mut self, s: &str) -> u32;
    fn write_fmt_len(&mut self, args: fmt::Arguments<'_>) -> u32;
    fn position(&self) -> u32;
}

/// Counts bytes without allocating. Used for the sizing pass.
#[derive(Default)]
pub(crate) struct Metrics {
    len: u32,
}

impl Metrics {
    pub(crate) fn new() -> Self {
        Metrics { len: 0 }
    }

    pub(crate) fn total_len(&self) -> usize {
        self.len as usize
    }
}

impl Sink for Metrics {
    fn write_str(&mut self, s: &str) -> u32 {
        self.len += s.len() as u32;
        self.len
    }

    fn write_encoded(&mut self, bytes: &[u8], set: &'static AsciiSet) -> u32 {
        let (len, _) = encode_set::measured_encode(bytes, set);
        self.len += len as u32;
        self.len
    }

    fn write_lowercased(&mut self, s: &str) -> u32 {
        self.len += s.len() as u32;
        self.len
    }

    fn write_fmt_len(&mut self, args: fmt::Arguments<'_>) -> u32 {
        let mut counted = CountingWriter { count: 0 };
        let _ = fmt::Write::write_fmt(&mut counted, args);
        self.len += counted.count as u32;
        self.len
    }

    fn position(&self) -> u32 {
        self.len
    }
}

/// A `fmt::Write` sink that only counts bytes, used to measure the `Display` output of
/// [`Ipv4Addr`]/[`Ipv6Addr`] without allocating a scratch string.
struct CountingWriter {
    count: usize,
}

impl fmt::Write for CountingWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.len();
        Ok(())
    }
}

/// Builds the real string, one component at a time.
pub(crate) struct Serializer {
    buf: String,
}

impl Serializer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Serializer {
            buf: String::with_capacity(capacity),
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

impl Sink for Serializer {
    fn write_str(&mut self, s: &str) -> u32 {
        self.buf.push_str(s);
        self.buf.len() as u32
    }

    fn write_encoded(&mut self, bytes: &[u8], set: &'static AsciiSet) -> u32 {
        for byte in PercentEncode::new(bytes, set, NoSubstitution) {
            // Every emitted byte is ASCII: either verbatim ASCII that `should_encode` passed,
            // or a `%`/hex-digit byte from the escape itself.
            self.buf.push(byte as char);
        }
        self.buf.len() as u32
    }

    fn write_lowercased(&mut self, s: &str) -> u32 {
        for byte in s.bytes() {
            self.buf.push(byte.to_ascii_lowercase() as char);
        }
        self.buf.len() as u32
    }

    fn write_fmt_len(&mut self, args: fmt::Arguments<'_>) -> u32 {
        let _ = fmt::Write::write_fmt(&mut self.buf, args);
        self.buf.len() as u32
    }

    fn position(&self) -> u32 {
        self.buf.len() as u32
    }
}

/// Writes the IPv6 address in the standard's "compress the longest run of zeros" form, e.g.
/// `::1` or `2001:db8::ff00:42:8329`, without the surrounding brackets.
pub(crate) fn write_ipv6(sink: &mut impl Sink, address: &Ipv6Addr) {
    sink.write_fmt_len(format_args!("{}", address));
}

pub(crate) fn write_ipv4(sink: &mut impl Sink, address: &Ipv4Addr) {
    sink.write_fmt_len(format_args!("{}", address));
}
