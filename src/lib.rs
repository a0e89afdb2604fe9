// Copyright 2013-2024 Simon Sapin and contributors.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An implementation of the [URL Living Standard](https://url.spec.whatwg.org/) for the Rust
//! programming language.
//!
//! ```
//! use whatwg_url::Url;
//!
//! let base = Url::parse("https://example.net/rust-url/").unwrap();
//! let joined = base.join("../main.css").unwrap();
//! assert_eq!(joined.as_str(), "https://example.net/main.css");
//! ```
//!
//! # Crate features
//!
//! This crate is `#![no_std]` at its core: `ascii`, `encode_set`, `error`, and `scheme` build
//! with neither `std` nor `alloc`. Everything that needs to own a string — host and path
//! parsing, the `Url` type itself, `form_urlencoded` — is gated behind the `alloc` feature,
//! which `std` (the default) pulls in automatically. Building with `no_std_net` instead of
//! `std` swaps [`net::Ipv4Addr`]/[`net::Ipv6Addr`] for the `no-std-net` crate's types so a
//! `no_std` build still has somewhere to put a parsed IP address.
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod ascii;
mod encode_set;
mod error;
mod net;
mod scheme;

#[cfg(feature = "alloc")]
mod host;
#[cfg(feature = "alloc")]
mod path;
#[cfg(feature = "alloc")]
mod parser;
#[cfg(feature = "alloc")]
mod url;
#[cfg(feature = "alloc")]
mod writer;

#[cfg(feature = "alloc")]
pub mod form_urlencoded;

pub use crate::error::{ParseError, SyntaxViolation};
pub use crate::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[cfg(feature = "alloc")]
pub use crate::host::Host;
#[cfg(feature = "alloc")]
pub use crate::url::{HostRef, ParseOptions, Url, UrlQuery};
