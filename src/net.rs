//! IP address types, selected per build configuration. With `std` enabled we reuse
//! `std::net`; a `no_std` build falls back to the `no-std-net` crate (enabled by the
//! `no_std_net` feature) so the host parser never has to special-case its output type.

#[cfg(feature = "std")]
pub use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[cfg(all(not(feature = "std"), feature = "no_std_net"))]
pub use no_std_net::{IpAddr, Ipv4Addr, Ipv6Addr};
