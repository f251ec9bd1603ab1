//! Family-specific arithmetic and range matching.
//!
//! - [`ipv4`] - 32-bit masks, wildcard bounds and the IPv4 match strategies
//! - [`ipv6`] - 128-bit byte-wise masks, compression and the IPv6 match strategies

pub mod ipv4;
pub mod ipv6;
