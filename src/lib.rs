//! IP address range matching and canonicalisation.
//!
//! Decides whether an IPv4 or IPv6 address (in the textual shapes found in
//! peer addresses and forwarding headers) falls inside any of an ordered list
//! of range specs, and converts addresses between canonical text forms.
//!
//! Every function is a pure function of its arguments. Malformed input is
//! reported as `false`/`None`, never as an error, so access-control callers
//! fail closed.
//!
//! ```
//! let result = ip_range_match::match_any("::ffff:192.0.2.1", &["10.0.0.0/8", "192.0.2.0/24"]);
//! assert!(result.matched);
//! assert_eq!(result.index, Some(1));
//! ```

pub mod config;
pub mod engine;
pub mod matcher;
pub mod models;
pub mod output;
pub mod parser;
pub mod resolver;

pub use matcher::{classify, is_in_range, RangeList};
pub use models::{Address, Family, MatchResult, Prefix, RangeDescriptor};
pub use resolver::{forward_confirmed, HostnameResolver};

/// True when `text` (after trimming decoration) is an IPv4 or IPv6 address.
pub fn is_valid_address(text: &str) -> bool {
    parser::parse(parser::trim(text)).is_some()
}

/// Fully expanded form.
///
/// IPv4 follows [`parser::expand_v4`], so `10.1` becomes `10.1.0.0`. IPv6
/// becomes 8 groups of 4 hex digits.
pub fn canonicalize(text: &str) -> Option<String> {
    let trimmed = parser::trim(text);
    if !trimmed.contains(':') {
        return parser::expand_v4(trimmed);
    }
    match parser::parse_v6(trimmed)? {
        Address::V6(bytes) => Some(engine::ipv6::expand(&bytes)),
        Address::V4(_) => None,
    }
}

/// Compressed form: IPv6 with its longest zero run as `::`, IPv4 as a plain dotted quad.
pub fn compress(text: &str) -> Option<String> {
    parser::parse(parser::trim(text)).map(|addr| addr.to_string())
}

/// Test `text` against raw range specs in order; see [`RangeList`] for reuse.
pub fn match_any<S: AsRef<str>>(text: &str, specs: &[S]) -> MatchResult {
    RangeList::parse(specs).is_in_range(text)
}

fn v6_bytes(text: &str) -> Option<[u8; 16]> {
    match parser::parse_v6(parser::trim(text))? {
        Address::V6(bytes) => Some(bytes),
        Address::V4(_) => None,
    }
}

/// The /64 routing prefix of an IPv6 address, `None` for IPv4.
pub fn network_prefix(text: &str) -> Option<String> {
    v6_bytes(text).map(|bytes| engine::ipv6::network_prefix(&bytes))
}

/// The 64-bit interface identifier of an IPv6 address, `None` for IPv4.
pub fn interface_identifier(text: &str) -> Option<String> {
    v6_bytes(text).map(|bytes| engine::ipv6::interface_identifier(&bytes))
}
