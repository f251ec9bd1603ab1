//! Textual address handling.
//!
//! - [`trim`] - strips transport decoration (quotes, ports, brackets)
//! - [`address`] - family validation, parsing and expansion

mod address;
mod trim;

pub use address::{expand_v4, expand_v6, is_ipv4_mapped_v6, parse, parse_v4, parse_v6};
pub use trim::trim;
