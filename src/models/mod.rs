//! Value types shared by the parser, the engines and the matcher.
//!
//! - [`Address`] - a validated IPv4 or IPv6 address
//! - [`RangeDescriptor`] - one classified range spec
//! - [`MatchResult`] - outcome of a match call

mod address;
mod descriptor;
mod result;

// Re-export public types
pub use address::{Address, Family};
pub use descriptor::{Prefix, RangeDescriptor};
pub use result::MatchResult;
