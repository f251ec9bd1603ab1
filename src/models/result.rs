//! Outcome of matching one address against an ordered range list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an address matched, and which descriptor matched first.
///
/// `index` is the position in the caller-supplied list, `None` on a miss.
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Copy, Clone, Default)]
pub struct MatchResult {
    pub matched: bool,
    pub index: Option<usize>,
}

impl MatchResult {
    /// First match at position `index`.
    pub fn hit(index: usize) -> Self {
        MatchResult {
            matched: true,
            index: Some(index),
        }
    }

    /// No descriptor matched, or the address could not be classified.
    pub fn miss() -> Self {
        MatchResult::default()
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "match #{i}"),
            None => write!(f, "no match"),
        }
    }
}
