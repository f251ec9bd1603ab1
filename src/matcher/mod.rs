//! Family-dispatching range matcher.
//!
//! - [`classify`] - turns a textual spec into a [`RangeDescriptor`]
//! - [`is_in_range`] - first-match search over classified descriptors
//! - [`RangeList`] - a pre-classified, reusable list of specs

mod classify;

pub use classify::classify;

use crate::engine::{ipv4, ipv6};
use crate::models::{Address, Family, MatchResult, RangeDescriptor};
use crate::parser;
use serde::Deserialize;

fn descriptor_matches(addr: &Address, descriptor: &RangeDescriptor) -> bool {
    match addr {
        Address::V4(bits) => ipv4::match_range(*bits, descriptor),
        Address::V6(bytes) => ipv6::match_range(bytes, descriptor),
    }
}

/// Shared first-match search. `descriptors` yields `(caller index, descriptor)`.
fn first_match<'a, I>(raw_addr: &str, descriptors: I) -> MatchResult
where
    I: Iterator<Item = (usize, &'a RangeDescriptor)> + Clone,
{
    let trimmed = parser::trim(raw_addr);
    let addr = match parser::parse(trimmed) {
        Some(addr) => addr,
        None => {
            log::debug!("'{trimmed}' is not an IP address, no match");
            return MatchResult::miss();
        }
    };

    if let Some((i, _)) = descriptors
        .clone()
        .find(|(_, d)| descriptor_matches(&addr, d))
    {
        log::trace!("{addr} matched descriptor #{i}");
        return MatchResult::hit(i);
    }

    // IPv4-mapped clients still match a plain IPv4 allow-list
    if let Some(v4) = parser::is_ipv4_mapped_v6(&addr) {
        if let Some((i, _)) = descriptors
            .filter(|(_, d)| d.family() == Some(Family::V4))
            .find(|(_, d)| descriptor_matches(&v4, d))
        {
            log::trace!("{addr} matched descriptor #{i} as {v4}");
            return MatchResult::hit(i);
        }
    }

    MatchResult::miss()
}

/// Test a raw address value against descriptors in order.
///
/// `raw_addr` may carry transport decoration (quotes, port, brackets).
/// Text that is neither IPv4 nor IPv6 never matches, even against `*`.
pub fn is_in_range(raw_addr: &str, descriptors: &[RangeDescriptor]) -> MatchResult {
    first_match(raw_addr, descriptors.iter().enumerate())
}

/// Classified range specs, keeping the caller's positions.
///
/// Specs that do not classify stay as empty slots so reported indices line
/// up with the original list. Build once, match many times.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "Vec<String>")]
pub struct RangeList {
    entries: Vec<Option<RangeDescriptor>>,
}

impl RangeList {
    /// Classify every spec in order.
    pub fn parse<I, S>(specs: I) -> RangeList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = specs
            .into_iter()
            .map(|spec| {
                let descriptor = classify(spec.as_ref());
                if descriptor.is_none() {
                    log::warn!("Ignoring invalid range spec '{}'", spec.as_ref());
                }
                descriptor
            })
            .collect();
        RangeList { entries }
    }

    /// Number of specs, including the ones that did not classify.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptor at caller position `index`, `None` for invalid or out of range.
    pub fn get(&self, index: usize) -> Option<&RangeDescriptor> {
        self.entries.get(index).and_then(|d| d.as_ref())
    }

    /// Valid descriptors with their caller positions.
    pub fn descriptors(&self) -> impl Iterator<Item = (usize, &RangeDescriptor)> + Clone {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|d| (i, d)))
    }

    /// Test a raw address value, see [`is_in_range`].
    pub fn is_in_range(&self, raw_addr: &str) -> MatchResult {
        first_match(raw_addr, self.descriptors())
    }
}

impl From<Vec<String>> for RangeList {
    fn from(specs: Vec<String>) -> Self {
        RangeList::parse(specs)
    }
}
