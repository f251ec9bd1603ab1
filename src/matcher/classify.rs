//! Classify a textual range spec into a [`RangeDescriptor`].
//!
//! Precedence: `*` alone, then `/` (CIDR), then `*` (wildcard), then `-`
//! (dash range), then a single address. Anything else is `None` and the
//! caller skips it.

use crate::engine::{ipv4, ipv6};
use crate::models::{Address, Prefix, RangeDescriptor};
use crate::parser;
use regex::Regex;
use std::sync::OnceLock;

/// IPv4 wildcard spec, 1 to 4 octets each a decimal or `*`.
static WILDCARD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_wildcard_regex() -> &'static Regex {
    WILDCARD_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{1,3}|\*)(\.(\d{1,3}|\*)){0,3}$").expect("Invalid Regex")
    })
}

/// Classify one spec. Surrounding whitespace is ignored.
pub fn classify(spec: &str) -> Option<RangeDescriptor> {
    let spec = spec.trim();
    if spec == "*" {
        log::warn!("Range spec '*' accepts every address");
        return Some(RangeDescriptor::MatchAll);
    }

    let descriptor = if let Some((base, prefix)) = spec.split_once('/') {
        classify_cidr(base.trim(), prefix.trim())
    } else if spec.contains('*') {
        classify_wildcard(spec)
    } else if let Some((low, high)) = spec.split_once('-') {
        classify_dash(low.trim(), high.trim())
    } else {
        parser::parse(spec).map(RangeDescriptor::Single)
    };

    if descriptor.is_none() {
        log::debug!("Unrecognised range spec '{spec}', skipping");
    }
    descriptor
}

fn parse_prefix_len(prefix: &str, max: u8) -> Option<u8> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let len = prefix.parse::<u8>().ok()?;
    (1..=max).contains(&len).then_some(len)
}

fn classify_cidr(base: &str, prefix: &str) -> Option<RangeDescriptor> {
    if base.contains(':') {
        let base = parse_v6_base(base)?;
        let len = parse_prefix_len(prefix, ipv6::MAX_LENGTH)?;
        return Some(RangeDescriptor::Cidr {
            base,
            prefix: Prefix::Len(len),
        });
    }

    // Short IPv4 bases gain trailing zero octets
    let base = parser::parse_v4(&parser::expand_v4(base)?)?;
    let prefix = if prefix.contains('.') {
        // Non-standard: '*' in a netmask reads as a zero octet
        let mask = parser::expand_v4(&prefix.replace('*', "0"))?;
        match parser::parse_v4(&mask)? {
            Address::V4(mask) => Prefix::Mask(mask),
            Address::V6(_) => return None,
        }
    } else {
        Prefix::Len(parse_prefix_len(prefix, ipv4::MAX_LENGTH)?)
    };
    Some(RangeDescriptor::Cidr { base, prefix })
}

/// IPv6 CIDR base. A partial base like `2001:db8` (no `::`) gets zero groups appended.
fn parse_v6_base(base: &str) -> Option<Address> {
    if let Some(addr) = parser::parse_v6(base) {
        return Some(addr);
    }
    if base.contains("::") {
        return None;
    }
    let canonical = ipv6::compress_fragment(base)?;
    let groups = base.split(':').count();
    if groups >= 8 {
        return None;
    }
    log::debug!("Padding partial IPv6 base '{canonical}' with {} zero groups", 8 - groups);
    parser::parse_v6(&format!("{base}{}", ":0".repeat(8 - groups)))
}

/// `1.2.3.*` style spec. Missing trailing octets count as `*`.
fn classify_wildcard(spec: &str) -> Option<RangeDescriptor> {
    if !get_wildcard_regex().is_match(spec) {
        return None;
    }
    let mut octets = [None; 4];
    for (i, part) in spec.split('.').enumerate() {
        if part != "*" {
            octets[i] = Some(part.parse::<u8>().ok()?);
        }
    }
    Some(RangeDescriptor::Wildcard(octets))
}

fn classify_dash(low: &str, high: &str) -> Option<RangeDescriptor> {
    let low = parser::parse(low)?;
    let high = parser::parse(high)?;
    if low.family() != high.family() {
        log::debug!("Dash range mixes {} and {}", low.family(), high.family());
        return None;
    }
    Some(RangeDescriptor::DashRange { low, high })
}
