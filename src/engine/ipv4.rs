//! IPv4 mask arithmetic and range matching.
//!
//! Addresses are plain `u32` values; every comparison is unsigned.

use crate::models::{Address, Prefix, RangeDescriptor};

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a netmask.
///
/// # Examples
/// ```
/// use ip_range_match::engine::ipv4::cidr_to_mask;
/// assert_eq!(cidr_to_mask(24), 0xFFFFFF00);
/// ```
///
/// # Panics
/// * If `len` is greater than 32. Callers validate prefix lengths first.
pub fn cidr_to_mask(len: u8) -> u32 {
    assert!(len <= MAX_LENGTH, "IPv4 prefix length {len} exceeds {MAX_LENGTH}");
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    let mask = (all_bits >> right_len) << right_len;
    mask as u32
}

/// Network address of `addr` for prefix length `len`.
pub fn network_addr(addr: u32, len: u8) -> u32 {
    addr & cidr_to_mask(len)
}

/// Broadcast (highest) address of `addr` for prefix length `len`.
pub fn broadcast_addr(addr: u32, len: u8) -> u32 {
    let mask = cidr_to_mask(len);
    (addr & mask) | !mask
}

/// Inclusive bounds of a wildcard: `*` is `0` for the low bound and `255` for the high.
pub fn wildcard_bounds(octets: &[Option<u8>; 4]) -> (u32, u32) {
    let mut lo: u32 = 0;
    let mut hi: u32 = 0;
    for octet in octets {
        lo = (lo << 8) | octet.unwrap_or(0) as u32;
        hi = (hi << 8) | octet.unwrap_or(255) as u32;
    }
    (lo, hi)
}

fn masked_eq(addr: u32, base: u32, mask: u32) -> bool {
    addr & mask == base & mask
}

/// Test one IPv4 address against one descriptor.
///
/// Descriptors of the other family never match.
pub fn match_range(addr: u32, descriptor: &RangeDescriptor) -> bool {
    match *descriptor {
        RangeDescriptor::MatchAll => true,
        RangeDescriptor::Wildcard(octets) => {
            let (lo, hi) = wildcard_bounds(&octets);
            lo <= addr && addr <= hi
        }
        RangeDescriptor::Cidr {
            base: Address::V4(base),
            prefix: Prefix::Len(len),
        } => {
            if !(1..=MAX_LENGTH).contains(&len) {
                log::debug!("IPv4 prefix /{len} out of range, skipping");
                return false;
            }
            masked_eq(addr, base, cidr_to_mask(len))
        }
        RangeDescriptor::Cidr {
            base: Address::V4(base),
            prefix: Prefix::Mask(mask),
        } => masked_eq(addr, base, mask),
        RangeDescriptor::DashRange {
            low: Address::V4(low),
            high: Address::V4(high),
        } => low <= addr && addr <= high,
        RangeDescriptor::Single(Address::V4(single)) => addr == single,
        _ => false,
    }
}
