//! IPv6 mask arithmetic, range matching and canonical text forms.
//!
//! Addresses are 16 big-endian bytes. Masking and comparison are byte-wise,
//! which for this layout is the same as unsigned 128-bit arithmetic.

use crate::models::{Address, Prefix, RangeDescriptor};
use crate::parser;
use regex::Regex;
use std::sync::OnceLock;

/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH: u8 = 128;

/// Number of groups in a full address.
const HEXTETS: usize = 8;

static FRAGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_fragment_regex() -> &'static Regex {
    FRAGMENT_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9A-Fa-f]{1,4}(:[0-9A-Fa-f]{1,4})*$").expect("Invalid Regex")
    })
}

/// Build a 128-bit mask with `len` leading one-bits.
///
/// # Panics
/// * If `len` is greater than 128. Callers validate prefix lengths first.
pub fn cidr_to_mask(len: u8) -> [u8; 16] {
    assert!(len <= MAX_LENGTH, "IPv6 prefix length {len} exceeds {MAX_LENGTH}");
    let mut mask = [0u8; 16];
    let full = (len / 8) as usize;
    for byte in mask.iter_mut().take(full) {
        *byte = 0xff;
    }
    let rest = len % 8;
    if rest > 0 {
        mask[full] = 0xffu8 << (8 - rest);
    }
    mask
}

/// Byte-wise AND of `addr` and the mask for `len`: the network address.
pub fn netmask(addr: &[u8; 16], len: u8) -> [u8; 16] {
    let mask = cidr_to_mask(len);
    std::array::from_fn(|i| addr[i] & mask[i])
}

/// Highest address in the network of `addr` for prefix length `len`.
pub fn last_addr(addr: &[u8; 16], len: u8) -> [u8; 16] {
    let mask = cidr_to_mask(len);
    std::array::from_fn(|i| addr[i] | !mask[i])
}

/// Test one IPv6 address against one descriptor.
///
/// Descriptors of the other family never match.
pub fn match_range(addr: &[u8; 16], descriptor: &RangeDescriptor) -> bool {
    match descriptor {
        RangeDescriptor::MatchAll => true,
        RangeDescriptor::Cidr {
            base: Address::V6(base),
            prefix: Prefix::Len(len),
        } => {
            if !(1..=MAX_LENGTH).contains(len) {
                log::debug!("IPv6 prefix /{len} out of range, skipping");
                return false;
            }
            netmask(addr, *len) == netmask(base, *len)
        }
        RangeDescriptor::DashRange {
            low: Address::V6(low),
            high: Address::V6(high),
        } => low <= addr && addr <= high,
        RangeDescriptor::Single(Address::V6(single)) => addr == single,
        _ => false,
    }
}

/// Fully expanded form, 8 groups of 4 hex digits.
pub fn expand(addr: &[u8; 16]) -> String {
    parser::expand_v6(addr)
}

fn hextets(addr: &[u8; 16]) -> [u16; 8] {
    let mut groups = [0u16; HEXTETS];
    for (i, group) in groups.iter_mut().enumerate() {
        *group = u16::from_be_bytes([addr[i * 2], addr[i * 2 + 1]]);
    }
    groups
}

/// Replace the longest run of zero groups with `::`.
///
/// Ties go to the earliest run: `best` only moves on a strictly longer run.
/// A run of one group is still compressed.
fn compress_groups(groups: &[u16]) -> String {
    let (mut best_start, mut best_len) = (0usize, 0usize);
    let (mut run_start, mut run_len) = (0usize, 0usize);
    for (i, group) in groups.iter().enumerate() {
        if *group == 0 {
            if run_len == 0 {
                run_start = i;
            }
            run_len += 1;
            if run_len > best_len {
                best_start = run_start;
                best_len = run_len;
            }
        } else {
            run_len = 0;
        }
    }

    let text: Vec<String> = groups.iter().map(|g| format!("{g:x}")).collect();
    if best_len == 0 {
        return text.join(":");
    }
    format!(
        "{}::{}",
        text[..best_start].join(":"),
        text[best_start + best_len..].join(":")
    )
}

/// Compressed canonical form of a full address.
pub fn compress(addr: &[u8; 16]) -> String {
    compress_groups(&hextets(addr))
}

/// Compress a partial address such as `2001:0db8:0000:0000`.
///
/// The group count comes from the text instead of being fixed at 8; `::` is
/// not accepted in the input.
pub fn compress_fragment(fragment: &str) -> Option<String> {
    if !get_fragment_regex().is_match(fragment) {
        return None;
    }
    let groups: Vec<u16> = fragment
        .split(':')
        .map(|g| u16::from_str_radix(g, 16))
        .collect::<Result<_, _>>()
        .ok()?;
    if groups.len() > HEXTETS {
        return None;
    }
    Some(compress_groups(&groups))
}

/// The /64 routing prefix: first 4 expanded groups.
pub fn network_prefix(addr: &[u8; 16]) -> String {
    let expanded = expand(addr);
    expanded.split(':').take(4).collect::<Vec<&str>>().join(":")
}

/// The interface identifier: last 4 expanded groups.
pub fn interface_identifier(addr: &[u8; 16]) -> String {
    let expanded = expand(addr);
    expanded.split(':').skip(4).collect::<Vec<&str>>().join(":")
}

/// Raw 16-byte form. IPv4 addresses come out IPv4-mapped (`::ffff:a.b.c.d`).
pub fn to_binary(addr: &Address) -> [u8; 16] {
    match addr {
        Address::V6(bytes) => *bytes,
        Address::V4(bits) => {
            let mut bytes = [0u8; 16];
            bytes[10] = 0xff;
            bytes[11] = 0xff;
            bytes[12..].copy_from_slice(&bits.to_be_bytes());
            bytes
        }
    }
}

/// Build an IPv6 address from raw bytes; `None` unless exactly 16 bytes.
pub fn from_binary(bytes: &[u8]) -> Option<Address> {
    match <[u8; 16]>::try_from(bytes) {
        Ok(array) => Some(Address::V6(array)),
        Err(_) => {
            log::error!(
                "from_binary called with {} bytes, IPv6 needs exactly 16",
                bytes.len()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::classify;

    fn v6(s: &str) -> [u8; 16] {
        match parser::parse_v6(s) {
            Some(Address::V6(bytes)) => bytes,
            _ => panic!("bad test address {s}"),
        }
    }

    fn matches(addr: &str, spec: &str) -> bool {
        let d = classify(spec).unwrap_or_else(|| panic!("spec {spec} should classify"));
        match_range(&v6(addr), &d)
    }

    #[test]
    fn test_cidr_to_mask() {
        assert_eq!(cidr_to_mask(0), [0u8; 16]);
        assert_eq!(cidr_to_mask(128), [0xffu8; 16]);
        let m = cidr_to_mask(12);
        assert_eq!(&m[..3], &[0xff, 0xf0, 0x00]);
        let m = cidr_to_mask(64);
        assert!(m[..8].iter().all(|b| *b == 0xff));
        assert!(m[8..].iter().all(|b| *b == 0));
        assert_eq!(cidr_to_mask(127)[15], 0xfe);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_cidr_to_mask_too_long() {
        cidr_to_mask(129);
    }

    #[test]
    fn test_netmask_and_last() {
        let addr = v6("2001:db8:abcd:12::1");
        assert_eq!(netmask(&addr, 48), v6("2001:db8:abcd::"));
        assert_eq!(
            last_addr(&addr, 48),
            v6("2001:db8:abcd:ffff:ffff:ffff:ffff:ffff")
        );
        // Partial byte: /52 cuts the fourth group in half
        assert_eq!(netmask(&v6("2001:db8:abcd:1fff::1"), 52), v6("2001:db8:abcd:1000::"));
        assert_eq!(
            last_addr(&v6("2001:db8:abcd:1000::"), 52),
            v6("2001:db8:abcd:1fff:ffff:ffff:ffff:ffff")
        );
        assert_eq!(netmask(&addr, 128), addr);
        assert_eq!(last_addr(&addr, 128), addr);
    }

    #[test]
    fn test_match_cidr() {
        assert!(matches("2001:db8::1", "2001:db8::/32"));
        assert!(matches("2001:db8:ffff::1", "2001:db8::/32"));
        assert!(!matches("2001:db9::1", "2001:db8::/32"));
        assert!(matches("::1", "::1/128"));
        assert!(!matches("::2", "::1/128"));
        assert!(matches("8000::", "8000::/1"));
        assert!(!matches("7fff::", "8000::/1"));
    }

    #[test]
    fn test_match_cidr_bad_prefix() {
        for len in [0u8, 129, 200] {
            let d = RangeDescriptor::Cidr {
                base: Address::V6([0; 16]),
                prefix: Prefix::Len(len),
            };
            assert!(!match_range(&v6("::1"), &d), "prefix /{len} must not match");
        }
    }

    #[test]
    fn test_match_dash_range() {
        assert!(matches("::5", "::1-::ff"));
        assert!(matches("::ff", "::1-::ff"));
        assert!(!matches("::100", "::1-::ff"));
        // High bit set, compared unsigned
        assert!(matches("ffff::1", "8000::-ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"));
        assert!(!matches("7fff::1", "8000::-ffff::"));
    }

    #[test]
    fn test_match_single_and_all() {
        assert!(matches("fe80::1", "fe80::1"));
        assert!(matches("fe80::1", "FE80:0:0:0:0:0:0:1"));
        assert!(!matches("fe80::2", "fe80::1"));
        assert!(match_range(&v6("::"), &RangeDescriptor::MatchAll));
    }

    #[test]
    fn test_other_family_skipped() {
        assert!(!matches("::1", "0.0.0.0/1"));
        assert!(!matches("::1", "1.2.3.*"));
        assert!(!matches("::1", "0.0.0.0-255.255.255.255"));
    }

    #[test]
    fn test_compress() {
        assert_eq!(compress(&v6("2001:0:0:1:0:0:0:1")), "2001:0:0:1::1");
        assert_eq!(compress(&v6("2001:db8:0:0:1:0:0:1")), "2001:db8::1:0:0:1");
        assert_eq!(compress(&v6("0:0:0:0:0:0:0:0")), "::");
        assert_eq!(compress(&v6("0:0:0:0:0:0:0:1")), "::1");
        assert_eq!(compress(&v6("1:0:0:0:0:0:0:0")), "1::");
        assert_eq!(compress(&v6("0:0:1:2:3:4:0:0")), "::1:2:3:4:0:0");
        assert_eq!(compress(&v6("1:2:3:4:5:6:7:8")), "1:2:3:4:5:6:7:8");
        assert_eq!(compress(&v6("1:0:2:3:4:5:6:7")), "1::2:3:4:5:6:7");
        assert_eq!(compress(&v6("1:2:3:4:5:6:7:0")), "1:2:3:4:5:6:7::");
        assert_eq!(
            compress(&v6("2001:0DB8:0000:0000:0000:FF00:0042:8329")),
            "2001:db8::ff00:42:8329"
        );
    }

    #[test]
    fn test_compress_round_trip() {
        for text in [
            "::",
            "::1",
            "1::",
            "2001:db8::1",
            "2001:0:0:1:0:0:0:1",
            "fe80::1:0:0:0",
            "::ffff:192.0.2.1",
            "1:2:3:4:5:6:7:8",
            "0:1:0:1:0:1:0:1",
        ] {
            let expanded = expand(&v6(text));
            let compressed = compress(&v6(&expanded));
            assert_eq!(expand(&v6(&compressed)), expanded, "round trip of {text}");
            assert_eq!(compress(&v6(&compressed)), compressed, "idempotence of {text}");
        }
    }

    #[test]
    fn test_compress_fragment() {
        assert_eq!(compress_fragment("2001:0db8:0000:0000").as_deref(), Some("2001:db8::"));
        assert_eq!(compress_fragment("0000:0001").as_deref(), Some("::1"));
        assert_eq!(compress_fragment("fe80").as_deref(), Some("fe80"));
        assert_eq!(compress_fragment("0").as_deref(), Some("::"));
        assert_eq!(compress_fragment("2001::1"), None);
        assert_eq!(compress_fragment("1:2:3:4:5:6:7:8:9"), None);
        assert_eq!(compress_fragment(""), None);
    }

    #[test]
    fn test_prefix_and_interface_id() {
        let addr = v6("2001:db8:85a3::8a2e:370:7334");
        assert_eq!(network_prefix(&addr), "2001:0db8:85a3:0000");
        assert_eq!(interface_identifier(&addr), "0000:8a2e:0370:7334");
    }

    #[test]
    fn test_binary() {
        let addr = Address::V6(v6("2001:db8::1"));
        let bytes = to_binary(&addr);
        assert_eq!(from_binary(&bytes), Some(addr));
        assert_eq!(from_binary(&[0u8; 15]), None);
        assert_eq!(from_binary(&[0u8; 17]), None);

        let mapped = to_binary(&Address::V4(0xC000_0201));
        assert_eq!(mapped, v6("::ffff:192.0.2.1"));
    }
}
