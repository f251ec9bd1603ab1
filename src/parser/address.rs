//! Family validation, parsing and expansion of textual addresses.
//!
//! Every function here is total: malformed input yields `None`.

use crate::models::Address;
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// One IPv6 group, 1 to 4 hex digits.
static HEXTET_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_hextet_regex() -> &'static Regex {
    HEXTET_REGEX.get_or_init(|| Regex::new(r"^[0-9A-Fa-f]{1,4}$").expect("Invalid Regex"))
}

/// Parse one decimal octet for `expand_v4`. Empty counts as `0`, leading zeros stay decimal.
fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() {
        return Some(0);
    }
    if part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u8>().ok()
}

/// Strict dotted quad. Only text that renders back unchanged is accepted,
/// so empty octets and leading zeros are rejected.
fn parse_dotted_quad(s: &str) -> Option<u32> {
    let addr = s.parse::<Ipv4Addr>().ok()?;
    if addr.to_string() != s {
        return None;
    }
    Some(u32::from(addr))
}

/// Parse an IPv4 literal: no colon, exactly 3 dots, canonical decimal octets 0-255.
pub fn parse_v4(s: &str) -> Option<Address> {
    if s.contains(':') || s.matches('.').count() != 3 {
        return None;
    }
    parse_dotted_quad(s).map(Address::V4)
}

/// Canonical 4-octet form: missing trailing octets become `0`, leading zeros go.
///
/// `expand_v4("10.1")` is `Some("10.1.0.0")`. Fails on any colon.
pub fn expand_v4(s: &str) -> Option<String> {
    if s.is_empty() || s.contains(':') {
        return None;
    }
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() > 4 {
        return None;
    }
    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        octets[i] = parse_octet(part)?;
    }
    Some(format!(
        "{}.{}.{}.{}",
        octets[0], octets[1], octets[2], octets[3]
    ))
}

/// Parse colon separated groups. The last one may be a dotted quad when `v4_tail`.
fn parse_groups(part: &str, v4_tail: bool) -> Option<Vec<u16>> {
    if part.is_empty() {
        return Some(Vec::new());
    }
    let segments: Vec<&str> = part.split(':').collect();
    let last = segments.len() - 1;
    let mut groups = Vec::with_capacity(segments.len() + 1);
    for (i, seg) in segments.iter().enumerate() {
        if i == last && v4_tail && seg.contains('.') {
            let bits = parse_dotted_quad(seg)?;
            groups.push((bits >> 16) as u16);
            groups.push((bits & 0xffff) as u16);
        } else if get_hextet_regex().is_match(seg) {
            groups.push(u16::from_str_radix(seg, 16).ok()?);
        } else {
            return None;
        }
    }
    Some(groups)
}

/// Parse an IPv6 literal into 16 big-endian bytes.
///
/// Accepts at most one `::` and an optional dotted-quad tail, so both
/// `::ffff:192.0.2.1` and `0000:0000:0000:0000:0000:ffff:192.0.2.1` parse.
pub fn parse_v6(s: &str) -> Option<Address> {
    if !s.contains(':') {
        return None;
    }
    let groups = match s.split_once("::") {
        Some((head, tail)) => {
            if tail.contains("::") {
                return None;
            }
            let head = parse_groups(head, false)?;
            let tail = parse_groups(tail, true)?;
            if head.len() + tail.len() > 7 {
                return None;
            }
            let mut groups = head;
            groups.resize(8 - tail.len(), 0);
            groups.extend(tail);
            groups
        }
        None => {
            let groups = parse_groups(s, true)?;
            if groups.len() != 8 {
                return None;
            }
            groups
        }
    };

    let mut bytes = [0u8; 16];
    for (i, group) in groups.iter().enumerate() {
        bytes[i * 2..i * 2 + 2].copy_from_slice(&group.to_be_bytes());
    }
    Some(Address::V6(bytes))
}

/// Parse either family, IPv4 first. No trimming is done here.
pub fn parse(s: &str) -> Option<Address> {
    parse_v4(s).or_else(|| parse_v6(s))
}

/// Embedded IPv4 of an IPv4-mapped IPv6 address (`::ffff:a.b.c.d`).
///
/// High 80 bits must be zero and the next 16 bits all one.
pub fn is_ipv4_mapped_v6(addr: &Address) -> Option<Address> {
    match addr {
        Address::V6(bytes)
            if bytes[..10].iter().all(|b| *b == 0) && bytes[10..12] == [0xff, 0xff] =>
        {
            Some(Address::V4(u32::from_be_bytes([
                bytes[12], bytes[13], bytes[14], bytes[15],
            ])))
        }
        _ => None,
    }
}

/// Fully expanded form: 8 groups of 4 lowercase hex digits, no `::`.
pub fn expand_v6(bytes: &[u8; 16]) -> String {
    bytes
        .chunks(2)
        .map(|pair| format!("{:02x}{:02x}", pair[0], pair[1]))
        .collect::<Vec<String>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v6(s: &str) -> [u8; 16] {
        match parse_v6(s) {
            Some(Address::V6(bytes)) => bytes,
            other => panic!("expected IPv6 for {s}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_v4() {
        assert_eq!(parse_v4("192.168.1.1"), Some(Address::V4(0xC0A8_0101)));
        assert_eq!(parse_v4("0.0.0.0"), Some(Address::V4(0)));
        assert_eq!(parse_v4("255.255.255.255"), Some(Address::V4(u32::MAX)));
    }

    #[test]
    fn test_parse_v4_requires_canonical_text() {
        for bad in ["...", "1.2.3.", ".1.2.3", "10..0.1", "010.0.0.1", "1.2.3.01", "1.2.3.00"] {
            assert_eq!(parse_v4(bad), None, "{bad} does not render back unchanged");
        }
        // The same text is still padded by expand_v4
        assert_eq!(expand_v4("10..0.1").as_deref(), Some("10.0.0.1"));
        assert_eq!(expand_v4("010.0.0.1").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_parse_v4_rejects() {
        for bad in [
            "256.0.0.1",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.4:80",
            "a.b.c.d",
            "1.2.3.-4",
            "1.2.3.+4",
            "1.2.3.0004",
            "::1",
            "",
        ] {
            assert_eq!(parse_v4(bad), None, "{bad} should not parse as IPv4");
        }
    }

    #[test]
    fn test_expand_v4() {
        assert_eq!(expand_v4("10.1").as_deref(), Some("10.1.0.0"));
        assert_eq!(expand_v4("10").as_deref(), Some("10.0.0.0"));
        assert_eq!(expand_v4("010.001.02.3").as_deref(), Some("10.1.2.3"));
        assert_eq!(expand_v4("1.2.3.4").as_deref(), Some("1.2.3.4"));
        assert_eq!(expand_v4("::1"), None);
        assert_eq!(expand_v4("1.2.3.4.5"), None);
        assert_eq!(expand_v4("1.2.300"), None);
        assert_eq!(expand_v4(""), None);
    }

    #[test]
    fn test_parse_v6() {
        let mut expected = [0u8; 16];
        expected[15] = 1;
        assert_eq!(v6("::1"), expected);
        assert_eq!(v6("0:0:0:0:0:0:0:1"), expected);
        assert_eq!(v6("::"), [0u8; 16]);

        let b = v6("2001:DB8::8:800:200C:417A");
        assert_eq!(&b[..4], &[0x20, 0x01, 0x0d, 0xb8]);
        assert_eq!(&b[12..], &[0x20, 0x0c, 0x41, 0x7a]);

        let b = v6("1::");
        assert_eq!(b[1], 1);
        assert!(b[2..].iter().all(|x| *x == 0));
    }

    #[test]
    fn test_parse_v6_rejects() {
        for bad in [
            "1::2::3",
            "1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:8:9",
            "12345::",
            ":1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:",
            "g::1",
            "1.2.3.4",
            "1:2:3:4:5:6:7::8",
            "::1.2.3",
            "1.2.3.4::",
            "",
        ] {
            assert_eq!(parse_v6(bad), None, "{bad} should not parse as IPv6");
        }
    }

    #[test]
    fn test_parse_v6_mapped() {
        let short = parse_v6("::ffff:192.0.2.1").unwrap();
        let long = parse_v6("0000:0000:0000:0000:0000:ffff:192.0.2.1").unwrap();
        assert_eq!(short, long);
        assert_eq!(is_ipv4_mapped_v6(&short), Some(Address::V4(0xC000_0201)));

        // IPv4-compatible (no ffff marker) is not mapped
        let compat = parse_v6("::192.0.2.1").unwrap();
        assert_eq!(is_ipv4_mapped_v6(&compat), None);
        assert_eq!(is_ipv4_mapped_v6(&Address::V4(1)), None);
    }

    #[test]
    fn test_parse_v6_dotted_tail_is_canonical() {
        for bad in ["::ffff:010.0.0.1", "::ffff:1..2.3", "::ffff:1.2.3.", "::ffff:...", "64:ff9b::1.2.03.4"] {
            assert_eq!(parse_v6(bad), None, "{bad} should not parse as IPv6");
        }
        assert!(parse_v6("::ffff:10.0.0.1").is_some());
    }

    #[test]
    fn test_parse_either() {
        assert!(parse("10.0.0.1").unwrap().is_v4());
        assert!(parse("fe80::1").unwrap().is_v6());
        assert_eq!(parse("not-an-ip"), None);
    }

    #[test]
    fn test_expand_v6() {
        assert_eq!(
            expand_v6(&v6("2001:db8::1")),
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
        assert_eq!(
            expand_v6(&v6("::ffff:1.2.3.4")),
            "0000:0000:0000:0000:0000:ffff:0102:0304"
        );
        let expanded = expand_v6(&v6("fe80::abcd"));
        assert_eq!(expand_v6(&v6(&expanded)), expanded);
    }
}
