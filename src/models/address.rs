//! IP address value type.
//!
//! An [`Address`] is only ever built from text that passed family-specific
//! validation (see [`crate::parser`]) or from raw binary of the right width.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family of an [`Address`] or a range descriptor.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum Family {
    V4,
    V6,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// An IPv4 or IPv6 address.
///
/// IPv4 is held as a host-order `u32` whose numeric value equals the
/// network-order dotted quad. IPv6 is held as 16 big-endian bytes, so the
/// derived byte-wise ordering is the unsigned 128-bit numeric ordering.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub enum Address {
    V4(u32),
    V6([u8; 16]),
}

impl Address {
    /// Family of this address.
    pub fn family(&self) -> Family {
        match self {
            Address::V4(_) => Family::V4,
            Address::V6(_) => Family::V6,
        }
    }

    pub fn is_v4(&self) -> bool {
        self.family() == Family::V4
    }

    pub fn is_v6(&self) -> bool {
        self.family() == Family::V6
    }

    /// Convert to the standard library representation.
    pub fn to_ip_addr(&self) -> IpAddr {
        match *self {
            Address::V4(bits) => IpAddr::V4(Ipv4Addr::from(bits)),
            Address::V6(bytes) => IpAddr::V6(Ipv6Addr::from(bytes)),
        }
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Address::V4(u32::from(v4)),
            IpAddr::V6(v6) => Address::V6(v6.octets()),
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::V4(u32::from(ip))
    }
}

/// IPv4 prints as a dotted quad, IPv6 in its compressed canonical form.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Address::V4(bits) => write!(f, "{}", Ipv4Addr::from(*bits)),
            Address::V6(bytes) => write!(f, "{}", crate::engine::ipv6::compress(bytes)),
        }
    }
}
