//! Range descriptor model.
//!
//! A [`RangeDescriptor`] is the classified form of one textual range spec
//! such as `10.0.0.0/8`, `1.2.3.*`, `10.0.0.1-10.0.0.9` or `2001:db8::/32`.
//! Classification lives in [`crate::matcher::classify`].

use super::{Address, Family};
use crate::engine::{ipv4, ipv6};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Network part of a CIDR descriptor.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum Prefix {
    /// Number of leading one-bits, `a.b.c.d/24` or `2001:db8::/32`.
    Len(u8),
    /// Raw IPv4 netmask, `a.b.c.d/255.255.0.0`. Not required to be contiguous.
    Mask(u32),
}

/// One classified range spec.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum RangeDescriptor {
    /// `*`, accepts every valid address of either family.
    MatchAll,
    /// IPv4 octets where `None` stands for `*`, e.g. `1.2.3.*`.
    Wildcard([Option<u8>; 4]),
    Cidr { base: Address, prefix: Prefix },
    /// Inclusive interval `low-high`.
    DashRange { low: Address, high: Address },
    Single(Address),
}

impl RangeDescriptor {
    /// Family this descriptor can match, `None` for [`RangeDescriptor::MatchAll`].
    pub fn family(&self) -> Option<Family> {
        match self {
            RangeDescriptor::MatchAll => None,
            RangeDescriptor::Wildcard(_) => Some(Family::V4),
            RangeDescriptor::Cidr { base, .. } => Some(base.family()),
            RangeDescriptor::DashRange { low, .. } => Some(low.family()),
            RangeDescriptor::Single(addr) => Some(addr.family()),
        }
    }

    /// Inclusive `(low, high)` bounds covered by this descriptor.
    ///
    /// `None` for `MatchAll`, for non-contiguous netmasks, for invalid prefix
    /// lengths and for dash ranges mixing families.
    pub fn span(&self) -> Option<(Address, Address)> {
        match *self {
            RangeDescriptor::MatchAll => None,
            RangeDescriptor::Wildcard(octets) => {
                let (lo, hi) = ipv4::wildcard_bounds(&octets);
                Some((Address::V4(lo), Address::V4(hi)))
            }
            RangeDescriptor::Cidr {
                base: Address::V4(base),
                prefix,
            } => {
                let len = match prefix {
                    Prefix::Len(len) if (1..=ipv4::MAX_LENGTH).contains(&len) => len,
                    Prefix::Mask(mask) if mask.leading_ones() + mask.trailing_zeros() == 32 => {
                        mask.leading_ones() as u8
                    }
                    _ => return None,
                };
                Some((
                    Address::V4(ipv4::network_addr(base, len)),
                    Address::V4(ipv4::broadcast_addr(base, len)),
                ))
            }
            RangeDescriptor::Cidr {
                base: Address::V6(base),
                prefix: Prefix::Len(len),
            } if (1..=ipv6::MAX_LENGTH).contains(&len) => Some((
                Address::V6(ipv6::netmask(&base, len)),
                Address::V6(ipv6::last_addr(&base, len)),
            )),
            RangeDescriptor::Cidr { .. } => None,
            RangeDescriptor::DashRange { low, high } if low.family() == high.family() => {
                Some((low, high))
            }
            RangeDescriptor::DashRange { .. } => None,
            RangeDescriptor::Single(addr) => Some((addr, addr)),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Prefix::Len(len) => write!(f, "{len}"),
            Prefix::Mask(mask) => write!(f, "{}", Ipv4Addr::from(*mask)),
        }
    }
}

/// Prints the descriptor back as a spec string that classifies to itself.
impl fmt::Display for RangeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RangeDescriptor::MatchAll => write!(f, "*"),
            RangeDescriptor::Wildcard(octets) => {
                let parts: Vec<String> = octets
                    .iter()
                    .map(|o| match o {
                        Some(v) => v.to_string(),
                        None => "*".to_string(),
                    })
                    .collect();
                write!(f, "{}", parts.join("."))
            }
            RangeDescriptor::Cidr { base, prefix } => write!(f, "{base}/{prefix}"),
            RangeDescriptor::DashRange { low, high } => write!(f, "{low}-{high}"),
            RangeDescriptor::Single(addr) => write!(f, "{addr}"),
        }
    }
}

impl Serialize for RangeDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RangeDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<RangeDescriptor, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        crate::matcher::classify(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid range spec: {s}")))
    }
}
