//! IP network prefix and CIDR notation utilities.
//!
//! Provides [`Prefix`] for representing canonical IPv4/IPv6 networks, along
//! with bit helpers shared by both address families.

use ipnet::{IpNet, Ipv4Net, Ipv6Net, PrefixLenError};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length for IPv4 (32 bits).
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for IPv6 (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// Address family of a [`Prefix`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Address width in bits, which is also the longest valid prefix length.
    pub fn max_length(self) -> u8 {
        match self {
            Family::V4 => MAX_LENGTH_V4,
            Family::V6 => MAX_LENGTH_V6,
        }
    }

    pub fn of(addr: &IpAddr) -> Family {
        match addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "ipv4"),
            Family::V6 => write!(f, "ipv6"),
        }
    }
}

/// All-ones in the lowest `n` bits.
pub(crate) fn low_bits(n: u8) -> u128 {
    if n >= MAX_LENGTH_V6 {
        u128::MAX
    } else {
        (1u128 << n) - 1
    }
}

/// Network mask for a length no longer than the family width.
fn network_mask(family: Family, len: u8) -> u128 {
    let width = family.max_length();
    low_bits(width) ^ low_bits(width - len)
}

/// Prefix length of a contiguous dotted IPv4 netmask (e.g. `255.255.0.0`).
fn netmask_length(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones();
    (ones + bits.trailing_zeros() == 32).then_some(ones as u8)
}

fn parse_net(addr_cidr: &str) -> Result<IpNet, Box<dyn Error>> {
    let (addr_str, mask_str) = match addr_cidr.split_once('/') {
        Some((addr, mask)) => (addr, mask),
        // A bare address is a host prefix.
        None => {
            let addr: IpAddr = addr_cidr
                .parse()
                .map_err(|_| format!("Invalid address {addr_cidr}"))?;
            return Ok(IpNet::new(addr, Family::of(&addr).max_length())?);
        }
    };
    if let (Ok(addr), Ok(mask)) = (addr_str.parse::<Ipv4Addr>(), mask_str.parse::<Ipv4Addr>()) {
        let len = netmask_length(mask)
            .ok_or_else(|| format!("Invalid netmask {mask_str} in {addr_cidr}"))?;
        return Ok(Ipv4Net::new(addr, len)?.into());
    }
    addr_cidr
        .parse::<IpNet>()
        .map_err(|e| -> Box<dyn Error> { format!("Invalid network {addr_cidr}: {e}").into() })
}

/// Canonical IP network: an address family, network bits and prefix length.
///
/// Bits beyond the prefix length are always zero. Ordering is by family
/// (IPv4 first), then address, then length.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Prefix {
    family: Family,
    bits: u128,
    length: u8,
}

impl Prefix {
    /// Parse CIDR text such as `10.0.0.0/8`, `10.0.0.0/255.0.0.0` or a bare
    /// address. Host bits must be zero.
    pub fn parse(addr_cidr: &str) -> Result<Prefix, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let net = parse_net(addr_cidr)?;
        if net.trunc() != net {
            return Err(format!("{addr_cidr} has host bits set").into());
        }
        Ok(Prefix::from(net))
    }

    /// Build a prefix from parts already known to be canonical.
    pub(crate) fn from_parts(family: Family, bits: u128, length: u8) -> Prefix {
        debug_assert_eq!(bits & !network_mask(family, length), 0);
        Prefix {
            family,
            bits,
            length,
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Network address bits, right-aligned to the family width.
    pub fn bits(&self) -> u128 {
        self.bits
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn max_length(&self) -> u8 {
        self.family.max_length()
    }

    /// True when `other` is `self` or one of its subnets.
    pub fn contains(&self, other: &Prefix) -> bool {
        self.family == other.family
            && self.length <= other.length
            && self.bits == other.bits & network_mask(self.family, self.length)
    }

    fn to_ipnet(self) -> Result<IpNet, PrefixLenError> {
        Ok(match self.family {
            // Only the low 32 bits are ever populated for V4.
            Family::V4 => Ipv4Net::new(Ipv4Addr::from(self.bits as u32), self.length)?.into(),
            Family::V6 => Ipv6Net::new(Ipv6Addr::from(self.bits), self.length)?.into(),
        })
    }
}

/// Host bits are cleared; [`Prefix::parse`] rejects them before converting.
impl From<IpNet> for Prefix {
    fn from(net: IpNet) -> Self {
        let net = net.trunc();
        let (family, bits) = match net.network() {
            IpAddr::V4(a) => (Family::V4, u32::from(a) as u128),
            IpAddr::V6(a) => (Family::V6, u128::from(a)),
        };
        Prefix {
            family,
            bits,
            length: net.prefix_len(),
        }
    }
}

impl FromStr for Prefix {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prefix::parse(s)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.to_ipnet().map_err(|_| fmt::Error)?.fmt(f)
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::parse(&s).map_err(|e| de::Error::custom(e.to_string()))
    }
}
