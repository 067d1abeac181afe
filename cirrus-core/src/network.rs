//! IPv4 network blocks and subnet partitioning
//!
//! [`NetworkBlock`] is a strict CIDR value type: the address must be the
//! network base address (no host bits below the mask). Partitioning always
//! yields /24 blocks regardless of the supernet's own prefix length; a /20
//! supernet still produces /24 subnets, not proportionally sized ones.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::InvalidNetworkError;

/// Fixed prefix length of partitioned subnets
pub const SUBNET_PREFIX_LEN: u8 = 24;

const MAX_PREFIX_LEN: u8 = 32;

/// Network mask for a prefix length, as host-order bits
fn mask(prefix_len: u8) -> u32 {
    let right = (MAX_PREFIX_LEN - prefix_len) as u32;
    let all_bits = u32::MAX as u64;
    ((all_bits >> right) << right) as u32
}

/// An IPv4 CIDR block (base address + prefix length)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkBlock {
    addr: Ipv4Addr,
    prefix_len: u8,
}

impl NetworkBlock {
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Result<Self, InvalidNetworkError> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(InvalidNetworkError::PrefixLength(prefix_len));
        }
        if u32::from(addr) & !mask(prefix_len) != 0 {
            return Err(InvalidNetworkError::HostBits(format!("{addr}/{prefix_len}")));
        }
        Ok(Self { addr, prefix_len })
    }

    /// 0.0.0.0/0, the destination of a default route
    pub fn any() -> Self {
        Self {
            addr: Ipv4Addr::UNSPECIFIED,
            prefix_len: 0,
        }
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    fn base(&self) -> u32 {
        u32::from(self.addr)
    }

    /// Number of addresses in the block
    fn size(&self) -> u64 {
        1u64 << (MAX_PREFIX_LEN - self.prefix_len)
    }

    /// True if `other` lies entirely within this block
    pub fn contains(&self, other: &NetworkBlock) -> bool {
        let start = self.base() as u64;
        let other_start = other.base() as u64;
        other.prefix_len >= self.prefix_len
            && other_start >= start
            && other_start + other.size() <= start + self.size()
    }

    /// Splits this supernet into /24 blocks and returns the first `count`
    ///
    /// Blocks are enumerated in ascending order of their base address, so the
    /// result is fully determined by the inputs. `count == 0` yields an empty
    /// vector. Requesting more /24 blocks than the supernet holds (256 for a
    /// /16, zero for prefixes longer than /24) is an error.
    pub fn partition(&self, count: usize) -> Result<Vec<NetworkBlock>, InvalidNetworkError> {
        let available = if self.prefix_len > SUBNET_PREFIX_LEN {
            0
        } else {
            1usize << (SUBNET_PREFIX_LEN - self.prefix_len)
        };
        if count > available {
            return Err(InvalidNetworkError::InsufficientSpace {
                supernet: self.to_string(),
                available,
                requested: count,
            });
        }

        let step = 1u32 << (MAX_PREFIX_LEN - SUBNET_PREFIX_LEN) as u32;
        Ok((0..count as u32)
            .map(|i| Self {
                addr: Ipv4Addr::from(self.base() + i * step),
                prefix_len: SUBNET_PREFIX_LEN,
            })
            .collect())
    }
}

impl FromStr for NetworkBlock {
    type Err = InvalidNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_part, prefix_part) = s
            .split_once('/')
            .ok_or_else(|| InvalidNetworkError::Malformed(s.to_string()))?;
        let addr = Ipv4Addr::from_str(addr_part)
            .map_err(|_| InvalidNetworkError::Malformed(s.to_string()))?;
        let prefix_len = prefix_part
            .parse::<u8>()
            .map_err(|_| InvalidNetworkError::Malformed(s.to_string()))?;
        Self::new(addr, prefix_len)
    }
}

impl fmt::Display for NetworkBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}
