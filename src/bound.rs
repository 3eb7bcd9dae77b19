//! Fixed-width integer form of an address.
//!
//! An IPv4 address maps onto a `u32`, an IPv6 address onto a `u128`, both in
//! network byte order. Interval arithmetic on networks and ranges is done on
//! these values instead of on octets.

use std::cmp::Ordering;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Ordinal position of an address within its family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bound {
    V4(u32),
    V6(u128),
}

impl Bound {
    /// Moves to the next address, wrapping to zero past the family maximum.
    pub fn increment(&mut self) {
        match self {
            Bound::V4(n) => *n = n.wrapping_add(1),
            Bound::V6(n) => *n = n.wrapping_add(1),
        }
    }

    /// Bound of the following address.
    pub fn next(self) -> Self {
        let mut b = self;
        b.increment();
        b
    }

    pub fn is_max(&self) -> bool {
        match *self {
            Bound::V4(n) => n == u32::MAX,
            Bound::V6(n) => n == u128::MAX,
        }
    }

    pub fn addr(&self) -> IpAddr {
        match *self {
            Bound::V4(n) => IpAddr::V4(Ipv4Addr::from(n)),
            Bound::V6(n) => IpAddr::V6(Ipv6Addr::from(n)),
        }
    }

    /// Builds a bound from raw octets, 4 for IPv4 or 16 for IPv6.
    pub fn from_octets(octets: &[u8]) -> Option<Self> {
        match octets.len() {
            4 => {
                let mut b = [0u8; 4];
                b.copy_from_slice(octets);
                Some(Bound::V4(u32::from_be_bytes(b)))
            }
            16 => {
                let mut b = [0u8; 16];
                b.copy_from_slice(octets);
                Some(Bound::V6(u128::from_be_bytes(b)))
            }
            _ => None,
        }
    }

    pub fn octets(&self) -> Vec<u8> {
        match *self {
            Bound::V4(n) => n.to_be_bytes().to_vec(),
            Bound::V6(n) => n.to_be_bytes().to_vec(),
        }
    }
}

impl From<IpAddr> for Bound {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Bound::V4(u32::from(v4)),
            IpAddr::V6(v6) => Bound::V6(u128::from(v6)),
        }
    }
}

impl From<Bound> for IpAddr {
    fn from(b: Bound) -> Self {
        b.addr()
    }
}

// Bounds of different widths are unordered.
impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Bound::V4(a), Bound::V4(b)) => Some(a.cmp(b)),
            (Bound::V6(a), Bound::V6(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}
