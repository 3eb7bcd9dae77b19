use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::bound::Bound;
use crate::contiguous::Contiguous;
use crate::error::{Error, Result};
use crate::list::{self, IpList};
use crate::scope::Scope;

/// A network given by a base address and a prefix mask.
///
/// The base address is stored already masked, so `192.168.1.20/26` and
/// `192.168.1.0/26` are the same network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cidr {
    net: IpAddr,
    mask: IpAddr,
}

fn width(ip: &IpAddr) -> u8 {
    match ip {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn width_mask(width: u8) -> u128 {
    if width == 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

fn raw(ip: &IpAddr) -> u128 {
    match ip {
        IpAddr::V4(v4) => u32::from(*v4) as u128,
        IpAddr::V6(v6) => u128::from(*v6),
    }
}

fn from_raw(n: u128, like: &IpAddr) -> IpAddr {
    match like {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::from(n as u32)),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(n)),
    }
}

fn prefix_mask(like: &IpAddr, prefix: u8) -> IpAddr {
    let w = width(like);
    let bits = if prefix == 0 {
        0
    } else {
        (width_mask(w) << (w - prefix)) & width_mask(w)
    };
    from_raw(bits, like)
}

impl Cidr {
    /// Builds a network from a base address and a mask of the same family.
    ///
    /// The mask must be a run of ones followed by zeros.
    pub fn new(addr: IpAddr, mask: IpAddr) -> Result<Self> {
        if addr.is_ipv4() != mask.is_ipv4() {
            return Err(Error::FamilyMismatch {
                left: addr,
                right: mask,
            });
        }
        let host = !raw(&mask) & width_mask(width(&mask));
        if host & host.wrapping_add(1) != 0 {
            return Err(Error::InvalidMask(mask));
        }
        let net = from_raw(raw(&addr) & raw(&mask), &addr);
        Ok(Cidr { net, mask })
    }

    pub fn with_prefix(addr: IpAddr, prefix: u8) -> Result<Self> {
        let max = width(&addr);
        if prefix > max {
            return Err(Error::InvalidPrefix { prefix, max });
        }
        Cidr::new(addr, prefix_mask(&addr, prefix))
    }

    /// The base address. It is stored masked, so this equals [`Cidr::network`].
    pub fn addr(&self) -> IpAddr {
        self.net
    }

    /// The network number, i.e. the base address with host bits cleared.
    pub fn network(&self) -> IpAddr {
        self.net
    }

    pub fn mask(&self) -> IpAddr {
        self.mask
    }

    pub fn prefix_len(&self) -> u8 {
        raw(&self.mask).count_ones() as u8
    }

    pub fn is_ipv4(&self) -> bool {
        self.net.is_ipv4()
    }

    /// Network number with every host bit set.
    fn last_addr(&self) -> IpAddr {
        let host = !raw(&self.mask) & width_mask(width(&self.mask));
        from_raw(raw(&self.net) | host, &self.net)
    }

    /// The IPv4 broadcast address, `192.168.0.0/24 -> 192.168.0.255`.
    ///
    /// IPv6 has no broadcast address and yields `None`.
    pub fn broadcast(&self) -> Option<IpAddr> {
        if !self.is_ipv4() {
            return None;
        }
        Some(self.last_addr())
    }

    /// The adjacent network of the same size, `192.168.0.0/24 -> 192.168.1.0/24`.
    ///
    /// Only defined for IPv4. A network ending at `255.255.255.255` wraps
    /// around to `0.0.0.0`.
    pub fn next_network(&self) -> Option<Cidr> {
        let bcast = Bound::from(self.broadcast()?);
        Some(Cidr {
            net: bcast.next().addr(),
            mask: self.mask,
        })
    }

    /// Mask equality: `ip & mask == network`.
    pub fn contains_addr(&self, ip: &IpAddr) -> bool {
        ip.is_ipv4() == self.is_ipv4() && raw(ip) & raw(&self.mask) == raw(&self.net)
    }

    /// True if the network holds every address of `other`.
    ///
    /// Contiguous lists are compared as intervals, anything else is scanned
    /// address by address under a scope derived from `scope`.
    pub fn contains_list(&self, scope: &Scope, other: &IpList) -> Result<bool> {
        match other.as_contiguous() {
            Some(c) => Ok(self.contains_contiguous(c)),
            None => list::scan(scope, other, |ip| self.contains_addr(&ip)),
        }
    }
}

impl Contiguous for Cidr {
    fn start(&self) -> IpAddr {
        self.net
    }

    /// The last address, for IPv4 the broadcast.
    fn end(&self) -> IpAddr {
        self.last_addr()
    }
}

impl FromStr for Cidr {
    type Err = Error;

    /// Parses `addr/prefix`; a bare address is a single-host network.
    fn from_str(s: &str) -> Result<Self> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^(?P<addr>[0-9A-Fa-f:.]+)(/(?P<prefix>[0-9]{1,3}))?$")
                    .expect("Not possible");
        }
        let caps = RE.captures(s.trim()).ok_or_else(|| Error::parse(s, "CIDR"))?;
        let addr = caps
            .name("addr")
            .map(|m| IpAddr::from_str(m.as_str()))
            .ok_or_else(|| Error::parse(s, "CIDR"))?
            .map_err(|e| Error::Parse(e.to_string()))?;
        let prefix = match caps.name("prefix") {
            Some(p) => p
                .as_str()
                .parse::<u8>()
                .map_err(|_| Error::parse(s, "CIDR"))?,
            None => width(&addr),
        };
        Cidr::with_prefix(addr, prefix)
    }
}

impl Display for Cidr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.net, self.prefix_len())
    }
}
