use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;

use crate::bound::Bound;
use crate::contiguous::Contiguous;
use crate::error::{Error, Result};
use crate::list::{self, IpList};
use crate::scope::Scope;

/// A continuous run of addresses between two endpoints, both inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IpRange {
    start: IpAddr,
    end: IpAddr,
}

impl IpRange {
    /// Builds a range from a pair of addresses.
    ///
    /// Both endpoints must be of the same family and `start <= end`.
    pub fn new(start: IpAddr, end: IpAddr) -> Result<Self> {
        if start.is_ipv4() != end.is_ipv4() {
            return Err(Error::FamilyMismatch {
                left: start,
                right: end,
            });
        }
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(IpRange { start, end })
    }

    /// Closed interval test, `start <= ip <= end`.
    pub fn contains_addr(&self, ip: &IpAddr) -> bool {
        let (start, end) = self.bounds();
        let b = Bound::from(*ip);
        start <= b && b <= end
    }

    /// True if every address of `other` is in the range.
    pub fn contains_list(&self, scope: &Scope, other: &IpList) -> Result<bool> {
        match other.as_contiguous() {
            Some(c) => Ok(self.contains_contiguous(c)),
            None => list::scan(scope, other, |ip| self.contains_addr(&ip)),
        }
    }
}

impl Contiguous for IpRange {
    fn start(&self) -> IpAddr {
        self.start
    }

    fn end(&self) -> IpAddr {
        self.end
    }
}

impl FromStr for IpRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^\s*(?P<start>[0-9A-Fa-f:.]+)\s*-\s*(?P<end>[0-9A-Fa-f:.]+)\s*$")
                    .expect("Not possible");
        }
        let caps = RE.captures(s).ok_or_else(|| Error::parse(s, "range"))?;
        let addr = |name: &str| -> Result<IpAddr> {
            caps.name(name)
                .map(|m| IpAddr::from_str(m.as_str()))
                .ok_or_else(|| Error::parse(s, "range"))?
                .map_err(|e| Error::Parse(e.to_string()))
        };
        IpRange::new(addr("start")?, addr("end")?)
    }
}

impl Display for IpRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cidr::Cidr;
    use crate::set::IpSet;
    use quickcheck_macros::quickcheck;
    use std::net::Ipv4Addr;

    fn ip(s: &str) -> IpAddr {
        IpAddr::from_str(s).unwrap()
    }

    fn range(s: &str) -> IpRange {
        IpRange::from_str(s).unwrap()
    }

    #[test]
    fn parses_and_prints() {
        let r = range("192.168.1.1 - 192.168.1.100");
        assert_eq!(r.start(), ip("192.168.1.1"));
        assert_eq!(r.end(), ip("192.168.1.100"));
        assert_eq!(r.to_string(), "192.168.1.1-192.168.1.100");
        assert_eq!(range("::1-::ff").to_string(), "::1-::ff");
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert!(matches!(
            IpRange::new(ip("10.0.0.1"), ip("::1")),
            Err(Error::FamilyMismatch { .. })
        ));
        assert!(matches!(
            IpRange::new(ip("10.0.0.9"), ip("10.0.0.1")),
            Err(Error::InvalidRange { .. })
        ));
        assert!(IpRange::from_str("10.0.0.1").is_err());
        assert!(IpRange::from_str("10.0.0.1-10.0.0").is_err());
    }

    #[test]
    fn closed_interval() {
        let r = range("10.0.0.10-10.0.0.20");
        assert!(r.contains_addr(&ip("10.0.0.10")));
        assert!(r.contains_addr(&ip("10.0.0.15")));
        assert!(r.contains_addr(&ip("10.0.0.20")));
        assert!(!r.contains_addr(&ip("10.0.0.9")));
        assert!(!r.contains_addr(&ip("10.0.0.21")));
        assert!(!r.contains_addr(&ip("::a")));
    }

    #[test]
    fn enumerates_inclusive() {
        let scope = Scope::new();
        let ips: Vec<IpAddr> = range("10.0.0.1-10.0.0.100").addresses(&scope).collect();
        assert_eq!(ips.len(), 100);
        assert_eq!(ips.first(), Some(&ip("10.0.0.1")));
        assert_eq!(ips.last(), Some(&ip("10.0.0.100")));
    }

    #[test]
    fn contains_network_and_range() {
        let scope = Scope::new();
        let everything = range("0.0.0.0-255.255.255.255");
        let tiny = Cidr::from_str("192.168.1.20/26").unwrap();
        assert_eq!(everything.contains_list(&scope, &tiny.into()), Ok(true));
        assert_eq!(everything.contains_list(&scope, &everything.into()), Ok(true));

        let r = range("192.168.1.1-192.168.1.100");
        let home = Cidr::from_str("192.168.1.0/24").unwrap();
        assert_eq!(r.contains_list(&scope, &home.into()), Ok(false));
        assert_eq!(r.contains_list(&scope, &tiny.into()), Ok(false));
    }

    // endpoints themselves count as members on the scanning path too
    #[test]
    fn scan_uses_closed_interval() {
        let scope = Scope::new();
        let r = range("10.0.0.10-10.0.0.20");
        let edges: IpSet = vec![ip("10.0.0.10"), ip("10.0.0.20")].into_iter().collect();
        assert_eq!(r.contains_list(&scope, &edges.into()), Ok(true));

        let outside: IpSet = vec![ip("10.0.0.10"), ip("10.0.0.21")].into_iter().collect();
        assert_eq!(r.contains_list(&scope, &outside.into()), Ok(false));
    }

    #[test]
    fn scan_reports_parent_cancellation() {
        let scope = Scope::new();
        let r = range("10.0.0.0-10.0.0.255");
        let set: IpSet = vec![ip("10.0.0.1")].into_iter().collect();
        scope.cancel();
        assert_eq!(r.contains_list(&scope, &set.into()), Err(Error::Cancelled));
    }

    #[quickcheck]
    fn interval_matches_scan(a: u32, b: u32, probe: u32) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let r = IpRange::new(
            IpAddr::V4(Ipv4Addr::from(lo)),
            IpAddr::V4(Ipv4Addr::from(hi)),
        )
        .unwrap();
        let probe = IpAddr::V4(Ipv4Addr::from(probe));
        let set: IpSet = vec![probe].into_iter().collect();
        let single = IpRange::new(probe, probe).unwrap();
        let scope = Scope::new();
        r.contains_list(&scope, &set.into()) == r.contains_list(&scope, &single.into())
    }
}
