use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;

use crate::contiguous::Addresses;
use crate::error::{Error, Result};
use crate::list::{self, IpList};
use crate::scope::Scope;

/// A sparse set of individual addresses with no contiguity guarantee.
///
/// Containment against a set can never use interval arithmetic, so every
/// query involving one goes through the per-address scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IpSet {
    inner: BTreeSet<IpAddr>,
}

impl IpSet {
    pub fn new() -> Self {
        IpSet {
            inner: BTreeSet::new(),
        }
    }

    /// Adds an address, returning false if it was already present.
    pub fn insert(&mut self, ip: IpAddr) -> bool {
        self.inner.insert(ip)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_addr(&self, ip: &IpAddr) -> bool {
        self.inner.contains(ip)
    }

    /// Members in ascending order, IPv4 before IPv6.
    pub fn addresses(&self, scope: &Scope) -> Addresses<'_> {
        Addresses::listed(scope, self.inner.iter())
    }

    pub fn contains_list(&self, scope: &Scope, other: &IpList) -> Result<bool> {
        list::scan(scope, other, |ip| self.contains_addr(&ip))
    }
}

impl FromIterator<IpAddr> for IpSet {
    fn from_iter<T: IntoIterator<Item = IpAddr>>(iter: T) -> Self {
        IpSet {
            inner: iter.into_iter().collect(),
        }
    }
}

impl Extend<IpAddr> for IpSet {
    fn extend<T: IntoIterator<Item = IpAddr>>(&mut self, iter: T) {
        self.inner.extend(iter)
    }
}

impl FromStr for IpSet {
    type Err = Error;

    /// Parses comma separated addresses; blank items are skipped.
    fn from_str(s: &str) -> Result<Self> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| IpAddr::from_str(part).map_err(|e| Error::Parse(format!("{}: {:?}", e, part))))
            .collect()
    }
}

impl Display for IpSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for ip in self.inner.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", ip)?;
            first = false;
        }
        Ok(())
    }
}
