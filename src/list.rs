//! The closed family of address lists and containment dispatch.

use log::debug;
use std::fmt::{self, Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;

use crate::cidr::Cidr;
use crate::contiguous::{Addresses, Contiguous};
use crate::error::{Error, Result};
use crate::range::IpRange;
use crate::scope::Scope;
use crate::set::IpSet;

/// Any set of addresses this crate can enumerate and compare.
///
/// `Cidr` and `Range` are contiguous and compare in constant time; a
/// `Set` has to be walked address by address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IpList {
    Cidr(Cidr),
    Range(IpRange),
    Set(IpSet),
}

impl IpList {
    /// The interval view of this list, if it has one.
    pub fn as_contiguous(&self) -> Option<&dyn Contiguous> {
        match self {
            IpList::Cidr(c) => Some(c),
            IpList::Range(r) => Some(r),
            IpList::Set(_) => None,
        }
    }

    pub fn addresses(&self, scope: &Scope) -> Addresses<'_> {
        match self {
            IpList::Cidr(c) => c.addresses(scope),
            IpList::Range(r) => r.addresses(scope),
            IpList::Set(s) => s.addresses(scope),
        }
    }

    pub fn contains_addr(&self, ip: &IpAddr) -> bool {
        match self {
            IpList::Cidr(c) => c.contains_addr(ip),
            IpList::Range(r) => r.contains_addr(ip),
            IpList::Set(s) => s.contains_addr(ip),
        }
    }

    /// True if `self` holds every address of `other`.
    ///
    /// Fails with [`Error::Cancelled`] only when an address scan was needed
    /// and `scope` was cancelled before it found a missing address.
    pub fn contains_list(&self, scope: &Scope, other: &IpList) -> Result<bool> {
        match self {
            IpList::Cidr(c) => c.contains_list(scope, other),
            IpList::Range(r) => r.contains_list(scope, other),
            IpList::Set(s) => s.contains_list(scope, other),
        }
    }
}

/// Walks `other` under a child of `scope`, stopping at the first address
/// `member` rejects.
pub(crate) fn scan<F>(scope: &Scope, other: &IpList, mut member: F) -> Result<bool>
where
    F: FnMut(IpAddr) -> bool,
{
    debug!("falling back to address scan of {}", other);
    let guard = scope.guard();
    for ip in other.addresses(guard.scope()) {
        if !member(ip) {
            return Ok(false);
        }
    }
    if scope.is_cancelled() {
        debug!("address scan of {} cancelled", other);
    }
    scope.err().map(|_| true)
}

impl From<Cidr> for IpList {
    fn from(c: Cidr) -> Self {
        IpList::Cidr(c)
    }
}

impl From<IpRange> for IpList {
    fn from(r: IpRange) -> Self {
        IpList::Range(r)
    }
}

impl From<IpSet> for IpList {
    fn from(s: IpSet) -> Self {
        IpList::Set(s)
    }
}

impl FromStr for IpList {
    type Err = Error;

    /// `a/n` is a network, `a-b` a range, `a,b,...` a set and a bare
    /// address a single-host network.
    fn from_str(s: &str) -> Result<Self> {
        if s.contains(',') {
            IpSet::from_str(s).map(IpList::Set)
        } else if s.contains('-') {
            IpRange::from_str(s).map(IpList::Range)
        } else {
            Cidr::from_str(s).map(IpList::Cidr)
        }
    }
}

impl Display for IpList {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            IpList::Cidr(c) => c.fmt(f),
            IpList::Range(r) => r.fmt(f),
            IpList::Set(s) => s.fmt(f),
        }
    }
}
