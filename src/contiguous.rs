//! Contiguous address sets and the lazy address sequence.

use std::collections::btree_set;
use std::iter::FusedIterator;
use std::net::IpAddr;

use crate::bound::Bound;
use crate::scope::Scope;

/// An address set that is a single ascending interval `[start, end]`.
pub trait Contiguous {
    /// First address of the interval.
    fn start(&self) -> IpAddr;

    /// Last address of the interval, inclusive.
    fn end(&self) -> IpAddr;

    fn bounds(&self) -> (Bound, Bound) {
        (Bound::from(self.start()), Bound::from(self.end()))
    }

    /// True if every address of `other` lies inside `self`.
    ///
    /// Takes no scope and returns a plain `bool`: the comparison is constant
    /// time and cannot fail or be cancelled.
    ///
    /// Both sides are reduced to numeric intervals, so networks and ranges
    /// compare interchangeably in constant time. Intervals of different
    /// families never contain each other.
    fn contains_contiguous(&self, other: &dyn Contiguous) -> bool {
        let (start_a, end_a) = self.bounds();
        let (start_b, end_b) = other.bounds();
        start_a <= start_b && end_a >= end_b
    }

    /// Every address from start to end, in ascending order.
    fn addresses(&self, scope: &Scope) -> Addresses<'static> {
        let (start, end) = self.bounds();
        Addresses::interval(scope, start, end)
    }
}

/// Lazy, cancellable sequence of addresses.
///
/// Yields nothing further once its scope is cancelled. Each call to an
/// `addresses` method builds a fresh sequence.
#[derive(Debug)]
pub struct Addresses<'a> {
    scope: Scope,
    inner: Inner<'a>,
}

#[derive(Debug)]
enum Inner<'a> {
    Interval { next: Option<Bound>, end: Bound },
    Listed(btree_set::Iter<'a, IpAddr>),
    Done,
}

impl<'a> Addresses<'a> {
    pub(crate) fn interval(scope: &Scope, start: Bound, end: Bound) -> Self {
        Addresses {
            scope: scope.clone(),
            inner: Inner::Interval {
                next: Some(start),
                end,
            },
        }
    }

    pub(crate) fn listed(scope: &Scope, iter: btree_set::Iter<'a, IpAddr>) -> Self {
        Addresses {
            scope: scope.clone(),
            inner: Inner::Listed(iter),
        }
    }

    fn finish(&mut self) {
        self.inner = Inner::Done;
    }
}

impl<'a> Iterator for Addresses<'a> {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        if self.scope.is_cancelled() {
            self.finish();
            return None;
        }
        match &mut self.inner {
            Inner::Interval { next, end } => {
                let cur = (*next)?;
                if !(cur <= *end) {
                    *next = None;
                    return None;
                }
                // stop at the end bound rather than wrap past the family maximum
                *next = if cur == *end { None } else { Some(cur.next()) };
                Some(cur.addr())
            }
            Inner::Listed(iter) => iter.next().copied(),
            Inner::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Interval { next: None, .. } | Inner::Done => (0, Some(0)),
            Inner::Interval {
                next: Some(next),
                end,
            } => match (next, end) {
                (Bound::V4(a), Bound::V4(b)) if a <= b => (0, ((*b - *a) as usize).checked_add(1)),
                _ => (0, None),
            },
            Inner::Listed(iter) => (0, iter.size_hint().1),
        }
    }
}

impl<'a> FusedIterator for Addresses<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    struct Span(IpAddr, IpAddr);

    impl Contiguous for Span {
        fn start(&self) -> IpAddr {
            self.0
        }
        fn end(&self) -> IpAddr {
            self.1
        }
    }

    fn span(a: &str, b: &str) -> Span {
        Span(IpAddr::from_str(a).unwrap(), IpAddr::from_str(b).unwrap())
    }

    #[test]
    fn interval_containment() {
        let outer = span("10.0.0.0", "10.0.0.255");
        let inner = span("10.0.0.10", "10.0.0.20");
        assert!(outer.contains_contiguous(&inner));
        assert!(!inner.contains_contiguous(&outer));
        assert!(outer.contains_contiguous(&outer));

        let overlap = span("10.0.0.200", "10.0.1.10");
        assert!(!outer.contains_contiguous(&overlap));
    }

    #[test]
    fn families_never_contain_each_other() {
        let v4 = span("0.0.0.0", "255.255.255.255");
        let v6 = span("::", "::ffff");
        assert!(!v4.contains_contiguous(&v6));
        assert!(!v6.contains_contiguous(&v4));
    }

    #[test]
    fn enumerates_inclusive() {
        let scope = Scope::new();
        let ips: Vec<IpAddr> = span("10.0.0.254", "10.0.1.1").addresses(&scope).collect();
        let expected: Vec<IpAddr> = ["10.0.0.254", "10.0.0.255", "10.0.1.0", "10.0.1.1"]
            .iter()
            .map(|s| IpAddr::from_str(s).unwrap())
            .collect();
        assert_eq!(ips, expected);
    }

    #[test]
    fn stops_at_family_maximum() {
        let scope = Scope::new();
        let ips: Vec<IpAddr> = span("255.255.255.254", "255.255.255.255")
            .addresses(&scope)
            .collect();
        assert_eq!(ips.len(), 2);

        let ips: Vec<IpAddr> = span("ffff:ffff:ffff:ffff:ffff:ffff:ffff:fffe", "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff")
            .addresses(&scope)
            .collect();
        assert_eq!(ips.len(), 2);
    }

    #[test]
    fn inverted_interval_is_empty() {
        let scope = Scope::new();
        assert_eq!(span("10.0.0.5", "10.0.0.1").addresses(&scope).count(), 0);
    }

    #[test]
    fn cancellation_ends_sequence() {
        let scope = Scope::new();
        let mut ips = span("10.0.0.0", "10.255.255.255").addresses(&scope);
        assert!(ips.next().is_some());
        assert!(ips.next().is_some());
        scope.cancel();
        assert_eq!(ips.next(), None);
        assert_eq!(ips.size_hint(), (0, Some(0)));
        assert_eq!(ips.next(), None);
    }

    #[test]
    fn parent_cancellation_ends_child_sequence() {
        let parent = Scope::new();
        let child = parent.child();
        let mut ips = span("::", "::ffff").addresses(&child);
        assert!(ips.next().is_some());
        parent.cancel();
        assert_eq!(ips.next(), None);
    }
}
