//! Address enumeration on a background producer.
//!
//! [`AddressFeed`] runs one producer thread per enumeration and hands the
//! addresses over a bounded channel. The producer blocks while the buffer is
//! full and exits once its scope is cancelled or the consumer goes away.

use log::{debug, trace};
use std::iter::FusedIterator;
use std::net::IpAddr;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::list::IpList;
use crate::scope::{Scope, ScopeGuard};

/// Buffer depth used by [`AddressFeed::spawn`].
pub const DEFAULT_CAPACITY: usize = 64;

/// Consumer side of a background enumeration.
///
/// Dropping the feed cancels the producer.
#[derive(Debug)]
pub struct AddressFeed {
    rx: Option<Receiver<IpAddr>>,
    guard: ScopeGuard,
    handle: Option<JoinHandle<()>>,
}

impl AddressFeed {
    /// Starts enumerating `list` under a child of `scope`.
    pub fn spawn(scope: &Scope, list: &IpList) -> Self {
        Self::with_capacity(scope, list, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(scope: &Scope, list: &IpList, capacity: usize) -> Self {
        let guard = scope.guard();
        let producer_scope = guard.scope().clone();
        let list = list.clone();
        let (tx, rx) = mpsc::sync_channel(capacity);
        let handle = thread::spawn(move || {
            trace!("producer for {} started", list);
            let mut sent = 0usize;
            for ip in list.addresses(&producer_scope) {
                if tx.send(ip).is_err() {
                    break;
                }
                sent += 1;
            }
            trace!("producer for {} finished after {} addresses", list, sent);
        });
        AddressFeed {
            rx: Some(rx),
            guard,
            handle: Some(handle),
        }
    }

    /// The scope the producer runs under.
    pub fn scope(&self) -> &Scope {
        self.guard.scope()
    }

    fn reap(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                debug!("address producer panicked: {:?}", e);
            }
        }
    }

    /// Stops the producer. Addresses already buffered can still be read.
    pub fn cancel(&self) {
        self.guard.scope().cancel();
    }
}

impl Iterator for AddressFeed {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        let ip = self.rx.as_ref()?.recv().ok();
        if ip.is_none() {
            // producer is done, reap it
            self.rx = None;
            self.reap();
        }
        ip
    }
}

impl FusedIterator for AddressFeed {}

impl Drop for AddressFeed {
    fn drop(&mut self) {
        self.guard.scope().cancel();
        // unblock a producer waiting on a full buffer
        self.rx = None;
        self.reap();
    }
}
