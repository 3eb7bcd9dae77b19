//! Cancellation scopes.
//!
//! A [`Scope`] is a cheap, clonable handle. Cancelling a scope cancels every
//! scope derived from it with [`Scope::child`], never the other way round.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

struct Node {
    cancelled: AtomicBool,
    parent: Option<Arc<Node>>,
}

impl Node {
    fn is_cancelled(&self) -> bool {
        let mut node = Some(self);
        while let Some(n) = node {
            if n.cancelled.load(Ordering::Acquire) {
                return true;
            }
            node = n.parent.as_deref();
        }
        false
    }
}

#[derive(Clone)]
pub struct Scope(Arc<Node>);

impl Scope {
    /// A root scope that is only cancelled explicitly.
    pub fn new() -> Self {
        Scope(Arc::new(Node {
            cancelled: AtomicBool::new(false),
            parent: None,
        }))
    }

    /// Derives a scope that is cancelled together with `self`.
    pub fn child(&self) -> Self {
        Scope(Arc::new(Node {
            cancelled: AtomicBool::new(false),
            parent: Some(self.0.clone()),
        }))
    }

    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }

    /// `Err(Error::Cancelled)` once this scope or an ancestor is cancelled.
    pub fn err(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Derives a child scope that is cancelled when the guard drops.
    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard(self.child())
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::new()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Scope")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Child scope cancelled on drop.
#[derive(Debug)]
pub struct ScopeGuard(Scope);

impl ScopeGuard {
    pub fn scope(&self) -> &Scope {
        &self.0
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
