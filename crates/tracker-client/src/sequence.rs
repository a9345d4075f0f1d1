//! Guard against stale responses
//!
//! A consumer may issue a second load before the first resolves, and the
//! responses may come back in either order. Every load takes a
//! [`LoadTicket`]; a response is applied only if its ticket is the newest
//! one issued, it was issued for the record still on screen, and the
//! consumer has not been torn down. Everything else is dropped.
//!
//! Loads are never cancelled on the wire; late responses are ignored.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Proof that a load was started, carrying the record it was for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket<K> {
    seq: u64,
    key: K,
}

impl<K> LoadTicket<K> {
    #[inline]
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Per-consumer load sequencer
#[derive(Debug, Default)]
pub struct LoadSequencer {
    latest: AtomicU64,
    closed: AtomicBool,
}

impl LoadSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load for `key`; supersedes every earlier ticket
    pub fn begin<K>(&self, key: K) -> LoadTicket<K> {
        let seq = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket { seq, key }
    }

    /// Whether a response for `ticket` may still be applied
    pub fn accepts<K: PartialEq>(&self, ticket: &LoadTicket<K>, current: &K) -> bool {
        if self.closed.load(Ordering::Acquire) {
            tracing::debug!(seq = ticket.seq, "dropping response after unmount");
            return false;
        }
        let latest = self.latest.load(Ordering::Acquire);
        if ticket.seq != latest {
            tracing::debug!(seq = ticket.seq, latest, "dropping superseded response");
            return false;
        }
        if &ticket.key != current {
            tracing::debug!(seq = ticket.seq, "dropping response for a record no longer shown");
            return false;
        }
        true
    }

    /// Consumer is gone; every outstanding and future ticket is rejected
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
