// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Last-request-wins guard for overlapping fetches.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Token handed out when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    accepted: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while no newer request has been issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Commits a completed response. Returns false, and the caller must drop
    /// the response, when a response to a newer request was already accepted.
    pub fn accept(&self, ticket: Ticket) -> bool {
        let prev = self.accepted.fetch_max(ticket.0, Ordering::SeqCst);
        if prev >= ticket.0 {
            debug!(seq = ticket.0, accepted = prev, "discarding stale response");
            return false;
        }
        true
    }

    pub fn last_accepted(&self) -> Option<Ticket> {
        match self.accepted.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}
