//! Restore requests issued by undo/redo.
//!
//! Restoring a snapshot completes asynchronously from the caller's point of
//! view. Each request carries a monotonically increasing id; only the most
//! recently issued request is ever applied, and completions for older ones
//! are discarded. Last issue wins, independent of completion order.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RestoreRequest<S> {
    pub id: u64,
    pub snapshot: S,
}

pub struct RestoreQueue<S> {
    pending: VecDeque<RestoreRequest<S>>,
    next_id: u64,
}

impl<S> Default for RestoreQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RestoreQueue<S> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Queue `snapshot` for restoration and return its request id.
    pub fn issue(&mut self, snapshot: S) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push_back(RestoreRequest { id, snapshot });
        log::trace!("restore #{id} issued ({} pending)", self.pending.len());
        id
    }

    /// The snapshot the surface will show once pending restores land.
    pub fn latest_pending(&self) -> Option<&S> {
        self.pending.back().map(|r| &r.snapshot)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Complete every pending request in issue order. Only the newest is
    /// returned; the rest are stale.
    pub fn settle(&mut self) -> Option<S> {
        let newest = self.pending.pop_back()?;
        if !self.pending.is_empty() {
            log::debug!("discarding {} superseded restore(s)", self.pending.len());
            self.pending.clear();
        }
        Some(newest.snapshot)
    }

    /// Complete one request. Returns its snapshot only if it is the newest
    /// issued request; that also retires every older pending request.
    pub fn complete(&mut self, id: u64) -> Option<S> {
        let index = self.pending.iter().position(|r| r.id == id)?;
        if index + 1 == self.pending.len() {
            return self.settle();
        }
        log::debug!("discarding stale restore #{id}");
        self.pending.remove(index);
        None
    }
}
