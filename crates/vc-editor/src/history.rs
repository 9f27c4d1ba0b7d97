//! Snapshot-based undo/redo.
//!
//! Every mutating action pushes the surface's pre-action snapshot onto a
//! bounded undo stack; the oldest entry is evicted first. The redo stack
//! is cleared by every save, so it is non-empty only directly after undo.
//!
//! Drags use **gesture batching**: the pre-gesture snapshot is held at
//! drag start and committed at the end only if the gesture changed
//! something, so a click without movement leaves history untouched.

use std::collections::VecDeque;

pub struct SnapshotHistory<S> {
    undo_stack: VecDeque<S>,
    redo_stack: Vec<S>,
    /// Maximum undo depth.
    limit: usize,
    /// Pre-gesture snapshot held while a batched gesture is in progress.
    gesture: Option<S>,
}

impl<S> SnapshotHistory<S> {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(limit + 1),
            redo_stack: Vec::new(),
            limit,
            gesture: None,
        }
    }

    /// Push a pre-action snapshot and drop any redo history.
    pub fn save(&mut self, snapshot: S) {
        self.push_undo(snapshot);
        if !self.redo_stack.is_empty() {
            log::debug!("new action discards {} redo entries", self.redo_stack.len());
        }
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: S) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Step back one action.
    ///
    /// `current` captures the state being left, which moves onto the redo
    /// stack. Returns the snapshot to restore, or `None` when there is
    /// nothing to undo or the current state cannot be captured.
    pub fn undo(&mut self, current: impl FnOnce() -> Option<S>) -> Option<S> {
        if self.undo_stack.is_empty() {
            return None;
        }
        let Some(current) = current() else {
            log::warn!("undo skipped: current state could not be captured");
            return None;
        };
        let target = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(target)
    }

    /// Step forward one undone action. Mirror image of [`Self::undo`].
    pub fn redo(&mut self, current: impl FnOnce() -> Option<S>) -> Option<S> {
        if self.redo_stack.is_empty() {
            return None;
        }
        let Some(current) = current() else {
            log::warn!("redo skipped: current state could not be captured");
            return None;
        };
        let target = self.redo_stack.pop()?;
        self.push_undo(current);
        Some(target)
    }

    /// Hold `pre_state` until [`Self::end_gesture`]. A gesture already in
    /// progress keeps its original pre-state.
    pub fn begin_gesture(&mut self, pre_state: S) {
        if self.gesture.is_none() {
            self.gesture = Some(pre_state);
        }
    }

    /// Close the gesture, saving its pre-state only when `changed`.
    /// Returns whether an entry was pushed.
    pub fn end_gesture(&mut self, changed: bool) -> bool {
        match self.gesture.take() {
            Some(pre_state) if changed => {
                self.save(pre_state);
                true
            }
            _ => false,
        }
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.gesture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A history over plain integers: the "surface" is a single number.
    fn history(limit: usize) -> SnapshotHistory<u32> {
        SnapshotHistory::new(limit)
    }

    #[test]
    fn undo_redo_walks_states() {
        let mut h = history(10);
        let mut state = 0;
        for next in 1..=3 {
            h.save(state);
            state = next;
        }
        assert_eq!(h.undo_len(), 3);

        state = h.undo(|| Some(state)).unwrap();
        assert_eq!(state, 2);
        state = h.undo(|| Some(state)).unwrap();
        assert_eq!(state, 1);
        assert_eq!(h.redo_len(), 2);

        state = h.redo(|| Some(state)).unwrap();
        assert_eq!(state, 2);
        state = h.redo(|| Some(state)).unwrap();
        assert_eq!(state, 3);
        assert!(!h.can_redo());
    }

    #[test]
    fn undo_and_redo_grow_the_opposite_stack_by_one() {
        let mut h = history(10);
        h.save(0);
        h.save(1);
        let (u, r) = (h.undo_len(), h.redo_len());
        h.undo(|| Some(2));
        assert_eq!((h.undo_len(), h.redo_len()), (u - 1, r + 1));
        h.redo(|| Some(1));
        assert_eq!((h.undo_len(), h.redo_len()), (u, r));
    }

    #[test]
    fn save_clears_redo() {
        let mut h = history(10);
        h.save(0);
        h.save(1);
        h.undo(|| Some(2));
        assert!(h.can_redo());
        h.save(9);
        assert!(!h.can_redo());
        assert_eq!(h.redo(|| Some(9)), None);
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut h = history(10);
        let mut called = false;
        assert_eq!(
            h.undo(|| {
                called = true;
                Some(0)
            }),
            None
        );
        assert!(!called);
        assert_eq!(h.redo(|| Some(0)), None);
    }

    #[test]
    fn bounded_fifo_eviction() {
        let limit = 20;
        let k = 5;
        let mut h = history(limit);
        for i in 0..(limit + k) as u32 {
            h.save(i);
        }
        assert_eq!(h.undo_len(), limit);
        // Oldest k entries (0..5) are gone; the bottom of the stack is 5.
        let mut last = None;
        let mut state = 999;
        while let Some(prev) = h.undo(|| Some(state)) {
            state = prev;
            last = Some(prev);
        }
        assert_eq!(last, Some(k as u32));
    }

    #[test]
    fn failed_capture_aborts_undo() {
        let mut h = history(10);
        h.save(0);
        assert_eq!(h.undo(|| None), None);
        assert_eq!((h.undo_len(), h.redo_len()), (1, 0));
    }

    #[test]
    fn gesture_commits_only_when_changed() {
        let mut h = history(10);
        h.begin_gesture(1);
        assert!(h.in_gesture());
        assert!(!h.end_gesture(false));
        assert_eq!(h.undo_len(), 0);

        h.begin_gesture(1);
        h.begin_gesture(2);
        assert!(h.end_gesture(true));
        assert_eq!(h.undo(|| Some(5)), Some(1));
    }

    #[test]
    fn gesture_commit_clears_redo() {
        let mut h = history(10);
        h.save(0);
        h.undo(|| Some(1));
        h.begin_gesture(0);
        h.end_gesture(true);
        assert!(!h.can_redo());
    }
}
