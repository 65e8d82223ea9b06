use std::collections::VecDeque;
use tracing::trace;

use crate::Cursor;

/// Maximum number of changes retained unless configured otherwise.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// A recorded line-range splice: `before` occupied `start..start + before.len()`
/// and was replaced by `after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub start: usize,
    pub before: Vec<String>,
    pub after: Vec<String>,
    pub cursor_before: Cursor,
    pub cursor_after: Cursor,
}

/// Bounded undo stack plus redo stack. A fresh edit clears redo; exceeding
/// the depth evicts the oldest change.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Change>,
    redo: Vec<Change>,
    depth: usize,
}

impl History {
    pub fn new(depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            depth: depth.max(1),
        }
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth.max(1);
        while self.undo.len() > self.depth {
            self.undo.pop_front();
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn record(&mut self, change: Change) {
        self.undo.push_back(change);
        if self.undo.len() > self.depth {
            self.undo.pop_front();
            trace!(target: "text.history", depth = self.depth, "history_trimmed");
        }
        self.redo.clear();
        trace!(target: "text.history", undo_depth = self.undo.len(), "record");
    }

    pub(crate) fn pop_undo(&mut self) -> Option<Change> {
        self.undo.pop_back()
    }

    pub(crate) fn push_redo(&mut self, change: Change) {
        self.redo.push(change);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<Change> {
        self.redo.pop()
    }

    /// Re-push onto the undo stack without clearing redo (used by redo).
    pub(crate) fn push_undo_keep_redo(&mut self, change: Change) {
        self.undo.push_back(change);
        if self.undo.len() > self.depth {
            self.undo.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
