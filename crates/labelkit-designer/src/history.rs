//! Undo/redo history of full element snapshots.
//!
//! The log is a sequence of deep copies of the element list plus a cursor.
//! Committing truncates any redo tail and appends; undo and redo only move
//! the cursor. The entry under the cursor always equals the live model right
//! after a commit, undo or redo.

use crate::model::Element;

/// Snapshot-based undo/redo log.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<Vec<Element>>,
    cursor: usize,
    limit: Option<usize>,
}

impl History {
    /// Creates a log whose only entry is `initial`.
    pub fn new(initial: &[Element]) -> Self {
        Self {
            entries: vec![initial.to_vec()],
            cursor: 0,
            limit: None,
        }
    }

    /// Creates a log keeping at most `limit` entries (oldest dropped first).
    pub fn with_limit(initial: &[Element], limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::new(initial)
        }
    }

    /// Records a snapshot of `elements`, discarding anything that was undone.
    pub fn commit(&mut self, elements: &[Element]) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(elements.to_vec());
        self.cursor = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            let excess = self.entries.len().saturating_sub(limit);
            if excess > 0 {
                self.entries.drain(..excess);
                self.cursor -= excess;
            }
        }
        tracing::debug!(
            "History commit #{} ({} elements)",
            self.cursor,
            elements.len()
        );
    }

    /// Steps back. Returns the snapshot to restore, or `None` at the start.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        tracing::debug!("Undo to #{}", self.cursor);
        Some(&self.entries[self.cursor])
    }

    /// Steps forward. Returns the snapshot to restore, or `None` at the end.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        tracing::debug!("Redo to #{}", self.cursor);
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &[Element] {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    /// Starts over with `elements` as the only entry.
    pub fn reset(&mut self, elements: &[Element]) {
        self.entries.clear();
        self.entries.push(elements.to_vec());
        self.cursor = 0;
    }

    /// Adopts `elements` as the baseline if nothing has happened yet, i.e.
    /// the log still holds a single empty entry. Returns whether it did.
    pub fn adopt_baseline(&mut self, elements: &[Element]) -> bool {
        if self.entries.len() == 1 && self.entries[0].is_empty() && !elements.is_empty() {
            self.entries[0] = elements.to_vec();
            true
        } else {
            false
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(&[])
    }
}
