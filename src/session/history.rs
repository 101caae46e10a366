// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo of textbox edits.

use crate::models::Textbox;

/// A page's textboxes at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub page: usize,
    pub textboxes: Vec<Textbox>,
}

/// Bounded undo and redo stacks of page snapshots.
#[derive(Debug, Clone)]
pub struct History {
    /// Undo stack (past states)
    undo_stack: Vec<Snapshot>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Snapshot>,
    max_size: usize,
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record the state before a mutation.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.max_size == 0 {
            return;
        }
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // A new edit invalidates the redo branch.
        self.redo_stack.clear();
    }

    /// Step back. `current` must describe the same page as the returned
    /// snapshot; the caller builds it with [`History::peek_undo`].
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Page the next undo would restore.
    pub fn peek_undo(&self) -> Option<usize> {
        self.undo_stack.last().map(|s| s.page)
    }

    /// Page the next redo would restore.
    pub fn peek_redo(&self) -> Option<usize> {
        self.redo_stack.last().map(|s| s.page)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
