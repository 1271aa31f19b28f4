//! Undo/redo history.
//!
//! Records whole-document [`Snapshot`]s: the line store plus the cursor.
//! Take a snapshot before an edit, then [`History::undo`] puts the editor
//! back to it. The stack is bounded and drops its oldest entry when full.
//!
//! # Usage
//!
//! ```text
//! history.snapshot(&editor);
//! editor.insert_rune('x');
//! history.undo(&mut editor);   // 'x' is gone again
//! history.redo(&mut editor);   // and back
//! ```
//!
//! Taking a new snapshot clears the redo stack.

use std::collections::VecDeque;

use tracing::trace;

use crate::editor::Editor;
use crate::position::Position;
use crate::store::LineStore;

/// How many snapshots are kept by default.
pub const DEFAULT_CAPACITY: usize = 512;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The document and cursor at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    lines: LineStore,
    pos: Position,
}

impl Snapshot {
    fn of(editor: &Editor) -> Self {
        Self {
            lines: editor.store().clone(),
            pos: editor.position(),
        }
    }

    fn restore(self, editor: &mut Editor) {
        editor.replace_store(self.lines);
        editor.set_position(self.pos);
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Bounded undo and redo stacks of editor snapshots.
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    capacity: usize,
}

impl History {
    /// Create an empty history holding up to [`DEFAULT_CAPACITY`] snapshots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty history holding up to `capacity` snapshots (at
    /// least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record the editor's current state as an undo point.
    ///
    /// A snapshot identical to the newest one is not stored twice.
    pub fn snapshot(&mut self, editor: &Editor) {
        let snap = Snapshot::of(editor);
        self.redo_stack.clear();
        if self.undo_stack.back() == Some(&snap) {
            return;
        }
        if self.undo_stack.len() == self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(snap);
        trace!(depth = self.undo_stack.len(), "snapshot");
    }

    /// Restore the newest undo point. Returns false if there is none.
    pub fn undo(&mut self, editor: &mut Editor) -> bool {
        let Some(snap) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(Snapshot::of(editor));
        snap.restore(editor);
        true
    }

    /// Reapply the newest undone state. Returns false if there is none.
    pub fn redo(&mut self, editor: &mut Editor) -> bool {
        let Some(snap) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push_back(Snapshot::of(editor));
        snap.restore(editor);
        true
    }

    /// True if there is something to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// True if there is something to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of snapshots on the undo stack.
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of snapshots on the redo stack.
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::tests::{editor, place};
    use pretty_assertions::assert_eq;

    // -- Basic undo ---------------------------------------------------------

    #[test]
    fn undo_single_insert() {
        let mut e = editor("hello");
        let mut h = History::new();

        h.snapshot(&e);
        e.end();
        e.insert_rune('!');
        assert_eq!(e.text(), "hello!");

        assert!(h.undo(&mut e));
        assert_eq!(e.text(), "hello");
        assert_eq!(e.position().column(), 0);
    }

    #[test]
    fn undo_line_delete_restores_cursor() {
        let mut e = editor("a\nb\nc");
        let mut h = History::new();
        e.go_to(1);
        place(&mut e, 1, 1);
        let before = e.position();

        h.snapshot(&e);
        e.delete_line(1);
        assert_eq!(e.text(), "a\nc");

        h.undo(&mut e);
        assert_eq!(e.text(), "a\nb\nc");
        assert_eq!(e.position(), before);
    }

    // -- Redo ---------------------------------------------------------------

    #[test]
    fn redo_after_undo() {
        let mut e = editor("");
        let mut h = History::new();

        h.snapshot(&e);
        e.insert_string("hello");
        h.undo(&mut e);
        assert_eq!(e.text(), "");

        assert!(h.redo(&mut e));
        assert_eq!(e.text(), "hello");
    }

    #[test]
    fn new_snapshot_clears_redo() {
        let mut e = editor("x");
        let mut h = History::new();

        h.snapshot(&e);
        e.insert_rune('a');
        h.undo(&mut e);
        assert!(h.can_redo());

        h.snapshot(&e);
        assert!(!h.can_redo());
    }

    #[test]
    fn undo_all_then_redo_all() {
        let mut e = editor("");
        let mut h = History::new();
        for r in ['a', 'b', 'c'] {
            h.snapshot(&e);
            e.end();
            e.insert_rune(r);
        }
        assert_eq!(e.text(), "abc");

        while h.undo(&mut e) {}
        assert_eq!(e.text(), "");
        assert_eq!(h.redo_count(), 3);

        while h.redo(&mut e) {}
        assert_eq!(e.text(), "abc");
        assert_eq!(h.undo_count(), 3);
    }

    // -- Bounds -------------------------------------------------------------

    #[test]
    fn nothing_to_undo_or_redo() {
        let mut e = editor("x");
        let mut h = History::default();
        assert!(!h.can_undo());
        assert!(!h.undo(&mut e));
        assert!(!h.redo(&mut e));
        assert_eq!(e.text(), "x");
    }

    #[test]
    fn oldest_snapshot_dropped_at_capacity() {
        let mut e = editor("");
        let mut h = History::with_capacity(2);
        for r in ['a', 'b', 'c'] {
            h.snapshot(&e);
            e.end();
            e.insert_rune(r);
        }
        assert_eq!(h.undo_count(), 2);
        while h.undo(&mut e) {}
        assert_eq!(e.text(), "a");
    }

    #[test]
    fn identical_snapshots_collapse() {
        let e = editor("same");
        let mut h = History::new();
        h.snapshot(&e);
        h.snapshot(&e);
        assert_eq!(h.undo_count(), 1);
    }
}
