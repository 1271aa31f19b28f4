//! Advisory status flags shared with a rendering thread.
//!
//! The editor is the only writer of the document, but a renderer running on
//! another thread needs to know when to repaint and whether there are unsaved
//! changes. These are plain `AtomicBool`s behind an `Arc`. They carry no data
//! and need no transactional consistency, so every access uses
//! `Ordering::Relaxed`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
struct Inner {
    changed: AtomicBool,
    redraw: AtomicBool,
    redraw_cursor: AtomicBool,
}

/// Cloneable handle to the editor's status flags.
///
/// Clones share state, so a handle taken with
/// [`Editor::flags`](crate::editor::Editor::flags) sees every later update.
#[derive(Debug, Clone, Default)]
pub struct StatusFlags {
    inner: Arc<Inner>,
}

impl StatusFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Content changed ----------------------------------------------------

    /// True when the document changed since the flag was last cleared.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.inner.changed.load(Ordering::Relaxed)
    }

    pub fn set_changed(&self, value: bool) {
        self.inner.changed.store(value, Ordering::Relaxed);
    }

    // -- Redraw requests ----------------------------------------------------

    #[must_use]
    pub fn redraw(&self) -> bool {
        self.inner.redraw.load(Ordering::Relaxed)
    }

    pub fn set_redraw(&self, value: bool) {
        self.inner.redraw.store(value, Ordering::Relaxed);
    }

    #[must_use]
    pub fn redraw_cursor(&self) -> bool {
        self.inner.redraw_cursor.load(Ordering::Relaxed)
    }

    pub fn set_redraw_cursor(&self, value: bool) {
        self.inner.redraw_cursor.store(value, Ordering::Relaxed);
    }

    /// Read and clear the redraw request in one step.
    #[must_use]
    pub fn take_redraw(&self) -> bool {
        self.inner.redraw.swap(false, Ordering::Relaxed)
    }
}
