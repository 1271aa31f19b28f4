//! Line store: the document as a map from line index to runes.
//!
//! The store is keyed by line index rather than laid out as a vector. Line
//! insertion and deletion therefore shift keys by hand, and every structural
//! edit ends with [`LineStore::normalize`] so that the density invariant
//! holds:
//!
//! > for a store reporting length `L`, every index in `0..L` has an entry.
//!
//! Length is the number of entries, never `max key + 1`. Once `normalize`
//! has run the two agree.
//!
//! # Reads past content
//!
//! Reading outside a line is not an error. [`LineStore::rune`] returns
//! `None`, and [`LineStore::rune_or_space`] returns `' '`, matching the
//! editing convention that the area past a line's end is blank padding.
//!
//! # Writes past content
//!
//! [`LineStore::set_rune`] pads the line with spaces up to the target column
//! before writing. Writing to a column below an earlier write never shrinks
//! the line.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::position::{ColIndex, LineIndex};

// ---------------------------------------------------------------------------
// LineStore
// ---------------------------------------------------------------------------

/// Document content, one rune vector per line index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: HashMap<LineIndex, Vec<char>>,
}

impl LineStore {
    // -- Construction -------------------------------------------------------

    /// Create an empty store (length 0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from text.
    ///
    /// Lines are separated by `\n`. A single trailing newline does not add
    /// an extra empty line, and a `\r` before a newline is dropped. Empty
    /// text gives an empty store.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut store = Self::new();
        if text.is_empty() {
            return store;
        }
        let body = text.strip_suffix('\n').unwrap_or(text);
        for (i, line) in body.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            store.lines.insert(i, line.chars().collect());
        }
        store
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // -- Length and line access ---------------------------------------------

    /// Number of entries in the store.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True when line `y` has an entry.
    #[inline]
    #[must_use]
    pub fn contains(&self, y: LineIndex) -> bool {
        self.lines.contains_key(&y)
    }

    /// The runes of line `y`. Absent lines read as empty.
    #[must_use]
    pub fn line(&self, y: LineIndex) -> &[char] {
        self.lines.get(&y).map_or(&[], Vec::as_slice)
    }

    /// Line `y` as a `String`. Absent lines read as `""`.
    #[must_use]
    pub fn line_string(&self, y: LineIndex) -> String {
        self.line(y).iter().collect()
    }

    /// Rune count of line `y`.
    #[inline]
    #[must_use]
    pub fn line_len(&self, y: LineIndex) -> usize {
        self.line(y).len()
    }

    /// Iterate lines in index order.
    pub fn lines(&self) -> impl Iterator<Item = &[char]> + '_ {
        (0..self.len()).map(move |y| self.line(y))
    }

    /// The whole document, lines joined with `\n` and no trailing newline.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }

    // -- Rune access --------------------------------------------------------

    /// The rune at `(x, y)`, or `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn rune(&self, x: ColIndex, y: LineIndex) -> Option<char> {
        self.line(y).get(x).copied()
    }

    /// The rune at `(x, y)`, or `' '` when out of bounds.
    #[inline]
    #[must_use]
    pub fn rune_or_space(&self, x: ColIndex, y: LineIndex) -> char {
        self.rune(x, y).unwrap_or(' ')
    }

    /// Write `r` at `(x, y)`, padding the line with spaces when `x` is past
    /// its end. A missing line is created first.
    pub fn set_rune(&mut self, x: ColIndex, y: LineIndex, r: char) {
        let created = !self.lines.contains_key(&y);
        let line = self.lines.entry(y).or_default();
        if x < line.len() {
            line[x] = r;
        } else {
            line.resize(x, ' ');
            line.push(r);
        }
        if created {
            self.normalize();
        }
    }

    /// How many times `r` occurs in line `y`.
    #[must_use]
    pub fn count_of(&self, r: char, y: LineIndex) -> usize {
        self.line(y).iter().filter(|&&c| c == r).count()
    }

    // -- Line edits ---------------------------------------------------------

    /// Replace line `y` wholesale, creating it if needed.
    pub fn set_line(&mut self, y: LineIndex, runes: Vec<char>) {
        let created = self.lines.insert(y, runes).is_none();
        if created {
            self.normalize();
        }
    }

    /// Replace line `y` with the runes of `s`.
    pub fn set_line_str(&mut self, y: LineIndex, s: &str) {
        self.set_line(y, s.chars().collect());
    }

    /// Mutable access to line `y`, creating it (and filling any holes below
    /// it) if it does not exist.
    pub(crate) fn line_mut(&mut self, y: LineIndex) -> &mut Vec<char> {
        if !self.lines.contains_key(&y) {
            self.lines.insert(y, Vec::new());
            self.normalize();
        }
        self.lines.entry(y).or_default()
    }

    /// Insert `r` at rune index `x` of line `y`, shifting the rest right.
    ///
    /// A missing line becomes `[r]`. Returns `false` without changing
    /// anything when `x` is past the end of an existing line.
    pub fn insert_rune(&mut self, x: ColIndex, y: LineIndex, r: char) -> bool {
        if !self.lines.contains_key(&y) {
            self.set_line(y, vec![r]);
            return true;
        }
        let line = self.line_mut(y);
        if x > line.len() {
            return false;
        }
        line.insert(x, r);
        true
    }

    /// Remove the rune at `(x, y)`. Out-of-bounds requests are no-ops.
    pub fn remove_rune(&mut self, x: ColIndex, y: LineIndex) -> Option<char> {
        let line = self.lines.get_mut(&y)?;
        (x < line.len()).then(|| line.remove(x))
    }

    /// Cut line `y` down to its first `x` runes.
    pub fn truncate(&mut self, y: LineIndex, x: ColIndex) {
        if let Some(line) = self.lines.get_mut(&y) {
            line.truncate(x);
        }
    }

    /// Remove trailing whitespace from line `y`. Returns whether anything
    /// was removed.
    pub fn trim_right(&mut self, y: LineIndex) -> bool {
        let Some(line) = self.lines.get_mut(&y) else {
            return false;
        };
        let before = line.len();
        while line.last().is_some_and(|c| c.is_whitespace()) {
            line.pop();
        }
        line.len() != before
    }

    /// Remove leading whitespace from line `y`. Returns whether anything was
    /// removed.
    pub fn trim_left(&mut self, y: LineIndex) -> bool {
        let Some(line) = self.lines.get_mut(&y) else {
            return false;
        };
        let lead = line.iter().take_while(|c| c.is_whitespace()).count();
        line.drain(..lead);
        lead > 0
    }

    /// Number of leading whitespace runes on line `y`.
    #[must_use]
    pub fn first_data_position(&self, y: LineIndex) -> usize {
        self.line(y).iter().take_while(|c| c.is_whitespace()).count()
    }

    /// Index of the last rune on line `y`, or `None` for an empty line.
    #[must_use]
    pub fn last_data_position(&self, y: LineIndex) -> Option<ColIndex> {
        self.line_len(y).checked_sub(1)
    }

    /// True when line `y` is empty or holds only whitespace.
    #[must_use]
    pub fn is_blank(&self, y: LineIndex) -> bool {
        self.line(y).iter().all(|c| c.is_whitespace())
    }

    // -- Structural edits ---------------------------------------------------

    /// Insert an empty line at index `y`, shifting `y..` one step down.
    ///
    /// Inserting at `len()` appends. Inserting further out first creates the
    /// missing lines.
    pub fn insert_line(&mut self, y: LineIndex) {
        let old_len = self.len();
        if y >= old_len {
            self.lines.insert(y, Vec::new());
            self.normalize();
            debug!(y, len = self.len(), "appended line");
            return;
        }
        for k in (y..old_len).rev() {
            if let Some(v) = self.lines.remove(&k) {
                self.lines.insert(k + 1, v);
            }
        }
        self.lines.insert(y, Vec::new());
        self.normalize();
        self.trim_trailing_artifacts(old_len + 1);
        debug!(y, len = self.len(), "inserted line");
    }

    /// Remove line `n`, shifting every later line one step up.
    ///
    /// Deleting a line that does not exist is a logged no-op.
    pub fn delete_line(&mut self, n: LineIndex) {
        if !self.lines.contains_key(&n) {
            warn!(n, len = self.len(), "delete of missing line ignored");
            return;
        }
        let Some(max) = self.lines.keys().copied().max() else {
            return;
        };
        if n == max {
            self.lines.remove(&n);
        } else {
            for k in n..max {
                let next = self.lines.remove(&(k + 1)).unwrap_or_default();
                self.lines.insert(k, next);
            }
        }
        self.normalize();
        debug!(n, len = self.len(), "deleted line");
    }

    /// Re-establish the density invariant by filling every hole below the
    /// highest index with an empty line.
    pub fn normalize(&mut self) {
        let Some(max) = self.lines.keys().copied().max() else {
            return;
        };
        let mut filled = 0usize;
        for i in 0..=max {
            self.lines.entry(i).or_insert_with(|| {
                filled += 1;
                Vec::new()
            });
        }
        if filled > 0 {
            trace!(filled, len = self.len(), "filled holes");
        }
    }

    /// Drop empty entries at index `expected_len` and beyond. A store that
    /// had a hole before the shift can end up with such a tail once
    /// `normalize` fills the hole.
    fn trim_trailing_artifacts(&mut self, expected_len: usize) {
        while self.len() > expected_len {
            let last = self.len() - 1;
            if self.lines.get(&last).is_some_and(Vec::is_empty) {
                self.lines.remove(&last);
            } else {
                break;
            }
        }
    }

    // -- Document-wide queries ----------------------------------------------

    /// True for an empty store or a single whitespace-only line.
    #[must_use]
    pub fn is_blank_document(&self) -> bool {
        match self.len() {
            0 => true,
            1 => self.is_blank(0),
            _ => false,
        }
    }

    /// Number of whitespace-separated words in the document.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.lines()
            .map(|line| {
                line.split(|c| c.is_whitespace())
                    .filter(|w| !w.is_empty())
                    .count()
            })
            .sum()
    }
}

impl fmt::Display for LineStore {
    /// Every line followed by `\n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            for c in line {
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
