//! The Mutation Engine: rune and line edits at the cursor.
//!
//! Every operation here leaves the line store dense. The store's own
//! structural edits call [`LineStore::normalize`](crate::store::LineStore::normalize),
//! and the few places that touch a line directly only ever change its runes,
//! never its index.
//!
//! # Positions past the content
//!
//! A cursor past the end of its line is normal. Inserting there appends,
//! deleting there joins the next line, and `set_rune` ignores it. None of
//! these are errors.
//!
//! # Block mode
//!
//! With block mode on, [`Editor::insert_rune`] and [`Editor::delete`] repeat
//! down the current block at a fixed column. See
//! [`Editor::for_each_line_in_block`](crate::editor::Editor::for_each_line_in_block).

use tracing::debug;

use crate::editor::Editor;
use crate::position::{DataX, LineIndex, Position};

/// Replace runes that look like ASCII but are not.
const fn normalize_rune(r: char) -> char {
    match r {
        '\u{a0}' => ' ',
        '\u{37e}' => ';',
        _ => r,
    }
}

impl Editor {
    // -- Runes --------------------------------------------------------------

    /// Insert `r` at the cursor.
    ///
    /// A non-breaking space is stored as a plain space. The cursor stays on
    /// the inserted rune. With wrap-on-type enabled and the line now too
    /// long, the line is split and the cursor is placed just after the
    /// inserted rune, wherever it ended up. Returns whether that happened.
    pub fn insert_rune(&mut self, r: char) -> bool {
        let r = normalize_rune(r);
        self.insert_rune_no_wrap(r);
        self.flags.set_redraw_cursor(true);
        if self.settings.wrap_on_type && !self.block_mode() && !self.within_limit(self.data_y()) {
            return self.wrap_while_typing(r == ' ');
        }
        false
    }

    /// Insert `r` at the cursor without wrapping, repeating down the block
    /// in block mode.
    pub fn insert_rune_no_wrap(&mut self, r: char) {
        let r = normalize_rune(r);
        let insert_here = |e: &mut Self| {
            let x = e.data_x().value();
            let y = e.data_y();
            e.lines.insert_rune(x, y, r)
        };
        if self.block_mode() && !self.empty_right_trimmed_line() {
            self.for_each_line_in_block(insert_here);
        } else {
            insert_here(self);
        }
        self.mark_changed();
    }

    /// Overwrite the rune under the cursor. Does nothing past the content.
    pub fn set_rune(&mut self, r: char) {
        if let DataX::Found(x) = self.data_x() {
            self.set_at(x, self.data_y(), r);
        }
    }

    /// Insert `s` rune by rune, moving the cursor after each.
    pub fn insert_string(&mut self, s: &str) {
        for r in s.chars() {
            self.insert_and_step(r);
        }
    }

    /// Like [`Self::insert_string`], but `\n` opens a new line below and
    /// moves to it.
    pub fn insert_string_and_move(&mut self, s: &str) {
        for r in s.chars() {
            if r == '\n' {
                self.insert_line_below();
                self.down();
                continue;
            }
            self.insert_and_step(r);
        }
    }

    fn insert_and_step(&mut self, r: char) {
        if !self.insert_rune(r) {
            let x = self.data_x().value();
            let column = self.screen_column_of(x + 1, self.data_y());
            self.set_column(column);
        }
    }

    /// Prepend `r` to line `y + 1`, creating that line if needed.
    pub fn insert_below(&mut self, y: LineIndex, r: char) {
        self.insert_string_below(y, &r.to_string());
    }

    /// Prepend `s` to line `y + 1`, creating that line if needed.
    pub fn insert_string_below(&mut self, y: LineIndex, s: &str) {
        let below = y + 1;
        let mut runes: Vec<char> = s.chars().map(normalize_rune).collect();
        runes.extend_from_slice(self.lines.line(below));
        self.lines.set_line(below, runes);
        self.mark_changed();
    }

    /// Delete at the cursor.
    ///
    /// - An empty line, or one holding a single whitespace rune, is removed.
    /// - At or past the end of the line, the next line is joined on (not in
    ///   block mode).
    /// - Otherwise the rune under the cursor is removed.
    ///
    /// In block mode this repeats down the current block.
    pub fn delete(&mut self) {
        if self.block_mode() && !self.empty_right_trimmed_line() {
            self.for_each_line_in_block(Self::delete_here);
        } else {
            self.delete_here();
        }
        self.lines.normalize();
        self.mark_changed();
    }

    fn delete_here(&mut self) -> bool {
        let y = self.data_y();
        let line = self.lines.line(y);
        if line.is_empty() || (line.len() == 1 && line[0].is_whitespace()) {
            self.lines.delete_line(y);
            return true;
        }
        match self.data_x() {
            DataX::Found(x) => {
                self.lines.remove_rune(x, y);
            }
            DataX::AfterContent(_) => {
                if !self.block_mode() && self.lines.contains(y + 1) {
                    let next = self.lines.line(y + 1).to_vec();
                    self.lines.line_mut(y).extend(next);
                    self.lines.delete_line(y + 1);
                }
            }
        }
        true
    }

    /// Cut the line at the cursor. Does nothing past the content.
    pub fn delete_rest_of_line(&mut self) {
        if let DataX::Found(x) = self.data_x() {
            self.lines.truncate(self.data_y(), x);
            self.mark_changed();
        }
    }

    // -- Lines --------------------------------------------------------------

    /// Insert an empty line at the cursor row, pushing the current line
    /// down.
    pub fn insert_line_above(&mut self) {
        self.lines.insert_line(self.data_y());
        self.mark_changed();
    }

    /// Insert an empty line below the cursor row.
    pub fn insert_line_below(&mut self) {
        self.insert_line_below_at(self.data_y());
    }

    /// Insert an empty line below line `y`. Below the last line this is a
    /// plain append.
    pub fn insert_line_below_at(&mut self, y: LineIndex) {
        self.lines.insert_line(y + 1);
        self.mark_changed();
    }

    /// Remove line `n`. Missing lines are ignored.
    pub fn delete_line(&mut self, n: LineIndex) {
        self.lines.delete_line(n);
        self.mark_changed();
    }

    /// Remove line `n`, moving `bookmark` up one line if it sat below `n`.
    pub fn delete_line_move_bookmark(&mut self, n: LineIndex, bookmark: Option<&mut Position>) {
        if let Some(mark) = bookmark {
            if mark.line_index() > n {
                if mark.screen_y > 0 {
                    mark.dec_y();
                } else {
                    mark.offset_y -= 1;
                }
            }
        }
        self.delete_line(n);
    }

    /// Remove the cursor line, moving `bookmark` as
    /// [`Self::delete_line_move_bookmark`] does.
    pub fn delete_current_line_move_bookmark(&mut self, bookmark: Option<&mut Position>) {
        self.delete_line_move_bookmark(self.data_y(), bookmark);
    }

    /// Create line `n` (and any missing lines before it) if it does not
    /// exist.
    pub fn create_line_if_missing(&mut self, n: LineIndex) {
        if !self.lines.contains(n) {
            self.lines.set_line(n, Vec::new());
            self.mark_changed();
        }
    }

    /// Split the line at the cursor.
    ///
    /// Trailing whitespace is trimmed from the left part, which stays on
    /// the cursor row. The right part moves to a new line below. Returns
    /// false without changes when the cursor is past the content or the
    /// line has fewer than two runes.
    pub fn split_line(&mut self) -> bool {
        let DataX::Found(x) = self.data_x() else {
            return false;
        };
        let y = self.data_y();
        let line = self.lines.line(y);
        if line.len() < 2 {
            return false;
        }
        let mut left = line[..x].to_vec();
        while left.last().is_some_and(|c| c.is_whitespace()) {
            left.pop();
        }
        let right = line[x..].to_vec();
        self.lines.insert_line(y);
        self.lines.set_line(y, left);
        self.lines.set_line(y + 1, right);
        self.mark_changed();
        debug!(y, x, "split line");
        true
    }

    /// Join the next line onto the cursor line with a single space between.
    ///
    /// A blank next line is just removed, and false is returned. Otherwise
    /// the next line's leading whitespace and this line's trailing whitespace
    /// are dropped, one space is placed between them, and the cursor ends up
    /// on the first joined rune.
    pub fn join_line_with_next(&mut self, bookmark: Option<&mut Position>) -> bool {
        let y = self.data_y();
        let next = y + 1;
        self.flags.set_redraw_cursor(true);
        if self.lines.is_blank(next) {
            if self.lines.contains(next) {
                self.delete_line_move_bookmark(next, bookmark);
            }
            return false;
        }
        self.lines.trim_left(next);
        self.lines.trim_right(y);
        let tail = self.lines.line(next).to_vec();
        let line = self.lines.line_mut(y);
        if !line.is_empty() {
            line.push(' ');
        }
        let joined_at = line.len();
        line.extend(tail);
        self.delete_line_move_bookmark(next, bookmark);
        let column = self.screen_column_of(joined_at, y);
        self.set_column(column);
        debug!(y, "joined line");
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
