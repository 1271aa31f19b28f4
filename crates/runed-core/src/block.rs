//! Block-scoped edits.
//!
//! A block is the run of lines starting at a given line whose right-trimmed
//! content is non-empty. It ends at the first blank line or at the end of
//! the document. Blocks are never stored. They are found by scanning when
//! an operation needs one.
//!
//! [`Editor::for_each_line_in_block`] is the primitive: it runs a line
//! action once per block line at a fixed column. Block-mode typing and
//! deleting, comment toggling, sorting and replacement are built on it or
//! on [`Editor::block`].

use tracing::debug;

use crate::editor::Editor;
use crate::error::{Error, Result};
use crate::position::{LineIndex, Position};

impl Editor {
    // -- Iteration ----------------------------------------------------------

    /// Run `f` on every line of the block under the cursor.
    ///
    /// Before each call the cursor column is reset to the column it had on
    /// the first line. `f` returns false to stop early. Afterwards the
    /// cursor goes back to the first row of the block, keeping the column
    /// the last call left it at.
    pub fn for_each_line_in_block<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self) -> bool,
    {
        let first = self.pos;
        let mut last_x = (first.screen_x, first.offset_x);
        while !self.empty_right_trimmed_line() {
            self.pos.screen_x = first.screen_x;
            self.pos.offset_x = first.offset_x;
            if !f(self) {
                break;
            }
            last_x = (self.pos.screen_x, self.pos.offset_x);
            if self.data_y() + 1 >= self.len() {
                break;
            }
            self.pos.screen_y = first.screen_y;
            self.pos.offset_y += 1;
            if self.empty_line() {
                break;
            }
        }
        self.pos.screen_y = first.screen_y;
        self.pos.offset_y = first.offset_y;
        (self.pos.screen_x, self.pos.offset_x) = last_x;
        self.lines.normalize();
    }

    // -- Reading ------------------------------------------------------------

    /// The lines of the block starting at line `n`.
    #[must_use]
    pub fn block_lines(&self, n: LineIndex) -> Vec<String> {
        (n..self.len())
            .map(|y| self.lines.line(y))
            .take_while(|line| line.iter().any(|c| !c.is_whitespace()))
            .map(|line| line.iter().collect())
            .collect()
    }

    /// The block starting at line `n`, each line followed by `\n`.
    #[must_use]
    pub fn block(&self, n: LineIndex) -> String {
        self.block_lines(n)
            .into_iter()
            .map(|mut line| {
                line.push('\n');
                line
            })
            .collect()
    }

    fn require_block(&self) -> Result<()> {
        if self.empty_right_trimmed_line() {
            return Err(Error::NothingToOperateOn);
        }
        Ok(())
    }

    // -- Structural block edits ---------------------------------------------

    /// Remove the block under the cursor. Returns how many lines went.
    ///
    /// # Errors
    ///
    /// [`Error::NothingToOperateOn`] on a blank line.
    pub fn delete_block(&mut self, mut bookmark: Option<&mut Position>) -> Result<usize> {
        self.require_block()?;
        let y = self.data_y();
        let count = self.block_lines(y).len();
        for _ in 0..count {
            self.delete_line_move_bookmark(y, bookmark.as_deref_mut());
        }
        debug!(y, count, "deleted block");
        Ok(count)
    }

    /// Insert `lines` at the cursor row, pushing the current line down,
    /// and optionally one empty line after them. The cursor stays on the
    /// first inserted line.
    pub fn insert_block<S: AsRef<str>>(&mut self, lines: &[S], add_empty_line: bool) {
        self.insert_block_at(self.data_y(), lines, add_empty_line);
    }

    fn insert_block_at<S: AsRef<str>>(&mut self, y: LineIndex, lines: &[S], add_empty_line: bool) {
        let mut at = y;
        for line in lines {
            self.lines.insert_line(at);
            self.lines.set_line_str(at, line.as_ref());
            at += 1;
        }
        if add_empty_line {
            self.lines.insert_line(at);
        }
        self.mark_changed();
        self.go_to(y);
        debug!(y, count = lines.len(), "inserted block");
    }

    /// Sort the lines of the block under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::NothingToOperateOn`] on a blank line.
    pub fn sort_block(&mut self, bookmark: Option<&mut Position>) -> Result<()> {
        self.require_block()?;
        let mut lines = self.block_lines(self.data_y());
        lines.sort();
        self.replace_block_lines(&lines, bookmark)
    }

    /// Replace the block under the cursor with the lines of `text`. A single
    /// trailing newline in `text` is ignored.
    ///
    /// # Errors
    ///
    /// [`Error::NothingToOperateOn`] on a blank line.
    pub fn replace_block(&mut self, text: &str, bookmark: Option<&mut Position>) -> Result<()> {
        self.require_block()?;
        let text = text.strip_suffix('\n').unwrap_or(text);
        let lines: Vec<&str> = text.split('\n').collect();
        self.replace_block_lines(&lines, bookmark)
    }

    fn replace_block_lines<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        bookmark: Option<&mut Position>,
    ) -> Result<()> {
        let y = self.data_y();
        self.home();
        self.delete_block(bookmark)?;
        self.insert_block_at(y, lines, false);
        Ok(())
    }

    // -- Comments -----------------------------------------------------------

    /// True when the cursor line starts with `marker` after indentation.
    #[must_use]
    pub fn current_line_commented(&self, marker: &str) -> bool {
        self.trimmed_line().starts_with(marker)
    }

    /// Prefix the cursor line with `marker` and a space.
    pub fn comment_on(&mut self, marker: &str) {
        let line = self.current_line();
        self.set_current_line(&format!("{marker} {line}"));
    }

    /// Remove the first `marker` (and one following space) from the cursor
    /// line, if the line is commented.
    pub fn comment_off(&mut self, marker: &str) {
        let line = self.current_line();
        let trimmed = line.trim();
        let with_space = format!("{marker} ");
        let uncommented = if trimmed.starts_with(&with_space) {
            line.replacen(&with_space, "", 1)
        } else if trimmed.starts_with(marker) {
            line.replacen(marker, "", 1)
        } else {
            return;
        };
        self.set_current_line(&uncommented);
        if self.after_end_of_line() {
            self.end();
        }
    }

    /// Comment the block under the cursor in or out.
    ///
    /// When more than half of the block's lines are commented, every line
    /// is uncommented. Otherwise every line is commented.
    ///
    /// # Errors
    ///
    /// [`Error::NothingToOperateOn`] on a blank line.
    pub fn toggle_comment_block(&mut self, marker: &str) -> Result<()> {
        self.require_block()?;
        let lines = self.block_lines(self.data_y());
        let commented = lines
            .iter()
            .filter(|l| l.trim_start().starts_with(marker))
            .count();
        if commented * 2 > lines.len() {
            self.for_each_line_in_block(|e| {
                e.comment_off(marker);
                true
            });
        } else {
            self.for_each_line_in_block(|e| {
                e.comment_on(marker);
                true
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
