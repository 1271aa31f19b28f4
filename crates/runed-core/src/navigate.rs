//! Cursor movement: horizontal steps, vertical moves with a remembered
//! column, jumps and scrolling.
//!
//! Everything here works in absolute screen columns (`screenX + offsetX`)
//! and lets [`Position::set_x`](crate::position::Position::set_x) decide the
//! horizontal scroll. Tabs are crossed in one step.
//!
//! # Remembered column
//!
//! [`Editor::save_x`] records the column the user deliberately moved to.
//! [`Editor::down_end`] and [`Editor::up_end`] return to it when the
//! destination line is long enough, snap to the end of shorter lines, and
//! never leave the cursor inside the expansion of a tab.

use tracing::trace;

use crate::editor::Editor;
use crate::error::{Error, Result};
use crate::position::LineIndex;

impl Editor {
    // -- Helpers ------------------------------------------------------------

    /// Put the cursor on absolute column `column`, scrolling sideways as
    /// needed.
    pub(crate) fn set_column(&mut self, column: usize) {
        let before = self.pos.offset_x;
        let viewport = self.viewport();
        self.pos.set_x(column, viewport);
        if self.pos.offset_x != before {
            self.flags.set_redraw(true);
        }
    }

    /// One line down, scrolling when on the last viewport row.
    pub(crate) fn step_down(&mut self) -> Result<()> {
        if self.data_y() + 1 >= self.len() {
            return Err(Error::EndOfDocument);
        }
        if self.pos.down(self.viewport()).is_err() {
            self.pos.offset_y += 1;
            self.flags.set_redraw(true);
        }
        Ok(())
    }

    /// One line up, scrolling when on the first viewport row.
    fn step_up(&mut self) -> Result<()> {
        if self.data_y() == 0 {
            return Err(Error::StartOfDocument);
        }
        if self.pos.up().is_err() {
            self.pos.offset_y -= 1;
            self.flags.set_redraw(true);
        }
        Ok(())
    }

    // -- Within a line ------------------------------------------------------

    /// Column 0, unscrolled.
    pub fn home(&mut self) {
        self.set_column(0);
        self.pos.offset_x = 0;
        self.flags.set_redraw(true);
    }

    /// Trim trailing whitespace, then move just past the last rune.
    pub fn end(&mut self) {
        self.trim_right(self.data_y());
        self.end_no_trim();
    }

    /// Move just past the last rune without touching the line.
    pub fn end_no_trim(&mut self) {
        let width = self.screen_width(self.data_y());
        self.set_column(width);
        self.flags.set_redraw(true);
    }

    /// Move to the first non-indent rune of the line.
    pub fn go_to_start_of_text_line(&mut self) {
        let column = self.first_screen_position(self.data_y());
        self.set_column(column);
    }

    /// Advance one data position.
    ///
    /// A tab is crossed in one step. The cursor may rest one column past
    /// the content. Stepping beyond that wraps to the start of the next
    /// line, except in block mode where the cursor keeps going right.
    ///
    /// # Errors
    ///
    /// [`Error::EndOfDocument`] when wrapping is needed on the last line.
    pub fn next(&mut self) -> Result<()> {
        let step = if self.rune() == Some('\t') {
            self.per_tab()
        } else {
            1
        };
        let column = self.pos.column() + step;
        if !self.block_mode() && column > self.screen_width(self.data_y()) {
            self.step_down()?;
            self.home();
            return Ok(());
        }
        self.set_column(column);
        Ok(())
    }

    /// Retreat one data position.
    ///
    /// Crosses a tab to the left in one step. At column 0 the cursor moves
    /// to the end of the previous line.
    ///
    /// # Errors
    ///
    /// [`Error::StartOfDocument`] at column 0 of the first line.
    pub fn prev(&mut self) -> Result<()> {
        let per_tab = self.per_tab();
        let column = self.pos.column();
        let leading_tab = self.lines.rune(0, self.data_y()) == Some('\t');
        let at_tab = self.tab_to_the_left() || (column <= per_tab && leading_tab);
        if column == 0 {
            self.step_up()?;
            self.end();
            return Ok(());
        }
        let step = if at_tab { per_tab } else { 1 };
        self.set_column(column.saturating_sub(step));
        Ok(())
    }

    /// Remember the current column for vertical movement.
    ///
    /// Unless `regardless` is set, columns 0 and 1 and columns past the
    /// content are not remembered.
    pub fn save_x(&mut self, regardless: bool) {
        let column = self.pos.column();
        if regardless || (!self.after_line_screen_contents_plus_one() && column > 1) {
            self.pos.saved_x = column;
        }
    }

    // -- Vertical moves with a remembered column ----------------------------

    /// Move one row down and pick a column on the new line.
    ///
    /// # Errors
    ///
    /// [`Error::EndOfDocument`] on the last line, [`Error::AtBottomEdge`]
    /// on the last viewport row. The caller scrolls in the second case.
    pub fn down_end(&mut self) -> Result<()> {
        if self.data_y() + 1 >= self.len() {
            return Err(Error::EndOfDocument);
        }
        let before = self.pos.column();
        self.pos.down(self.viewport())?;
        if self.trimmed_line().chars().count() == 1 {
            self.end();
            return Ok(());
        }
        self.settle_column(before);
        Ok(())
    }

    /// Move one row up and pick a column on the new line.
    ///
    /// # Errors
    ///
    /// [`Error::AtTopEdge`] on the first viewport row.
    pub fn up_end(&mut self) -> Result<()> {
        let before = self.pos.column();
        self.pos.up()?;
        self.settle_column(before);
        Ok(())
    }

    fn settle_column(&mut self, before: usize) {
        if self.after_line_screen_contents_plus_one() && before > 1 {
            self.end();
            let column = self.pos.column();
            if column != before && column > self.pos.saved_x {
                self.pos.saved_x = before;
            }
            return;
        }
        self.set_column(self.pos.saved_x);
        if self.after_line_screen_contents_plus_one() {
            self.end();
        }
        let y = self.data_y();
        if self.rune_covering_column(self.pos.column(), y) == Some('\t') {
            self.set_column(self.first_screen_position(y));
        }
        trace!(column = self.pos.column(), y, "settled column");
    }

    // -- Jumps --------------------------------------------------------------

    /// Jump to line `y`, scrolling if it is off screen, and place the cursor
    /// on the line's first non-indent rune.
    ///
    /// `y` is clamped to the document. Returns `(redraw, reached_end)`,
    /// where `reached_end` means `y` was past the last line.
    pub fn go_to(&mut self, y: LineIndex) -> (bool, bool) {
        if y == self.data_y() {
            return (true, false);
        }
        let len = self.len();
        let (y, reached_end) = if y >= len {
            (len.saturating_sub(1), true)
        } else {
            (y, false)
        };
        let height = self.viewport().height();
        let top = self.pos.offset_y;

        if y >= top && y < top + height {
            self.pos.screen_y = y - top;
        } else if y < height {
            self.pos.offset_y = 0;
            self.pos.screen_y = y;
        } else if reached_end {
            self.pos.offset_y = len - height;
            self.pos.screen_y = height - 1;
        } else {
            // Keep the cursor on the same screen row if possible.
            self.pos.offset_y = y - self.pos.screen_y;
        }

        self.set_column(self.first_screen_position(y));
        self.flags.set_redraw_cursor(true);
        self.flags.set_redraw(true);
        (true, reached_end)
    }

    /// Jump to rune index `x` of line `y`.
    pub fn go_to_line_and_column(&mut self, y: LineIndex, x: usize) -> (bool, bool) {
        let result = self.go_to(y);
        let column = self.screen_column_of(x, self.data_y());
        self.set_column(column);
        result
    }

    /// One line up, via [`Self::go_to`].
    pub fn up(&mut self) {
        self.go_to(self.data_y().saturating_sub(1));
    }

    /// One line down, via [`Self::go_to`]. Returns true when already on
    /// the last line.
    pub fn down(&mut self) -> bool {
        self.go_to(self.data_y() + 1).1
    }

    pub fn go_to_top(&mut self) {
        self.go_to(0);
        self.home();
    }

    /// Last line, cursor just past its content.
    pub fn go_to_end(&mut self) {
        self.go_to(self.len().saturating_sub(1));
        self.end_no_trim();
    }

    /// Scroll so that the cursor line sits in the middle of the viewport.
    /// Lines near the top of the document stay where they are.
    pub fn center(&mut self) {
        let middle = self.viewport().height() / 2;
        let y = self.data_y();
        if y < middle {
            return;
        }
        self.pos.offset_y = y - middle;
        self.pos.screen_y = middle;
        self.flags.set_redraw(true);
    }

    // -- Scrolling ----------------------------------------------------------

    /// Scroll down by up to `lines`. Returns false when already at the
    /// bottom.
    pub fn scroll_down(&mut self, lines: usize) -> bool {
        let last_row = self.viewport().height() - 1;
        let len = self.len();
        let limit = len.saturating_sub(last_row.max(1));
        let offset = self.pos.offset_y;
        if offset >= limit {
            return false;
        }
        self.pos.offset_x = 0;
        self.pos.offset_y += lines.min(limit - offset);
        if self.data_y() >= len {
            self.pos.screen_y = len.saturating_sub(1).saturating_sub(self.pos.offset_y);
        }
        self.flags.set_redraw(true);
        true
    }

    /// Scroll up by up to `lines`. Returns false when already at the top.
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        let offset = self.pos.offset_y;
        if offset == 0 {
            return false;
        }
        self.pos.offset_x = 0;
        self.pos.offset_y -= lines.min(offset);
        self.flags.set_redraw(true);
        true
    }

    /// [`Self::scroll_down`] by the configured scroll speed.
    pub fn page_down(&mut self) -> bool {
        self.scroll_down(self.pos.scroll_speed)
    }

    /// [`Self::scroll_up`] by the configured scroll speed.
    pub fn page_up(&mut self) -> bool {
        self.scroll_up(self.pos.scroll_speed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
