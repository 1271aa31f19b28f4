//! The editor aggregate: line store, cursor, settings and status flags.
//!
//! [`Editor`] is the single owner of a document and of the cursor that
//! indexes into it. Both are replaced together when switching documents.
//! Collaborators (renderer, highlighter, search) read through the methods in
//! this module. Edits go through the Mutation Engine in
//! [`mutate`](crate::mutate), [`block`](crate::block) and
//! [`wrap`](crate::wrap), and cursor movement through
//! [`navigate`](crate::navigate).
//!
//! # Coordinate translation
//!
//! `dataY` is `offsetY + screenY`. `dataX` depends on the tabs in the
//! current line and is recomputed by a linear scan on every call to
//! [`Editor::data_x`]. Nothing caches it.
//!
//! | Query                       | Meaning                                          |
//! |-----------------------------|--------------------------------------------------|
//! | [`Editor::data_x`]          | Rune index under the cursor, or `AfterContent`   |
//! | [`Editor::screen_column_of`]| Screen column where a rune index starts          |
//! | [`Editor::screen_width`]    | Columns occupied by a whole line                 |
//! | [`Editor::first_screen_position`] | Column of the first non-indent rune        |
//! | [`Editor::last_screen_position`]  | Column of the last rune's first cell       |

use std::fmt;

use tracing::trace;

use crate::error::Result;
use crate::flags::StatusFlags;
use crate::indent::Indentation;
use crate::options::Settings;
use crate::position::{ColIndex, DataX, LineIndex, Position, Viewport};
use crate::store::LineStore;

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// A document together with the cursor and scroll state that index into it.
#[derive(Debug, Default)]
pub struct Editor {
    pub(crate) lines: LineStore,
    pub(crate) pos: Position,
    pub(crate) settings: Settings,
    pub(crate) flags: StatusFlags,
}

impl Editor {
    // -- Construction -------------------------------------------------------

    /// An empty document (length 0).
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_store(LineStore::new(), settings)
    }

    /// A document loaded from text. See [`LineStore::from_text`] for how
    /// the text is split.
    #[must_use]
    pub fn from_text(text: &str, settings: Settings) -> Self {
        Self::with_store(LineStore::from_text(text), settings)
    }

    fn with_store(lines: LineStore, settings: Settings) -> Self {
        Self {
            lines,
            pos: Position::new(settings.scroll_speed),
            settings,
            flags: StatusFlags::new(),
        }
    }

    // -- Settings -----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings wholesale.
    pub const fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.pos.scroll_speed = if settings.scroll_speed == 0 {
            1
        } else {
            settings.scroll_speed
        };
    }

    /// Run `:set` arguments against this editor's settings.
    ///
    /// # Errors
    ///
    /// See [`Settings::apply_set`].
    pub fn apply_set(&mut self, args: &str) -> Result<String> {
        let mut settings = self.settings;
        let result = settings.apply_set(args);
        self.set_settings(settings);
        result
    }

    #[inline]
    #[must_use]
    pub const fn indentation(&self) -> Indentation {
        self.settings.indentation
    }

    #[inline]
    #[must_use]
    pub const fn per_tab(&self) -> usize {
        self.settings.indentation.per_tab()
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.settings.viewport
    }

    /// Resize the viewport, keeping the cursor row on screen.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.settings.viewport = viewport;
        if self.pos.screen_y >= viewport.height() {
            let overshoot = self.pos.screen_y + 1 - viewport.height();
            self.pos.offset_y += overshoot;
            self.pos.screen_y -= overshoot;
        }
        self.flags.set_redraw(true);
    }

    #[inline]
    #[must_use]
    pub const fn block_mode(&self) -> bool {
        self.settings.block_mode
    }

    pub const fn set_block_mode(&mut self, on: bool) {
        self.settings.block_mode = on;
    }

    // -- Flags and position -------------------------------------------------

    /// A handle on the status flags, shareable with a rendering thread.
    #[must_use]
    pub fn flags(&self) -> StatusFlags {
        self.flags.clone()
    }

    /// True when the document changed since the flag was last cleared.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.flags.changed()
    }

    pub(crate) fn mark_changed(&self) {
        self.flags.set_changed(true);
        self.flags.set_redraw(true);
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    /// Move the cursor to a previously saved position.
    pub fn set_position(&mut self, pos: Position) {
        self.pos = pos;
        self.flags.set_redraw_cursor(true);
    }

    /// Read access to the underlying line store.
    #[inline]
    #[must_use]
    pub const fn store(&self) -> &LineStore {
        &self.lines
    }

    /// Replace the document and reset the cursor, keeping the settings.
    pub fn replace_store(&mut self, lines: LineStore) {
        self.lines = lines;
        self.pos = Position::new(self.settings.scroll_speed);
        self.mark_changed();
    }

    // -- Document access ----------------------------------------------------

    /// Number of lines.
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

    /// Line `y` as a string. Absent lines read as `""`.
    #[must_use]
    pub fn line(&self, y: LineIndex) -> String {
        self.lines.line_string(y)
    }

    /// Line `y` as runes.
    #[must_use]
    pub fn line_runes(&self, y: LineIndex) -> &[char] {
        self.lines.line(y)
    }

    /// Replace line `y`, creating it and any missing lines below it.
    pub fn set_line(&mut self, y: LineIndex, s: &str) {
        self.lines.set_line_str(y, s);
        self.mark_changed();
    }

    /// Replace the line under the cursor.
    pub fn set_current_line(&mut self, s: &str) {
        self.set_line(self.data_y(), s);
    }

    #[must_use]
    pub fn current_line(&self) -> String {
        self.line(self.data_y())
    }

    /// The line under the cursor with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_line(&self) -> String {
        self.current_line().trim().to_owned()
    }

    /// The whole document, lines joined by `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.text()
    }

    /// Remove every line and reset the cursor.
    pub fn clear(&mut self) {
        self.replace_store(LineStore::new());
    }

    #[must_use]
    pub fn is_blank_document(&self) -> bool {
        self.lines.is_blank_document()
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.lines.word_count()
    }

    /// The rune at `(x, y)`, or `None` past content.
    #[inline]
    #[must_use]
    pub fn rune_at(&self, x: ColIndex, y: LineIndex) -> Option<char> {
        self.lines.rune(x, y)
    }

    /// Write `r` at `(x, y)`, space-padding the line as needed.
    pub fn set_at(&mut self, x: ColIndex, y: LineIndex, r: char) {
        self.lines.set_rune(x, y, r);
        self.mark_changed();
    }

    #[must_use]
    pub fn count_of(&self, r: char, y: LineIndex) -> usize {
        self.lines.count_of(r, y)
    }

    /// Trim trailing whitespace from line `y`.
    pub fn trim_right(&mut self, y: LineIndex) -> bool {
        let trimmed = self.lines.trim_right(y);
        if trimmed {
            self.mark_changed();
        }
        trimmed
    }

    /// Trim leading whitespace from line `y`.
    pub fn trim_left(&mut self, y: LineIndex) -> bool {
        let trimmed = self.lines.trim_left(y);
        if trimmed {
            self.mark_changed();
        }
        trimmed
    }

    /// Leading whitespace of line `y`.
    #[must_use]
    pub fn leading_whitespace_at(&self, y: LineIndex) -> String {
        self.lines.line(y).iter().take_while(|c| c.is_whitespace()).collect()
    }

    // -- Coordinate translation ---------------------------------------------

    /// The line the cursor is on.
    #[inline]
    #[must_use]
    pub const fn data_y(&self) -> LineIndex {
        self.pos.line_index()
    }

    /// Translate the cursor's screen column into a rune index on its line.
    ///
    /// Walks the line, adding `per_tab` columns for a tab and one for any
    /// other rune, and stops when the running column equals
    /// `screenX + offsetX`. A column that falls past the content, or inside
    /// the expansion of a tab, gives [`DataX::AfterContent`] with the line's
    /// rune count.
    #[must_use]
    pub fn data_x(&self) -> DataX {
        let target = self.pos.column();
        let per_tab = self.per_tab();
        let mut screen = 0;
        let mut count = 0;
        for &r in self.lines.line(self.data_y()) {
            if screen == target {
                trace!(target, x = count, "data_x");
                return DataX::Found(count);
            }
            screen += if r == '\t' { per_tab } else { 1 };
            count += 1;
        }
        DataX::AfterContent(count)
    }

    /// `(dataX, dataY)` for the cursor.
    #[must_use]
    pub fn data_position(&self) -> (DataX, LineIndex) {
        (self.data_x(), self.data_y())
    }

    /// `(screenX, screenY)`, the cursor within the viewport.
    #[inline]
    #[must_use]
    pub const fn screen_position(&self) -> (usize, usize) {
        (self.pos.screen_x, self.pos.screen_y)
    }

    /// Screen column where rune index `x` of line `y` starts.
    ///
    /// Indices past the end of the line count one column each.
    #[must_use]
    pub fn screen_column_of(&self, x: ColIndex, y: LineIndex) -> usize {
        let line = self.lines.line(y);
        let indent = self.indentation();
        let within: usize = line.iter().take(x).map(|&r| indent.width_of(r)).sum();
        within + x.saturating_sub(line.len())
    }

    /// Screen columns occupied by line `y`. The column just after the last
    /// rune.
    #[must_use]
    pub fn screen_width(&self, y: LineIndex) -> usize {
        self.screen_column_of(self.lines.line_len(y), y)
    }

    /// Screen column of the first rune on line `y` that is not a tab or a
    /// space.
    #[must_use]
    pub fn first_screen_position(&self, y: LineIndex) -> usize {
        let indent = self.indentation();
        self.lines
            .line(y)
            .iter()
            .take_while(|&&r| r == '\t' || r == ' ')
            .map(|&r| indent.width_of(r))
            .sum()
    }

    /// Screen column of the last rune on line `y`, counting tabs as
    /// `per_tab` wide. `None` for an empty line.
    #[must_use]
    pub fn last_screen_position(&self, y: LineIndex) -> Option<usize> {
        let last = self.lines.last_data_position(y)?;
        Some(last + self.count_of('\t', y) * (self.per_tab() - 1))
    }

    #[must_use]
    pub fn first_data_position(&self, y: LineIndex) -> ColIndex {
        self.lines.first_data_position(y)
    }

    #[must_use]
    pub fn last_data_position(&self, y: LineIndex) -> Option<ColIndex> {
        self.lines.last_data_position(y)
    }

    /// The rune whose screen span covers `column` on line `y`.
    pub(crate) fn rune_covering_column(&self, column: usize, y: LineIndex) -> Option<char> {
        let indent = self.indentation();
        let mut screen = 0;
        for &r in self.lines.line(y) {
            let next = screen + indent.width_of(r);
            if column < next {
                return Some(r);
            }
            screen = next;
        }
        None
    }

    // -- Runes around the cursor --------------------------------------------

    /// The rune under the cursor, `None` past the line's content.
    #[must_use]
    pub fn rune(&self) -> Option<char> {
        let x = self.data_x().found()?;
        self.lines.rune(x, self.data_y())
    }

    /// The rune left of the cursor. Past the content this is the line's
    /// last rune.
    #[must_use]
    pub fn left_rune(&self) -> Option<char> {
        let y = self.data_y();
        match self.data_x() {
            DataX::AfterContent(_) => self.lines.line(y).last().copied(),
            DataX::Found(0) => None,
            DataX::Found(x) => self.lines.rune(x - 1, y),
        }
    }

    /// True when the rune just before the cursor's rune index is a tab.
    #[must_use]
    pub fn tab_to_the_left(&self) -> bool {
        let x = self.data_x().value();
        x > 0 && self.lines.rune(x - 1, self.data_y()) == Some('\t')
    }

    /// The text from the cursor to the end of the line.
    #[must_use]
    pub fn line_from_cursor(&self) -> String {
        match self.data_x() {
            DataX::Found(x) => self.lines.line(self.data_y())[x..].iter().collect(),
            DataX::AfterContent(_) => String::new(),
        }
    }

    /// True when any non-whitespace rune sits before the cursor.
    #[must_use]
    pub fn any_text_before_cursor(&self) -> bool {
        let x = self.data_x().value();
        self.lines.line(self.data_y()).iter().take(x).any(|c| !c.is_whitespace())
    }

    // -- Predicates ---------------------------------------------------------

    /// True on an empty current line.
    #[must_use]
    pub fn empty_line(&self) -> bool {
        self.lines.line_len(self.data_y()) == 0
    }

    /// True when the current line is empty after trimming trailing
    /// whitespace.
    #[must_use]
    pub fn empty_right_trimmed_line(&self) -> bool {
        self.lines.is_blank(self.data_y())
    }

    /// Same as [`Self::empty_right_trimmed_line`] for the line below.
    #[must_use]
    pub fn empty_right_trimmed_line_below(&self) -> bool {
        self.lines.is_blank(self.data_y() + 1)
    }

    /// True on or past the last rune of the line.
    #[must_use]
    pub fn at_or_after_end_of_line(&self) -> bool {
        let y = self.data_y();
        match (self.data_x(), self.lines.last_data_position(y)) {
            (DataX::Found(x), Some(last)) => x >= last,
            _ => true,
        }
    }

    /// True past the last rune of the line.
    #[must_use]
    pub fn after_end_of_line(&self) -> bool {
        let y = self.data_y();
        match (self.data_x(), self.lines.last_data_position(y)) {
            (DataX::Found(x), Some(last)) => x > last,
            _ => true,
        }
    }

    /// True when the cursor column is the last rune's column.
    #[must_use]
    pub fn at_end_of_line(&self) -> bool {
        self.last_screen_position(self.data_y()) == Some(self.pos.column())
    }

    /// True when the cursor column lies past the last rune's column.
    #[must_use]
    pub fn after_line_screen_contents(&self) -> bool {
        self.pos.column() >= self.screen_width(self.data_y())
    }

    /// True when the cursor column lies more than one column past the last
    /// rune. The column right after the content is where appends happen, so
    /// this is the "too far" test.
    #[must_use]
    pub fn after_line_screen_contents_plus_one(&self) -> bool {
        self.pos.column() > self.screen_width(self.data_y())
    }

    #[must_use]
    pub const fn at_first_line_of_document(&self) -> bool {
        self.data_y() == 0
    }

    #[must_use]
    pub fn at_last_line_of_document(&self) -> bool {
        self.len() > 0 && self.data_y() == self.len() - 1
    }

    #[must_use]
    pub fn after_last_line_of_document(&self) -> bool {
        self.data_y() >= self.len()
    }

    #[must_use]
    pub fn at_end_of_document(&self) -> bool {
        self.at_last_line_of_document() && self.at_end_of_line()
    }

    #[must_use]
    pub fn at_or_after_end_of_document(&self) -> bool {
        (self.at_last_line_of_document() && self.at_or_after_end_of_line())
            || self.after_last_line_of_document()
    }

    #[must_use]
    pub const fn at_start_of_document(&self) -> bool {
        self.data_y() == 0 && self.pos.at_start_of_the_line()
    }

    /// True when the cursor is on the first non-indent rune of its line.
    #[must_use]
    pub fn at_start_of_text_screen_line(&self) -> bool {
        self.pos.column() == self.first_screen_position(self.data_y())
    }

    /// True when the cursor is inside the line's indentation.
    #[must_use]
    pub fn before_start_of_text_screen_line(&self) -> bool {
        self.pos.column() < self.first_screen_position(self.data_y())
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.lines, f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
