//! Cursor and scroll state, plus the types used to talk about coordinates.
//!
//! Three coordinate spaces meet here:
//!
//! - **Data**: rune indices into the line store. The data y is a line
//!   index and the data x a rune index within that line.
//! - **Screen**: terminal columns and rows. A tab occupies the configured
//!   tab width, every other rune occupies one column.
//! - **Viewport**: screen coordinates minus the scroll offsets. This is what
//!   [`Position`] stores.
//!
//! The vertical relation is plain arithmetic: `data_y = offset_y + screen_y`.
//! The horizontal one depends on the tabs in the current line, so the data x
//! is never stored. It is recomputed by
//! [`Editor::data_x`](crate::editor::Editor::data_x) on every query.

use std::fmt;

use crate::error::{Error, Result};

/// Zero-based line index into the document.
pub type LineIndex = usize;

/// Zero-based rune index within a line.
pub type ColIndex = usize;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Size of the visible text area, in terminal cells.
///
/// The core never talks to a terminal. The front end passes the current size
/// in and the core uses it to decide when to scroll. Both sides are at least
/// 1, which the scroll math relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    width: usize,
    height: usize,
}

impl Viewport {
    /// Create a viewport. Both dimensions are clamped to at least 1.
    #[inline]
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(self) -> usize {
        self.height
    }
}

impl Default for Viewport {
    /// 80×25, the size assumed when no terminal is attached.
    fn default() -> Self {
        Self::new(80, 25)
    }
}

// ---------------------------------------------------------------------------
// DataX
// ---------------------------------------------------------------------------

/// Result of translating the cursor's screen column into a rune index.
///
/// `AfterContent` is the normal answer whenever the cursor sits past the last
/// rune of its line. The payload is then the line's rune count, which is where
/// an append would go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataX {
    /// The cursor column lines up with the rune at this index.
    Found(usize),
    /// The cursor is past the line's content. Payload is the rune count.
    AfterContent(usize),
}

impl DataX {
    /// The rune index, regardless of which variant this is.
    #[inline]
    #[must_use]
    pub const fn value(self) -> usize {
        match self {
            Self::Found(x) | Self::AfterContent(x) => x,
        }
    }

    /// The rune index only when the cursor is on content.
    #[inline]
    #[must_use]
    pub const fn found(self) -> Option<usize> {
        match self {
            Self::Found(x) => Some(x),
            Self::AfterContent(_) => None,
        }
    }

    /// True when the cursor sits past the end of the line.
    #[inline]
    #[must_use]
    pub const fn is_after_content(self) -> bool {
        matches!(self, Self::AfterContent(_))
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Cursor location within the viewport together with the scroll offsets.
///
/// `saved_x` is the last column the user moved to on purpose. Vertical
/// movement tries to return to it so the cursor does not drift left after
/// passing through a short line.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) screen_x: usize,
    pub(crate) screen_y: usize,
    pub(crate) offset_x: usize,
    pub(crate) offset_y: usize,
    pub(crate) saved_x: usize,
    pub(crate) scroll_speed: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Position {
    /// Top-left of an unscrolled document. `scroll_speed` is how many lines
    /// a single scroll step moves (at least 1).
    #[must_use]
    pub const fn new(scroll_speed: usize) -> Self {
        Self {
            screen_x: 0,
            screen_y: 0,
            offset_x: 0,
            offset_y: 0,
            saved_x: 0,
            scroll_speed: if scroll_speed == 0 { 1 } else { scroll_speed },
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn screen_x(&self) -> usize {
        self.screen_x
    }

    #[inline]
    #[must_use]
    pub const fn screen_y(&self) -> usize {
        self.screen_y
    }

    #[inline]
    #[must_use]
    pub const fn offset_x(&self) -> usize {
        self.offset_x
    }

    #[inline]
    #[must_use]
    pub const fn offset_y(&self) -> usize {
        self.offset_y
    }

    #[inline]
    #[must_use]
    pub const fn saved_x(&self) -> usize {
        self.saved_x
    }

    #[inline]
    #[must_use]
    pub const fn scroll_speed(&self) -> usize {
        self.scroll_speed
    }

    /// The line this position is on: `offsetY + screenY`.
    #[inline]
    #[must_use]
    pub const fn line_index(&self) -> usize {
        self.offset_y + self.screen_y
    }

    /// Absolute screen column, ignoring horizontal scrolling.
    #[inline]
    #[must_use]
    pub const fn column(&self) -> usize {
        self.offset_x + self.screen_x
    }

    // -- Setters ------------------------------------------------------------

    /// Place the cursor at absolute screen column `x`, scrolling
    /// horizontally when `x` does not fit in the viewport.
    pub const fn set_x(&mut self, x: usize, viewport: Viewport) {
        if x < viewport.width {
            self.offset_x = 0;
            self.screen_x = x;
        } else {
            self.offset_x = x - viewport.width + 1;
            self.screen_x = x - self.offset_x;
        }
    }

    pub const fn set_y(&mut self, y: usize) {
        self.screen_y = y;
    }

    pub const fn set_offset_x(&mut self, offset_x: usize) {
        self.offset_x = offset_x;
    }

    pub const fn set_offset_y(&mut self, offset_y: usize) {
        self.offset_y = offset_y;
    }

    /// Move one row up, stopping at row 0.
    pub const fn dec_y(&mut self) {
        self.screen_y = self.screen_y.saturating_sub(1);
    }

    /// Move one row down, stopping at the last viewport row.
    pub fn inc_y(&mut self, viewport: Viewport) {
        self.screen_y = (self.screen_y + 1).min(viewport.height - 1);
    }

    // -- Movement within the viewport ---------------------------------------

    /// Move one row up.
    ///
    /// # Errors
    ///
    /// [`Error::AtTopEdge`] when already on the first row. The caller
    /// decides whether to scroll instead.
    pub const fn up(&mut self) -> Result<()> {
        if self.screen_y == 0 {
            return Err(Error::AtTopEdge);
        }
        self.screen_y -= 1;
        Ok(())
    }

    /// Move one row down.
    ///
    /// # Errors
    ///
    /// [`Error::AtBottomEdge`] when already on the last viewport row.
    pub const fn down(&mut self, viewport: Viewport) -> Result<()> {
        if self.screen_y + 1 >= viewport.height {
            return Err(Error::AtBottomEdge);
        }
        self.screen_y += 1;
        Ok(())
    }

    /// Move one column right, scrolling a page sideways at the right edge.
    pub const fn right(&mut self, viewport: Viewport) {
        if self.screen_x + 1 < viewport.width {
            self.screen_x += 1;
        } else {
            self.screen_x = 0;
            self.offset_x += if viewport.width > 1 { viewport.width - 1 } else { 1 };
        }
    }

    /// Move one column left within the viewport.
    pub const fn left(&mut self) {
        self.screen_x = self.screen_x.saturating_sub(1);
    }

    /// True at the left edge of the viewport, scrolled or not.
    #[inline]
    #[must_use]
    pub const fn at_start_of_screen_line(&self) -> bool {
        self.screen_x == 0
    }

    /// True at column 0 of an unscrolled line.
    #[inline]
    #[must_use]
    pub const fn at_start_of_the_line(&self) -> bool {
        self.screen_x == 0 && self.offset_x == 0
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pos({}:{} +{}:{} saved={})",
            self.screen_x, self.screen_y, self.offset_x, self.offset_y, self.saved_x
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for the status line.
        write!(f, "{}:{}", self.line_index() + 1, self.column() + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Viewport -----------------------------------------------------------

    #[test]
    fn viewport_default_is_80_by_25() {
        let v = Viewport::default();
        assert_eq!((v.width(), v.height()), (80, 25));
    }

    #[test]
    fn viewport_clamps_zero() {
        let v = Viewport::new(0, 0);
        assert_eq!((v.width(), v.height()), (1, 1));
    }

    // -- DataX --------------------------------------------------------------

    #[test]
    fn data_x_accessors() {
        assert_eq!(DataX::Found(3).value(), 3);
        assert_eq!(DataX::AfterContent(7).value(), 7);
        assert_eq!(DataX::Found(3).found(), Some(3));
        assert_eq!(DataX::AfterContent(7).found(), None);
        assert!(DataX::AfterContent(0).is_after_content());
        assert!(!DataX::Found(0).is_after_content());
    }

    // -- Position -----------------------------------------------------------

    #[test]
    fn new_position_is_origin() {
        let p = Position::new(1);
        assert_eq!(p.screen_x(), 0);
        assert_eq!(p.screen_y(), 0);
        assert_eq!(p.line_index(), 0);
        assert!(p.at_start_of_the_line());
    }

    #[test]
    fn scroll_speed_is_at_least_one() {
        assert_eq!(Position::new(0).scroll_speed(), 1);
        assert_eq!(Position::new(4).scroll_speed(), 4);
    }

    #[test]
    fn line_index_adds_offset() {
        let mut p = Position::new(1);
        p.set_offset_y(10);
        p.set_y(3);
        assert_eq!(p.line_index(), 13);
    }

    #[test]
    fn set_x_within_viewport_resets_offset() {
        let mut p = Position::new(1);
        p.set_offset_x(5);
        p.set_x(10, Viewport::new(80, 25));
        assert_eq!(p.screen_x(), 10);
        assert_eq!(p.offset_x(), 0);
    }

    #[test]
    fn set_x_past_viewport_scrolls() {
        let mut p = Position::new(1);
        p.set_x(100, Viewport::new(80, 25));
        assert_eq!(p.offset_x(), 21);
        assert_eq!(p.screen_x(), 79);
        assert_eq!(p.column(), 100);
    }

    #[test]
    fn up_at_top_is_an_error() {
        let mut p = Position::new(1);
        assert_eq!(p.up(), Err(Error::AtTopEdge));
        p.set_y(2);
        assert_eq!(p.up(), Ok(()));
        assert_eq!(p.screen_y(), 1);
    }

    #[test]
    fn down_at_bottom_is_an_error() {
        let v = Viewport::new(80, 3);
        let mut p = Position::new(1);
        assert!(p.down(v).is_ok());
        assert!(p.down(v).is_ok());
        assert_eq!(p.down(v), Err(Error::AtBottomEdge));
        assert_eq!(p.screen_y(), 2);
    }

    #[test]
    fn inc_and_dec_y_clamp() {
        let v = Viewport::new(80, 2);
        let mut p = Position::new(1);
        p.dec_y();
        assert_eq!(p.screen_y(), 0);
        p.inc_y(v);
        p.inc_y(v);
        assert_eq!(p.screen_y(), 1);
    }

    #[test]
    fn right_wraps_into_horizontal_scroll() {
        let v = Viewport::new(4, 2);
        let mut p = Position::new(1);
        p.right(v);
        p.right(v);
        p.right(v);
        assert_eq!(p.screen_x(), 3);
        p.right(v);
        assert_eq!(p.screen_x(), 0);
        assert_eq!(p.offset_x(), 3);
        p.left();
        assert_eq!(p.screen_x(), 0);
    }

    #[test]
    fn one_cell_viewport() {
        let v = Viewport::new(1, 1);
        let mut p = Position::new(1);
        p.inc_y(v);
        assert_eq!(p.screen_y(), 0);
        assert_eq!(p.down(v), Err(Error::AtBottomEdge));
        p.right(v);
        p.right(v);
        assert_eq!((p.screen_x(), p.offset_x()), (0, 2));
        p.set_x(5, v);
        assert_eq!((p.screen_x(), p.offset_x()), (0, 5));
    }

    #[test]
    fn display_is_1_indexed() {
        let mut p = Position::new(1);
        assert_eq!(format!("{p}"), "1:1");
        p.set_y(4);
        p.set_x(9, Viewport::default());
        assert_eq!(format!("{p}"), "5:10");
    }

    #[test]
    fn debug_format() {
        let p = Position::new(1);
        assert_eq!(format!("{p:?}"), "Pos(0:0 +0:0 saved=0)");
    }
}
