//! Word wrap.
//!
//! Width is a rune count, not a screen width: a tab counts as one rune here
//! even though it expands on screen. A width of 0 turns wrapping off.
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`Editor::split_overshoot`] | Where an over-long line would break |
//! | [`Editor::wrap_all_lines`] | Reflow every over-long line in the document |
//! | [`Editor::wrap_while_typing`] | Break the cursor line after an insert |

use tracing::debug;

use crate::editor::Editor;
use crate::position::LineIndex;

impl Editor {
    /// True if line `y` is shorter than the wrap width, or wrapping is off.
    #[must_use]
    pub fn within_limit(&self, y: LineIndex) -> bool {
        let width = self.settings.wrap_width;
        width == 0 || self.lines.line_len(y) < width
    }

    /// Split line `y` into the part that fits and the overshoot.
    ///
    /// With `is_space` the split is at the cursor. Otherwise the nearest
    /// whitespace at or before the wrap width is used when it is no more
    /// than half the width away, and the line is cut hard at the wrap width
    /// when it is not. Whitespace at the start of the second part is
    /// dropped. The flag is true when whitespace sat at the boundary.
    #[must_use]
    pub fn split_overshoot(&self, y: LineIndex, is_space: bool) -> (Vec<char>, Vec<char>, bool) {
        let line = self.lines.line(y);
        if self.within_limit(y) {
            return (line.to_vec(), Vec::new(), false);
        }
        let width = self.settings.wrap_width;
        let mut has_space = false;
        let mut at = width;
        if is_space {
            at = self.data_x().value();
        } else if let Some(space) = (0..=width)
            .rev()
            .find(|&i| line.get(i).is_some_and(|c| c.is_whitespace()))
        {
            has_space = true;
            if width - space <= width / 2 {
                at = space;
            }
        }
        let at = at.min(line.len());
        let first = line[..at].to_vec();
        let mut second = &line[at..];
        if let Some((c, rest)) = second.split_first() {
            if c.is_whitespace() {
                second = rest;
                has_space = true;
            }
        }
        (first, second.to_vec(), has_space)
    }

    /// Wrap every line that reaches the wrap width.
    ///
    /// The overshoot is prepended to the next line, separated by a space,
    /// when that line has text, so a paragraph reflows. Otherwise it gets a
    /// fresh line. The cursor moves down by the number of lines inserted
    /// above it. Returns whether any line was over the limit. The document
    /// is only marked changed when a line was actually split.
    pub fn wrap_all_lines(&mut self) -> bool {
        let cursor_y = self.data_y();
        let mut wrapped = false;
        let mut split = false;
        let mut inserted_above = 0;
        let mut i = 0;
        while i < self.len() {
            if self.within_limit(i) {
                i += 1;
                continue;
            }
            wrapped = true;
            let (first, mut second, _) = self.split_overshoot(i, false);
            if !first.is_empty() && !second.is_empty() {
                split = true;
                self.lines.set_line(i, first);
                let next = i + 1;
                if self.lines.contains(next) && !self.lines.is_blank(next) {
                    // The line break being joined over is itself a word
                    // boundary, so a space goes in even after a hard split.
                    if !second.last().is_some_and(|c| c.is_whitespace()) {
                        second.push(' ');
                    }
                    second.extend_from_slice(self.lines.line(next));
                    self.lines.set_line(next, second);
                } else {
                    self.lines.insert_line(next);
                    self.lines.set_line(next, second);
                    if i < cursor_y {
                        inserted_above += 1;
                    }
                }
                debug!(y = i, "wrapped line");
            }
            i += 1;
        }
        for _ in 0..inserted_above {
            if self.step_down().is_err() {
                break;
            }
        }
        if split {
            self.lines.normalize();
            self.mark_changed();
            self.flags.set_redraw_cursor(true);
        }
        wrapped
    }

    /// Set the wrap width and wrap the whole document at it.
    pub fn wrap_now(&mut self, width: usize) -> bool {
        self.settings.wrap_width = width;
        self.wrap_all_lines()
    }

    /// Break the cursor line after a rune was inserted at the cursor.
    ///
    /// The overshoot moves to a new line below and the cursor ends up just
    /// after the inserted rune, following it to the new line if that is
    /// where it went. Returns false when the line could not be split.
    pub fn wrap_while_typing(&mut self, is_space: bool) -> bool {
        let y = self.data_y();
        let target = self.data_x().value() + 1;
        let len = self.lines.line_len(y);
        let (first, second, _) = self.split_overshoot(y, is_space);
        if first.is_empty() || second.is_empty() {
            return false;
        }
        let kept = first.len();
        let dropped = len - kept - second.len();
        self.lines.set_line(y, first);
        self.lines.insert_line(y + 1);
        self.lines.set_line(y + 1, second);
        self.mark_changed();
        debug!(y, kept, "wrapped while typing");

        if target <= kept {
            self.set_column(self.screen_column_of(target, y));
        } else if self.step_down().is_ok() {
            let x = target.saturating_sub(kept + dropped);
            self.set_column(self.screen_column_of(x, y + 1));
        }
        true
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

    fn wrapping(text: &str, width: usize) -> Editor {
        let mut e = editor(text);
        e.settings.wrap_width = width;
        e
    }

    fn string(runes: &[char]) -> String {
        runes.iter().collect()
    }

    // -- Limits -------------------------------------------------------------

    #[test]
    fn zero_width_disables() {
        let e = wrapping(&"x".repeat(500), 0);
        assert!(e.within_limit(0));
    }

    #[test]
    fn limit_counts_runes_not_columns() {
        let e = wrapping("\t\t\t\n\t\t\t\t\t", 5);
        assert!(e.within_limit(0));
        assert!(!e.within_limit(1));
        assert!(e.within_limit(7));
    }

    // -- Splitting ----------------------------------------------------------

    #[test]
    fn split_at_nearby_space() {
        let e = wrapping("aaaa bbbb cccc", 10);
        let (first, second, space) = e.split_overshoot(0, false);
        assert_eq!(string(&first), "aaaa bbbb");
        assert_eq!(string(&second), "cccc");
        assert!(space);
    }

    #[test]
    fn split_hard_when_space_is_far() {
        let e = wrapping("ab cdefghijklmn", 10);
        let (first, second, space) = e.split_overshoot(0, false);
        assert_eq!(string(&first), "ab cdefghi");
        assert_eq!(string(&second), "jklmn");
        assert!(space);
    }

    #[test]
    fn split_without_any_space() {
        let e = wrapping("abcdefghijkl", 10);
        let (first, second, space) = e.split_overshoot(0, false);
        assert_eq!(string(&first), "abcdefghij");
        assert_eq!(string(&second), "kl");
        assert!(!space);
    }

    #[test]
    fn split_at_cursor_after_typed_space() {
        let mut e = wrapping("abcde fghijk", 10);
        place(&mut e, 5, 0);
        let (first, second, space) = e.split_overshoot(0, true);
        assert_eq!(string(&first), "abcde");
        assert_eq!(string(&second), "fghijk");
        assert!(space);
    }

    #[test]
    fn split_within_limit_is_whole_line() {
        let e = wrapping("short", 10);
        let (first, second, space) = e.split_overshoot(0, false);
        assert_eq!(string(&first), "short");
        assert!(second.is_empty());
        assert!(!space);
    }

    // -- Wrapping the document ----------------------------------------------

    #[test]
    fn long_line_with_space_at_forty() {
        let line = format!("{} {}", "a".repeat(40), "b".repeat(44));
        assert_eq!(line.chars().count(), 85);
        let mut e = wrapping(&line, 80);
        assert!(e.wrap_all_lines());
        assert_eq!(e.len(), 2);
        assert_eq!(e.line(0), "a".repeat(40));
        assert_eq!(e.line(1), "b".repeat(44));
        assert_eq!(e.store().lines().map(<[char]>::len).sum::<usize>(), 84);
        assert!(e.changed());
    }

    #[test]
    fn overshoot_joins_next_paragraph_line() {
        let mut e = wrapping("aaaa bbbb cccc\ndddd", 10);
        assert!(e.wrap_all_lines());
        assert_eq!(e.text(), "aaaa bbbb\ncccc dddd");
    }

    #[test]
    fn overshoot_before_blank_line_gets_its_own_line() {
        let mut e = wrapping("aaaa bbbb cccc\n\nx", 10);
        assert!(e.wrap_all_lines());
        assert_eq!(e.text(), "aaaa bbbb\ncccc\n\nx");
    }

    #[test]
    fn wrapping_cascades() {
        let mut e = wrapping("aaaa bbbb cccc dddd eeee", 10);
        e.wrap_all_lines();
        assert_eq!(e.text(), "aaaa bbbb\ncccc dddd\neeee");
    }

    #[test]
    fn cursor_follows_inserted_lines() {
        let mut e = wrapping("aaaa bbbb cccc\n\nlast", 10);
        e.go_to(2);
        e.wrap_all_lines();
        assert_eq!(e.data_y(), 3);
        assert_eq!(e.current_line(), "last");
    }

    #[test]
    fn nothing_to_wrap() {
        let mut e = wrapping("short\nlines", 10);
        assert!(!e.wrap_all_lines());
        assert!(!e.changed());
        assert!(!e.wrap_now(0));
    }

    #[test]
    fn line_at_width_without_space_is_left_unchanged() {
        let mut e = wrapping("abcdefghij", 10);
        assert!(e.wrap_all_lines());
        assert_eq!(e.text(), "abcdefghij");
        assert!(!e.changed());
    }

    #[test]
    fn hard_split_joins_next_line_with_space() {
        let mut e = wrapping("abcdefghijkl\nmno", 10);
        assert!(e.wrap_all_lines());
        assert_eq!(e.text(), "abcdefghij\nkl mno");
        assert!(e.changed());
    }

    #[test]
    fn wrap_now_sets_width() {
        let mut e = editor("aaaa bbbb cccc");
        assert!(e.wrap_now(10));
        assert_eq!(e.settings().wrap_width, 10);
        assert_eq!(e.len(), 2);
    }

    // -- Wrapping while typing ----------------------------------------------

    fn typing(text: &str, width: usize) -> Editor {
        let mut e = wrapping(text, width);
        e.settings.wrap_on_type = true;
        e
    }

    #[test]
    fn typed_rune_moves_word_down() {
        let mut e = typing("aaaaaa bbb", 10);
        e.end();
        assert!(e.insert_rune('c'));
        assert_eq!(e.text(), "aaaaaa\nbbbc");
        assert_eq!(e.data_y(), 1);
        assert_eq!(e.position().column(), 4);
    }

    #[test]
    fn typed_space_splits_at_cursor() {
        let mut e = typing("abcdefghij", 10);
        place(&mut e, 5, 0);
        assert!(e.insert_rune(' '));
        assert_eq!(e.text(), "abcde\nfghij");
        assert_eq!(e.data_y(), 1);
        assert_eq!(e.position().column(), 0);
    }

    #[test]
    fn cursor_stays_when_rune_lands_in_first_part() {
        let mut e = typing("aaaaaa bbbb", 10);
        place(&mut e, 2, 0);
        assert!(e.insert_rune('x'));
        assert_eq!(e.text(), "aaxaaaa\nbbbb");
        assert_eq!(e.data_y(), 0);
        assert_eq!(e.position().column(), 3);
    }

    #[test]
    fn trailing_space_does_not_wrap_yet() {
        let mut e = typing("aaaaaaaaaa", 10);
        e.end();
        assert!(!e.insert_rune(' '));
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn block_mode_skips_wrap() {
        let mut e = typing("aaaaaa bbb", 10);
        e.set_block_mode(true);
        e.end();
        assert!(!e.insert_rune('c'));
        assert_eq!(e.len(), 1);
    }
}
