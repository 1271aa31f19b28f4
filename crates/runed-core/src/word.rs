//! Words around the cursor.
//!
//! Two notions of a word are used:
//!
//! - For lookups ([`Editor::current_word`]), a word is a run of letters,
//!   digits, `-`, `_` and `.`, so `foo-bar.rs` is one word.
//! - For motions ([`Editor::word_forward`], [`Editor::word_backward`]), runes
//!   are classified with [`classify`] and a word is a run of one class:
//!   `hello.world` is three words (`hello`, `.`, `world`). An empty line
//!   also counts as a word, so motions stop on it.

use crate::editor::Editor;
use crate::position::LineIndex;

// ---------------------------------------------------------------------------
// Rune classification
// ---------------------------------------------------------------------------

/// Rune class for word motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuneClass {
    /// Letters, digits, underscore.
    Word,
    /// Non-blank, non-word runes (operators, brackets, etc.).
    Punctuation,
    /// Whitespace within a line.
    Blank,
}

pub(crate) fn classify(r: char) -> RuneClass {
    if r.is_whitespace() {
        RuneClass::Blank
    } else if r.is_alphanumeric() || r == '_' {
        RuneClass::Word
    } else {
        RuneClass::Punctuation
    }
}

/// Runes that make up a word for lookups.
fn qualifies(r: char) -> bool {
    r.is_alphanumeric() || matches!(r, '-' | '_' | '.')
}

impl Editor {
    // -- Lookups ------------------------------------------------------------

    /// The word under the cursor, or `""` when the cursor is not on one.
    #[must_use]
    pub fn current_word(&self) -> String {
        let line = self.lines.line(self.data_y());
        let Some(x) = self.data_x().found() else {
            return String::new();
        };
        if !qualifies(line[x]) {
            return String::new();
        }
        let start = line[..x]
            .iter()
            .rposition(|&r| !qualifies(r))
            .map_or(0, |i| i + 1);
        line[start..].iter().take_while(|&&r| qualifies(r)).collect()
    }

    /// The word runes directly to the left of the cursor.
    #[must_use]
    pub fn letters_before_cursor(&self) -> String {
        let line = self.lines.line(self.data_y());
        let x = self.data_x().value().min(line.len());
        let start = line[..x]
            .iter()
            .rposition(|&r| !(r.is_alphanumeric() || r == '-' || r == '_'))
            .map_or(0, |i| i + 1);
        line[start..x].iter().collect()
    }

    /// The last whitespace-separated word of line `y`.
    #[must_use]
    pub fn last_word(&self, y: LineIndex) -> String {
        self.lines
            .line_string(y)
            .split_whitespace()
            .next_back()
            .unwrap_or_default()
            .to_owned()
    }

    // -- Motions ------------------------------------------------------------

    /// Move to the start of the next word, crossing lines. Returns false
    /// when there is no next word.
    pub fn word_forward(&mut self) -> bool {
        let mut y = self.data_y();
        let mut x = self.data_x().value();
        let line = self.lines.line(y);
        if let Some(&r) = line.get(x) {
            let class = classify(r);
            if class != RuneClass::Blank {
                while line.get(x).is_some_and(|&r| classify(r) == class) {
                    x += 1;
                }
            }
        }
        loop {
            let line = self.lines.line(y);
            while line.get(x).is_some_and(|&r| classify(r) == RuneClass::Blank) {
                x += 1;
            }
            if x < line.len() {
                break;
            }
            if y + 1 >= self.len() {
                return false;
            }
            y += 1;
            x = 0;
            if self.lines.line_len(y) == 0 {
                break;
            }
        }
        self.go_to_line_and_column(y, x);
        true
    }

    /// Move to the start of the previous word, crossing lines. Returns false
    /// at the start of the document.
    pub fn word_backward(&mut self) -> bool {
        let start = (self.data_x().value(), self.data_y());
        let mut y = self.data_y();
        let mut x = start.0.min(self.lines.line_len(y));
        loop {
            let line = self.lines.line(y);
            while x > 0 && classify(line[x - 1]) == RuneClass::Blank {
                x -= 1;
            }
            if x > 0 {
                let class = classify(line[x - 1]);
                while x > 0 && classify(line[x - 1]) == class {
                    x -= 1;
                }
                break;
            }
            if y == 0 {
                break;
            }
            y -= 1;
            x = self.lines.line_len(y);
            if x == 0 {
                break;
            }
        }
        if (x, y) == start {
            return false;
        }
        self.go_to_line_and_column(y, x);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
