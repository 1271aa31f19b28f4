//! Indentation setting: tab width and whether the document prefers tabs.
//!
//! Every screen/data translation in the crate goes through
//! [`Indentation::per_tab`]. A tab always expands to exactly `per_tab`
//! columns, never to "the next tab stop".

use std::fmt;

/// Tab width plus the tabs-vs-spaces preference for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Indentation {
    per_tab: usize,
    use_tabs: bool,
}

impl Default for Indentation {
    fn default() -> Self {
        Self::spaces(4)
    }
}

impl Indentation {
    /// Create an indentation setting. `per_tab` is clamped to at least 1.
    #[must_use]
    pub const fn new(per_tab: usize, use_tabs: bool) -> Self {
        Self {
            per_tab: if per_tab == 0 { 1 } else { per_tab },
            use_tabs,
        }
    }

    /// Indent with `per_tab` spaces.
    #[must_use]
    pub const fn spaces(per_tab: usize) -> Self {
        Self::new(per_tab, false)
    }

    /// Indent with a tab character, displayed `per_tab` columns wide.
    #[must_use]
    pub const fn tabs(per_tab: usize) -> Self {
        Self::new(per_tab, true)
    }

    /// Screen columns occupied by one tab.
    #[inline]
    #[must_use]
    pub const fn per_tab(&self) -> usize {
        self.per_tab
    }

    #[inline]
    #[must_use]
    pub const fn use_tabs(&self) -> bool {
        self.use_tabs
    }

    /// Screen width of a single rune.
    #[inline]
    #[must_use]
    pub const fn width_of(&self, r: char) -> usize {
        if r == '\t' { self.per_tab } else { 1 }
    }

    /// The runes one level of indentation inserts.
    #[must_use]
    pub fn unit(&self) -> String {
        if self.use_tabs {
            "\t".to_owned()
        } else {
            " ".repeat(self.per_tab)
        }
    }

    pub(crate) const fn set_per_tab(&mut self, per_tab: usize) {
        self.per_tab = if per_tab == 0 { 1 } else { per_tab };
    }

    pub(crate) const fn set_use_tabs(&mut self, use_tabs: bool) {
        self.use_tabs = use_tabs;
    }
}

impl fmt::Display for Indentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.use_tabs {
            write!(f, "tabs ({} wide)", self.per_tab)
        } else {
            write!(f, "{} spaces", self.per_tab)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_four_spaces() {
        let i = Indentation::default();
        assert_eq!(i.per_tab(), 4);
        assert!(!i.use_tabs());
        assert_eq!(i.unit(), "    ");
    }

    #[test]
    fn tab_unit() {
        assert_eq!(Indentation::tabs(8).unit(), "\t");
    }

    #[test]
    fn zero_width_clamped() {
        assert_eq!(Indentation::new(0, true).per_tab(), 1);
        let mut i = Indentation::default();
        i.set_per_tab(0);
        assert_eq!(i.per_tab(), 1);
    }

    #[test]
    fn width_of_runes() {
        let i = Indentation::tabs(4);
        assert_eq!(i.width_of('\t'), 4);
        assert_eq!(i.width_of('x'), 1);
        assert_eq!(i.width_of('ø'), 1);
    }

    #[test]
    fn display() {
        assert_eq!(Indentation::tabs(8).to_string(), "tabs (8 wide)");
        assert_eq!(Indentation::spaces(2).to_string(), "2 spaces");
    }
}
