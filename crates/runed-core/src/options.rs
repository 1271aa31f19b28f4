//! Editor settings and the `:set` layer that changes them.
//!
//! [`Settings`] is the passive configuration the core reads: indentation,
//! wrap width, wrap-on-type, block mode, viewport size and scroll speed.
//! The front end owns the values and hands them to the
//! [`Editor`](crate::editor::Editor). The `:set` parser here turns strings
//! into [`SetDirective`]s, and [`Settings::apply`] executes them.
//!
//! # Supported syntax
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `:set option`    | Enable boolean / show numeric |
//! | `:set nooption`  | Disable boolean               |
//! | `:set option!`   | Toggle boolean                |
//! | `:set option?`   | Query current value           |
//! | `:set option=N`  | Assign numeric value          |
//! | `:set`           | Show changed options          |
//! | `:set all`       | Show all options              |
//!
//! # Option names
//!
//! | Full name     | Abbrev | Type    | Default |
//! |---------------|--------|---------|---------|
//! | `tabstop`     | `ts`   | integer | 4       |
//! | `expandtab`   | `et`   | bool    | true    |
//! | `wrapwidth`   | `ww`   | integer | 0       |
//! | `wrapontype`  | `wot`  | bool    | false   |
//! | `blockmode`   | `bm`   | bool    | false   |
//! | `scrollspeed` | `ss`   | integer | 10      |
//!
//! A wrap width of 0 disables wrapping.

use crate::error::{Error, Result};
use crate::indent::Indentation;
use crate::position::Viewport;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Lines moved per scroll step unless configured otherwise.
pub const DEFAULT_SCROLL_SPEED: usize = 10;

/// Configuration the editor core consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub indentation: Indentation,
    /// Maximum rune count per line. 0 disables wrapping.
    pub wrap_width: usize,
    /// Wrap the current line while typing once it passes `wrap_width`.
    pub wrap_on_type: bool,
    /// Repeat rune inserts and deletes down the current block.
    pub block_mode: bool,
    pub viewport: Viewport,
    pub scroll_speed: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indentation: Indentation::default(),
            wrap_width: 0,
            wrap_on_type: false,
            block_mode: false,
            viewport: Viewport::default(),
            scroll_speed: DEFAULT_SCROLL_SPEED,
        }
    }
}

/// Canonical option identity, after resolving abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opt {
    TabStop,
    ExpandTab,
    WrapWidth,
    WrapOnType,
    BlockMode,
    ScrollSpeed,
}

impl Opt {
    const ALL: [Self; 6] = [
        Self::TabStop,
        Self::ExpandTab,
        Self::WrapWidth,
        Self::WrapOnType,
        Self::BlockMode,
        Self::ScrollSpeed,
    ];

    fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "tabstop" | "ts" => Self::TabStop,
            "expandtab" | "et" => Self::ExpandTab,
            "wrapwidth" | "ww" => Self::WrapWidth,
            "wrapontype" | "wot" => Self::WrapOnType,
            "blockmode" | "bm" => Self::BlockMode,
            "scrollspeed" | "ss" => Self::ScrollSpeed,
            _ => return None,
        })
    }

    const fn name(self) -> &'static str {
        match self {
            Self::TabStop => "tabstop",
            Self::ExpandTab => "expandtab",
            Self::WrapWidth => "wrapwidth",
            Self::WrapOnType => "wrapontype",
            Self::BlockMode => "blockmode",
            Self::ScrollSpeed => "scrollspeed",
        }
    }

    const fn is_bool(self) -> bool {
        matches!(self, Self::ExpandTab | Self::WrapOnType | Self::BlockMode)
    }
}

impl Settings {
    fn get_bool(&self, opt: Opt) -> Option<bool> {
        match opt {
            Opt::ExpandTab => Some(!self.indentation.use_tabs()),
            Opt::WrapOnType => Some(self.wrap_on_type),
            Opt::BlockMode => Some(self.block_mode),
            _ => None,
        }
    }

    fn set_bool(&mut self, opt: Opt, value: bool) {
        match opt {
            Opt::ExpandTab => self.indentation.set_use_tabs(!value),
            Opt::WrapOnType => self.wrap_on_type = value,
            Opt::BlockMode => self.block_mode = value,
            _ => {}
        }
    }

    fn get_number(&self, opt: Opt) -> Option<usize> {
        match opt {
            Opt::TabStop => Some(self.indentation.per_tab()),
            Opt::WrapWidth => Some(self.wrap_width),
            Opt::ScrollSpeed => Some(self.scroll_speed),
            _ => None,
        }
    }

    fn set_number(&mut self, opt: Opt, name: &str, value: usize) -> Result<()> {
        match opt {
            Opt::TabStop | Opt::ScrollSpeed if value == 0 => Err(invalid(name, "0")),
            Opt::TabStop => {
                self.indentation.set_per_tab(value);
                Ok(())
            }
            Opt::WrapWidth => {
                self.wrap_width = value;
                Ok(())
            }
            Opt::ScrollSpeed => {
                self.scroll_speed = value;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Display form of one option: `name=N`, `name` or `noname`.
    fn format(&self, opt: Opt) -> String {
        match (self.get_bool(opt), self.get_number(opt)) {
            (Some(b), _) => switch_label(opt.name(), b),
            (None, Some(n)) => format!("{}={n}", opt.name()),
            (None, None) => opt.name().to_owned(),
        }
    }

    /// Options whose value differs from the default, space separated.
    #[must_use]
    pub fn show_changed(&self) -> String {
        let defaults = Self::default();
        Opt::ALL
            .iter()
            .filter(|&&o| self.format(o) != defaults.format(o))
            .map(|&o| self.format(o))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every option, space separated.
    #[must_use]
    pub fn show_all(&self) -> String {
        Opt::ALL
            .iter()
            .map(|&o| self.format(o))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute one directive.
    ///
    /// Returns text to display for queries and listings, `None` for silent
    /// changes.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownOption`] for a name that is not an option, and
    /// [`Error::InvalidValue`] when a value does not fit its option (a
    /// non-number, 0 for `tabstop`/`scrollspeed`, or a boolean used as a
    /// number and the other way around).
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>> {
        match directive {
            SetDirective::ShowChanged => Ok(Some(self.show_changed())),
            SetDirective::ShowAll => Ok(Some(self.show_all())),
            SetDirective::Query(name) => {
                let opt = resolve(name)?;
                Ok(Some(self.format(opt)))
            }
            SetDirective::On(name) => {
                let opt = resolve(name)?;
                if !opt.is_bool() {
                    return Ok(Some(self.format(opt)));
                }
                self.set_bool(opt, true);
                Ok(None)
            }
            SetDirective::Off(name) => {
                let opt = resolve(name)?;
                if !opt.is_bool() {
                    return Err(invalid(name, "no"));
                }
                self.set_bool(opt, false);
                Ok(None)
            }
            SetDirective::Toggle(name) => {
                let opt = resolve(name)?;
                let current = self.get_bool(opt).ok_or_else(|| invalid(name, "!"))?;
                self.set_bool(opt, !current);
                Ok(None)
            }
            SetDirective::Assign(name, value) => {
                let opt = resolve(name)?;
                if opt.is_bool() {
                    return Err(invalid(name, value));
                }
                let n = value.parse::<usize>().map_err(|_| invalid(name, value))?;
                self.set_number(opt, name, n)?;
                Ok(None)
            }
        }
    }

    /// Parse `args` and apply every directive in order.
    ///
    /// Output from queries is collected, one entry per line.
    ///
    /// # Errors
    ///
    /// Stops at the first directive that fails. Earlier directives stay
    /// applied.
    pub fn apply_set(&mut self, args: &str) -> Result<String> {
        let mut out = Vec::new();
        for directive in parse_set(args) {
            if let Some(text) = self.apply(&directive)? {
                out.push(text);
            }
        }
        Ok(out.join("\n"))
    }
}

fn resolve(name: &str) -> Result<Opt> {
    Opt::lookup(name).ok_or_else(|| Error::UnknownOption(name.to_owned()))
}

fn invalid(name: &str, value: &str) -> Error {
    Error::InvalidValue {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// One word of a `:set` command line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// A bare switch name: turn it on.
    On(String),
    /// A switch name behind `no`: turn it off.
    Off(String),
    /// A switch name ending in `!`: flip it.
    Toggle(String),
    /// A name ending in `?`, or a bare numeric name: report the value.
    Query(String),
    /// `name=value`.
    Assign(String, String),
    /// Nothing after `:set`: list what differs from the defaults.
    ShowChanged,
    /// The word `all`: list everything.
    ShowAll,
}

/// Split a `:set` argument string into directives, one per word.
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let words: Vec<_> = args.split_whitespace().map(parse_set_arg).collect();
    if words.is_empty() {
        vec![SetDirective::ShowChanged]
    } else {
        words
    }
}

/// Classify a single word. Names are not checked here, except to tell a
/// `no` prefix from an option whose name happens to start with "no".
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        SetDirective::ShowAll
    } else if let Some((name, value)) = arg.split_once('=') {
        SetDirective::Assign(name.to_owned(), value.to_owned())
    } else if let Some(name) = arg.strip_suffix('?') {
        SetDirective::Query(name.to_owned())
    } else if let Some(name) = arg.strip_suffix('!') {
        SetDirective::Toggle(name.to_owned())
    } else if let Some(name) = arg.strip_prefix("no").filter(|n| is_switch(n)) {
        SetDirective::Off(name.to_owned())
    } else if Opt::lookup(arg).is_some_and(|o| !o.is_bool()) {
        SetDirective::Query(arg.to_owned())
    } else {
        SetDirective::On(arg.to_owned())
    }
}

fn is_switch(name: &str) -> bool {
    Opt::lookup(name).is_some_and(Opt::is_bool)
}

/// `name` or `noname`, the way a switch is listed.
fn switch_label(name: &str, on: bool) -> String {
    if on { name.to_owned() } else { format!("no{name}") }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -- Parsing ------------------------------------------------------------

    #[test]
    fn parse_boolean_on_and_off() {
        assert_eq!(parse_set_arg("expandtab"), SetDirective::On("expandtab".into()));
        assert_eq!(parse_set_arg("noet"), SetDirective::Off("et".into()));
        assert_eq!(parse_set_arg("noblockmode"), SetDirective::Off("blockmode".into()));
    }

    #[test]
    fn parse_toggle_and_query() {
        assert_eq!(parse_set_arg("bm!"), SetDirective::Toggle("bm".into()));
        assert_eq!(parse_set_arg("ww?"), SetDirective::Query("ww".into()));
    }

    #[test]
    fn parse_assign() {
        assert_eq!(
            parse_set_arg("ts=8"),
            SetDirective::Assign("ts".into(), "8".into())
        );
        assert_eq!(
            parse_set_arg("wrapwidth="),
            SetDirective::Assign("wrapwidth".into(), String::new())
        );
    }

    #[test]
    fn parse_numeric_bare_is_query() {
        assert_eq!(parse_set_arg("tabstop"), SetDirective::Query("tabstop".into()));
        assert_eq!(parse_set_arg("ss"), SetDirective::Query("ss".into()));
    }

    #[test]
    fn parse_no_prefix_on_non_bool_is_literal() {
        assert_eq!(parse_set_arg("nothing"), SetDirective::On("nothing".into()));
    }

    #[test]
    fn parse_empty_and_all() {
        assert_eq!(parse_set("  "), vec![SetDirective::ShowChanged]);
        assert_eq!(parse_set("all"), vec![SetDirective::ShowAll]);
    }

    #[test]
    fn parse_multiple_args() {
        assert_eq!(
            parse_set("ts=2 noet wot"),
            vec![
                SetDirective::Assign("ts".into(), "2".into()),
                SetDirective::Off("et".into()),
                SetDirective::On("wot".into()),
            ]
        );
    }

    #[test]
    fn switches_by_short_and_long_name() {
        assert!(is_switch("wot"));
        assert!(is_switch("blockmode"));
        assert!(!is_switch("ts"));
        assert!(!is_switch("number"));
    }

    #[test]
    fn switch_labels() {
        assert_eq!(switch_label("blockmode", true), "blockmode");
        assert_eq!(switch_label("blockmode", false), "noblockmode");
    }

    // -- Applying -----------------------------------------------------------

    #[test]
    fn apply_changes_settings() {
        let mut s = Settings::default();
        s.apply_set("ts=8 noet ww=72 wot bm").expect("valid directives");
        assert_eq!(s.indentation.per_tab(), 8);
        assert!(s.indentation.use_tabs());
        assert_eq!(s.wrap_width, 72);
        assert!(s.wrap_on_type);
        assert!(s.block_mode);
    }

    #[test]
    fn toggle_flips() {
        let mut s = Settings::default();
        s.apply_set("bm!").expect("toggle");
        assert!(s.block_mode);
        s.apply_set("blockmode!").expect("toggle");
        assert!(!s.block_mode);
    }

    #[test]
    fn queries_report_values() {
        let mut s = Settings::default();
        assert_eq!(s.apply_set("ts? et?").expect("query"), "tabstop=4\nexpandtab");
        assert_eq!(s.apply_set("ww").expect("query"), "wrapwidth=0");
    }

    #[test]
    fn show_changed_lists_only_changes() {
        let mut s = Settings::default();
        assert_eq!(s.apply_set("").expect("show"), "");
        s.apply_set("ww=60").expect("assign");
        assert_eq!(s.apply_set("").expect("show"), "wrapwidth=60");
    }

    #[test]
    fn show_all_lists_everything() {
        let s = Settings::default();
        assert_eq!(
            s.show_all(),
            "tabstop=4 expandtab wrapwidth=0 nowrapontype noblockmode scrollspeed=10"
        );
    }

    #[test]
    fn unknown_option_is_an_error() {
        let mut s = Settings::default();
        assert_eq!(
            s.apply_set("bogus"),
            Err(Error::UnknownOption("bogus".into()))
        );
    }

    #[test]
    fn invalid_values_are_errors() {
        let mut s = Settings::default();
        assert!(matches!(s.apply_set("ts=x"), Err(Error::InvalidValue { .. })));
        assert!(matches!(s.apply_set("ts=0"), Err(Error::InvalidValue { .. })));
        assert!(matches!(s.apply_set("bm=1"), Err(Error::InvalidValue { .. })));
        assert!(matches!(s.apply_set("ts!"), Err(Error::InvalidValue { .. })));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn earlier_directives_stay_applied() {
        let mut s = Settings::default();
        assert!(s.apply_set("ww=50 nope").is_err());
        assert_eq!(s.wrap_width, 50);
    }
}
