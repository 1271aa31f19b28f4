// SPDX-License-Identifier: MIT
//
// Settings file for the runed front end.
//
// The file is TOML, every key is optional, and missing keys keep the
// library defaults:
//
//   tabstop = 8
//   expandtab = false
//   wrap_width = 72
//   wrap_on_type = true
//   block_mode = false
//   scroll_speed = 10
//   width = 120
//   height = 40

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use runed_core::options::DEFAULT_SCROLL_SPEED;
use runed_core::{Indentation, Settings, Viewport};
use serde::Deserialize;

/// Contents of a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tabstop: usize,
    pub expandtab: bool,
    pub wrap_width: usize,
    pub wrap_on_type: bool,
    pub block_mode: bool,
    pub scroll_speed: usize,
    pub width: usize,
    pub height: usize,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            tabstop: settings.indentation.per_tab(),
            expandtab: !settings.indentation.use_tabs(),
            wrap_width: settings.wrap_width,
            wrap_on_type: settings.wrap_on_type,
            block_mode: settings.block_mode,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            width: settings.viewport.width(),
            height: settings.viewport.height(),
        }
    }
}

impl Config {
    /// Read and parse a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// The library settings this file describes.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            indentation: Indentation::new(self.tabstop, !self.expandtab),
            wrap_width: self.wrap_width,
            wrap_on_type: self.wrap_on_type,
            block_mode: self.block_mode,
            viewport: Viewport::new(self.width, self.height),
            scroll_speed: self.scroll_speed.max(1),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.settings(), Settings::default());
    }

    #[test]
    fn partial_file_overrides_some_keys() {
        let config = Config::parse("tabstop = 8\nexpandtab = false\nwrap_width = 72\n").unwrap();
        let settings = config.settings();
        assert_eq!(settings.indentation, Indentation::tabs(8));
        assert_eq!(settings.wrap_width, 72);
        assert!(!settings.wrap_on_type);
        assert_eq!(settings.viewport, Viewport::default());
    }

    #[test]
    fn zero_sizes_are_clamped() {
        let config = Config::parse("tabstop = 0\nwidth = 0\nscroll_speed = 0").unwrap();
        let settings = config.settings();
        assert_eq!(settings.indentation.per_tab(), 1);
        assert_eq!(settings.viewport.width(), 1);
        assert_eq!(settings.scroll_speed, 1);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(Config::parse("tabwidth = 4").is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(Config::parse("expandtab = 3").is_err());
    }
}
