//! # runed-core: document buffer and cursor engine for runed
//!
//! This crate holds the text being edited and everything that moves the
//! cursor over it or changes it:
//!
//! - **[`store`]**: `LineStore`, lines of runes keyed by dense line index
//! - **[`position`]**: `Position` (screen cursor plus scroll offsets), `Viewport`, `DataX`
//! - **[`editor`]**: `Editor`, the aggregate, with screen/data coordinate translation
//! - **[`navigate`]**: cursor motion, jumps and scrolling
//! - **[`mutate`]**: rune and line edits, split and join
//! - **[`block`]**: edits over a run of non-blank lines
//! - **[`wrap`]**: word wrap, for the whole document or while typing
//! - **[`word`]**: word lookups and word motions
//! - **[`history`]**: snapshot undo/redo
//! - **[`options`]**: `Settings` and Vim-style `:set` directives
//! - **[`indent`]**, **[`flags`]**, **[`error`]**: supporting types
//!
//! Terminal drawing, key handling and file I/O live in the caller.

pub mod block;
pub mod editor;
pub mod error;
pub mod flags;
pub mod history;
pub mod indent;
pub mod mutate;
pub mod navigate;
pub mod options;
pub mod position;
pub mod store;
pub mod word;
pub mod wrap;

pub use editor::Editor;
pub use error::{Error, Result};
pub use flags::StatusFlags;
pub use history::History;
pub use indent::Indentation;
pub use options::Settings;
pub use position::{ColIndex, DataX, LineIndex, Position, Viewport};
pub use store::LineStore;
