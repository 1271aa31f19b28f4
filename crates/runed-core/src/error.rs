//! Error type for the editor core.
//!
//! Only conditions a caller may want to report end up here. Reading past the
//! end of a line is not an error (see [`DataX`](crate::position::DataX)), and
//! structural no-ops such as deleting a line that does not exist are absorbed
//! where they are detected.

use thiserror::Error;

/// Errors produced by navigation, block operations and the `:set` layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The cursor is already on the first row of the viewport.
    #[error("already at the top of the viewport")]
    AtTopEdge,

    /// The cursor is already on the last row of the viewport.
    #[error("already at the bottom of the viewport")]
    AtBottomEdge,

    /// There is no line after the current one.
    #[error("already at the end of the document")]
    EndOfDocument,

    /// There is no line before the current one.
    #[error("already at the start of the document")]
    StartOfDocument,

    /// A block operation was requested on a blank line.
    #[error("no text block at the current position")]
    NothingToOperateOn,

    /// `:set` named an option that does not exist.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// `:set name=value` with a value that does not fit the option.
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
