//! Errors raised by the buffer core
//!
//! [`PositionError`] is produced by the offset/position mapper in
//! [`crate::store::LineStore`]. [`EditError`] wraps it for the edit engine and
//! the cursor set, so an edit at an invalid position fails outright instead of
//! silently doing nothing.

use crate::cursor::CursorId;
use snafu::Snafu;

/// Failures of the offset/position mapper
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum PositionError {
    /// The line does not exist, or the column is past the line's length
    #[snafu(display("Position {line}:{column} is out of range"))]
    PositionOutOfRange { line: usize, column: usize },

    /// The offset is past the end of the buffer
    #[snafu(display("Offset {offset} is beyond buffer length {length}"))]
    OffsetOutOfRange { offset: usize, length: usize },

    /// Scanning every line did not reach the offset. Line lengths and the
    /// buffer length have diverged.
    #[snafu(display("Offset {offset} is unreachable, line store is corrupted"))]
    Corrupted { offset: usize },
}

/// Errors that can occur during buffer operations
#[derive(Debug, Snafu)]
pub enum EditError {
    #[snafu(context(false))]
    #[snafu(display("Invalid position: {source}"))]
    Position { source: PositionError },

    #[snafu(display("No cursor with id: {id:?}"))]
    CursorNotFound { id: CursorId },

    #[snafu(display("No linter registered for content type {tag:?}"))]
    UnknownLinter { tag: String },

    /// Reading from a text source or writing to a text sink failed
    #[snafu(display("Text transfer failed: {source}"))]
    Io {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type EditResult<T> = Result<T, EditError>;
