//! Text buffer and cursor engine
//!
//! This crate holds the editing core of rpe: a line-oriented text store, the
//! mapping between flat character offsets and `(line, column)` positions, an
//! edit engine that keeps every cursor consistent with the text, and the small
//! contracts a host needs around it (caret blink timing, linter hooks, key
//! input and text loading).
//!
//! The key components are:
//! - [`buffer::TextBuffer`] - Owns the text and cursors, applies every edit
//! - [`store::LineStore`] - Lines with their separators and offset mapping
//! - [`cursor::Cursor`] - Caret position, vertical memory and blink state
//! - [`linter::LinterRegistry`] - Content-type tags to linter factories
//! - [`io::TextSource`] / [`io::TextSink`] - Where text is loaded and saved
//!
//! Offsets and columns count characters, not bytes.

pub mod blink;
pub mod buffer;
pub mod cursor;
pub mod cursor_collection;
pub mod error;
pub mod input;
pub mod io;
pub mod key_notation;
pub mod line;
pub mod linter;
pub mod position;
pub mod reader;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_helpers;

pub use blink::{Blink, BlinkPhase, BlinkTimer};
pub use buffer::{BufferOptions, TextBuffer};
pub use cursor::{Cursor, CursorId, Movement};
pub use error::{EditError, EditResult, PositionError};
pub use input::KeyInput;
pub use line::{Line, LineHandle};
pub use linter::{Grouping, Linter, LinterRegistry};
pub use position::Position;
pub use store::LineStore;
