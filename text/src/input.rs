//! Host key input
//!
//! Translates the keystrokes and pointer clicks an editor surface receives
//! into edit and navigation operations applied to every cursor of a buffer.

use crate::{
    buffer::TextBuffer,
    cursor::{CursorId, Movement},
    error::EditResult,
    position::Position,
};

/// One input event from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// Typed or pasted text
    Text(String),
    /// Insert a line separator
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    /// Line start, or buffer start with `ctrl`
    Home { ctrl: bool },
    /// Line end, or buffer end with `ctrl`
    End { ctrl: bool },
    /// Pointer click resolved to a text position
    Click { line: usize, column: usize },
}

impl KeyInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Check if this input modifies the buffer
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            KeyInput::Text(_) | KeyInput::Enter | KeyInput::Backspace | KeyInput::Delete
        )
    }

    /// The navigation applied to every cursor, if this is a pure movement
    pub fn movement(&self) -> Option<Movement> {
        let movement = match self {
            KeyInput::Left => Movement::Left,
            KeyInput::Right => Movement::Right,
            KeyInput::Up => Movement::Up,
            KeyInput::Down => Movement::Down,
            KeyInput::Home { ctrl: true } => Movement::Start,
            KeyInput::Home { ctrl: false } => Movement::LineStart,
            KeyInput::End { ctrl: true } => Movement::End,
            KeyInput::End { ctrl: false } => Movement::LineEnd,
            _ => return None,
        };
        Some(movement)
    }
}

impl TextBuffer {
    /// Apply one input event to every cursor, in cursor order
    pub fn handle_key(&mut self, key: &KeyInput) -> EditResult<()> {
        tracing::debug!(?key, cursors = self.cursor_count(), "handling key");
        match key {
            KeyInput::Text(text) => self.insert_at_cursors(text),
            KeyInput::Enter => {
                let separator = self.separator().to_owned();
                self.insert_at_cursors(&separator)
            },
            KeyInput::Backspace => self.remove_backwards_at_cursors(1).map(|_| ()),
            KeyInput::Delete => self.remove_forwards_at_cursors(1).map(|_| ()),
            KeyInput::Click { line, column } => {
                self.click(Position::new(*line, *column));
                Ok(())
            },
            other => {
                if let Some(movement) = other.movement() {
                    self.move_cursors(movement);
                }
                Ok(())
            },
        }
    }

    /// Apply a sequence of input events, stopping at the first failure
    pub fn handle_keys<'a>(&mut self, keys: impl IntoIterator<Item = &'a KeyInput>) -> EditResult<()> {
        keys.into_iter().try_for_each(|key| self.handle_key(key))
    }

    /// Collapse to a single cursor at the clicked position, clamped into the
    /// buffer. Creates the primary cursor when there is none.
    pub fn click(&mut self, position: Position) -> CursorId {
        self.clear_cursors();
        let id = match self.primary_cursor() {
            Some(cursor) => cursor.id(),
            None => self.spawn_primary(),
        };
        let movement = Movement::To {
            line: position.line,
            column: position.column,
        };
        if let Err(err) = self.move_cursor(id, movement) {
            tracing::error!(%err, "clicked cursor vanished");
        }
        id
    }
}
