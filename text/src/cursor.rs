//! Carets and their navigation
//!
//! A [`Cursor`] caches its global offset next to its `(line, column)` so
//! navigation can adjust both incrementally. Navigation never fails: moves
//! past the edges of the buffer are no-ops and targets are clamped into range.
//! Vertical moves keep the desired column, so moving through a short line and
//! back restores the original horizontal position.

use crate::{
    blink::{Blink, BlinkTimer},
    error::PositionError,
    position::Position,
    store::LineStore,
};
use std::{cmp::Ordering, time::Duration};

/// Identifies a cursor within its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorId(u64);

impl CursorId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    /// Absolute start of the buffer
    Start,
    /// Absolute end of the buffer
    End,
    To { line: usize, column: usize },
    ToOffset { offset: usize },
}

/// One caret in a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    id: CursorId,
    offset: usize,
    line: usize,
    column: usize,
    /// Column to return to when moving vertically
    desired_column: usize,
    blink: Blink,
}

impl Cursor {
    pub(crate) fn new(id: CursorId, offset: usize, position: Position, blink_delay: Duration) -> Self {
        Self {
            id,
            offset,
            line: position.line,
            column: position.column,
            desired_column: position.column,
            blink: Blink::new(blink_delay),
        }
    }

    pub fn id(&self) -> CursorId {
        self.id
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn desired_column(&self) -> usize {
        self.desired_column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn blink(&self) -> &Blink {
        &self.blink
    }

    /// Hand back a blink timer after its delay elapsed
    pub(crate) fn fire_blink(&mut self, timer: BlinkTimer) -> bool {
        self.blink.fire(timer)
    }

    fn refresh(&mut self) {
        tracing::trace!(
            offset = self.offset,
            line = self.line,
            column = self.column,
            "cursor moved"
        );
        self.blink.reset();
    }

    /// Finish a horizontal repositioning: remember the column, and restart the
    /// blink phase if anything changed.
    fn reposition(&mut self, moved: bool) -> bool {
        self.desired_column = self.column;
        if moved {
            self.refresh();
        }
        moved
    }

    /// Apply a navigation command. Returns whether the cursor moved.
    pub fn apply(&mut self, store: &LineStore, movement: Movement) -> bool {
        match movement {
            Movement::Left => self.move_left(store),
            Movement::Right => self.move_right(store),
            Movement::Up => self.move_up(store),
            Movement::Down => self.move_down(store),
            Movement::LineStart => self.move_line_start(),
            Movement::LineEnd => self.move_line_end(store),
            Movement::Start => self.move_start(),
            Movement::End => self.move_end(store),
            Movement::To { line, column } => self.move_to(store, line, column),
            Movement::ToOffset { offset } => self.move_to_offset(store, offset),
        }
    }

    /// Move to `(line, column)`, clamping both into the buffer.
    ///
    /// The offset is updated by walking the lines between the old and new
    /// line rather than by resolving the target from scratch.
    pub fn move_to(&mut self, store: &LineStore, line: usize, column: usize) -> bool {
        let line = line.min(store.last_line());
        let column = column.min(store.effective_len(line));
        if line == self.line && column == self.column {
            return self.reposition(false);
        }

        match line.cmp(&self.line) {
            Ordering::Equal => {
                self.offset = self.offset - self.column + column;
            },
            Ordering::Less => {
                self.offset -= self.column;
                for index in line..self.line {
                    self.offset -= store.line_len(index);
                }
                self.offset += column;
            },
            Ordering::Greater => {
                self.offset += store.line_len(self.line) - self.column;
                for index in self.line + 1..line {
                    self.offset += store.line_len(index);
                }
                self.offset += column;
            },
        }
        self.line = line;
        self.column = column;
        self.reposition(true)
    }

    /// Move to a global offset, clamped to the buffer
    pub fn move_to_offset(&mut self, store: &LineStore, offset: usize) -> bool {
        match store.character_position(offset.min(store.len())) {
            Ok(position) => self.move_to(store, position.line, position.column),
            Err(err) => {
                tracing::error!(%err, offset, "cursor cannot resolve offset");
                false
            },
        }
    }

    pub fn move_left(&mut self, store: &LineStore) -> bool {
        if self.column > 0 {
            self.column -= 1;
            self.offset -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.offset -= store.separator_len();
            self.column = store.effective_len(self.line);
        } else {
            return false;
        }
        self.reposition(true)
    }

    pub fn move_right(&mut self, store: &LineStore) -> bool {
        if self.column < store.effective_len(self.line) {
            self.column += 1;
            self.offset += 1;
        } else if !store.is_last_line(self.line) {
            self.offset += store.separator_len();
            self.line += 1;
            self.column = 0;
        } else {
            return false;
        }
        self.reposition(true)
    }

    /// Move to the previous line, keeping the desired column
    pub fn move_up(&mut self, store: &LineStore) -> bool {
        if self.line == 0 {
            return false;
        }
        self.offset -= self.column;
        self.line -= 1;
        self.offset -= store.line_len(self.line);
        self.column = self.desired_column.min(store.effective_len(self.line));
        self.offset += self.column;
        self.refresh();
        true
    }

    /// Move to the next line, keeping the desired column
    pub fn move_down(&mut self, store: &LineStore) -> bool {
        if store.is_last_line(self.line) {
            return false;
        }
        self.offset += store.line_len(self.line) - self.column;
        self.line += 1;
        self.column = self.desired_column.min(store.effective_len(self.line));
        self.offset += self.column;
        self.refresh();
        true
    }

    pub fn move_line_start(&mut self) -> bool {
        let moved = self.column != 0;
        self.offset -= self.column;
        self.column = 0;
        self.reposition(moved)
    }

    pub fn move_line_end(&mut self, store: &LineStore) -> bool {
        let end = store.effective_len(self.line);
        let moved = self.column != end;
        self.offset = self.offset - self.column + end;
        self.column = end;
        self.reposition(moved)
    }

    pub fn move_start(&mut self) -> bool {
        let moved = self.offset != 0;
        self.offset = 0;
        self.line = 0;
        self.column = 0;
        self.reposition(moved)
    }

    pub fn move_end(&mut self, store: &LineStore) -> bool {
        let moved = self.offset != store.len();
        self.offset = store.len();
        self.line = store.last_line();
        self.column = store.line_len(self.line);
        self.reposition(moved)
    }

    /// Re-resolve the cursor after the text changed underneath it.
    ///
    /// `offset` is the cursor's offset in the new text. Line and column are
    /// recomputed through the mapper; the desired column follows only when the
    /// position actually changed.
    pub(crate) fn settle(&mut self, store: &LineStore, offset: usize) -> Result<(), PositionError> {
        let (offset, position) = store.caret_at(offset)?;
        let moved = position != self.position();
        self.offset = offset;
        self.line = position.line;
        self.column = position.column;
        if moved {
            self.reposition(true);
        }
        Ok(())
    }
}
