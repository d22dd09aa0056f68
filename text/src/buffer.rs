//! Buffer management for text editing
//!
//! [`TextBuffer`] is the aggregate root of the editor core. It owns the
//! [`LineStore`], the [`CursorCollection`] and the linter, and is the only way
//! to mutate text: every insertion or deletion goes through the edit engine
//! here, which then shifts and re-resolves every cursor so that each cursor's
//! offset keeps matching its `(line, column)`.
//!
//! Cursor bookkeeping follows one rule for every edit: a cursor at or after
//! the end of the replaced range moves by the length delta, a cursor strictly
//! inside a deleted range collapses to the range start, and cursors before the
//! range stay put. Cursors sitting exactly at an insertion point therefore
//! move forward with the inserted text.

use crate::{
    blink::{BlinkTimer, DEFAULT_BLINK_DELAY},
    cursor::{Cursor, CursorId, Movement},
    cursor_collection::CursorCollection,
    error::{EditError, EditResult, PositionError},
    line::{Line, LineHandle},
    linter::{self, Grouping, Linter, LinterRegistry},
    position::Position,
    store::{LineStore, DEFAULT_SEPARATOR},
};
use std::time::Duration;

/// Settings fixed when a buffer is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferOptions {
    /// Line separator, possibly several characters long
    pub separator: String,
    /// Idle time before a caret starts blinking
    pub blink_delay: Duration,
    /// Linter tag, see [`crate::linter`]
    pub content_type: String,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            blink_delay: DEFAULT_BLINK_DELAY,
            content_type: linter::RAW.to_owned(),
        }
    }
}

/// An in-memory text document with its cursors
#[derive(Debug)]
pub struct TextBuffer {
    store: LineStore,
    cursors: CursorCollection,
    blink_delay: Duration,
    content_type: String,
    linter: Option<Box<dyn Linter>>,
    grouping: Grouping,
}

impl TextBuffer {
    /// Create a plain-text buffer with default options and no cursors
    pub fn new(text: &str) -> Self {
        let mut buffer = Self::bare(text, BufferOptions::default());
        buffer.install_linter(linter::plain_text);
        buffer
    }

    /// Create a buffer using the default linter registry
    pub fn with_options(text: &str, options: BufferOptions) -> EditResult<Self> {
        Self::with_registry(text, options, &LinterRegistry::default())
    }

    /// Create a buffer, building its linter from `registry`
    pub fn with_registry(
        text: &str,
        options: BufferOptions,
        registry: &LinterRegistry,
    ) -> EditResult<Self> {
        let factory =
            registry
                .get(&options.content_type)
                .ok_or_else(|| EditError::UnknownLinter {
                    tag: options.content_type.clone(),
                })?;
        let mut buffer = Self::bare(text, options);
        buffer.install_linter(factory);
        Ok(buffer)
    }

    fn bare(text: &str, options: BufferOptions) -> Self {
        Self {
            store: LineStore::new(text, &options.separator),
            cursors: CursorCollection::new(),
            blink_delay: options.blink_delay,
            content_type: options.content_type,
            linter: None,
            grouping: Grouping::default(),
        }
    }

    fn install_linter(&mut self, factory: linter::LinterFactory) {
        let linter = factory(self);
        self.linter = Some(linter);
        self.relint();
    }

    fn relint(&mut self) {
        if let Some(linter) = self.linter.as_mut() {
            self.grouping = linter.group(&self.store.text());
        }
    }

    /// The line store backing this buffer
    pub fn store(&self) -> &LineStore {
        &self.store
    }

    pub fn text(&self) -> String {
        self.store.text()
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.store.line_count()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.store.line(index)
    }

    pub fn lines(&self) -> &[Line] {
        self.store.lines()
    }

    pub fn separator(&self) -> &str {
        self.store.separator()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// What the linter made of the text at the last full-text update
    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Attach a host rendering handle to a line. Returns false for a missing
    /// line.
    pub fn set_line_handle(&mut self, index: usize, handle: Option<LineHandle>) -> bool {
        match self.store.line_mut(index) {
            Some(line) => {
                line.set_handle(handle);
                true
            },
            None => false,
        }
    }

    /// Convert a `(line, column)` position into a global offset
    pub fn character_offset(&self, line: usize, column: usize) -> Result<usize, PositionError> {
        self.store.character_offset(line, column)
    }

    /// Convert a global offset into a `(line, column)` position
    pub fn character_position(&self, offset: usize) -> Result<Position, PositionError> {
        self.store.character_position(offset)
    }

    /// Replace the whole text. All cursors are dropped; callers recreate them.
    pub fn set_text(&mut self, text: &str) {
        let separator = self.store.separator().to_owned();
        self.store = LineStore::new(text, &separator);
        self.cursors.clear();
        self.relint();
        tracing::debug!(
            length = self.store.len(),
            lines = self.store.line_count(),
            "buffer text replaced"
        );
    }

    /// Insert `text` at `(line, column)`.
    ///
    /// Each separator in `text` starts a new line. Cursors at or after the
    /// insertion point move forward by the inserted length.
    pub fn insert_text(&mut self, text: &str, line: usize, column: usize) -> EditResult<()> {
        let start = self.store.character_offset(line, column)?;
        if text.is_empty() {
            return Ok(());
        }
        let inserted = text.chars().count();
        self.store.splice(start, start, text)?;
        tracing::trace!(
            line,
            column,
            inserted,
            length = self.store.len(),
            "inserted text"
        );
        self.settle_cursors(|offset| {
            if offset >= start {
                offset + inserted
            } else {
                offset
            }
        })
    }

    /// Insert `text` at the end of the buffer
    pub fn append_text(&mut self, text: &str) -> EditResult<()> {
        let last = self.store.last_line();
        self.insert_text(text, last, self.store.line_len(last))
    }

    /// Remove up to `count` characters before `(line, column)`.
    ///
    /// Crossing a line start is a single step that removes the whole
    /// separator and merges the two lines. The count is clamped at the start
    /// of the buffer; the number of characters actually removed is returned.
    pub fn remove_text_backwards(
        &mut self,
        count: usize,
        line: usize,
        column: usize,
    ) -> EditResult<usize> {
        let origin = self.store.character_offset(line, column)?;
        let (start, end) = self.store.steps_before(origin, count)?;
        self.remove_range(start, end)
    }

    /// Remove up to `count` characters from the end of the buffer
    pub fn remove_trailing_text(&mut self, count: usize) -> EditResult<usize> {
        let last = self.store.last_line();
        self.remove_text_backwards(count, last, self.store.line_len(last))
    }

    /// Remove up to `count` characters starting at `(line, column)`.
    ///
    /// The mirror of [`Self::remove_text_backwards`], clamped at the end of
    /// the buffer.
    pub fn remove_text_forwards(
        &mut self,
        count: usize,
        line: usize,
        column: usize,
    ) -> EditResult<usize> {
        let origin = self.store.character_offset(line, column)?;
        let (start, end) = self.store.steps_after(origin, count)?;
        self.remove_range(start, end)
    }

    fn remove_range(&mut self, start: usize, end: usize) -> EditResult<usize> {
        let removed = end - start;
        if removed == 0 {
            return Ok(0);
        }
        self.store.splice(start, end, "")?;
        tracing::trace!(
            start,
            removed,
            length = self.store.len(),
            "removed text"
        );
        self.settle_cursors(|offset| {
            if offset >= end {
                offset - removed
            } else if offset > start {
                start
            } else {
                offset
            }
        })?;
        Ok(removed)
    }

    fn settle_cursors(&mut self, shift: impl Fn(usize) -> usize) -> EditResult<()> {
        let store = &self.store;
        for cursor in self.cursors.iter_mut() {
            cursor.settle(store, shift(cursor.offset()))?;
        }
        Ok(())
    }

    /// Insert `text` at every cursor, in cursor order.
    ///
    /// Each cursor's position is read right before its own edit, so earlier
    /// edits are already reflected in it.
    pub fn insert_at_cursors(&mut self, text: &str) -> EditResult<()> {
        for id in self.cursors.ids() {
            if let Some(position) = self.cursors.get(id).map(Cursor::position) {
                self.insert_text(text, position.line, position.column)?;
            }
        }
        Ok(())
    }

    /// Remove up to `count` characters before every cursor. Returns the total
    /// removed.
    pub fn remove_backwards_at_cursors(&mut self, count: usize) -> EditResult<usize> {
        let mut total = 0;
        for id in self.cursors.ids() {
            if let Some(position) = self.cursors.get(id).map(Cursor::position) {
                total += self.remove_text_backwards(count, position.line, position.column)?;
            }
        }
        Ok(total)
    }

    /// Remove up to `count` characters after every cursor. Returns the total
    /// removed.
    pub fn remove_forwards_at_cursors(&mut self, count: usize) -> EditResult<usize> {
        let mut total = 0;
        for id in self.cursors.ids() {
            if let Some(position) = self.cursors.get(id).map(Cursor::position) {
                total += self.remove_text_forwards(count, position.line, position.column)?;
            }
        }
        Ok(total)
    }

    /// Add a cursor at `(line, column)`.
    ///
    /// A column in a line's separator is pulled back to the end of the line's
    /// text; a column equal to the full length lands on the next line.
    pub fn create_cursor(&mut self, line: usize, column: usize) -> EditResult<CursorId> {
        let offset = self.store.character_offset(line, column)?;
        let (offset, position) = self.store.caret_at(offset)?;
        Ok(self.cursors.insert(offset, position, self.blink_delay))
    }

    /// Add the first cursor at the start of the buffer
    pub(crate) fn spawn_primary(&mut self) -> CursorId {
        self.cursors.insert(0, Position::zero(), self.blink_delay)
    }

    /// Drop every cursor but the primary one
    pub fn clear_cursors(&mut self) {
        self.cursors.clear_secondary();
    }

    /// Drop cursors sharing a position with an earlier cursor. Returns how
    /// many were dropped.
    pub fn remove_duplicate_cursors(&mut self) -> usize {
        self.cursors.remove_duplicates()
    }

    /// Remove one secondary cursor
    pub fn remove_cursor(&mut self, id: CursorId) -> bool {
        self.cursors.remove(id)
    }

    pub fn cursor(&self, id: CursorId) -> Option<&Cursor> {
        self.cursors.get(id)
    }

    pub fn primary_cursor(&self) -> Option<&Cursor> {
        self.cursors.primary()
    }

    pub fn cursors(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.iter()
    }

    pub fn cursor_count(&self) -> usize {
        self.cursors.len()
    }

    /// Navigate one cursor. Returns whether it moved.
    pub fn move_cursor(&mut self, id: CursorId, movement: Movement) -> EditResult<bool> {
        let cursor = self
            .cursors
            .get_mut(id)
            .ok_or(EditError::CursorNotFound { id })?;
        Ok(cursor.apply(&self.store, movement))
    }

    /// Navigate every cursor. Returns how many moved.
    pub fn move_cursors(&mut self, movement: Movement) -> usize {
        let store = &self.store;
        self.cursors
            .iter_mut()
            .map(|cursor| cursor.apply(store, movement))
            .filter(|moved| *moved)
            .count()
    }

    /// Deliver an elapsed blink timer to a cursor. Returns whether the cursor
    /// started blinking; timers superseded by a later move are ignored.
    pub fn fire_blink(&mut self, id: CursorId, timer: BlinkTimer) -> EditResult<bool> {
        let cursor = self
            .cursors
            .get_mut(id)
            .ok_or(EditError::CursorNotFound { id })?;
        Ok(cursor.fire_blink(timer))
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(buffer: &TextBuffer) -> Vec<&str> {
        buffer.lines().iter().map(Line::content).collect()
    }

    fn assert_invariants(buffer: &TextBuffer) {
        let sum: usize = buffer.lines().iter().map(Line::len).sum();
        assert_eq!(buffer.len(), sum);
        assert_eq!(buffer.len(), buffer.text().chars().count());
        for cursor in buffer.cursors() {
            assert_eq!(
                buffer.character_offset(cursor.line(), cursor.column()),
                Ok(cursor.offset()),
                "cursor out of sync: {cursor:?}"
            );
        }
    }

    #[test]
    fn new_buffer_has_no_cursors() {
        let buffer = TextBuffer::new("abc");
        assert_eq!(buffer.cursor_count(), 0);
        assert_eq!(buffer.content_type(), linter::RAW);
    }

    #[test]
    fn insert_splits_line() {
        let mut buffer = TextBuffer::new("abcdefghij");
        buffer.insert_text("\n", 0, 4).unwrap();
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line(0).map(Line::len), Some(5));
        assert_eq!(buffer.line(1).map(Line::content), Some("efghij"));
        assert_eq!(buffer.line(1).map(Line::len), Some(6));
        assert_invariants(&buffer);
    }

    #[test]
    fn insert_with_several_separators() {
        let mut buffer = TextBuffer::new("ac");
        buffer.insert_text("1\n2\n3", 0, 1).unwrap();
        assert_eq!(contents(&buffer), vec!["a1\n", "2\n", "3c"]);
        assert_eq!(buffer.len(), 7);
    }

    #[test]
    fn insert_at_invalid_position_fails() {
        let mut buffer = TextBuffer::new("abc");
        let id = buffer.create_cursor(0, 2).unwrap();
        let err = buffer.insert_text("x", 1, 0).unwrap_err();
        assert!(matches!(
            err,
            EditError::Position {
                source: PositionError::PositionOutOfRange { line: 1, column: 0 }
            }
        ));
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(id).map(Cursor::offset), Some(2));
    }

    #[test]
    fn empty_insert_is_noop() {
        let mut buffer = TextBuffer::new("abc");
        buffer.insert_text("", 0, 1).unwrap();
        assert_eq!(buffer.text(), "abc");
        assert!(buffer.insert_text("", 0, 9).is_err());
    }

    #[test]
    fn append_targets_end() {
        let mut buffer = TextBuffer::new("abc\n");
        buffer.append_text("def").unwrap();
        assert_eq!(contents(&buffer), vec!["abc\n", "def"]);
    }

    #[test]
    fn cursors_shift_on_insert() {
        let mut buffer = TextBuffer::new("01234567890123456789");
        let a = buffer.create_cursor(0, 5).unwrap();
        let b = buffer.create_cursor(0, 10).unwrap();
        let before = buffer.create_cursor(0, 2).unwrap();
        buffer.insert_text("xyz", 0, 5).unwrap();
        assert_eq!(buffer.cursor(a).map(Cursor::offset), Some(8));
        assert_eq!(buffer.cursor(b).map(Cursor::offset), Some(13));
        assert_eq!(buffer.cursor(before).map(Cursor::offset), Some(2));
        assert_invariants(&buffer);
    }

    #[test]
    fn cursors_follow_new_lines() {
        let mut buffer = TextBuffer::new("abc def");
        let id = buffer.create_cursor(0, 5).unwrap();
        buffer.insert_text("\n\n", 0, 3).unwrap();
        let cursor = buffer.cursor(id).unwrap();
        assert_eq!(cursor.position(), Position::new(2, 2));
        assert_eq!(cursor.offset(), 7);
        assert_invariants(&buffer);
    }

    #[test]
    fn backwards_removal_clamps_at_start() {
        let mut buffer = TextBuffer::new("abc\ndef");
        assert_eq!(buffer.remove_text_backwards(10, 0, 2).unwrap(), 2);
        assert_eq!(buffer.text(), "c\ndef");
        assert_eq!(buffer.remove_text_backwards(1, 0, 0).unwrap(), 0);
        assert_invariants(&buffer);
    }

    #[test]
    fn forwards_removal_clamps_at_end() {
        let mut buffer = TextBuffer::new("abc\ndef");
        assert_eq!(buffer.remove_text_forwards(10, 1, 1).unwrap(), 2);
        assert_eq!(buffer.text(), "abc\nd");
        assert_eq!(buffer.remove_text_forwards(1, 1, 1).unwrap(), 0);
    }

    #[test]
    fn forwards_removal_merges_lines() {
        let mut buffer = TextBuffer::new("ab\ncd\nef");
        assert_eq!(buffer.remove_text_forwards(4, 0, 1).unwrap(), 4);
        assert_eq!(contents(&buffer), vec!["a\n", "ef"]);
        assert_invariants(&buffer);
    }

    #[test]
    fn removing_everything_leaves_one_line() {
        let mut buffer = TextBuffer::new("ab\ncd\n");
        assert_eq!(buffer.remove_trailing_text(100).unwrap(), 6);
        assert_eq!(buffer.line_count(), 1);
        assert!(buffer.is_empty());
        assert_eq!(contents(&buffer), vec![""]);
    }

    #[test]
    fn cursors_inside_removed_range_collapse() {
        let mut buffer = TextBuffer::new("0123456789");
        let inside = buffer.create_cursor(0, 4).unwrap();
        let end = buffer.create_cursor(0, 6).unwrap();
        let after = buffer.create_cursor(0, 8).unwrap();
        let at_start = buffer.create_cursor(0, 3).unwrap();
        assert_eq!(buffer.remove_text_backwards(3, 0, 6).unwrap(), 3);
        assert_eq!(buffer.text(), "0126789");
        assert_eq!(buffer.cursor(inside).map(Cursor::offset), Some(3));
        assert_eq!(buffer.cursor(end).map(Cursor::offset), Some(3));
        assert_eq!(buffer.cursor(after).map(Cursor::offset), Some(5));
        assert_eq!(buffer.cursor(at_start).map(Cursor::offset), Some(3));
        assert_invariants(&buffer);
    }

    #[test]
    fn insertion_then_forward_removal_restores_text() {
        let original = "first line\nsecond\n\nlast";
        let mut buffer = TextBuffer::new(original);
        let inserted = "X\nYY\n";
        buffer.insert_text(inserted, 1, 3).unwrap();
        buffer
            .remove_text_forwards(inserted.chars().count(), 1, 3)
            .unwrap();
        assert_eq!(buffer.text(), original);
        assert_invariants(&buffer);
    }

    #[test]
    fn end_to_end_merge_across_lines() {
        let mut buffer = TextBuffer::new("abc\ndef");
        buffer.insert_text("X", 0, 1).unwrap();
        assert_eq!(contents(&buffer), vec!["aXbc\n", "def"]);
        assert_eq!(buffer.len(), 8);

        assert_eq!(buffer.remove_text_backwards(2, 1, 0).unwrap(), 2);
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(contents(&buffer), vec!["aXbdef"]);
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn set_text_drops_cursors() {
        let mut buffer = TextBuffer::new("abc");
        buffer.create_cursor(0, 1).unwrap();
        buffer.set_text("x\ny");
        assert_eq!(buffer.cursor_count(), 0);
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn custom_separator() {
        let options = BufferOptions {
            separator: "\r\n".to_owned(),
            ..BufferOptions::default()
        };
        let mut buffer = TextBuffer::with_options("ab\r\ncd", options).unwrap();
        let id = buffer.create_cursor(1, 0).unwrap();
        assert_eq!(buffer.remove_backwards_at_cursors(1).unwrap(), 2);
        assert_eq!(contents(&buffer), vec!["abcd"]);
        assert_eq!(buffer.cursor(id).map(Cursor::position), Some(Position::new(0, 2)));
        assert_invariants(&buffer);

        buffer.insert_at_cursors("\r\n").unwrap();
        assert_eq!(contents(&buffer), vec!["ab\r\n", "cd"]);
        assert_eq!(buffer.cursor(id).map(Cursor::position), Some(Position::new(1, 0)));
    }

    #[test]
    fn removal_steps_over_whole_separators() {
        let options = BufferOptions {
            separator: "\r\n".to_owned(),
            ..BufferOptions::default()
        };
        let mut buffer = TextBuffer::with_options("ab\r\ncd\r\nef", options).unwrap();
        let id = buffer.create_cursor(2, 1).unwrap();

        // 'e', the second separator, then 'd'
        assert_eq!(buffer.remove_text_backwards(3, 2, 1).unwrap(), 4);
        assert_eq!(contents(&buffer), vec!["ab\r\n", "cf"]);
        assert_eq!(buffer.cursor(id).map(Cursor::position), Some(Position::new(1, 1)));
        assert_invariants(&buffer);

        // 'b', then the first separator
        assert_eq!(buffer.remove_text_forwards(2, 0, 1).unwrap(), 3);
        assert_eq!(contents(&buffer), vec!["acf"]);
        assert_eq!(buffer.cursor(id).map(Cursor::position), Some(Position::new(0, 2)));
        assert_invariants(&buffer);
    }

    #[test]
    fn create_cursor_canonicalizes_boundary_column() {
        let mut buffer = TextBuffer::new("abc\ndef");
        let id = buffer.create_cursor(0, 4).unwrap();
        assert_eq!(buffer.cursor(id).map(Cursor::position), Some(Position::new(1, 0)));
        assert!(buffer.create_cursor(0, 5).is_err());
    }

    #[test]
    fn multi_cursor_insert_rereads_positions() {
        let mut buffer = TextBuffer::new("ab\ncd");
        let first = buffer.create_cursor(0, 1).unwrap();
        let second = buffer.create_cursor(1, 1).unwrap();
        buffer.insert_at_cursors("\n").unwrap();
        assert_eq!(contents(&buffer), vec!["a\n", "b\n", "c\n", "d"]);
        assert_eq!(buffer.cursor(first).map(Cursor::position), Some(Position::new(1, 0)));
        assert_eq!(buffer.cursor(second).map(Cursor::position), Some(Position::new(3, 0)));
        assert_invariants(&buffer);
    }

    #[test]
    fn multi_cursor_backspace() {
        let mut buffer = TextBuffer::new("abc\ndef");
        buffer.create_cursor(0, 3).unwrap();
        buffer.create_cursor(1, 3).unwrap();
        assert_eq!(buffer.remove_backwards_at_cursors(1).unwrap(), 2);
        assert_eq!(buffer.text(), "ab\nde");
        assert_invariants(&buffer);
    }

    #[test]
    fn duplicate_cursors_after_collapse() {
        let mut buffer = TextBuffer::new("abcdef");
        let primary = buffer.create_cursor(0, 2).unwrap();
        buffer.create_cursor(0, 4).unwrap();
        buffer.remove_text_backwards(2, 0, 4).unwrap();
        assert_eq!(buffer.remove_duplicate_cursors(), 1);
        assert_eq!(
            buffer.cursors().map(Cursor::id).collect::<Vec<_>>(),
            vec![primary]
        );
    }

    #[test]
    fn move_cursor_reports_unknown_id() {
        let mut buffer = TextBuffer::new("abc");
        let primary = buffer.create_cursor(0, 0).unwrap();
        let other = buffer.create_cursor(0, 1).unwrap();
        assert!(buffer.remove_cursor(other));
        assert!(matches!(
            buffer.move_cursor(other, Movement::Right),
            Err(EditError::CursorNotFound { .. })
        ));
        assert!(buffer.move_cursor(primary, Movement::Right).unwrap());
    }

    #[test]
    fn move_cursors_counts_moves() {
        let mut buffer = TextBuffer::new("abc");
        buffer.create_cursor(0, 0).unwrap();
        buffer.create_cursor(0, 3).unwrap();
        assert_eq!(buffer.move_cursors(Movement::Right), 1);
        assert_eq!(buffer.move_cursors(Movement::Start), 2);
    }

    #[test]
    fn blink_timer_superseded_by_move() {
        let mut buffer = TextBuffer::new("abc");
        let id = buffer.create_cursor(0, 0).unwrap();
        let timer = buffer.cursor(id).unwrap().blink().timer();
        buffer.move_cursor(id, Movement::Right).unwrap();
        assert!(!buffer.fire_blink(id, timer).unwrap());
        let timer = buffer.cursor(id).unwrap().blink().timer();
        assert!(buffer.fire_blink(id, timer).unwrap());
    }

    #[test]
    fn unknown_linter_tag_fails() {
        let options = BufferOptions {
            content_type: "yaml".to_owned(),
            ..BufferOptions::default()
        };
        assert!(matches!(
            TextBuffer::with_options("", options),
            Err(EditError::UnknownLinter { tag }) if tag == "yaml"
        ));
    }

    #[test]
    fn linter_sees_full_text() {
        #[derive(Debug)]
        struct TrailingGroup;

        impl Linter for TrailingGroup {
            fn group(&mut self, text: &str) -> Grouping {
                Grouping {
                    start: text.chars().count(),
                }
            }
        }

        fn trailing(_buffer: &TextBuffer) -> Box<dyn Linter> {
            Box::new(TrailingGroup)
        }

        let mut registry = LinterRegistry::default();
        registry.register("trailing", trailing);
        let options = BufferOptions {
            content_type: "trailing".to_owned(),
            ..BufferOptions::default()
        };
        let mut buffer = TextBuffer::with_registry("  {}", options, &registry).unwrap();
        assert_eq!(buffer.grouping(), Grouping { start: 4 });
        buffer.set_text("\n\n\n[]");
        assert_eq!(buffer.grouping(), Grouping { start: 5 });
        buffer.insert_text("x", 0, 0).unwrap();
        assert_eq!(buffer.grouping(), Grouping { start: 5 });
    }

    #[test]
    fn line_handles_survive_edits_to_their_line() {
        let mut buffer = TextBuffer::new("abc\ndef");
        assert!(buffer.set_line_handle(1, Some(LineHandle(9))));
        assert!(!buffer.set_line_handle(5, Some(LineHandle(1))));
        buffer.insert_text("zz", 1, 1).unwrap();
        assert_eq!(buffer.line(1).and_then(Line::handle), Some(LineHandle(9)));
    }
}
