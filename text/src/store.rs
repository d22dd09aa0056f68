//! Line storage and offset/position mapping
//!
//! A [`LineStore`] keeps the buffer as an ordered list of [`Line`]s, where
//! every line but the last owns its trailing separator. Offsets are global
//! character indices into the concatenation of all lines; positions are
//! `(line, column)` pairs. Both conversions walk the line list, which is linear
//! in the number of lines.

use crate::{
    error::PositionError,
    line::{byte_index, Line},
    position::Position,
};

/// Separator used when none is configured
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Ordered line records plus the aggregate character length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<Line>,
    /// Always the sum of every line's length
    length: usize,
    separator: String,
    separator_len: usize,
}

impl LineStore {
    /// Build a store from `text`, splitting after every `separator`.
    ///
    /// An empty separator cannot delimit anything and falls back to
    /// [`DEFAULT_SEPARATOR`].
    pub fn new(text: &str, separator: &str) -> Self {
        let separator = if separator.is_empty() {
            tracing::warn!("empty line separator, using newline");
            DEFAULT_SEPARATOR
        } else {
            separator
        };
        let lines = split_lines(text, separator);
        let length = lines.iter().map(Line::len).sum();
        Self {
            lines,
            length,
            separator: separator.to_owned(),
            separator_len: separator.chars().count(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Separator length in characters
    pub fn separator_len(&self) -> usize {
        self.separator_len
    }

    /// Total length in characters
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of lines, never zero
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub(crate) fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn last_line(&self) -> usize {
        self.lines.len() - 1
    }

    pub fn is_last_line(&self, index: usize) -> bool {
        index == self.last_line()
    }

    /// Length of a line including its separator, zero for missing lines
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, Line::len)
    }

    /// Length of a line without its separator. The last line has none.
    pub fn effective_len(&self, index: usize) -> usize {
        let length = self.line_len(index);
        if self.is_last_line(index) {
            length
        } else {
            length.saturating_sub(self.separator_len)
        }
    }

    /// The full text, every line joined
    pub fn text(&self) -> String {
        self.lines.iter().map(Line::content).collect()
    }

    /// Convert a global offset into a `(line, column)` position.
    ///
    /// An offset equal to the buffer length resolves to the end of the last
    /// line. Offsets landing on a line boundary resolve to column 0 of the
    /// following line.
    pub fn character_position(&self, offset: usize) -> Result<Position, PositionError> {
        if offset > self.length {
            return Err(PositionError::OffsetOutOfRange {
                offset,
                length: self.length,
            });
        }

        let mut remaining = offset;
        for (index, line) in self.lines.iter().enumerate() {
            if remaining < line.len() {
                return Ok(Position::new(index, remaining));
            }
            remaining -= line.len();
        }

        if remaining == 0 {
            let last = self.last_line();
            return Ok(Position::new(last, self.line_len(last)));
        }

        tracing::error!(
            offset,
            length = self.length,
            "offset unreachable while scanning lines"
        );
        Err(PositionError::Corrupted { offset })
    }

    /// Convert a `(line, column)` position into a global offset.
    ///
    /// The column may equal the line's full length, separator included.
    pub fn character_offset(&self, line: usize, column: usize) -> Result<usize, PositionError> {
        match self.lines.get(line) {
            Some(target) if column <= target.len() => {
                let preceding: usize = self.lines[..line].iter().map(Line::len).sum();
                Ok(preceding + column)
            },
            _ => Err(PositionError::PositionOutOfRange { line, column }),
        }
    }

    /// Resolve `offset` to a spot a caret may occupy: clamped to the buffer,
    /// and never inside a line's separator.
    pub(crate) fn caret_at(&self, offset: usize) -> Result<(usize, Position), PositionError> {
        let position = self.character_position(offset.min(self.length))?;
        let column = position.column.min(self.effective_len(position.line));
        let offset = self.character_offset(position.line, column)?;
        Ok((offset, Position::new(position.line, column)))
    }

    /// Range covering up to `count` steps back from the caret at `offset`.
    ///
    /// Stepping back over a line start is one step that spans the whole
    /// separator. Stops at the start of the buffer.
    pub(crate) fn steps_before(
        &self,
        offset: usize,
        count: usize,
    ) -> Result<(usize, usize), PositionError> {
        let (end, Position { mut line, mut column }) = self.caret_at(offset)?;
        let mut start = end;
        let mut remaining = count;
        while remaining > 0 {
            if column > 0 {
                let step = column.min(remaining);
                column -= step;
                start -= step;
                remaining -= step;
            } else if line > 0 {
                line -= 1;
                column = self.effective_len(line);
                start -= self.separator_len;
                remaining -= 1;
            } else {
                break;
            }
        }
        Ok((start, end))
    }

    /// Range covering up to `count` steps forward from the caret at `offset`.
    ///
    /// Stepping over a line end is one step that spans the whole separator.
    /// Stops at the end of the buffer.
    pub(crate) fn steps_after(
        &self,
        offset: usize,
        count: usize,
    ) -> Result<(usize, usize), PositionError> {
        let (start, Position { mut line, mut column }) = self.caret_at(offset)?;
        let mut end = start;
        let mut remaining = count;
        while remaining > 0 {
            let available = self.effective_len(line) - column;
            if available > 0 {
                let step = available.min(remaining);
                column += step;
                end += step;
                remaining -= step;
            } else if !self.is_last_line(line) {
                line += 1;
                column = 0;
                end += self.separator_len;
                remaining -= 1;
            } else {
                break;
            }
        }
        Ok((start, end))
    }

    /// Replace the characters in `start..end` with `text`.
    ///
    /// Only the lines touched by the range are rebuilt. The rebuilt region is
    /// re-split on the separator, so separators created or destroyed by the
    /// edit (including ones straddling the range edges) add or merge lines.
    /// The last line is never removed, though it may become empty.
    pub(crate) fn splice(
        &mut self,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<(), PositionError> {
        debug_assert!(start <= end, "splice range is reversed");
        let first = self.character_position(start)?;
        let last = self.character_position(end)?;

        let head = self.lines[first.line].content();
        let tail = self.lines[last.line].content();
        let mut region = String::with_capacity(head.len() + text.len() + tail.len());
        region.push_str(&head[..byte_index(head, first.column)]);
        region.push_str(text);
        region.push_str(&tail[byte_index(tail, last.column)..]);

        // A region that is not the end of the buffer must close on a separator,
        // otherwise it runs into the next line.
        let mut end_line = last.line;
        while !self.is_last_line(end_line) && !region.ends_with(self.separator.as_str()) {
            end_line += 1;
            region.push_str(self.lines[end_line].content());
        }

        let mut replacement = split_lines(&region, &self.separator);
        if !self.is_last_line(end_line) {
            // The empty piece after the closing separator is the start of the
            // next, untouched line.
            replacement.pop();
        }
        if let Some(line) = replacement.first_mut() {
            line.set_handle(self.lines[first.line].handle());
        }

        let removed: usize = self.lines[first.line..=end_line]
            .iter()
            .map(Line::len)
            .sum();
        let added: usize = replacement.iter().map(Line::len).sum();
        self.lines.splice(first.line..=end_line, replacement);
        self.length = self.length - removed + added;

        debug_assert_eq!(
            self.length,
            self.lines.iter().map(Line::len).sum::<usize>(),
            "buffer length diverged from line lengths"
        );
        Ok(())
    }
}

/// Split `text` after every separator, keeping each separator with the line
/// it terminates. Always yields at least one line; text ending in a separator
/// yields a trailing empty line.
fn split_lines(text: &str, separator: &str) -> Vec<Line> {
    let mut lines: Vec<Line> = text.split_inclusive(separator).map(Line::new).collect();
    if lines
        .last()
        .map_or(true, |line| line.content().ends_with(separator))
    {
        lines.push(Line::new(""));
    }
    lines
}
