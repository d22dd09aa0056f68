//! Cursor marker notation for tests
//!
//! Tests describe a buffer and its cursors as one string:
//!
//! - `|` marks a cursor at that character offset
//! - `||` is a literal `|`
//!
//! ```ignore
//! use rpe_text::test_helpers::{buffer_with_cursors, marked_text};
//!
//! let mut buffer = buffer_with_cursors("a|b\nc|d");
//! buffer.insert_at_cursors("X").unwrap();
//! assert_eq!(marked_text(&buffer), "aX|b\ncX|d");
//! ```

use crate::{
    buffer::{BufferOptions, TextBuffer},
    cursor::Cursor,
    key_notation,
    position::Position,
};
use thiserror::Error;

/// Marker string split into text and cursor offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Text with all markers removed
    pub text: String,
    /// Character offsets of cursors, in marker order
    pub cursors: Vec<usize>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("No cursor marker in {0:?}")]
    NoCursor(String),
}

/// Parse a marked string
pub fn parse(marked: &str) -> Parsed {
    let mut text = String::with_capacity(marked.len());
    let mut cursors = Vec::new();
    let mut offset = 0;
    let mut chars = marked.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '|' {
            text.push(ch);
            offset += 1;
            continue;
        }
        if chars.peek() == Some(&'|') {
            chars.next();
            text.push('|');
            offset += 1;
        } else {
            cursors.push(offset);
        }
    }

    Parsed { text, cursors }
}

/// Parse a marked string that must contain at least one cursor
pub fn parse_with_cursor(marked: &str) -> Result<Parsed, ParseError> {
    let parsed = parse(marked);
    if parsed.cursors.is_empty() {
        return Err(ParseError::NoCursor(marked.to_owned()));
    }
    Ok(parsed)
}

/// Build a plain-text buffer with a cursor at every marker. The first marker
/// becomes the primary cursor.
pub fn buffer_with_cursors(marked: &str) -> TextBuffer {
    buffer_with_options(marked, BufferOptions::default())
}

/// [`buffer_with_cursors`] with explicit buffer options
pub fn buffer_with_options(marked: &str, options: BufferOptions) -> TextBuffer {
    let parsed = parse_with_cursor(marked).expect("marked text needs a cursor");
    let mut buffer = TextBuffer::with_options(&parsed.text, options).expect("options are valid");
    for offset in parsed.cursors {
        let position = buffer
            .character_position(offset)
            .expect("marker offset is inside the text");
        buffer
            .create_cursor(position.line, position.column)
            .expect("marker position is valid");
    }
    buffer
}

/// Render the buffer text with a marker at every cursor offset
pub fn marked_text(buffer: &TextBuffer) -> String {
    let mut offsets: Vec<usize> = buffer.cursors().map(Cursor::offset).collect();
    offsets.sort_unstable();
    offsets.dedup();

    let mut marked = String::new();
    let mut pending = offsets.into_iter().peekable();
    for (offset, ch) in buffer.text().chars().enumerate() {
        if pending.next_if_eq(&offset).is_some() {
            marked.push('|');
        }
        if ch == '|' {
            marked.push_str("||");
        } else {
            marked.push(ch);
        }
    }
    if pending.next().is_some() {
        marked.push('|');
    }
    marked
}

/// Fluent wrapper for driving a buffer from key notation in tests
///
/// ```ignore
/// TestBuffer::new("ab|c")
///     .keys("X<Enter>")
///     .assert_marked("abX\n|c")
///     .assert_lines(&["abX\n", "c"]);
/// ```
#[derive(Debug)]
pub struct TestBuffer {
    buffer: TextBuffer,
}

impl TestBuffer {
    pub fn new(marked: &str) -> Self {
        Self {
            buffer: buffer_with_cursors(marked),
        }
    }

    /// A buffer with a custom separator
    pub fn with_separator(marked: &str, separator: &str) -> Self {
        let options = BufferOptions {
            separator: separator.to_owned(),
            ..BufferOptions::default()
        };
        Self {
            buffer: buffer_with_options(marked, options),
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Replay keys written in [`key_notation`]
    #[track_caller]
    pub fn keys(mut self, notation: &str) -> Self {
        let keys = key_notation::parse_sequence(notation).expect("valid key notation");
        self.buffer.handle_keys(&keys).expect("keys apply cleanly");
        self
    }

    #[track_caller]
    pub fn assert_marked(self, expected: &str) -> Self {
        assert_eq!(marked_text(&self.buffer), expected);
        self
    }

    /// Compare raw line contents, separators included
    #[track_caller]
    pub fn assert_lines(self, expected: &[&str]) -> Self {
        let lines: Vec<&str> = self.buffer.lines().iter().map(|line| line.content()).collect();
        assert_eq!(lines, expected);
        assert_eq!(
            self.buffer.len(),
            expected.iter().map(|line| line.chars().count()).sum::<usize>()
        );
        self
    }

    /// Every cursor's offset agrees with its `(line, column)`
    #[track_caller]
    pub fn assert_offsets_consistent(self) -> Self {
        for cursor in self.buffer.cursors() {
            let position = cursor.position();
            assert_eq!(
                self.buffer.character_offset(position.line, position.column),
                Ok(cursor.offset()),
                "cursor at {position:?}"
            );
        }
        self
    }

    /// Compare the primary cursor position
    #[track_caller]
    pub fn assert_cursor(self, line: usize, column: usize) -> Self {
        assert_eq!(
            self.buffer.primary_cursor().map(Cursor::position),
            Some(Position::new(line, column))
        );
        self
    }
}
