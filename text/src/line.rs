//! Physical lines of a buffer

/// Opaque handle a host attaches to a line, typically a reference to the
/// element rendering it. The buffer stores it but never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineHandle(pub u64);

/// One physical line of text
///
/// Every line except the last ends with a copy of the buffer's separator, and
/// [`Line::len`] counts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    content: String,
    /// Character count of `content`
    length: usize,
    handle: Option<LineHandle>,
}

impl Line {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let length = content.chars().count();
        Self {
            content,
            length,
            handle: None,
        }
    }

    /// The full content, including a trailing separator for non-final lines
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The content without its trailing separator
    pub fn text<'a>(&'a self, separator: &str) -> &'a str {
        self.content
            .strip_suffix(separator)
            .unwrap_or(&self.content)
    }

    /// Length in characters, separator included
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn handle(&self) -> Option<LineHandle> {
        self.handle
    }

    pub fn set_handle(&mut self, handle: Option<LineHandle>) {
        self.handle = handle;
    }
}

/// Byte index of the `column`-th character of `text`, or `text.len()` when the
/// column is at or past the end.
pub(crate) fn byte_index(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map_or(text.len(), |(index, _)| index)
}
