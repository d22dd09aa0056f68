//! Character reader for linters
//!
//! [`TextReader`] walks a string by character index with lookahead, skipping
//! and extraction up to a delimiter. Indices match buffer offsets.

/// A movable read position over a string
#[derive(Debug, Clone)]
pub struct TextReader {
    chars: Vec<char>,
    cursor: usize,
}

impl TextReader {
    pub fn new(text: &str) -> Self {
        Self::at(text, 0)
    }

    pub fn at(text: &str, cursor: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            cursor,
        }
    }

    /// Current character index
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    /// Look at the character `offset` positions ahead without moving
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.cursor + offset).copied()
    }

    pub fn skip(&mut self, amount: usize) -> &mut Self {
        self.cursor += amount;
        self
    }

    /// Move to the next occurrence of `target`. Stays put when there is none.
    pub fn skip_until(&mut self, target: &str) -> &mut Self {
        if let Some(index) = self.find(target) {
            self.cursor = index;
        }
        self
    }

    /// Take the text up to the next occurrence of `target` and move onto it.
    /// Returns `None`, without moving, when `target` does not occur.
    pub fn get_until(&mut self, target: &str) -> Option<String> {
        let index = self.find(target)?;
        let result = self.chars[self.cursor..index].iter().collect();
        self.cursor = index;
        Some(result)
    }

    fn find(&self, target: &str) -> Option<usize> {
        let target: Vec<char> = target.chars().collect();
        if self.cursor > self.chars.len() {
            return None;
        }
        if target.is_empty() {
            return Some(self.cursor);
        }
        self.chars[self.cursor..]
            .windows(target.len())
            .position(|window| window == target.as_slice())
            .map(|index| self.cursor + index)
    }
}
