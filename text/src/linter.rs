//! Linter extension point
//!
//! A linter groups the text of a buffer for presentation. Linters are built by
//! factories registered under a content-type tag; the buffer invokes the
//! factory once when it is created and hands the linter the full text whenever
//! the text is replaced. The core places no other constraint on a linter.

use crate::buffer::TextBuffer;
use rustc_hash::FxHashMap;
use std::fmt;

/// Tag for plain text
pub const RAW: &str = "raw";
/// Tag for JSON documents
pub const JSON: &str = "json";

/// Result of grouping a full text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grouping {
    /// Offset where the first group begins
    pub start: usize,
}

pub trait Linter: fmt::Debug {
    fn group(&mut self, text: &str) -> Grouping;
}

pub type LinterFactory = fn(&TextBuffer) -> Box<dyn Linter>;

/// Treats the whole text as one group
#[derive(Debug, Default)]
pub struct PlainTextLinter;

impl Linter for PlainTextLinter {
    fn group(&mut self, _text: &str) -> Grouping {
        Grouping::default()
    }
}

/// Linter for JSON documents. Groups like plain text until a JSON-aware
/// grouping is registered in its place.
#[derive(Debug, Default)]
pub struct JsonLinter;

impl Linter for JsonLinter {
    fn group(&mut self, _text: &str) -> Grouping {
        Grouping::default()
    }
}

pub(crate) fn plain_text(_buffer: &TextBuffer) -> Box<dyn Linter> {
    Box::new(PlainTextLinter)
}

fn json(_buffer: &TextBuffer) -> Box<dyn Linter> {
    Box::new(JsonLinter)
}

/// Linter factories keyed by content-type tag
#[derive(Clone)]
pub struct LinterRegistry {
    factories: FxHashMap<String, LinterFactory>,
}

impl LinterRegistry {
    /// A registry with no factories
    pub fn empty() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    pub fn register(&mut self, tag: impl Into<String>, factory: LinterFactory) {
        self.factories.insert(tag.into(), factory);
    }

    pub fn get(&self, tag: &str) -> Option<LinterFactory> {
        self.factories.get(tag).copied()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }
}

impl Default for LinterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(RAW, plain_text);
        registry.register(JSON, json);
        registry
    }
}

impl fmt::Debug for LinterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.factories.keys().collect();
        tags.sort();
        f.debug_struct("LinterRegistry").field("tags", &tags).finish()
    }
}
