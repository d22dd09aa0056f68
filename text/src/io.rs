//! Loading and saving buffer text
//!
//! The core never touches storage directly. [`TextSource`] and [`TextSink`]
//! are the seams a host implements; [`FileAccessor`] covers the filesystem and
//! [`MemoryAccessor`] keeps the text in memory for tests and scratch buffers.

use crate::{
    buffer::{BufferOptions, TextBuffer},
    error::{EditError, EditResult},
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Where buffer text is read from
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn read_text(&self) -> Result<String>;
}

/// Where buffer text is written to
#[async_trait]
pub trait TextSink: Send + Sync {
    /// Replace the stored text with `text`
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Text file on disk
#[derive(Debug, Clone)]
pub struct FileAccessor {
    path: PathBuf,
}

impl FileAccessor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TextSource for FileAccessor {
    async fn read_text(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), chars = text.chars().count(), "read text");
        Ok(text)
    }
}

#[async_trait]
impl TextSink for FileAccessor {
    /// Writes to a temporary file next to the target, then renames it over
    /// the target so a failed write never leaves a truncated file.
    async fn write_text(&self, text: &str) -> Result<()> {
        let path = self.path.clone();
        let contents = text.to_owned();
        tokio::task::spawn_blocking(move || write_atomic(&path, &contents))
            .await
            .context("Write task panicked")??;
        tracing::info!(path = %self.path.display(), "wrote text");
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp_file = tempfile::NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in {}", parent_dir.display()))?;
    tmp_file
        .write_all(contents.as_bytes())
        .context("Failed to write to temp file")?;
    tmp_file
        .persist(path)
        .with_context(|| format!("Failed to persist {}", path.display()))?;
    Ok(())
}

/// Shared in-memory text
#[derive(Debug, Clone, Default)]
pub struct MemoryAccessor {
    text: Arc<Mutex<String>>,
}

impl MemoryAccessor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(Mutex::new(text.into())),
        }
    }

    /// Snapshot of the stored text
    pub fn contents(&self) -> String {
        self.text.lock().clone()
    }
}

#[async_trait]
impl TextSource for MemoryAccessor {
    async fn read_text(&self) -> Result<String> {
        Ok(self.contents())
    }
}

#[async_trait]
impl TextSink for MemoryAccessor {
    async fn write_text(&self, text: &str) -> Result<()> {
        *self.text.lock() = text.to_owned();
        Ok(())
    }
}

impl TextBuffer {
    /// Build a buffer from `source`, with a primary cursor at `(0, 0)`
    pub async fn open(source: &dyn TextSource, options: BufferOptions) -> EditResult<Self> {
        let text = source.read_text().await.map_err(io_error)?;
        let mut buffer = Self::with_options(&text, options)?;
        buffer.create_cursor(0, 0)?;
        Ok(buffer)
    }

    /// Write the full text to `sink`
    pub async fn save(&self, sink: &dyn TextSink) -> EditResult<()> {
        sink.write_text(&self.text()).await.map_err(io_error)
    }
}

fn io_error(err: anyhow::Error) -> EditError {
    EditError::Io { source: err.into() }
}
