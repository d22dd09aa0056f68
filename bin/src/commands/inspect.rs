use crate::config::Config;
use anyhow::{Context, Result};
use rpe_text::{io::FileAccessor, TextBuffer};
use std::{io::Write, path::Path};

/// Print every line of `path` with its length, then the buffer totals
pub async fn run(config: &Config, path: &Path, out: &mut impl Write) -> Result<()> {
    let accessor = FileAccessor::new(path);
    let buffer = TextBuffer::open(&accessor, config.buffer_options(path))
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let separator = buffer.separator();
    for (index, line) in buffer.lines().iter().enumerate() {
        writeln!(out, "{index:>4} {:>5} {:?}", line.len(), line.text(separator))?;
    }
    writeln!(
        out,
        "{} lines, {} chars, {} linter, group start {}",
        buffer.line_count(),
        buffer.len(),
        buffer.content_type(),
        buffer.grouping().start
    )?;
    Ok(())
}
