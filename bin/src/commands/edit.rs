use crate::config::Config;
use anyhow::{Context, Result};
use rpe_text::{io::FileAccessor, key_notation, TextBuffer};
use std::{io::Write, path::Path};

/// Open `path`, replay `keys` on it and print the resulting text. The file is
/// written back unless `dry_run` is set.
pub async fn run(
    config: &Config,
    path: &Path,
    keys: &str,
    dry_run: bool,
    out: &mut impl Write,
) -> Result<()> {
    let keys = key_notation::parse_sequence(keys).context("Invalid key sequence")?;

    let accessor = FileAccessor::new(path);
    let mut buffer = TextBuffer::open(&accessor, config.buffer_options(path))
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    buffer.handle_keys(&keys).context("Failed to apply keys")?;
    tracing::info!(
        keys = keys.len(),
        chars = buffer.len(),
        lines = buffer.line_count(),
        "applied key sequence"
    );

    if !dry_run {
        buffer
            .save(&accessor)
            .await
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    write!(out, "{}", buffer.text())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_back_edited_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "abc\ndef").unwrap();

        let mut out = Vec::new();
        run(&Config::default(), &path, "<Right>X<Down><BS>", false, &mut out)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "aXbc\ndf");
        assert_eq!(String::from_utf8(out).unwrap(), "aXbc\ndf");
    }

    #[tokio::test]
    async fn dry_run_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "one").unwrap();

        let mut out = Vec::new();
        run(&Config::default(), &path, "<C-End><Enter>two", true, &mut out)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one");
        assert_eq!(String::from_utf8(out).unwrap(), "one\ntwo");
    }

    #[tokio::test]
    async fn custom_separator_from_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        std::fs::write(&path, "a\r\nb").unwrap();

        let config = Config {
            line_separator: "\r\n".to_string(),
            ..Config::default()
        };
        let mut out = Vec::new();
        run(&config, &path, "<End><Enter>", false, &mut out)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\r\n\r\nb");
    }

    #[tokio::test]
    async fn bad_keys_fail_before_touching_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");

        let mut out = Vec::new();
        let err = run(&Config::default(), &path, "<Esc>", false, &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid key sequence"));
        assert!(!path.exists());
    }
}
