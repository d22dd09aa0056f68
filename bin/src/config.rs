//! Configuration management for rpe.
//!
//! Loads `config.toml` from the path discovered by [`crate::paths::discover`],
//! with optional CLI override via `--config`.
//!
//! # Architecture
//!
//! 1. **Startup** calls [`crate::paths::discover`] to find the `.rpe/` directory
//! 2. [`Config::load_with_overrides`] picks the config path: CLI override > discovered > defaults
//! 3. [`Config::buffer_options`] turns the config into the options of each opened buffer
//!
//! # Testing
//!
//! Tests use [`Config::load()`] with explicit paths to temporary directories.

use anyhow::{Context, Result};
use rpe_text::{linter, BufferOptions};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Global configuration for rpe, loaded from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Separator between lines, possibly several characters long.
    ///
    /// An empty separator is rejected by the buffer in favour of `"\n"`.
    #[serde(default = "default_line_separator")]
    pub line_separator: String,

    /// Idle time in milliseconds before the caret starts blinking.
    #[serde(default = "default_cursor_blink_delay_ms")]
    pub cursor_blink_delay_ms: u64,

    /// Linter tag applied to every buffer. Inferred from the file extension
    /// when unset.
    pub content_type: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_separator: default_line_separator(),
            cursor_blink_delay_ms: default_cursor_blink_delay_ms(),
            content_type: None,
        }
    }
}

fn default_line_separator() -> String {
    "\n".to_string()
}

fn default_cursor_blink_delay_ms() -> u64 {
    500
}

impl Config {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path > defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Self::load_embedded()
    }

    fn load_embedded() -> Result<Self> {
        let source = include_str!("../../config.toml");
        toml::from_str(source).context("Failed to parse embedded config.toml")
    }

    /// Options for a buffer holding the file at `path`
    pub fn buffer_options(&self, path: &Path) -> BufferOptions {
        let content_type = self
            .content_type
            .clone()
            .unwrap_or_else(|| content_type_for(path).to_string());
        BufferOptions {
            separator: self.line_separator.clone(),
            blink_delay: Duration::from_millis(self.cursor_blink_delay_ms),
            content_type,
        }
    }
}

/// Linter tag inferred from a file extension
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("mcmeta") => {
            linter::JSON
        },
        _ => linter::RAW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_empty_config() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.line_separator, "\n");
        assert_eq!(config.cursor_blink_delay_ms, 500);
        assert_eq!(config.content_type, None);
    }

    #[test]
    fn loads_all_fields() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "line_separator = \"\\r\\n\"\ncursor_blink_delay_ms = 250\ncontent_type = \"json\"\n",
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.line_separator, "\r\n");
        assert_eq!(config.cursor_blink_delay_ms, 250);
        assert_eq!(config.content_type.as_deref(), Some("json"));
    }

    #[test]
    fn errors_on_invalid_toml() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "invalid toml {{{{").unwrap();

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn errors_on_unknown_field() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "font_size = 12").unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn errors_on_nonexistent_file() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("nonexistent.toml");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn embedded_matches_defaults() {
        let embedded = Config::load_embedded().unwrap();
        let default = Config::default();
        assert_eq!(embedded.line_separator, default.line_separator);
        assert_eq!(embedded.cursor_blink_delay_ms, default.cursor_blink_delay_ms);
        assert_eq!(embedded.content_type, default.content_type);
    }

    #[test]
    fn cli_override_takes_priority() {
        let tmp_dir = tempdir().unwrap();
        let cli_path = tmp_dir.path().join("cli.toml");
        let discovered_path = tmp_dir.path().join("discovered.toml");
        std::fs::write(&cli_path, "cursor_blink_delay_ms = 100").unwrap();
        std::fs::write(&discovered_path, "cursor_blink_delay_ms = 900").unwrap();

        let config = Config::load_with_overrides(Some(&cli_path), Some(&discovered_path)).unwrap();
        assert_eq!(config.cursor_blink_delay_ms, 100);

        let config = Config::load_with_overrides(None, Some(&discovered_path)).unwrap();
        assert_eq!(config.cursor_blink_delay_ms, 900);

        let config = Config::load_with_overrides(None, None).unwrap();
        assert_eq!(config.cursor_blink_delay_ms, 500);
    }

    #[test]
    fn buffer_options_infer_content_type() {
        let config = Config::default();
        assert_eq!(
            config.buffer_options(Path::new("pack.mcmeta")).content_type,
            linter::JSON
        );
        assert_eq!(
            config.buffer_options(Path::new("data/Model.JSON")).content_type,
            linter::JSON
        );
        assert_eq!(
            config.buffer_options(Path::new("notes.txt")).content_type,
            linter::RAW
        );
        assert_eq!(
            config.buffer_options(Path::new("Makefile")).content_type,
            linter::RAW
        );
    }

    #[test]
    fn content_type_override_wins() {
        let config = Config {
            content_type: Some(linter::RAW.to_string()),
            ..Config::default()
        };
        let options = config.buffer_options(Path::new("a.json"));
        assert_eq!(options.content_type, linter::RAW);
        assert_eq!(options.blink_delay, Duration::from_millis(500));
    }
}
