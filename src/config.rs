//! Configuration file parser for ~/.config/vidgrid/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde, though we log a warning when
//! the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port the feed API listens on (and the TUI connects to).
    pub port: u16,

    /// Database file path; defaults to `videos.db` in the config directory.
    pub db_path: Option<String>,

    /// Topic bar entries. "all" is prepended if missing: the category
    /// filter needs its neutral element.
    pub topics: Vec<String>,

    /// Logical pixels per terminal cell, used to map terminal width onto
    /// the grid breakpoints.
    pub cell_width_px: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            db_path: None,
            topics: default_topics(),
            cell_width_px: crate::gallery::DEFAULT_CELL_WIDTH_PX,
        }
    }
}

fn default_topics() -> Vec<String> {
    let mut topics = vec![crate::gallery::ALL_CATEGORIES.to_string()];
    topics.extend(crate::storage::DEMO_TOPICS.iter().map(|t| t.to_string()));
    topics
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to warn about unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["port", "db_path", "topics", "cell_width_px"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let mut config: Config = toml::from_str(&content)?;

        // The neutral category must always be available to the topic bar
        if !config
            .topics
            .iter()
            .any(|t| t == crate::gallery::ALL_CATEGORIES)
        {
            config
                .topics
                .insert(0, crate::gallery::ALL_CATEGORIES.to_string());
        }

        tracing::info!(path = %path.display(), port = config.port, "Loaded configuration");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, None);
        assert_eq!(config.topics[0], "all");
        assert!(config.topics.len() > 1);
        assert_eq!(config.cell_width_px, 8);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/vidgrid_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = std::env::temp_dir().join("vidgrid_config_test_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "port = 8080\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cell_width_px, 8); // default
        assert_eq!(config.topics[0], "all"); // default

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_custom_topics_get_all_prepended() {
        let dir = std::env::temp_dir().join("vidgrid_config_test_topics");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "topics = [\"cooking\", \"travel\"]\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.topics, vec!["all", "cooking", "travel"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = std::env::temp_dir().join("vidgrid_config_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let dir = std::env::temp_dir().join("vidgrid_config_test_unknown");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "port = 4000\ntotally_fake_key = 1\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 4000);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("vidgrid_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), ConfigError::TooLarge(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
