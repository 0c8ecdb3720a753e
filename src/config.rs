use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Encrypted data file. Parent directories are created on write.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("storage.dat")
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Defaults used when no config file exists.
    pub fn minimal() -> Self {
        Self {
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.storage.path.as_os_str().is_empty() {
        anyhow::bail!("storage.path must not be empty");
    }

    if config.logging.filter.trim().is_empty() {
        anyhow::bail!("logging.filter must not be empty");
    }

    Ok(config)
}

/// Loads `path` if it exists, otherwise falls back to [`Config::minimal`].
/// A file that exists but fails to parse or validate is still an error.
pub fn load_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("schedulo.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"
[storage]
path = "/tmp/schedulo/data.bin"

[logging]
filter = "schedulo=debug"
json = true
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.storage.path, PathBuf::from("/tmp/schedulo/data.bin"));
        assert_eq!(cfg.logging.filter, "schedulo=debug");
        assert!(cfg.logging.json);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.storage.path, PathBuf::from("storage.dat"));
        assert_eq!(cfg.logging.filter, "info");
        assert!(!cfg.logging.json);
    }

    #[test]
    fn test_validation() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "[storage]\npath = \"\"\n");
        assert!(load_config(&path).is_err());

        let path = write(&dir, "[logging]\nfilter = \"  \"\n");
        assert!(load_config(&path).is_err());

        let path = write(&dir, "[storage\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let cfg = load_or_minimal(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.storage.path, PathBuf::from("storage.dat"));
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
