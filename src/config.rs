//! Configuration management for the storage helpers
//!
//! Values come from an optional `sdcard.toml` with `SDCARD_`-prefixed
//! environment overrides, e.g. `SDCARD_ROOT=/mnt/sdcard`.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default size of the read transfer buffer
pub const DEFAULT_TRANSFER_BUFFER_SIZE: usize = 1024;

/// Storage configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Absolute path of the external volume root
    pub root: String,

    /// Application package id, used to lay out private directories
    pub package: String,

    /// Chunk size used when copying files into memory
    #[serde(default = "default_transfer_buffer_size")]
    pub transfer_buffer_size: usize,

    /// Reject relative paths that escape their base directory
    #[serde(default = "default_enforce_containment")]
    pub enforce_containment: bool,
}

fn default_transfer_buffer_size() -> usize {
    DEFAULT_TRANSFER_BUFFER_SIZE
}

fn default_enforce_containment() -> bool {
    true
}

impl StorageConfig {
    /// Load configuration from `sdcard.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("sdcard")
    }

    /// Load configuration from the named file (extension optional) with environment overrides
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, "SDCARD")
    }

    /// Load from the named file with overrides from `{env_prefix}_*` variables.
    ///
    /// Nested keys are separated by `__`, e.g. `SDCARD_TRANSFER_BUFFER_SIZE`.
    pub fn load_with_env(config_path: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration directly, using defaults for the tunables
    pub fn new(root: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            package: package.into(),
            transfer_buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE,
            enforce_containment: true,
        }
    }

    /// Get the volume root as PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.root.is_empty() {
            return Err(ConfigError::Message("root cannot be empty".into()));
        }

        if !Path::new(&self.root).is_absolute() {
            return Err(ConfigError::Message(format!(
                "root must be an absolute path, got {}",
                self.root
            )));
        }

        if self.package.is_empty() {
            return Err(ConfigError::Message("package cannot be empty".into()));
        }

        if self.transfer_buffer_size == 0 {
            return Err(ConfigError::Message(
                "transfer_buffer_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_applies_defaults() {
        let config = StorageConfig::from_toml(
            r#"
            root = "/mnt/sdcard"
            package = "com.example.player"
            "#,
        )
        .unwrap();

        assert_eq!(config.root_path(), PathBuf::from("/mnt/sdcard"));
        assert_eq!(config.transfer_buffer_size, 1024);
        assert!(config.enforce_containment);
    }

    #[test]
    fn test_from_toml_overrides() {
        let config = StorageConfig::from_toml(
            r#"
            root = "/mnt/sdcard"
            package = "com.example.player"
            transfer_buffer_size = 4096
            enforce_containment = false
            "#,
        )
        .unwrap();

        assert_eq!(config.transfer_buffer_size, 4096);
        assert!(!config.enforce_containment);
    }

    #[test]
    fn test_rejects_empty_root() {
        let result = StorageConfig::from_toml(
            r#"
            root = ""
            package = "com.example.player"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_buffer() {
        let result = StorageConfig::from_toml(
            r#"
            root = "/mnt/sdcard"
            package = "com.example.player"
            transfer_buffer_size = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_relative_root() {
        let result = StorageConfig::from_toml(
            r#"
            root = "sdcard"
            package = "com.example.player"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sdcard.toml");
        std::fs::write(
            &path,
            "root = \"/mnt/sdcard\"\npackage = \"com.example.player\"\ntransfer_buffer_size = 512\n",
        )
        .unwrap();

        let config =
            StorageConfig::load_with_env(path.to_str().unwrap(), "SDCARD_TEST_FILE").unwrap();
        assert_eq!(config.root, "/mnt/sdcard");
        assert_eq!(config.package, "com.example.player");
        assert_eq!(config.transfer_buffer_size, 512);
        assert!(config.enforce_containment);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sdcard.toml");
        std::fs::write(&path, "root = \"/mnt/sdcard\"\npackage = \"com.example.player\"\n")
            .unwrap();

        // A prefix no other test reads, so setting it cannot leak elsewhere
        unsafe {
            std::env::set_var("SDCARD_TEST_ENV_ROOT", "/storage/emulated/0");
        }
        let config =
            StorageConfig::load_with_env(path.to_str().unwrap(), "SDCARD_TEST_ENV").unwrap();
        unsafe {
            std::env::remove_var("SDCARD_TEST_ENV_ROOT");
        }

        assert_eq!(config.root, "/storage/emulated/0");
        assert_eq!(config.package, "com.example.player");
    }

    #[test]
    fn test_missing_file_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        // No file and no variables under this prefix: required keys are missing
        let result = StorageConfig::load_with_env(path.to_str().unwrap(), "SDCARD_TEST_MISSING");
        assert!(result.is_err());
    }
}
