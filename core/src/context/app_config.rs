//! Loading and persisting [`AppConfig`] with confy (TOML).

use std::path::{Path, PathBuf};

use fraglog_types::AppConfig;
use thiserror::Error;

/// Name confy files the configuration under.
pub const APP_NAME: &str = "fraglog";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config from {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
    #[error("failed to save config to {path:?}")]
    Save {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
    #[error("could not locate the config file")]
    Locate(#[source] confy::ConfyError),
}

pub trait AppConfigExt: Sized {
    /// Per-user config, or defaults when it is missing or unreadable.
    fn load() -> Self;

    /// Config from an explicit TOML file. A missing file is created with defaults.
    fn load_from(path: &Path) -> Result<Self, ConfigError>;

    /// Write the config as TOML to `path`, creating parent directories.
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;

    /// Where [`AppConfigExt::load`] looks for the per-user config.
    fn config_path() -> Result<PathBuf, ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        match confy::load(APP_NAME, None) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(%error, "Could not load config, using defaults");
                AppConfig::default()
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = confy::load_path(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(|source| ConfigError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Saved config");
        Ok(())
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, None).map_err(ConfigError::Locate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraglog_types::ParsePolicy;

    #[test]
    fn test_load_from_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fraglog.toml");
        std::fs::write(
            &path,
            "output_dir = \"out\"\nparse_policy = \"lenient\"\n\n[formats]\nparquet = false\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.output_dir, "out");
        assert_eq!(config.data_dir, "dados");
        assert_eq!(config.parse_policy, ParsePolicy::Lenient);
        assert!(!config.formats.parquet);
        assert!(config.formats.json);
    }

    #[test]
    fn test_load_from_missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.toml");

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.is_file());
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fraglog.toml");

        let mut config = AppConfig::default();
        config.parse_policy = ParsePolicy::Lenient;
        config.rankings.top_maps = 2;
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_save_to_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::default().save_to(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Save { .. }));
    }

    #[test]
    fn test_config_path_is_under_app_dir() {
        let path = AppConfig::config_path().unwrap();
        assert!(path.components().any(|c| c.as_os_str() == APP_NAME));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("toml"));
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "parse_policy = \"sometimes\"\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Load { .. }));
    }
}
