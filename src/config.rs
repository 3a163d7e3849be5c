use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::FitPolicy;

/// Application-level constants
pub const APP_NAME: &str = "MedPredict";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_PATH_ENV: &str = "MEDPREDICT_CONFIG";
pub const BIND_ENV: &str = "MEDPREDICT_BIND";
pub const MODELS_DIR_ENV: &str = "MEDPREDICT_MODELS_DIR";
pub const DATASET_DIR_ENV: &str = "MEDPREDICT_DATASET_DIR";
pub const FIT_POLICY_ENV: &str = "MEDPREDICT_FIT_POLICY";

pub const TRAINING_FILE: &str = "Training.csv";
pub const TESTING_FILE: &str = "Testing.csv";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "medpredict=info,tower_http=warn"
}

/// Get the application data directory, `~/MedPredict/`.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Config file consulted when `MEDPREDICT_CONFIG` is unset.
pub fn default_config_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("config.json"))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid value for {var}: {value}")]
    InvalidOverride { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub models_dir: PathBuf,
    pub dataset_dir: PathBuf,
    pub fit_policy: FitPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            models_dir: PathBuf::from("saved_models"),
            dataset_dir: PathBuf::from("dataset"),
            fit_policy: FitPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file if one exists, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match explicit {
            // An explicitly named file must exist.
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply `MEDPREDICT_*` overrides from `lookup`. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(BIND_ENV) {
            self.bind_addr = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidOverride {
                    var: BIND_ENV,
                    value,
                })?;
        }
        if let Some(value) = get(MODELS_DIR_ENV) {
            self.models_dir = PathBuf::from(value);
        }
        if let Some(value) = get(DATASET_DIR_ENV) {
            self.dataset_dir = PathBuf::from(value);
        }
        if let Some(value) = get(FIT_POLICY_ENV) {
            self.fit_policy = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidOverride {
                    var: FIT_POLICY_ENV,
                    value,
                })?;
        }
        Ok(())
    }

    pub fn training_path(&self) -> PathBuf {
        self.dataset_dir.join(TRAINING_FILE)
    }

    pub fn testing_path(&self) -> PathBuf {
        self.dataset_dir.join(TESTING_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_the_documented_layout() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8501");
        assert_eq!(config.models_dir, PathBuf::from("saved_models"));
        assert_eq!(config.training_path(), PathBuf::from("dataset/Training.csv"));
        assert_eq!(config.testing_path(), PathBuf::from("dataset/Testing.csv"));
        assert_eq!(config.fit_policy, FitPolicy::AtStartup);
    }

    #[test]
    fn file_values_fill_gaps_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"fit_policy": "per_request"}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.fit_policy, FitPolicy::PerRequest);
        assert_eq!(config.models_dir, PathBuf::from("saved_models"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"fit_policy": "sometimes"}"#).unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppConfig::from_file(&dir.path().join("absent.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn overrides_take_precedence() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(env(&[
                (BIND_ENV, "0.0.0.0:9000"),
                (MODELS_DIR_ENV, "/srv/models"),
                (DATASET_DIR_ENV, ""),
                (FIT_POLICY_ENV, "per_request"),
            ]))
            .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.models_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.dataset_dir, PathBuf::from("dataset"));
        assert_eq!(config.fit_policy, FitPolicy::PerRequest);
    }

    #[test]
    fn bad_override_names_the_variable() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(env(&[(BIND_ENV, "not-an-address")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { var: BIND_ENV, .. }));
    }

    #[test]
    fn app_data_dir_under_home() {
        if let (Some(dir), Some(home)) = (app_data_dir(), dirs::home_dir()) {
            assert!(dir.starts_with(home));
            assert!(dir.ends_with("MedPredict"));
        }
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
