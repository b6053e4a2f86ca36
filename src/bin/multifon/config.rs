//! JSON config file with credentials and connection defaults.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use multifon::Api;
use serde::{Deserialize, Serialize};

/// Value of `--config` that reads the file from stdin.
pub const STDIN_ARG: &str = "-";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Stdin,
    File(PathBuf),
}

impl ConfigSource {
    pub fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == STDIN_ARG {
            Self::Stdin
        } else {
            Self::File(path.to_owned())
        }
    }

    fn display(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<Api>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Config {
    pub fn load(source: &ConfigSource) -> Result<Self, ConfigError> {
        let reader: Box<dyn Read> = match source {
            ConfigSource::Stdin => Box::new(io::stdin()),
            ConfigSource::File(path) => Box::new(File::open(path).map_err(|err| ConfigError::Read {
                path: path.display().to_string(),
                source: err,
            })?),
        };
        serde_json::from_reader(BufReader::new(reader)).map_err(|err| ConfigError::Json {
            path: source.display(),
            source: err,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source: io::Error| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })?;
        writer.write_all(b"\n").map_err(write_error)?;
        writer.flush().map_err(write_error)
    }

    /// Config after a password change: the new password becomes current and the
    /// previous one is kept in `new_password` so the change can be reverted.
    pub fn rotated(&self, old_password: &str, new_password: &str) -> Self {
        Self {
            password: Some(new_password.to_owned()),
            new_password: Some(old_password.to_owned()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_means_stdin() {
        assert_eq!(ConfigSource::from_arg(Path::new("-")), ConfigSource::Stdin);
        assert_eq!(
            ConfigSource::from_arg(Path::new("multifon.json")),
            ConfigSource::File(PathBuf::from("multifon.json"))
        );
    }

    #[test]
    fn load_reads_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multifon.json");
        std::fs::write(&path, r#"{"login": "79251234567", "api": "emotion"}"#).unwrap();

        let config = Config::load(&ConfigSource::File(path)).unwrap();
        assert_eq!(config.login.as_deref(), Some("79251234567"));
        assert_eq!(config.api, Some(Api::Emotion));
        assert_eq!(config.password, None);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn load_reports_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&ConfigSource::File(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn rotated_config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multifon.json");
        let config = Config {
            login: Some("79251234567".to_owned()),
            password: Some("OldPass1".to_owned()),
            timeout: Some(10),
            ..Config::default()
        };

        config.rotated("OldPass1", "NewPass22").save(&path).unwrap();

        let saved = Config::load(&ConfigSource::File(path)).unwrap();
        assert_eq!(saved.password.as_deref(), Some("NewPass22"));
        assert_eq!(saved.new_password.as_deref(), Some("OldPass1"));
        assert_eq!(saved.login.as_deref(), Some("79251234567"));
        assert_eq!(saved.timeout, Some(10));
    }
}
