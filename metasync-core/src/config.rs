//! Static configuration, validated before any sync pass runs.
//!
//! # Sources (later wins)
//!
//! 1. `<config_dir>/metasync/config.yaml` or `./metasync.yaml` (first found),
//!    or an explicit `--config` path.
//! 2. Command-line flags and `ONESKY_*` environment variables, passed in by
//!    the caller as another [`ConfigFile`] layer.
//!
//! # API pattern
//!
//! Functions taking explicit directories are suffixed `_at`; the unsuffixed
//! forms derive them from `dirs`. Tests must always use the `_at` forms.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::ProjectId;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "metasync.yaml";

// ---------------------------------------------------------------------------
// Raw layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum ProjectIdValue {
    Text(String),
    Number(u64),
}

fn project_id_from_yaml<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<ProjectIdValue>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        ProjectIdValue::Text(s) => s,
        ProjectIdValue::Number(n) => n.to_string(),
    }))
}

/// One layer of unvalidated settings. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    #[serde(deserialize_with = "project_id_from_yaml")]
    pub project_id: Option<String>,
    pub metadata_path: Option<PathBuf>,
    pub skip_if_in_translation: Option<bool>,
}

impl ConfigFile {
    /// Layer `over` on top of `self`; values set in `over` win.
    pub fn overlay(self, over: ConfigFile) -> ConfigFile {
        ConfigFile {
            public_key: over.public_key.or(self.public_key),
            secret_key: over.secret_key.or(self.secret_key),
            project_id: over.project_id.or(self.project_id),
            metadata_path: over.metadata_path.or(self.metadata_path),
            skip_if_in_translation: over.skip_if_in_translation.or(self.skip_if_in_translation),
        }
    }

    /// Check required values and resolve paths relative to `cwd`.
    pub fn validate_at(self, cwd: &Path) -> Result<SyncConfig, ConfigError> {
        let public_key = non_empty(self.public_key).ok_or(ConfigError::MissingPublicKey)?;
        let secret_key = non_empty(self.secret_key).ok_or(ConfigError::MissingSecretKey)?;
        let project_id = non_empty(self.project_id).ok_or(ConfigError::MissingProjectId)?;

        let metadata_root = match self.metadata_path {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_dir() {
                    return Err(ConfigError::MetadataPathNotFound { path });
                }
                path
            }
            None => default_metadata_root_at(cwd),
        };

        Ok(SyncConfig {
            credentials: Credentials {
                public_key,
                secret_key,
            },
            project_id: ProjectId::from(project_id),
            metadata_root,
            skip_if_in_translation: self.skip_if_in_translation.unwrap_or(true),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Validated config
// ---------------------------------------------------------------------------

/// Platform API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub public_key: String,
    pub secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Settings every sync pass needs, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub credentials: Credentials,
    pub project_id: ProjectId,
    pub metadata_root: PathBuf,
    pub skip_if_in_translation: bool,
}

/// `<cwd>/fastlane/metadata` when a `fastlane` directory exists, else
/// `<cwd>/metadata`.
pub fn default_metadata_root_at(cwd: &Path) -> PathBuf {
    let fastlane = cwd.join("fastlane");
    if fastlane.is_dir() {
        fastlane.join("metadata")
    } else {
        cwd.join("metadata")
    }
}

// ---------------------------------------------------------------------------
// Discovery and loading
// ---------------------------------------------------------------------------

/// First existing config file: `<cwd>/metasync.yaml`, then
/// `<config_dir>/metasync/config.yaml`.
pub fn discover_at(cwd: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    let user = config_dir?.join("metasync").join("config.yaml");
    user.is_file().then_some(user)
}

/// `discover_at` using the platform config directory.
pub fn discover(cwd: &Path) -> Option<PathBuf> {
    discover_at(cwd, dirs::config_dir().as_deref())
}

/// Load one config file. An empty file is an empty layer.
pub fn load_at(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn complete() -> ConfigFile {
        ConfigFile {
            public_key: Some("pub".into()),
            secret_key: Some("sec".into()),
            project_id: Some("123".into()),
            ..ConfigFile::default()
        }
    }

    #[test]
    fn overlay_prefers_upper_layer() {
        let base = complete();
        let over = ConfigFile {
            project_id: Some("999".into()),
            skip_if_in_translation: Some(false),
            ..ConfigFile::default()
        };
        let merged = base.overlay(over);
        assert_eq!(merged.public_key.as_deref(), Some("pub"));
        assert_eq!(merged.project_id.as_deref(), Some("999"));
        assert_eq!(merged.skip_if_in_translation, Some(false));
    }

    #[test]
    fn missing_keys_are_rejected_in_order() {
        let cwd = TempDir::new().unwrap();
        let err = ConfigFile::default().validate_at(cwd.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPublicKey));

        let err = ConfigFile {
            secret_key: Some("   ".into()),
            ..complete()
        }
        .validate_at(cwd.path())
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecretKey));
    }

    #[test]
    fn defaults_metadata_root_and_skip_flag() {
        let cwd = TempDir::new().unwrap();
        let config = complete().validate_at(cwd.path()).unwrap();
        assert_eq!(config.metadata_root, cwd.path().join("metadata"));
        assert!(config.skip_if_in_translation);

        std::fs::create_dir(cwd.path().join("fastlane")).unwrap();
        let config = complete().validate_at(cwd.path()).unwrap();
        assert_eq!(
            config.metadata_root,
            cwd.path().join("fastlane").join("metadata")
        );
    }

    #[test]
    fn explicit_metadata_path_must_exist() {
        let cwd = TempDir::new().unwrap();
        let err = ConfigFile {
            metadata_path: Some(PathBuf::from("nope")),
            ..complete()
        }
        .validate_at(cwd.path())
        .unwrap_err();
        assert!(err.to_string().contains("couldn't find metadata directory"));
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = Credentials {
            public_key: "pub".into(),
            secret_key: "hunter2".into(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
