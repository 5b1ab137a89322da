//! Configuration file loading and resolution.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use mockdesk_core::BaseUrl;
use mockdesk_core::list::{IdAssignment, ListConfig};
use mockdesk_http::{DEFAULT_API_URL, DEFAULT_AUTH_URL};

/// Errors that can occur while loading or resolving configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Invalid TOML in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// TOML configuration file structure.
///
/// Every field is optional; missing fields keep their defaults.
///
/// ```toml
/// api_url = "https://jsonplaceholder.typicode.com"
/// auth_url = "https://dummyjson.com"
/// persist_auth = true
/// credential_limit = 10
///
/// [users]
/// limit = 3
/// page_size = 5
/// search_field = "name"
/// id_assignment = "client-sequential"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub persist_auth: Option<bool>,
    #[serde(default)]
    pub credential_limit: Option<u32>,
    #[serde(default)]
    pub posts: Option<CollectionSection>,
    #[serde(default)]
    pub users: Option<CollectionSection>,
}

/// `[posts]` / `[users]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CollectionSection {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub search_field: Option<String>,
    #[serde(default)]
    pub id_assignment: Option<IdAssignment>,
}

impl CollectionSection {
    fn apply(&self, section: &str, mut config: ListConfig) -> Result<ListConfig, ConfigError> {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("{}.limit", section),
                    reason: "must be at least 1".to_string(),
                });
            }
            config = config.with_limit(Some(limit));
        }
        if let Some(page_size) = self.page_size {
            if page_size == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("{}.page_size", section),
                    reason: "must be at least 1".to_string(),
                });
            }
            config = config.with_page_size(page_size);
        }
        if let Some(field) = &self.search_field {
            config = config.with_search_field(field.clone());
        }
        if let Some(policy) = self.id_assignment {
            config = config.with_id_assignment(policy);
        }
        Ok(config)
    }
}

/// Values given on the command line or through the environment. They win
/// over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub auth_url: Option<String>,
}

/// Resolved configuration after applying defaults, file and overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: BaseUrl,
    pub auth_url: BaseUrl,
    pub persist_auth: bool,
    pub credential_limit: u32,
    pub posts: ListConfig,
    pub users: ListConfig,
}

impl Settings {
    /// Merge `file` and `overrides` over the defaults.
    pub fn resolve(file: Option<ConfigFile>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let api_url = overrides
            .api_url
            .as_deref()
            .or(file.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL);
        let auth_url = overrides
            .auth_url
            .as_deref()
            .or(file.auth_url.as_deref())
            .unwrap_or(DEFAULT_AUTH_URL);

        let credential_limit = file.credential_limit.unwrap_or(10);
        if credential_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "credential_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let api_url = parse_url("api_url", api_url)?;
        // The offline backend numbers records over the whole file, which
        // the limited snapshot cannot see.
        let id_assignment = if api_url.is_local() {
            IdAssignment::ServerAssigned
        } else {
            IdAssignment::ClientSequential
        };

        Ok(Self {
            api_url,
            auth_url: parse_url("auth_url", auth_url)?,
            persist_auth: file.persist_auth.unwrap_or(true),
            credential_limit,
            posts: file.posts.unwrap_or_default().apply(
                "posts",
                ListConfig::posts().with_id_assignment(id_assignment),
            )?,
            users: file.users.unwrap_or_default().apply(
                "users",
                ListConfig::users().with_id_assignment(id_assignment),
            )?,
        })
    }

    /// Whether the credential API is the public demo one.
    pub fn uses_demo_auth(&self) -> bool {
        self.auth_url.as_str().trim_end_matches('/') == DEFAULT_AUTH_URL
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<BaseUrl, ConfigError> {
    BaseUrl::new(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        reason: e.to_string(),
    })
}

/// Platform config file location, e.g. `~/.config/mockdesk/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mockdesk").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the config file.
///
/// An explicit `path` must exist. Without one the platform location is
/// tried and a missing file means defaults.
pub fn load(path: Option<&Path>) -> Result<Option<ConfigFile>, ConfigError> {
    match path {
        Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => load_config_file(path).map(Some),
        None => match default_config_path() {
            Some(path) if path.exists() => load_config_file(&path).map(Some),
            _ => Ok(None),
        },
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(toml: &str) -> ConfigFile {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn defaults_without_file() {
        let settings = Settings::resolve(None, &Overrides::default()).unwrap();
        assert_eq!(
            settings.api_url.as_str().trim_end_matches('/'),
            DEFAULT_API_URL
        );
        assert!(settings.uses_demo_auth());
        assert!(settings.persist_auth);
        assert_eq!(settings.credential_limit, 10);
        assert_eq!(settings.posts.list_params.limit, Some(55));
        assert_eq!(settings.users.list_params.limit, Some(3));
    }

    #[test]
    fn sections_adjust_list_configs() {
        let file = parse(
            r#"
            persist_auth = false

            [posts]
            page_size = 10
            search_field = "body"

            [users]
            limit = 10
            id_assignment = "server-assigned"
            "#,
        );
        let settings = Settings::resolve(Some(file), &Overrides::default()).unwrap();

        assert!(!settings.persist_auth);
        assert_eq!(settings.posts.page_size, 10);
        assert_eq!(settings.posts.search_field, "body");
        assert_eq!(settings.users.list_params.limit, Some(10));
        assert_eq!(settings.users.id_assignment, IdAssignment::ServerAssigned);
    }

    #[test]
    fn overrides_win_over_file() {
        let file = parse(r#"api_url = "https://example.com""#);
        let overrides = Overrides {
            api_url: Some("http://127.0.0.1:3000".to_string()),
            auth_url: None,
        };
        let settings = Settings::resolve(Some(file), &overrides).unwrap();
        assert_eq!(settings.api_url.host(), Some("127.0.0.1"));
    }

    #[test]
    fn local_api_keeps_server_ids() {
        let overrides = Overrides {
            api_url: Some("file:///tmp/mockdesk-api/".to_string()),
            auth_url: None,
        };
        let settings = Settings::resolve(None, &overrides).unwrap();
        assert_eq!(settings.users.id_assignment, IdAssignment::ServerAssigned);
        assert_eq!(settings.posts.id_assignment, IdAssignment::ServerAssigned);

        let remote = Settings::resolve(None, &Overrides::default()).unwrap();
        assert_eq!(remote.users.id_assignment, IdAssignment::ClientSequential);

        // An explicit section still wins.
        let file = parse("[users]\nid_assignment = \"client-sequential\"");
        let settings = Settings::resolve(Some(file), &overrides).unwrap();
        assert_eq!(settings.users.id_assignment, IdAssignment::ClientSequential);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let file = parse("[users]\npage_size = 0");
        let err = Settings::resolve(Some(file), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "users.page_size"));
    }

    #[test]
    fn insecure_remote_url_is_rejected() {
        let file = parse(r#"auth_url = "http://example.com""#);
        let err = Settings::resolve(Some(file), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { field: "auth_url", .. }));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "colour = \"blue\"").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(load(Some(&path)), Err(ConfigError::NotFound(path)));
    }
}
