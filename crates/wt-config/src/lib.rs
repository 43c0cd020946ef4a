//! Configuration management for wikitool.
//!
//! Models the two configuration layers of the tool runtime: deployment-wide
//! defaults ([`ToolConfig`]) and optional per-user overrides
//! ([`UserOverrides`]), merged into effective [`Credentials`] by
//! [`resolve_credentials`].
//!
//! Defaults can be parsed from a `wikitool.toml` file with serde, with
//! auto-discovery in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `base_url`, `username`, `api_key`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wikitool.toml";

/// Validation message when credentials cannot be resolved.
///
/// Matches the text surfaced to end users by the tool entry points.
pub const MISSING_CREDENTIALS: &str =
    "Please provide a username and API key or personal access token.";

/// Image stripping policy applied to normalized page bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ImageStripPolicy {
    /// Keep all image references.
    #[serde(rename = "none")]
    None,
    /// Strip only images with an embedded `data:` URI source.
    #[default]
    #[serde(rename = "base64")]
    Embedded,
    /// Strip every image reference.
    #[serde(rename = "all")]
    All,
}

/// Deployment-wide tool defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Base URL of the Confluence instance.
    pub base_url: String,
    /// Default username (typically an email address).
    pub username: String,
    /// Default API key or personal access token.
    pub api_key: String,
    /// Whether to verify TLS certificates.
    pub ssl_verify: bool,
    /// Image stripping policy for page bodies.
    pub strip_images: ImageStripPolicy,
    /// Maximum number of search results per query.
    pub result_limit: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            base_url: "https://example.atlassian.net/wiki".to_owned(),
            username: "example@example.com".to_owned(),
            api_key: "ABCD1234".to_owned(),
            ssl_verify: true,
            strip_images: ImageStripPolicy::Embedded,
            result_limit: 5,
        }
    }
}

impl ToolConfig {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `wikitool.toml` in the current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, parsing
    /// fails, or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Expand environment variable references in string fields.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.base_url = expand::expand_env(&self.base_url, "base_url")?;
        self.username = expand::expand_env(&self.username, "username")?;
        self.api_key = expand::expand_env(&self.api_key, "api_key")?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `base_url` is not an HTTP(S) URL
    /// or `result_limit` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".to_owned(),
            ));
        }
        if self.result_limit == 0 {
            return Err(ConfigError::Validation(
                "result_limit must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Per-user overrides for authentication.
///
/// Empty string fields mean "inherit the deployment default".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserOverrides {
    /// Use API key (Basic) authentication; disable to use a personal
    /// access token (Bearer) instead.
    pub api_key_auth: bool,
    /// Username; empty to inherit the default.
    pub username: String,
    /// API key or personal access token; empty to inherit the default.
    pub api_key: String,
}

impl Default for UserOverrides {
    fn default() -> Self {
        Self {
            api_key_auth: true,
            username: String::new(),
            api_key: String::new(),
        }
    }
}

/// Effective credentials after merging defaults and overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic authentication with username and API key.
    Basic {
        /// Account username.
        username: String,
        /// API key.
        secret: String,
    },
    /// Bearer authentication with a personal access token.
    Bearer {
        /// Personal access token.
        secret: String,
    },
}

/// Merge defaults and per-user overrides into effective [`Credentials`].
///
/// The auth mode comes from the overrides when present, otherwise Basic.
/// Empty override fields inherit the corresponding default.
///
/// # Errors
///
/// Returns `ConfigError::Validation` when the resolved secret is empty, or
/// when the mode is Basic and the resolved username is empty.
pub fn resolve_credentials(
    defaults: &ToolConfig,
    overrides: Option<&UserOverrides>,
) -> Result<Credentials, ConfigError> {
    let (basic, username, secret) = match overrides {
        Some(user) => (
            user.api_key_auth,
            if user.username.is_empty() {
                defaults.username.clone()
            } else {
                user.username.clone()
            },
            if user.api_key.is_empty() {
                defaults.api_key.clone()
            } else {
                user.api_key.clone()
            },
        ),
        None => (
            true,
            defaults.username.clone(),
            defaults.api_key.clone(),
        ),
    };

    if secret.is_empty() || (basic && username.is_empty()) {
        return Err(ConfigError::Validation(MISSING_CREDENTIALS.to_owned()));
    }

    if basic {
        Ok(Credentials::Basic { username, secret })
    } else {
        Ok(Credentials::Bearer { secret })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("{0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. `"api_key"`).
        field: String,
        /// Error message (e.g. "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ToolConfig::default();
        assert_eq!(config.base_url, "https://example.atlassian.net/wiki");
        assert_eq!(config.username, "example@example.com");
        assert_eq!(config.api_key, "ABCD1234");
        assert!(config.ssl_verify);
        assert_eq!(config.strip_images, ImageStripPolicy::Embedded);
        assert_eq!(config.result_limit, 5);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: ToolConfig = toml::from_str("").unwrap();
        assert_eq!(config.result_limit, 5);
        assert!(config.ssl_verify);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
base_url = "https://wiki.internal.example.com"
username = "svc-bot@example.com"
api_key = "token123"
ssl_verify = false
strip_images = "all"
result_limit = 10
"#;
        let config: ToolConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "https://wiki.internal.example.com");
        assert_eq!(config.username, "svc-bot@example.com");
        assert_eq!(config.api_key, "token123");
        assert!(!config.ssl_verify);
        assert_eq!(config.strip_images, ImageStripPolicy::All);
        assert_eq!(config.result_limit, 10);
    }

    #[test]
    fn test_strip_policy_names() {
        let config: ToolConfig = toml::from_str("strip_images = \"none\"").unwrap();
        assert_eq!(config.strip_images, ImageStripPolicy::None);
        let config: ToolConfig = toml::from_str("strip_images = \"base64\"").unwrap();
        assert_eq!(config.strip_images, ImageStripPolicy::Embedded);
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = ToolConfig {
            base_url: "wiki.example.com".to_owned(),
            ..ToolConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let config = ToolConfig {
            result_limit: 0,
            ..ToolConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_without_overrides_defaults_to_basic() {
        let defaults = ToolConfig::default();
        let creds = resolve_credentials(&defaults, None).unwrap();
        assert_eq!(
            creds,
            Credentials::Basic {
                username: "example@example.com".to_owned(),
                secret: "ABCD1234".to_owned(),
            }
        );
    }

    #[test]
    fn test_resolve_empty_override_fields_inherit_defaults() {
        let defaults = ToolConfig::default();
        let overrides = UserOverrides::default();
        let creds = resolve_credentials(&defaults, Some(&overrides)).unwrap();
        assert_eq!(
            creds,
            Credentials::Basic {
                username: "example@example.com".to_owned(),
                secret: "ABCD1234".to_owned(),
            }
        );
    }

    #[test]
    fn test_resolve_non_empty_overrides_win() {
        let defaults = ToolConfig::default();
        let overrides = UserOverrides {
            username: "me@example.com".to_owned(),
            api_key: "XYZ".to_owned(),
            ..UserOverrides::default()
        };
        let creds = resolve_credentials(&defaults, Some(&overrides)).unwrap();
        assert_eq!(
            creds,
            Credentials::Basic {
                username: "me@example.com".to_owned(),
                secret: "XYZ".to_owned(),
            }
        );
    }

    #[test]
    fn test_resolve_bearer_ignores_username() {
        let defaults = ToolConfig {
            username: String::new(),
            ..ToolConfig::default()
        };
        let overrides = UserOverrides {
            api_key_auth: false,
            ..UserOverrides::default()
        };
        let creds = resolve_credentials(&defaults, Some(&overrides)).unwrap();
        assert_eq!(
            creds,
            Credentials::Bearer {
                secret: "ABCD1234".to_owned(),
            }
        );
    }

    #[test]
    fn test_resolve_missing_username_for_basic_fails() {
        let defaults = ToolConfig {
            username: String::new(),
            ..ToolConfig::default()
        };
        let err = resolve_credentials(&defaults, None).unwrap_err();
        assert_eq!(err.to_string(), MISSING_CREDENTIALS);
    }

    #[test]
    fn test_resolve_missing_secret_fails() {
        let defaults = ToolConfig {
            api_key: String::new(),
            ..ToolConfig::default()
        };
        let overrides = UserOverrides {
            api_key_auth: false,
            ..UserOverrides::default()
        };
        assert!(resolve_credentials(&defaults, Some(&overrides)).is_err());
    }
}
