mod actionbook;
mod observability;

pub use actionbook::*;
pub use observability::*;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub actionbook: ActionbookConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Environment variable overriding `actionbook.base_url`.
pub const ENV_BASE_URL: &str = "ACTIONBOOK_API_BASE_URL";
/// Environment variable overriding `actionbook.access_mode` (`api_key` | `public`).
pub const ENV_ACCESS_MODE: &str = "ACTIONBOOK_ACCESS_MODE";

impl Config {
    /// Parse a TOML document.  Missing sections and fields take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML file, apply environment overrides, and reject configs
    /// with error-level issues.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut cfg = Self::from_toml_str(&raw)?;
        cfg.apply_env_overrides(|name| std::env::var(name).ok());

        let issues = cfg.validate();
        for issue in issues.iter().filter(|i| i.severity == ConfigSeverity::Warning) {
            tracing::warn!(path = %path.display(), "{issue}");
        }
        if let Some(err) = issues
            .iter()
            .find(|i| i.severity == ConfigSeverity::Error)
        {
            return Err(Error::Config(err.to_string()));
        }
        Ok(cfg)
    }

    /// Apply overrides from an environment lookup.  Blank values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.actionbook.base_url = url.trim().trim_end_matches('/').to_owned();
        }
        if let Some(mode) = lookup(ENV_ACCESS_MODE) {
            match mode.trim() {
                "public" => self.actionbook.access_mode = AccessMode::Public,
                "api_key" => self.actionbook.access_mode = AccessMode::ApiKey,
                "" => {}
                other => tracing::warn!(
                    value = %other,
                    "ignoring unknown {ENV_ACCESS_MODE}; expected 'api_key' or 'public'"
                ),
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let ab = &self.actionbook;

        if !(ab.base_url.starts_with("http://") || ab.base_url.starts_with("https://")) {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "actionbook.base_url".into(),
                message: "base_url must start with http:// or https://".into(),
            });
        } else if ab.base_url.starts_with("http://") {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "actionbook.base_url".into(),
                message: "plain http sends the API key unencrypted".into(),
            });
        }

        for (field, path) in [
            ("actionbook.search_path", &ab.search_path),
            ("actionbook.lookup_path", &ab.lookup_path),
        ] {
            if !path.starts_with('/') {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: field.into(),
                    message: "path must start with '/'".into(),
                });
            }
        }

        if ab.api_key_header.trim().is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "actionbook.api_key_header".into(),
                message: "api_key_header must not be empty".into(),
            });
        }

        if ab.tool_timeout_secs == 0 || ab.credential_timeout_secs == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "actionbook.*_timeout_secs".into(),
                message: "timeouts must be greater than 0".into(),
            });
        }

        if ab.max_limit == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "actionbook.max_limit".into(),
                message: "max_limit must be greater than 0".into(),
            });
        } else if ab.default_limit == 0 || ab.default_limit > ab.max_limit {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "actionbook.default_limit".into(),
                message: format!("default_limit must lie in [1, {}]", ab.max_limit),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://staging.actionbook.dev/"),
            (ENV_ACCESS_MODE, "public"),
        ]
        .into_iter()
        .collect();

        let mut cfg = Config::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.actionbook.base_url, "https://staging.actionbook.dev");
        assert_eq!(cfg.actionbook.access_mode, AccessMode::Public);
    }

    #[test]
    fn blank_and_unknown_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.apply_env_overrides(|k| match k {
            ENV_BASE_URL => Some("   ".into()),
            ENV_ACCESS_MODE => Some("open-to-all".into()),
            _ => None,
        });
        assert_eq!(cfg.actionbook.base_url, "https://api.actionbook.dev");
        assert_eq!(cfg.actionbook.access_mode, AccessMode::ApiKey);
    }

    #[test]
    fn bad_base_url_is_an_error() {
        let mut cfg = Config::default();
        cfg.actionbook.base_url = "api.actionbook.dev".into();
        let issues = cfg.validate();
        assert!(issues
            .iter()
            .any(|i| i.severity == ConfigSeverity::Error && i.field == "actionbook.base_url"));
    }

    #[test]
    fn plain_http_is_a_warning() {
        let mut cfg = Config::default();
        cfg.actionbook.base_url = "http://127.0.0.1:8080".into();
        let issues = cfg.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ConfigSeverity::Warning);
    }

    #[test]
    fn default_limit_above_max_is_an_error() {
        let mut cfg = Config::default();
        cfg.actionbook.default_limit = 60;
        assert!(cfg
            .validate()
            .iter()
            .any(|i| i.field == "actionbook.default_limit"));
    }

    #[test]
    fn load_reads_file_and_rejects_errors() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[actionbook]\ntool_timeout_secs = 15\n").unwrap();
        let cfg = Config::load(&good).unwrap();
        assert_eq!(cfg.actionbook.tool_timeout_secs, 15);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[actionbook]\nsearch_path = \"api/search\"\n").unwrap();
        let err = Config::load(&bad).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn load_maps_io_and_parse_failures() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[actionbook\n").unwrap();
        let err = Config::load(&broken).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
