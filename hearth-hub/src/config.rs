//! Configuration loading for hearth-hub.
//!
//! Configuration is loaded from a TOML file (default: `hearth.toml`, missing
//! file means defaults), then overridden by the environment variables
//! `ADMIN_KEY`, `TELEGRAM_BOT_TOKEN`, and `TELEGRAM_CHAT_ID`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The demo admin key used when nothing else is configured.
///
/// Startup warns while this is still in use; set `ADMIN_KEY` to replace it.
pub const DEFAULT_ADMIN_KEY: &str = "admin123";

/// Root configuration for hearth-hub.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Admin authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Outbound notifier configuration.
    #[serde(default)]
    pub notifier: NotifierConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP server (default: 0.0.0.0:8080).
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Admin authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared admin key required for writes and the notifier endpoint.
    #[serde(default = "default_admin_key")]
    pub admin_key: String,
}

/// Outbound notifier configuration.
///
/// The relay runs in live mode only when both `bot_token` and `chat_id` are
/// present; otherwise every send is simulated.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN` overrides).
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Destination chat identifier (`TELEGRAM_CHAT_ID` overrides).
    #[serde(default)]
    pub chat_id: Option<String>,
    /// Base URL of the messaging API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Outbound request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl NotifierConfig {
    /// Whether both credentials are present (live mode).
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    /// The outbound request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_admin_key() -> String {
    DEFAULT_ADMIN_KEY.to_string()
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_key: default_admin_key(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. With no path, `hearth.toml` is
    /// used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new("hearth.toml");
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Apply environment-style overrides through an injected lookup.
    ///
    /// Set, non-empty values of `ADMIN_KEY`, `TELEGRAM_BOT_TOKEN`, and
    /// `TELEGRAM_CHAT_ID` replace the file values. The lookup is injected so
    /// tests never touch the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("ADMIN_KEY").filter(|v| !v.is_empty()) {
            self.auth.admin_key = key;
        }
        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN").filter(|v| !v.is_empty()) {
            self.notifier.bot_token = Some(token);
        }
        if let Some(chat_id) = lookup("TELEGRAM_CHAT_ID").filter(|v| !v.is_empty()) {
            self.notifier.chat_id = Some(chat_id);
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.auth.admin_key, DEFAULT_ADMIN_KEY);
        assert!(!config.notifier.is_configured());
        assert_eq!(config.notifier.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
[server]
bind_address = "127.0.0.1:9000"

[auth]
admin_key = "hunter2"

[notifier]
bot_token = "123:abc"
chat_id = "-1000"
timeout_secs = 3
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.auth.admin_key, "hunter2");
        assert!(config.notifier.is_configured());
        assert_eq!(config.notifier.timeout_secs, 3);
        assert_eq!(config.notifier.api_base, "https://api.telegram.org");
    }

    #[test]
    fn config_missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.auth.admin_key, DEFAULT_ADMIN_KEY);
        assert!(config.notifier.bot_token.is_none());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        config.apply_overrides(|name| match name {
            "ADMIN_KEY" => Some("secret".to_string()),
            "TELEGRAM_BOT_TOKEN" => Some("tok".to_string()),
            "TELEGRAM_CHAT_ID" => Some("42".to_string()),
            _ => None,
        });

        assert_eq!(config.auth.admin_key, "secret");
        assert_eq!(config.notifier.bot_token.as_deref(), Some("tok"));
        assert_eq!(config.notifier.chat_id.as_deref(), Some("42"));
        assert!(config.notifier.is_configured());
    }

    #[test]
    fn empty_override_values_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| match name {
            "ADMIN_KEY" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.auth.admin_key, DEFAULT_ADMIN_KEY);
    }

    #[test]
    fn from_file_reads_and_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[auth]\nadmin_key = \"from-file\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.auth.admin_key, "from-file");
    }

    #[test]
    fn from_file_missing_is_an_error() {
        let err = Config::from_file(Path::new("/nonexistent/hearth.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn from_file_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
