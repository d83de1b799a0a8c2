//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.messenger/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MessengerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Identifier the app sends as `from`, and uses to tell sent from received.
    pub actor: Option<String>,
    /// Conversation partner to open when none is given on the command line.
    pub default_username: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub offline: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ACTOR: &str = "me";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub actor: String,
    pub username: String,
    pub endpoint: String,
    /// `None` when configured as 0 (wait forever).
    pub request_timeout: Option<Duration>,
    pub offline: bool,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub username: Option<&'a str>,
    pub endpoint: Option<&'a str>,
    pub actor: Option<&'a str>,
    pub offline: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No conversation partner on the command line, in env, or in the file.
    MissingUsername,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingUsername => write!(
                f,
                "no conversation partner given (pass USERNAME, set MESSENGER_USERNAME, \
                 or general.default_username in the config file)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.messenger/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".messenger").join("config.toml"))
}

/// Load config from `~/.messenger/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MessengerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MessengerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MessengerConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MessengerConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MessengerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Messenger Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# actor = "me"                        # Or set MESSENGER_ACTOR
# default_username = "alice"          # Or set MESSENGER_USERNAME

# [api]
# endpoint = "http://localhost:4000/graphql"   # Or set MESSENGER_ENDPOINT
# request_timeout_secs = 30           # 0 waits forever
# offline = false                     # In-memory backend, no server needed
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &MessengerConfig,
    cli: &CliOverrides<'_>,
) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with `env` standing in for the process environment.
pub fn resolve_with_env(
    config: &MessengerConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Username: CLI → env → config, no default
    let username = cli
        .username
        .map(|s| s.to_string())
        .or_else(|| env("MESSENGER_USERNAME"))
        .or_else(|| config.general.default_username.clone())
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::MissingUsername)?;

    // Actor: CLI → env → config → default
    let actor = cli
        .actor
        .map(|s| s.to_string())
        .or_else(|| env("MESSENGER_ACTOR"))
        .or_else(|| config.general.actor.clone())
        .unwrap_or_else(|| DEFAULT_ACTOR.to_string());

    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .map(|s| s.to_string())
        .or_else(|| env("MESSENGER_ENDPOINT"))
        .or_else(|| config.api.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let timeout_secs = config
        .api
        .request_timeout_secs
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    Ok(ResolvedConfig {
        actor,
        username,
        endpoint,
        request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        offline: cli.offline || config.api.offline.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn resolve_clean(
        config: &MessengerConfig,
        cli: &CliOverrides<'_>,
    ) -> Result<ResolvedConfig, ConfigError> {
        resolve_with_env(config, cli, no_env)
    }

    fn cli_with_user(username: &str) -> CliOverrides<'_> {
        CliOverrides {
            username: Some(username),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = MessengerConfig::default();
        let resolved = resolve_clean(&config, &cli_with_user("alice")).unwrap();
        assert_eq!(resolved.username, "alice");
        assert_eq!(
            resolved.request_timeout,
            Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        );
        assert!(!resolved.offline);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MessengerConfig {
            general: GeneralConfig {
                actor: Some("you".to_string()),
                default_username: Some("bob".to_string()),
            },
            api: ApiConfig {
                endpoint: Some("http://example.test/graphql".to_string()),
                request_timeout_secs: Some(0),
                offline: Some(true),
            },
        };
        let resolved = resolve_clean(&config, &CliOverrides::default()).unwrap();
        assert_eq!(resolved.actor, "you");
        assert_eq!(resolved.username, "bob");
        assert_eq!(resolved.endpoint, "http://example.test/graphql");
        assert_eq!(resolved.request_timeout, None);
        assert!(resolved.offline);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = MessengerConfig {
            general: GeneralConfig {
                actor: Some("you".to_string()),
                default_username: Some("bob".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            username: Some("carol"),
            actor: Some("admin"),
            endpoint: Some("http://cli.test"),
            offline: true,
        };
        let resolved = resolve_clean(&config, &cli).unwrap();
        assert_eq!(resolved.username, "carol");
        assert_eq!(resolved.actor, "admin");
        assert_eq!(resolved.endpoint, "http://cli.test");
        assert!(resolved.offline);
    }

    #[test]
    fn test_env_sits_between_config_and_cli() {
        let config = MessengerConfig {
            general: GeneralConfig {
                actor: Some("file-actor".to_string()),
                default_username: Some("bob".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "MESSENGER_ACTOR" => Some("env-actor".to_string()),
            "MESSENGER_USERNAME" => Some("dave".to_string()),
            "MESSENGER_ENDPOINT" => Some("http://env.test/graphql".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env).unwrap();
        assert_eq!(resolved.actor, "env-actor");
        assert_eq!(resolved.username, "dave");
        assert_eq!(resolved.endpoint, "http://env.test/graphql");

        let resolved = resolve_with_env(&config, &cli_with_user("carol"), env).unwrap();
        assert_eq!(resolved.username, "carol");
    }

    #[test]
    fn test_missing_username_everywhere_is_an_error() {
        let result = resolve_clean(&MessengerConfig::default(), &CliOverrides::default());
        assert!(matches!(result, Err(ConfigError::MissingUsername)));
    }

    #[test]
    fn test_blank_username_is_rejected() {
        let config = MessengerConfig::default();
        let result = resolve_clean(&config, &cli_with_user("  "));
        assert!(matches!(result, Err(ConfigError::MissingUsername)));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[api]
endpoint = "http://localhost:9000/graphql"
"#;
        let config: MessengerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api.endpoint.as_deref(),
            Some("http://localhost:9000/graphql")
        );
        assert!(config.general.actor.is_none());
        assert!(config.api.offline.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
actor = "me"
default_username = "alice"

[api]
request_timeout_secs = 5
offline = true
"#;
        let config: MessengerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_username.as_deref(), Some("alice"));
        assert_eq!(config.api.request_timeout_secs, Some(5));
        assert_eq!(config.api.offline, Some(true));
    }
}
