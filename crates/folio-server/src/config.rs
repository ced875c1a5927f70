//! Configuration loading and management

use anyhow::{Context, Result};
use folio_mail::SmtpConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Placeholder secret shipped in the defaults
pub const PLACEHOLDER_JWT_SECRET: &str = "change-me-in-production";

/// Prefix for environment overrides, e.g. `FOLIO_AUTH__JWT_SECRET`
const ENV_PREFIX: &str = "FOLIO";

const REDACTED: &str = "********";

/// Longest accepted login token lifetime (one year)
const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path; the parent directory is created on startup
    #[serde(default = "default_db_path")]
    pub path: String,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Administrator created on first start
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
    /// Lifetime of tokens issued at login
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

impl AuthConfig {
    /// Configured administrator credentials, if both are set and non-empty
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some((email.trim(), password))
            }
            _ => None,
        }
    }
}

/// Outbound mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Sender address; defaults to `username`
    #[serde(default)]
    pub from: Option<String>,
    /// Recipient address; defaults to the sender
    #[serde(default)]
    pub to: Option<String>,
}

impl MailConfig {
    pub fn smtp_config(&self) -> SmtpConfig {
        SmtpConfig {
            server: self.smtp_server.clone(),
            port: self.smtp_port,
            username: self.username.clone(),
            password: self.password.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            admin_email: None,
            admin_password: None,
            token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: None,
            to: None,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_db_path() -> String {
    "./data/folio.db".to_string()
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_token_ttl_minutes() -> i64 {
    folio_auth::LOGIN_TOKEN_TTL_MINUTES
}

fn default_smtp_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration
    ///
    /// Layers, lowest precedence first: built-in defaults, the TOML file at
    /// `path` (optional), then `FOLIO_*` environment variables with `__`
    /// between section and key.
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &str, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Toml).required(false))
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse configuration from {}", path))
    }

    /// Check the configuration before anything is started
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            anyhow::bail!("auth.jwt_secret must not be empty");
        }
        if self.auth.jwt_secret == PLACEHOLDER_JWT_SECRET {
            warn!("auth.jwt_secret is the built-in placeholder; set a real secret in production");
        }
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.auth.token_ttl_minutes) {
            anyhow::bail!(
                "auth.token_ttl_minutes must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_MINUTES,
                self.auth.token_ttl_minutes
            );
        }
        if self.mail.enabled && (self.mail.smtp_server.is_empty() || self.mail.username.is_empty())
        {
            anyhow::bail!("mail.smtp_server and mail.username are required when mail is enabled");
        }
        Ok(())
    }

    /// Copy of the configuration with secrets masked
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.auth.jwt_secret = REDACTED.to_string();
        if config.auth.admin_password.is_some() {
            config.auth.admin_password = Some(REDACTED.to_string());
        }
        if !config.mail.password.is_empty() {
            config.mail.password = REDACTED.to_string();
        }
        config
    }

    /// Render the redacted configuration as TOML
    pub fn to_redacted_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.redacted()).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_with_env("/nonexistent/folio.toml", no_env()).unwrap();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.database.path, "./data/folio.db");
        assert_eq!(config.auth.token_ttl_minutes, 30);
        assert_eq!(config.auth.jwt_secret, PLACEHOLDER_JWT_SECRET);
        assert!(!config.mail.enabled);
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
[server]
port = 9000

[auth]
jwt_secret = "s3cret"
admin_email = "admin@example.com"
admin_password = "pw"

[logging]
format = "json"
"#,
        );
        let config = Config::load_with_env(file.path().to_str().unwrap(), no_env()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(
            config.auth.admin_credentials(),
            Some(("admin@example.com", "pw"))
        );
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("[auth]\njwt_secret = \"from-file\"\n");
        let env = config::Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([
            ("FOLIO_AUTH__JWT_SECRET".to_string(), "from-env".to_string()),
            ("FOLIO_SERVER__PORT".to_string(), "8100".to_string()),
        ])));
        let config = Config::load_with_env(file.path().to_str().unwrap(), env).unwrap();
        assert_eq!(config.auth.jwt_secret, "from-env");
        assert_eq!(config.server.port, 8100);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.auth.jwt_secret = String::new();
        assert!(config.validate().is_err());

        config.auth.jwt_secret = "s3cret".to_string();
        config.auth.token_ttl_minutes = 0;
        assert!(config.validate().is_err());

        config.auth.token_ttl_minutes = 140_000_000_000;
        assert!(config.validate().is_err());

        config.auth.token_ttl_minutes = MAX_TOKEN_TTL_MINUTES;
        assert!(config.validate().is_ok());

        config.auth.token_ttl_minutes = 30;
        config.mail.enabled = true;
        assert!(config.validate().is_err());
        config.mail.username = "owner@example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_admin_credentials_require_both() {
        let mut auth = AuthConfig::default();
        assert!(auth.admin_credentials().is_none());
        auth.admin_email = Some("admin@example.com".to_string());
        assert!(auth.admin_credentials().is_none());
        auth.admin_password = Some(String::new());
        assert!(auth.admin_credentials().is_none());
    }

    #[test]
    fn test_redacted_toml_hides_secrets() {
        let mut config = Config::default();
        config.auth.jwt_secret = "s3cret".to_string();
        config.auth.admin_password = Some("hunter2".to_string());
        config.mail.password = "app-password".to_string();

        let rendered = config.to_redacted_toml().unwrap();
        assert!(!rendered.contains("s3cret"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("app-password"));
        assert!(rendered.contains("port = 8001"));
    }
}
