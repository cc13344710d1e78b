use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub email: EmailSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    /// Keep everything in process memory instead of PostgreSQL
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_rematch_limit")]
    pub rematch_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            rematch_limit: default_rematch_limit(),
        }
    }
}

fn default_rematch_limit() -> usize { 3 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_keyword_weight")]
    pub keyword: f64,
    #[serde(default = "default_experience_weight")]
    pub experience_per_char: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword_weight(),
            experience_per_char: default_experience_weight(),
        }
    }
}

fn default_keyword_weight() -> f64 { 10.0 }
fn default_experience_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: Option<String>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from_address: None,
        }
    }
}

fn default_smtp_host() -> String { "smtp.gmail.com".to_string() }
fn default_smtp_port() -> u16 { 465 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CREATIVEPLAY_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CREATIVEPLAY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CREATIVEPLAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CREATIVEPLAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables on top of the layered config
///
/// `DATABASE_URL` wins over `database.url`; `EMAIL_USER` and `EMAIL_PASSWORD`
/// fill in the SMTP credentials.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(user) = env::var("EMAIL_USER") {
        builder = builder.set_override("email.username", user)?;
    }
    if let Ok(password) = env::var("EMAIL_PASSWORD") {
        builder = builder.set_override("email.password", password)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.keyword, 10.0);
        assert_eq!(weights.experience_per_char, 0.2);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_default_email_targets_implicit_tls() {
        let email = EmailSettings::default();
        assert!(!email.enabled);
        assert_eq!(email.smtp_port, 465);
    }

    #[test]
    fn test_load_from_minimal_file() {
        let path = std::env::temp_dir().join("creativeplay-settings-test.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\nport = 8080\n\n[database]\nurl = \"postgres://localhost/test\"\nin_memory = true\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert!(settings.database.in_memory);
        assert_eq!(settings.matching.rematch_limit, 3);
        assert_eq!(settings.scoring.weights.keyword, 10.0);

        std::fs::remove_file(&path).ok();
    }
}
