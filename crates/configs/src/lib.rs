//! # configs
//!
//! Environment-driven configuration for the Pinwall binaries. A `.env` file
//! is honored in development; real deployments set plain environment
//! variables.

use config::{Config, ConfigError, Environment};
use secrecy::SecretString;
use serde::Deserialize;

/// Which note-store backend the process opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotesBackend {
    Sqlite,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port (`PORT`).
    pub port: u16,
    /// Shared admin secret (`ADMIN_PASSWORD`). Required; never logged.
    pub admin_password: SecretString,
    /// Note-store backend (`NOTES_BACKEND`): `sqlite` or `file`.
    pub notes_backend: NotesBackend,
    /// SQLite database file (`DATABASE_PATH`).
    pub database_path: String,
    /// Flat-file store path (`NOTES_FILE`).
    pub notes_file: String,
    /// Counter-store connection (`REDIS_URL`). When unset, counters live in
    /// process memory and only hold per instance.
    pub redis_url: Option<String>,

    pub rate_limit_per_minute: u64,
    pub rate_limit_minute_window_secs: u64,
    pub rate_limit_per_day: u64,
    pub rate_limit_day_window_secs: u64,
    pub lockout_max_failures: u64,
    pub lockout_window_secs: u64,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("port", 3000)?
            .set_default("notes_backend", "sqlite")?
            .set_default("database_path", "data/notes.db")?
            .set_default("notes_file", "data/notes.json")?
            .set_default("rate_limit_per_minute", 1)?
            .set_default("rate_limit_minute_window_secs", 60)?
            .set_default("rate_limit_per_day", 10)?
            .set_default("rate_limit_day_window_secs", 86_400)?
            .set_default("lockout_max_failures", 5)?
            .set_default("lockout_window_secs", 3_600)?
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    // One test so the env mutations cannot race each other.
    #[test]
    fn loads_env_overrides_and_defaults() {
        std::env::set_var("ADMIN_PASSWORD", "s3cret");
        std::env::set_var("PORT", "8080");
        std::env::set_var("NOTES_BACKEND", "file");

        let config = AppConfig::load().expect("config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.admin_password.expose_secret(), "s3cret");
        assert_eq!(config.notes_backend, NotesBackend::File);
        // Untouched keys fall back to defaults.
        assert_eq!(config.rate_limit_per_minute, 1);
        assert_eq!(config.rate_limit_per_day, 10);
        assert_eq!(config.lockout_max_failures, 5);
    }
}
