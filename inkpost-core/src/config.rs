use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Centralized configuration for the inkpost backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. postgres://localhost/inkpost
    pub url: String,
    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl AppConfig {
    /// Load config from ~/.inkpost/config.toml
    ///
    /// Fails hard with actionable error if config doesn't exist.
    /// `DATABASE_URL` in the environment overrides the file value.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }

    /// Load config from an explicit path, with no environment override.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            anyhow::bail!(
                "Config not found at {:?}\n\nCreate it with a [database] section containing `url`",
                config_path
            );
        }

        let content = fs::read_to_string(config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;

        let config: Self =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;

        tracing::debug!("loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Build config from the environment alone.
    ///
    /// Reads `.env` if present (dotenvy), then requires `DATABASE_URL`.
    /// This is the path tests and containerized deployments take.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections: default_max_connections(),
            },
        })
    }

    /// Get config file path: ~/.inkpost/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".inkpost/config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            url = "postgres://localhost/inkpost"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.database.url, "postgres://localhost/inkpost");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn parses_explicit_max_connections() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            url = "postgres://db.internal/inkpost"
            max_connections = 20
            "#,
        )
        .expect("valid config");

        assert_eq!(config.database.max_connections, 20);
    }

    #[test]
    fn rejects_missing_url() {
        let result: Result<AppConfig, _> = toml::from_str("[database]\n");
        assert!(result.is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[database]\nurl = \"postgres://localhost/inkpost_test\"\n",
        )
        .expect("write config");

        let config = AppConfig::load_from(&path).expect("load");
        assert_eq!(config.database.url, "postgres://localhost/inkpost_test");
    }

    #[test]
    fn missing_file_fails_with_path_in_message() {
        let err = AppConfig::load_from(Path::new("/nonexistent/inkpost.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/inkpost.toml"));
    }
}
