use crate::error::StoreError;
use std::{env, path::PathBuf};

/// Storage location used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/coursework.db?mode=rwc";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Settings needed to open the storage handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    /// Pool size for server engines; SQLite always uses one connection
    pub max_connections: u32,
    /// Whether the engine logs every SQL statement
    pub sql_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            sql_logging: false,
        }
    }
}

impl DatabaseConfig {
    /// Reads the configuration from the process environment, after loading `.env` if present
    pub fn from_env() -> Result<Self, StoreError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let path = lookup("DATABASE_PATH").filter(|path| !path.trim().is_empty());
        if let Some(url) = url {
            config.url = url.trim().to_owned();
        } else if let Some(path) = path {
            config.url = format!("sqlite://{}?mode=rwc", path.trim());
        }

        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = raw
                .trim()
                .parse()
                .ok()
                .filter(|&n: &u32| n > 0)
                .ok_or_else(|| {
                    StoreError::validation(format!(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                    ))
                })?;
        }

        if let Some(raw) = lookup("DATABASE_LOGGING") {
            config.sql_logging = match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" | "" => false,
                _ => {
                    return Err(StoreError::validation(format!(
                        "DATABASE_LOGGING must be true or false, got '{raw}'"
                    )));
                }
            };
        }

        Ok(config)
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    /// Connections the pool may open
    ///
    /// SQLite opens every transaction as a deferred reader, and a reader cannot
    /// upgrade to a writer while another connection holds the write lock. SQLite
    /// pools therefore get one connection, and units of work queue for it.
    pub fn pool_size(&self) -> u32 {
        if self.is_sqlite() {
            1
        } else {
            self.max_connections
        }
    }

    /// Filesystem path of a file-backed SQLite database, if the URL names one
    pub fn sqlite_path(&self) -> Option<PathBuf> {
        let rest = self.url.strip_prefix("sqlite:")?;
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        let path = rest.split('?').next().unwrap_or_default();

        if path.is_empty() || path == ":memory:" {
            return None;
        }

        Some(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = DatabaseConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, DatabaseConfig::default());
        assert_eq!(config.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn reads_every_variable() {
        let config = DatabaseConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/coursework"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("DATABASE_LOGGING", "True"),
        ]))
        .unwrap();

        assert_eq!(config.url, "postgres://localhost/coursework");
        assert_eq!(config.max_connections, 12);
        assert!(config.sql_logging);
    }

    #[test]
    fn database_path_names_a_sqlite_file() {
        let config =
            DatabaseConfig::from_vars(vars(&[("DATABASE_PATH", "/var/lib/bot/bot.db")])).unwrap();
        assert_eq!(config.url, "sqlite:///var/lib/bot/bot.db?mode=rwc");
        assert_eq!(config.sqlite_path(), Some(PathBuf::from("/var/lib/bot/bot.db")));

        let config = DatabaseConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/coursework"),
            ("DATABASE_PATH", "/var/lib/bot/bot.db"),
        ]))
        .unwrap();
        assert_eq!(config.url, "postgres://localhost/coursework");
    }

    #[test]
    fn sqlite_pools_hold_one_connection() {
        let config = DatabaseConfig {
            max_connections: 8,
            ..DatabaseConfig::default()
        };
        assert!(config.is_sqlite());
        assert_eq!(config.pool_size(), 1);

        let postgres = DatabaseConfig {
            url: "postgres://localhost/db".to_owned(),
            max_connections: 8,
            ..DatabaseConfig::default()
        };
        assert!(!postgres.is_sqlite());
        assert_eq!(postgres.pool_size(), 8);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = DatabaseConfig::from_vars(vars(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = DatabaseConfig::from_vars(vars(&[("DATABASE_LOGGING", "maybe")])).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn extracts_sqlite_file_path() {
        let config = DatabaseConfig::default();
        assert_eq!(config.sqlite_path(), Some(PathBuf::from("./data/coursework.db")));

        let memory = DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
            ..DatabaseConfig::default()
        };
        assert_eq!(memory.sqlite_path(), None);

        let postgres = DatabaseConfig {
            url: "postgres://localhost/db".to_owned(),
            ..DatabaseConfig::default()
        };
        assert_eq!(postgres.sqlite_path(), None);
    }
}
