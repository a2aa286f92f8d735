use std::path::{Path, PathBuf};

/// Environment variable selecting the database file.
pub const DB_PATH_ENV: &str = "USER_DB_PATH";

/// Database file used when [`DB_PATH_ENV`] is unset.
pub const DEFAULT_DB_PATH: &str = "./data/sample_users.db";

/// Person store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl StoreConfig {
    /// Create a config pointing at an explicit database file
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Resolve the database location from [`DB_PATH_ENV`], falling back to
    /// [`DEFAULT_DB_PATH`].
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(DB_PATH_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::new(DEFAULT_DB_PATH),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_uses_default_path() {
        let config = StoreConfig::from_value(None);
        assert_eq!(config.db_path(), Path::new(DEFAULT_DB_PATH));
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn blank_variable_uses_default_path() {
        let config = StoreConfig::from_value(Some("  ".to_string()));
        assert_eq!(config.db_path(), Path::new(DEFAULT_DB_PATH));
    }

    #[test]
    fn explicit_variable_wins() {
        let config = StoreConfig::from_value(Some("/var/lib/users/users.db".to_string()));
        assert_eq!(config.db_path(), Path::new("/var/lib/users/users.db"));
    }
}
