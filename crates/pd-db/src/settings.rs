//! Database connection settings read from the environment.

use std::env;
use std::fmt;

use sqlx::mysql::MySqlConnectOptions;

use crate::pool::DbError;

pub const ENV_DB_USERNAME: &str = "PD_DB_USERNAME";
pub const ENV_DB_PASSWORD: &str = "PD_DB_PASSWORD";
pub const ENV_DB_HOST: &str = "PD_DB_HOST";
pub const ENV_DB_NAME: &str = "PD_DB_NAME";

/// Connection settings for the personal-data database.
#[derive(Clone)]
pub struct DbSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub database: String,
}

impl DbSettings {
    /// Read settings from the environment.
    ///
    /// Username, password, and host fall back to `root`, empty, and
    /// `localhost`; the database name has no sensible default and must be
    /// set via `PD_DB_NAME`.
    pub fn from_env() -> Result<Self, DbError> {
        let database = env::var(ENV_DB_NAME).map_err(|_| DbError::MissingDatabaseName)?;
        Ok(Self {
            username: env::var(ENV_DB_USERNAME).unwrap_or_else(|_| "root".to_owned()),
            password: env::var(ENV_DB_PASSWORD).unwrap_or_default(),
            host: env::var(ENV_DB_HOST).unwrap_or_else(|_| "localhost".to_owned()),
            database,
        })
    }

    /// Build connection options. Credentials go through the options
    /// builder, never through a spliced connection string, so the password
    /// needs no URL-escaping.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("username", &self.username)
            .field("password", &"***")
            .field("host", &self.host)
            .field("database", &self.database)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so everything lives in one
    // test to avoid races between parallel test threads.
    #[test]
    fn test_from_env() {
        env::remove_var(ENV_DB_USERNAME);
        env::remove_var(ENV_DB_PASSWORD);
        env::remove_var(ENV_DB_HOST);
        env::remove_var(ENV_DB_NAME);

        // Missing database name is an error.
        assert!(matches!(
            DbSettings::from_env().unwrap_err(),
            DbError::MissingDatabaseName
        ));

        // Name alone: the remaining settings take their defaults.
        env::set_var(ENV_DB_NAME, "personal_data");
        let settings = DbSettings::from_env().unwrap();
        assert_eq!(settings.username, "root");
        assert_eq!(settings.password, "");
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.database, "personal_data");

        // Explicit values win over defaults.
        env::set_var(ENV_DB_USERNAME, "exporter");
        env::set_var(ENV_DB_PASSWORD, "s3cret");
        env::set_var(ENV_DB_HOST, "db.internal");
        let settings = DbSettings::from_env().unwrap();
        assert_eq!(settings.username, "exporter");
        assert_eq!(settings.password, "s3cret");
        assert_eq!(settings.host, "db.internal");

        env::remove_var(ENV_DB_USERNAME);
        env::remove_var(ENV_DB_PASSWORD);
        env::remove_var(ENV_DB_HOST);
        env::remove_var(ENV_DB_NAME);
    }

    #[test]
    fn test_debug_hides_password() {
        let settings = DbSettings {
            username: "root".to_owned(),
            password: "hunter2".to_owned(),
            host: "localhost".to_owned(),
            database: "personal_data".to_owned(),
        };
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}
