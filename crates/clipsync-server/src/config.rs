//! Server configuration, read from the environment at startup

use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const USERS_FILE_NAME: &str = "users.json";
pub const DATABASE_FILE_NAME: &str = "clipboard.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_address: String,
    pub data_dir: PathBuf,
    /// Credential document (username -> password hash)
    pub users_path: PathBuf,
    pub database_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// `USERS_FILE` and `DATABASE_PATH` default to files inside `DATA_DIR`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let users_path = lookup("USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(USERS_FILE_NAME));

        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DATABASE_FILE_NAME));

        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Self {
            bind_address,
            data_dir,
            users_path,
            database_path,
        }
    }
}
