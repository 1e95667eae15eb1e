//! runtime configuration, taken from the environment;
//! falls back to the OS specific configuration folder for the db file

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{Error, Result};

pub const ENV_BIND: &str = "ADDRESSBOOK_BIND";
pub const ENV_DB: &str = "ADDRESSBOOK_DB";

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DB_NAME: &str = "addressbook.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_values(env::var(ENV_BIND).ok(), env::var(ENV_DB).ok())
    }

    /// build a config from optional overrides, unset or blank values
    /// fall back to the defaults
    pub fn from_values(bind: Option<String>, db: Option<String>) -> Result<Config> {
        let bind = bind
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a socket address: {:?}", ENV_BIND, bind)))?;

        let db_path = match db.filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        Ok(Config { bind, db_path })
    }
}

/// retrieve OS specific configuration folder (eg `~/.config` for unix)
pub fn default_db_path() -> Result<PathBuf> {
    ProjectDirs::from("dev", "sintheta", "addressbook")
        .map(|d| d.config_dir().join(DB_NAME))
        .ok_or_else(|| {
            Error::Config("could not retrieve OS specific configuration folder".to_string())
        })
}
