use crate::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_LOG4RS_CONFIG_FILE, DEFAULT_STORE_TIMEOUT_MS};
use crate::utils::env_var;
use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;

const DATABASE_URL_VAR: &str = "DATABASE_URL";
const STORE_TIMEOUT_MS_VAR: &str = "STORE_TIMEOUT_MS";
const DB_POOL_SIZE_VAR: &str = "DB_POOL_SIZE";

pub const LOG4RS_CONF_FILE_VAR: &str = "LOG4RS_CONFIG_FILE";

pub static CONFIG: Lazy<Config> = Lazy::new(|| Config::new_from_env());

pub struct Config {
    /// path to the sqlite file; a leading `sqlite://` is stripped
    pub database_url: String,
    pub store_timeout: Duration,
    pub db_pool_size: u32,
    pub log4rs_config_file: String,
}

fn parse<T: FromStr>(k: &str, v: &str) -> T {
    match v.parse::<T>() {
        Ok(t) => t,
        Err(_e) => {
            panic!(
                "Failed to parse value of {k} as {}",
                std::any::type_name::<T>()
            )
        }
    }
}

fn parse_or<T: FromStr>(k: &str, default: T) -> T {
    match std::env::var(k) {
        Ok(v) => parse(k, &v),
        Err(_) => default,
    }
}

impl Config {
    fn new_from_env() -> Self {
        Self {
            database_url: database_path(&env_var(DATABASE_URL_VAR)),
            store_timeout: Duration::from_millis(parse_or(
                STORE_TIMEOUT_MS_VAR,
                DEFAULT_STORE_TIMEOUT_MS,
            )),
            db_pool_size: parse_or(DB_POOL_SIZE_VAR, DEFAULT_DB_POOL_SIZE),
            log4rs_config_file: std::env::var(LOG4RS_CONF_FILE_VAR)
                .unwrap_or_else(|_| DEFAULT_LOG4RS_CONFIG_FILE.to_string()),
        }
    }
}

/// diesel wants a bare path, but the sqlx-style url is what ends up in people's .env files
pub fn database_path(url: &str) -> String {
    url.strip_prefix("sqlite://").unwrap_or(url).to_string()
}
