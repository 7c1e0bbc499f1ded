pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;
pub const DEFAULT_LOG4RS_CONFIG_FILE: &str = "log4rs.yml";

pub const API_BASE: &str = "/api/v1";

pub const WON: &str = "WON";
pub const LOST: &str = "LOST";
