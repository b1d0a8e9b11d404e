// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = concat!("table_crawl/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 15;

// Local store (logs)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const TABLES_FILE: &str = "tables.json";
pub const LIST_FILE: &str = "list.json";
pub const DICT_FILE: &str = "dict.json";

// Projection defaults: first table, second column, `id` attribute, `name` entry
pub const PROJECT_TABLE: usize = 0;
pub const PROJECT_LINK_COLUMN: usize = 1;
pub const PROJECT_KEY_COLUMN: usize = 1;
pub const PROJECT_KEY_ATTR: &str = "id";
pub const PROJECT_NAME_FIELD: &str = "name";
