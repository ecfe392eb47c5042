pub mod config;
pub mod cookies;
pub mod errors;
pub mod storage;

pub use config::{CookieOptions, KeyOrderPolicy, StorageConfig, StorageConfigError};
pub use errors::StorageError;
pub use storage::{CookieStorage, StorageArea};
