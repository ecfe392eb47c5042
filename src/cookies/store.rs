//! Persistent cookie jars.
//!
//! A persistent jar keeps its records outside the process, so a new
//! [`CookieStorage`](crate::storage::CookieStorage) built on the same file sees what a
//! previous one wrote. This is the "survive a page reload" part of the storage.
//!
//! This module exports two implementations:
//! - [`JsonCookieJar`]: single JSON file (good for simple setups).
//! - [`SqliteCookieJar`]: SQLite database behind an `r2d2` pool (feature `sqlite_cookie_jar`).
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::{Arc, RwLock};
//! use cookie_storage::cookies::{CookieJarHandle, JsonCookieJar};
//! use cookie_storage::{CookieStorage, StorageConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let jar: CookieJarHandle = Arc::new(RwLock::new(JsonCookieJar::new("cookies.json")?));
//! let storage = CookieStorage::new(jar, StorageConfig::default())?;
//! storage.set_item("theme", "dark", None)?;
//! # Ok(()) }
//! ```
mod json;
#[cfg(feature = "sqlite_cookie_jar")]
mod sqlite;

/// File-backed JSON cookie jar.
pub use json::JsonCookieJar;
/// SQLite-backed cookie jar.
#[cfg(feature = "sqlite_cookie_jar")]
pub use sqlite::SqliteCookieJar;
