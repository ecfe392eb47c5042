//! Storage configuration.
//!
//! [`StorageConfig`] controls how a [`CookieStorage`](crate::storage::CookieStorage)
//! writes its records and how it keeps track of key order. [`CookieOptions`] are the
//! per-record cookie attributes (`ttl`, `path`, `domain`) used by `set_item`.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use cookie_storage::StorageConfig;
//! let cfg = StorageConfig::default();
//! assert_eq!(cfg.default_options.ttl, 60.0);
//! assert_eq!(cfg.default_options.path, "/");
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use cookie_storage::{KeyOrderPolicy, StorageConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = StorageConfig::builder()
//!     .ttl(3600.0)
//!     .path("/app")
//!     .domain("example.com")
//!     .key_order(KeyOrderPolicy::Historical)
//!     .build()?; // returns Result<StorageConfig, StorageConfigError>
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! Builder validation returns [`StorageConfigError`] when the default ttl is NaN or
//! the default path does not start with `/`.

use serde::Deserialize;
use std::fmt;

/// Default time-to-live of a record, in seconds.
pub const DEFAULT_TTL_SECS: f64 = 60.0;
/// Default path attribute of a record.
pub const DEFAULT_PATH: &str = "/";

/// Cookie attributes applied to a single `set_item` call.
///
/// A `ttl` of `f64::INFINITY` or any negative value marks the record as permanent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CookieOptions {
    /// Lifetime in seconds.
    pub ttl: f64,
    /// Path the cookie is scoped to.
    pub path: String,
    /// Domain the cookie is scoped to (empty for the current host).
    pub domain: String,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL_SECS,
            path: DEFAULT_PATH.to_string(),
            domain: String::new(),
        }
    }
}

impl CookieOptions {
    pub fn with_ttl(mut self, ttl: f64) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = domain.into();
        self
    }

    /// Marks the record as effectively never expiring.
    pub fn immortal(self) -> Self {
        self.with_ttl(f64::INFINITY)
    }
}

/// How the storage tracks the positional order used by `key(index)` and `len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrderPolicy {
    /// Key order is a set: overwrites keep their first position, removals prune it,
    /// and `len()` always equals the number of live entries.
    #[default]
    Live,
    /// Every `set_item` appends its name (duplicates included), removals never prune,
    /// and `len()` is a counter bumped by `set_item` and dropped by `remove_item`.
    Historical,
}

/// Configuration of a [`CookieStorage`](crate::storage::CookieStorage).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StorageConfig {
    /// Attributes used when `set_item` is called without options.
    pub default_options: CookieOptions,
    /// Key order tracking behavior.
    pub key_order: KeyOrderPolicy,
}

impl StorageConfig {
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::default()
    }
}

/// Builder for [`StorageConfig`].
#[derive(Debug, Clone, Default)]
pub struct StorageConfigBuilder {
    inner: StorageConfig,
}

impl StorageConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut StorageConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn ttl(self, secs: f64) -> Self { self.map(|c| c.default_options.ttl = secs) }
    pub fn path<S: Into<String>>(self, path: S) -> Self { self.map(|c| c.default_options.path = path.into()) }
    pub fn domain<S: Into<String>>(self, domain: S) -> Self { self.map(|c| c.default_options.domain = domain.into()) }
    pub fn key_order(self, policy: KeyOrderPolicy) -> Self { self.map(|c| c.key_order = policy) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<StorageConfig, StorageConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfigError {
    InvalidTtl(f64),
    InvalidPath(String),
}

impl fmt::Display for StorageConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageConfigError::InvalidTtl(t) =>
                write!(f, "ttl {t} is not a number"),
            StorageConfigError::InvalidPath(p) =>
                write!(f, "path {p:?} must start with '/'"),
        }
    }
}
impl std::error::Error for StorageConfigError {}

fn validate(c: &StorageConfig) -> Result<(), StorageConfigError> {
    if c.default_options.ttl.is_nan() {
        return Err(StorageConfigError::InvalidTtl(c.default_options.ttl));
    }
    if !c.default_options.path.starts_with('/') {
        return Err(StorageConfigError::InvalidPath(c.default_options.path.clone()));
    }
    Ok(())
}
