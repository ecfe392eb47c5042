//! Cookie core types.
//!
//! This module defines the **type-erased jar handle** used by the storage and the
//! serializable [`Cookie`] record written into a jar.
//!
//! # Concurrency model
//! - [`CookieJarHandle`] is `Arc<RwLock<dyn CookieJar + Send + Sync>>`.
//!   - Callers take a **read lock** to read the raw header and a **write lock**
//!     to write a record.
//!
//! # Typical usage
//! ```ignore
//! let jar: CookieJarHandle = Arc::new(RwLock::new(InMemoryCookieJar::new()));
//! let header = jar.read().unwrap().read_raw_header()?;
//! jar.write().unwrap().write_record(&Cookie::removal("session"))?;
//! ```
//!
//! The [`Cookie`] struct can be (de)serialized via `serde`; its expiry is stored as a
//! unix timestamp in milliseconds, so sub-second ttls survive a round trip.

use crate::config::CookieOptions;
use crate::cookies::{codec, expiry, CookieJar};
use crate::errors::StorageError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use time::OffsetDateTime;

/// A handle to a cookie jar trait.
///
/// Reference-counted, read/write-locked pointer to a type-erased [`CookieJar`].
pub type CookieJarHandle = Arc<RwLock<dyn CookieJar + Send + Sync>>;

/// One record as written to (or kept by) a cookie jar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value (not URL-decoded).
    pub value: String,

    /// Absolute expiry. Records at or past this instant are gone.
    #[serde(with = "time::serde::timestamp::milliseconds")]
    pub expires: OffsetDateTime,

    /// Path scoping. Removal records carry none.
    pub path: Option<String>,

    /// Domain scoping. Removal records carry none.
    pub domain: Option<String>,
}

impl Cookie {
    /// Builds the record for `name=value` written at `now` with the given attributes.
    pub fn new(
        name: &str,
        value: &str,
        options: &CookieOptions,
        now: OffsetDateTime,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            expires: expiry::expires_at(now, options.ttl)?,
            path: Some(options.path.clone()),
            domain: Some(options.domain.clone()),
        })
    }

    /// Builds the record that deletes `name` (empty value, expiry in 1970).
    pub fn removal(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            expires: expiry::REMOVAL_EXPIRES,
            path: None,
            domain: None,
        }
    }

    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires <= now
    }

    /// Header-compatible representation of this record.
    pub fn to_header_string(&self) -> Result<String, StorageError> {
        codec::serialize_record(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn removal_record_is_already_expired() {
        let c = Cookie::removal("x");
        assert!(c.value.is_empty());
        assert!(c.is_expired_at(datetime!(1970-01-01 00:00:01 UTC)));
        assert!(c.is_expired_at(OffsetDateTime::now_utc()));
    }

    #[test]
    fn new_record_carries_options() {
        let now = datetime!(2026-01-01 00:00:00 UTC);
        let opts = CookieOptions::default().with_ttl(10.0).with_domain("a.test");
        let c = Cookie::new("k", "v", &opts, now).unwrap();
        assert_eq!(c.expires, datetime!(2026-01-01 00:00:10 UTC));
        assert_eq!(c.path.as_deref(), Some("/"));
        assert_eq!(c.domain.as_deref(), Some("a.test"));
        assert!(!c.is_expired_at(now));
        assert!(c.is_expired_at(datetime!(2026-01-01 00:00:10 UTC)));
    }

    #[test]
    fn json_stores_expiry_as_millisecond_timestamp() {
        let c = Cookie::removal("x");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["expires"], serde_json::json!(1000));
        let back: Cookie = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);

        let now = datetime!(2026-01-01 00:00:00 UTC);
        let short = Cookie::new("x", "1", &CookieOptions::default().with_ttl(0.4), now).unwrap();
        let back: Cookie = serde_json::from_value(serde_json::to_value(&short).unwrap()).unwrap();
        assert_eq!(back.expires, datetime!(2026-01-01 00:00:00.4 UTC));
        assert!(!back.is_expired_at(now));
    }
}
