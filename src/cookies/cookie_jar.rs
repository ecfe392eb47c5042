//! Cookie jar abstraction and a simple in-memory implementation.
//!
//! A **cookie jar** is the durable counterpart of a [`CookieStorage`](crate::storage::CookieStorage):
//! the storage mirrors it in memory, re-hydrates from it on start-up and writes one
//! record into it for every mutation.
//!
//! This module defines the [`CookieJar`] trait and a reference implementation,
//! [`InMemoryCookieJar`], which keeps records **in memory only** (no persistence).
//!
//! ## Notes & limitations
//! - Jars only model what the storage needs: reading the current `name=value; ...`
//!   header and writing one record. Host/path matching, `Secure`, `HttpOnly` and
//!   `SameSite` are out of scope.
//! - Records whose expiry is at or before "now" are dropped on write and skipped on read.
//! - This module is **not** internally synchronized. Use it via a
//!   `CookieJarHandle = Arc<RwLock<dyn CookieJar + Send + Sync>>`.

use crate::cookies::codec::SEGMENT_DELIMITER;
use crate::cookies::Cookie;
use anyhow::Result;
use time::OffsetDateTime;

/// The external store backing a cookie storage.
pub trait CookieJar: Send + Sync {
    /// Returns the current header string: zero or more `name=value` pairs joined by `"; "`.
    fn read_raw_header(&self) -> Result<String>;

    /// Writes a single record.
    ///
    /// A record with the name of an existing one replaces it ("last write wins");
    /// an already expired record deletes it.
    fn write_record(&mut self, cookie: &Cookie) -> Result<()>;
}

/// Applies `record` to a list of live records.
pub(crate) fn apply_record(cookies: &mut Vec<Cookie>, record: &Cookie, now: OffsetDateTime) {
    if record.is_expired_at(now) {
        cookies.retain(|c| c.name != record.name);
        return;
    }

    // Replace existing cookie with same name
    if let Some(existing) = cookies.iter_mut().find(|c| c.name == record.name) {
        *existing = record.clone();
    } else {
        cookies.push(record.clone());
    }
}

/// Joins the unexpired records into a header string.
pub(crate) fn header_for(cookies: &[Cookie], now: OffsetDateTime) -> String {
    cookies
        .iter()
        .filter(|c| !c.is_expired_at(now))
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join(SEGMENT_DELIMITER)
}

/// In-memory cookie jar.
///
/// Besides the live records it keeps the serialized form of every record written,
/// which is what a browser's `document.cookie` setter would have received.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCookieJar {
    cookies: Vec<Cookie>,
    written: Vec<String>,
}

impl InMemoryCookieJar {
    /// Creates an empty in-memory cookie jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a jar already holding `cookies`, as if a previous page load had set them.
    pub fn with_cookies(cookies: impl IntoIterator<Item = Cookie>) -> Self {
        let now = OffsetDateTime::now_utc();
        let mut jar = Self::new();
        for cookie in cookies {
            apply_record(&mut jar.cookies, &cookie, now);
        }
        jar
    }

    /// Live records, in creation order.
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Serialized records received through [`CookieJar::write_record`], oldest first.
    pub fn written(&self) -> &[String] {
        &self.written
    }
}

impl CookieJar for InMemoryCookieJar {
    fn read_raw_header(&self) -> Result<String> {
        Ok(header_for(&self.cookies, OffsetDateTime::now_utc()))
    }

    fn write_record(&mut self, cookie: &Cookie) -> Result<()> {
        self.written.push(cookie.to_header_string()?);
        apply_record(&mut self.cookies, cookie, OffsetDateTime::now_utc());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CookieOptions;

    fn cookie(name: &str, value: &str) -> Cookie {
        Cookie::new(name, value, &CookieOptions::default(), OffsetDateTime::now_utc()).unwrap()
    }

    #[test]
    fn empty_jar_has_empty_header() {
        let jar = InMemoryCookieJar::new();
        assert_eq!(jar.read_raw_header().unwrap(), "");
    }

    #[test]
    fn writes_replace_in_place_and_keep_order() {
        let mut jar = InMemoryCookieJar::new();
        jar.write_record(&cookie("a", "1")).unwrap();
        jar.write_record(&cookie("b", "2")).unwrap();
        jar.write_record(&cookie("a", "3")).unwrap();
        assert_eq!(jar.read_raw_header().unwrap(), "a=3; b=2");
        assert_eq!(jar.cookies().len(), 2);
        assert_eq!(jar.written().len(), 3);
        assert!(jar.written()[0].starts_with("a=1; expires="));
    }

    #[test]
    fn removal_record_deletes() {
        let mut jar = InMemoryCookieJar::with_cookies(vec![cookie("a", "1"), cookie("b", "2")]);
        jar.write_record(&Cookie::removal("a")).unwrap();
        assert_eq!(jar.read_raw_header().unwrap(), "b=2");
        assert_eq!(
            jar.written(),
            &["a=; expires=Thu, 01 Jan 1970 00:00:01 GMT".to_string()]
        );

        // removing something unknown is harmless
        jar.write_record(&Cookie::removal("nope")).unwrap();
        assert_eq!(jar.read_raw_header().unwrap(), "b=2");
    }

    #[test]
    fn expired_records_are_not_reported() {
        let past = OffsetDateTime::now_utc() - time::Duration::hours(1);
        let mut stale = cookie("old", "x");
        stale.expires = past;
        let jar = InMemoryCookieJar {
            cookies: vec![stale, cookie("new", "y")],
            written: vec![],
        };
        assert_eq!(jar.read_raw_header().unwrap(), "new=y");
    }
}
