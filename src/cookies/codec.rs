//! Cookie header codec.
//!
//! Parses raw `name=value; name=value` headers into a [`ParsedHeader`] and turns
//! records back into header-compatible strings:
//!
//! ```text
//! <name>=<value>; expires=<HTTP-date>; path=<path>; domain=<domain>
//! ```
//!
//! No escaping is performed in either direction. Names and values containing `"; "`
//! or (for names) `=` do not survive a round trip.

use crate::config::CookieOptions;
use crate::cookies::Cookie;
use crate::errors::StorageError;
use time::macros::format_description;
use time::OffsetDateTime;

/// Separator between `name=value` segments of a cookie header.
pub const SEGMENT_DELIMITER: &str = "; ";
/// Separator between a name and its value.
pub const PAIR_DELIMITER: char = '=';

/// Ordered name/value mapping produced by [`parse`].
///
/// Inserting a name that already exists replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHeader {
    entries: Vec<(String, String)>,
}

impl ParsedHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in header order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl IntoIterator for ParsedHeader {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Parses a raw cookie header.
///
/// A segment without `=` is stored under the empty name with the whole segment as value.
pub fn parse(header: Option<&str>) -> ParsedHeader {
    let mut parsed = ParsedHeader::new();

    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return parsed,
    };

    for segment in header.split(SEGMENT_DELIMITER) {
        match segment.split_once(PAIR_DELIMITER) {
            Some((name, value)) => parsed.insert(name, value),
            None => parsed.insert("", segment),
        }
    }

    parsed
}

/// Formats an instant as an HTTP-date (`Thu, 01 Jan 1970 00:00:01 GMT`).
///
/// Years past 9999 are written as plain digits (`Thu, 26 Nov 14020 15:32:56 GMT`).
pub fn format_http_date(instant: OffsetDateTime) -> Result<String, StorageError> {
    let utc = instant.to_offset(time::UtcOffset::UTC);
    // `[year]` forces a `+` sign on five-digit years, so the year is spliced in by hand.
    let date = utc.format(format_description!("[weekday repr:short], [day] [month repr:short]"))?;
    let clock = utc.format(format_description!("[hour]:[minute]:[second]"))?;
    Ok(format!("{date} {:04} {clock} GMT", utc.year()))
}

/// Serializes a record. Absent `path`/`domain` attributes are left out.
pub fn serialize_record(cookie: &Cookie) -> Result<String, StorageError> {
    let mut out = format!(
        "{}{}{}{}expires={}",
        cookie.name,
        PAIR_DELIMITER,
        cookie.value,
        SEGMENT_DELIMITER,
        format_http_date(cookie.expires)?
    );
    if let Some(path) = &cookie.path {
        out.push_str(SEGMENT_DELIMITER);
        out.push_str("path=");
        out.push_str(path);
    }
    if let Some(domain) = &cookie.domain {
        out.push_str(SEGMENT_DELIMITER);
        out.push_str("domain=");
        out.push_str(domain);
    }
    Ok(out)
}

/// Serializes `name=value` with the expiry computed from `options.ttl` at `now`.
pub fn serialize(
    name: &str,
    value: &str,
    options: &CookieOptions,
    now: OffsetDateTime,
) -> Result<String, StorageError> {
    serialize_record(&Cookie::new(name, value, options, now)?)
}

/// Record string that expires `name` immediately.
pub fn removal_string(name: &str) -> String {
    format!("{name}=; expires=Thu, 01 Jan 1970 00:00:01 GMT")
}
