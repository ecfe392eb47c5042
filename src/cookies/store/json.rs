//! JSON-backed cookie jar.
//!
//! `JsonCookieJar` persists its records in a single JSON file on disk.
//!
//! ### I/O characteristics & caveats
//! - Every read loads the file, every write **reads then rewrites** the whole file.
//!   For large datasets, consider [`SqliteCookieJar`](super::SqliteCookieJar).
//! - File writes are not atomic.
//! - I/O and (de)serialization errors are returned to the caller, never swallowed.
//!   A file that does not parse is left untouched: writes fail until it is fixed.
//! - Expiry is stored as a unix timestamp in milliseconds.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::cookies::cookie_jar::{apply_record, header_for};
use crate::cookies::{Cookie, CookieJar};

/// On-disk representation of the jar.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CookieJarFile {
    cookies: Vec<Cookie>,
}

/// A JSON-based cookie jar that persists records across sessions.
#[derive(Debug)]
pub struct JsonCookieJar {
    /// Path to the JSON file where cookies are stored.
    path: PathBuf,
}

impl JsonCookieJar {
    /// Creates (or opens) a JSON cookie jar at `path`.
    ///
    /// If the file does not exist, an empty structure is written to disk.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let jar = Self { path };
        if !jar.path.exists() {
            jar.save_file(&CookieJarFile::default())?;
        }
        Ok(jar)
    }

    /// Loads and deserializes the jar file.
    fn load_file(&self) -> Result<CookieJarFile> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cookie jar file {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cookie jar file {}", self.path.display()))
    }

    /// Serializes and writes the jar file (pretty-printed).
    fn save_file(&self, file: &CookieJarFile) -> Result<()> {
        let contents = serde_json::to_string_pretty(file).context("Failed to serialize cookies")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write cookie jar file {}", self.path.display()))
    }
}

impl CookieJar for JsonCookieJar {
    fn read_raw_header(&self) -> Result<String> {
        let file = self.load_file()?;
        Ok(header_for(&file.cookies, OffsetDateTime::now_utc()))
    }

    fn write_record(&mut self, cookie: &Cookie) -> Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut file = self.load_file()?;
        // Expired leftovers are dropped whenever the file is rewritten.
        file.cookies.retain(|c| !c.is_expired_at(now));
        apply_record(&mut file.cookies, cookie, now);
        self.save_file(&file)
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
    fn creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let jar = JsonCookieJar::new(&path).unwrap();
        assert!(path.exists());
        assert_eq!(jar.read_raw_header().unwrap(), "");
    }

    #[test]
    fn records_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        {
            let mut jar = JsonCookieJar::new(&path).unwrap();
            jar.write_record(&cookie("a", "1")).unwrap();
            jar.write_record(&cookie("b", "2")).unwrap();
            jar.write_record(&Cookie::removal("a")).unwrap();
        }

        let jar = JsonCookieJar::new(&path).unwrap();
        assert_eq!(jar.read_raw_header().unwrap(), "b=2");
    }

    #[test]
    fn garbage_file_is_an_error_and_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "not json").unwrap();

        let mut jar = JsonCookieJar::new(&path).unwrap();
        assert!(jar.read_raw_header().is_err());
        assert!(jar.write_record(&cookie("a", "1")).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn sub_second_expiry_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let short = Cookie::new(
            "flash",
            "1",
            &CookieOptions::default().with_ttl(30.25),
            OffsetDateTime::now_utc(),
        )
        .unwrap();

        let mut jar = JsonCookieJar::new(&path).unwrap();
        jar.write_record(&short).unwrap();

        let stored: CookieJarFile =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let millis = |t: OffsetDateTime| t.unix_timestamp_nanos() / 1_000_000;
        assert_eq!(millis(stored.cookies[0].expires), millis(short.expires));
    }

    #[test]
    fn missing_file_after_creation_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let jar = JsonCookieJar::new(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(jar.read_raw_header().is_err());
    }
}
