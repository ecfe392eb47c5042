//! SQLite-backed cookie jar.
//!
//! `SqliteCookieJar` persists its records in a single SQLite table. Database access
//! goes through an `r2d2` pool, so the jar can be shared across threads behind a
//! [`CookieJarHandle`](crate::cookies::CookieJarHandle).
//!
//! ## Design
//! - One row per cookie, keyed by name. Upserts keep the row (and therefore the
//!   position of the cookie in the header), like replacing a cookie in a browser jar.
//! - Expiry is stored as a unix timestamp in milliseconds. Expired rows are skipped
//!   on read and purged on write.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::rusqlite::params;
use r2d2_sqlite::SqliteConnectionManager;
use time::OffsetDateTime;

use crate::cookies::codec::SEGMENT_DELIMITER;
use crate::cookies::{Cookie, CookieJar};

/// A SQLite-based cookie jar that persists records across sessions.
pub struct SqliteCookieJar {
    /// Connection pool for SQLite database (so it can run multithreaded)
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteCookieJar {
    /// Opens (or creates) a SQLite database at `path` and ensures the schema exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|c| {
            c.busy_timeout(Duration::from_millis(500))?;
            c.execute_batch(
                "CREATE TABLE IF NOT EXISTS cookies (
                    name TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    expires_ms INTEGER NOT NULL,
                    path TEXT,
                    domain TEXT
                );",
            )?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(Duration::from_secs(5))
            .build(manager)?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

fn unix_millis(instant: OffsetDateTime) -> i64 {
    (instant.unix_timestamp_nanos() / 1_000_000) as i64
}

impl CookieJar for SqliteCookieJar {
    fn read_raw_header(&self) -> Result<String> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT name, value FROM cookies WHERE expires_ms > ?1 ORDER BY rowid",
        )?;

        let rows = stmt.query_map(params![unix_millis(OffsetDateTime::now_utc())], |row| {
            let name: String = row.get(0)?;
            let value: String = row.get(1)?;
            Ok(format!("{name}={value}"))
        })?;

        let pairs = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pairs.join(SEGMENT_DELIMITER))
    }

    fn write_record(&mut self, cookie: &Cookie) -> Result<()> {
        let now = OffsetDateTime::now_utc();
        let conn = self.conn()?;

        conn.execute(
            "DELETE FROM cookies WHERE expires_ms <= ?1",
            params![unix_millis(now)],
        )?;

        if cookie.is_expired_at(now) {
            conn.execute("DELETE FROM cookies WHERE name = ?1", params![cookie.name])?;
            return Ok(());
        }

        conn.execute(
            "INSERT INTO cookies (name, value, expires_ms, path, domain) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(name) DO UPDATE
             SET value=excluded.value, expires_ms=excluded.expires_ms, path=excluded.path, domain=excluded.domain",
            params![
                cookie.name,
                cookie.value,
                unix_millis(cookie.expires),
                cookie.path,
                cookie.domain
            ],
        )?;
        Ok(())
    }
}
