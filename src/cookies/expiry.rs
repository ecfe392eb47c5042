//! Conversion of relative lifetimes into absolute expiry instants.
//!
//! Cookie expiry attributes need a concrete date, so "never expires" is expressed as a
//! lifetime of roughly 12,000 years ([`IMMORTAL_TTL_SECS`]). Any infinite or negative
//! ttl is replaced by that sentinel before the expiry is computed.

use crate::errors::StorageError;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// 12,000 years expressed in seconds.
pub const IMMORTAL_TTL_SECS: f64 = 378_691_200_000.0;

/// Expiry used by removal records (`Thu, 01 Jan 1970 00:00:01 GMT`).
pub const REMOVAL_EXPIRES: OffsetDateTime = datetime!(1970-01-01 00:00:01 UTC);

/// Returns the ttl with the permanence sentinel substituted for `+inf` and negatives.
pub fn effective_ttl(ttl: f64) -> f64 {
    if ttl == f64::INFINITY || ttl < 0.0 {
        IMMORTAL_TTL_SECS
    } else {
        ttl
    }
}

/// Returns `now` advanced by `seconds`.
pub fn add_seconds(now: OffsetDateTime, seconds: f64) -> Result<OffsetDateTime, StorageError> {
    Duration::checked_seconds_f64(seconds)
        .and_then(|d| now.checked_add(d))
        .ok_or(StorageError::ExpiryOutOfRange(seconds))
}

/// Absolute expiry of a record written at `now` with the given ttl.
pub fn expires_at(now: OffsetDateTime, ttl: f64) -> Result<OffsetDateTime, StorageError> {
    add_seconds(now, effective_ttl(ttl))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> OffsetDateTime {
        datetime!(2026-10-19 12:00:00 UTC)
    }

    #[test]
    fn adds_whole_and_fractional_seconds() {
        assert_eq!(add_seconds(now(), 60.0).unwrap(), datetime!(2026-10-19 12:01:00 UTC));
        assert_eq!(add_seconds(now(), 1.5).unwrap(), datetime!(2026-10-19 12:00:01.5 UTC));
        assert_eq!(add_seconds(now(), -60.0).unwrap(), datetime!(2026-10-19 11:59:00 UTC));
    }

    #[test]
    fn infinity_and_negative_share_the_sentinel() {
        let inf = expires_at(now(), f64::INFINITY).unwrap();
        let neg = expires_at(now(), -5.0).unwrap();
        assert_eq!(inf, neg);
        assert_eq!(inf, expires_at(now(), f64::NEG_INFINITY).unwrap());
        assert!(inf.year() > 14_000);
    }

    #[test]
    fn finite_ttl_is_not_substituted() {
        assert_eq!(effective_ttl(0.0), 0.0);
        assert_eq!(effective_ttl(60.0), 60.0);
        assert_eq!(effective_ttl(-0.5), IMMORTAL_TTL_SECS);
    }

    #[test]
    fn unrepresentable_expiry_is_an_error() {
        assert!(matches!(
            add_seconds(now(), f64::NAN),
            Err(StorageError::ExpiryOutOfRange(_))
        ));
        assert!(matches!(
            expires_at(now(), 1e18),
            Err(StorageError::ExpiryOutOfRange(_))
        ));
    }
}
