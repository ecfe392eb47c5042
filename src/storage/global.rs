//! Process-wide cookie storage.
//!
//! The storage is not created as a side effect of loading the crate: call [`init`] once
//! with the jar to hydrate from, then fetch the shared instance with [`instance`].

use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use log::debug;

use crate::config::StorageConfig;
use crate::cookies::CookieJarHandle;
use crate::errors::StorageError;
use crate::storage::CookieStorage;

lazy_static! {
    static ref INSTANCE: RwLock<Option<Arc<CookieStorage>>> = RwLock::new(None);
}

/// Creates the process-wide storage, hydrating it from `jar`.
///
/// Fails with [`StorageError::AlreadyInitialized`] on every call after the first
/// successful one.
pub fn init(jar: CookieJarHandle, config: StorageConfig) -> Result<Arc<CookieStorage>, StorageError> {
    let mut slot = INSTANCE.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return Err(StorageError::AlreadyInitialized);
    }

    let storage = Arc::new(CookieStorage::new(jar, config)?);
    *slot = Some(storage.clone());
    debug!("Process-wide cookie storage initialized");

    Ok(storage)
}

/// Returns the process-wide storage created by [`init`].
pub fn instance() -> Result<Arc<CookieStorage>, StorageError> {
    INSTANCE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(StorageError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::InMemoryCookieJar;

    // The instance is process-wide, so the whole lifecycle lives in one test.
    #[test]
    fn init_once_then_share() {
        assert!(matches!(instance(), Err(StorageError::NotInitialized)));

        let jar: CookieJarHandle = Arc::new(RwLock::new(InMemoryCookieJar::new()));
        let storage = init(jar.clone(), StorageConfig::default()).unwrap();
        storage.set_item("a", "1", None).unwrap();

        let shared = instance().unwrap();
        assert!(Arc::ptr_eq(&storage, &shared));
        assert_eq!(shared.get_item("a").as_deref(), Some("1"));

        assert!(matches!(
            init(jar, StorageConfig::default()),
            Err(StorageError::AlreadyInitialized)
        ));
    }
}
