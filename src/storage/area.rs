use anyhow::Result;

/// Object-safe view of a cookie-backed store, shaped like the DOM `Storage` interface.
///
/// [`CookieStorage`](super::CookieStorage) implements it so callers can hold an
/// `Arc<dyn StorageArea>`. Writes through this trait use the storage's default cookie
/// options.
pub trait StorageArea: Send + Sync {
    /// Non-empty value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Writes one cookie record for `key` and mirrors it.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Expires the cookie for `key`.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Expires every cookie the jar currently reports.
    fn clear(&self) -> Result<()>;

    /// Item count, as defined by the storage's [`KeyOrderPolicy`](crate::KeyOrderPolicy).
    fn len(&self) -> usize;

    /// Key names in positional order, so `keys()[i]` names the item `key(i)` reads.
    ///
    /// Under [`KeyOrderPolicy::Historical`](crate::KeyOrderPolicy::Historical) this is
    /// the full write history: overwritten keys appear once per write and removed keys
    /// stay listed. Under `Live` every key appears once and only live keys are listed.
    fn keys(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeyOrderPolicy, StorageConfig};
    use crate::cookies::{CookieJarHandle, InMemoryCookieJar};
    use crate::storage::CookieStorage;
    use std::sync::{Arc, RwLock};

    fn set(area: &Arc<dyn StorageArea>, k: &str, v: &str) {
        area.set_item(k, v).unwrap();
    }

    #[test]
    fn storagearea_basic_contract() {
        let jar: CookieJarHandle = Arc::new(RwLock::new(InMemoryCookieJar::new()));
        let area: Arc<dyn StorageArea> =
            Arc::new(CookieStorage::new(jar, StorageConfig::default()).unwrap());

        // starts empty
        assert_eq!(area.len(), 0);
        assert!(area.get_item("missing").is_none());

        // set + get
        set(&area, "a", "1");
        set(&area, "b", "2");
        assert_eq!(area.len(), 2);
        assert_eq!(area.get_item("a").as_deref(), Some("1"));
        assert_eq!(area.get_item("b").as_deref(), Some("2"));

        // overwrite keeps len()
        set(&area, "a", "ONE");
        assert_eq!(area.len(), 2);
        assert_eq!(area.get_item("a").as_deref(), Some("ONE"));
        assert_eq!(area.keys(), vec!["a".to_string(), "b".to_string()]);

        // remove
        area.remove_item("b").unwrap();
        assert_eq!(area.len(), 1);
        assert!(area.get_item("b").is_none());

        // clear
        area.clear().unwrap();
        assert_eq!(area.len(), 0);
        assert!(area.keys().is_empty());
    }

    #[test]
    fn historical_keys_list_every_write() {
        let jar: CookieJarHandle = Arc::new(RwLock::new(InMemoryCookieJar::new()));
        let config = StorageConfig::builder()
            .key_order(KeyOrderPolicy::Historical)
            .build()
            .unwrap();
        let area: Arc<dyn StorageArea> = Arc::new(CookieStorage::new(jar, config).unwrap());

        set(&area, "a", "1");
        set(&area, "b", "2");
        set(&area, "a", "3");
        area.remove_item("b").unwrap();

        assert_eq!(area.keys(), vec!["a", "b", "a"]);
        assert_eq!(area.get_item("b"), None);
    }
}
