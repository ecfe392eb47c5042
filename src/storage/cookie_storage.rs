use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, trace, warn};
use time::OffsetDateTime;

use crate::config::{CookieOptions, KeyOrderPolicy, StorageConfig};
use crate::cookies::{codec, Cookie, CookieJarHandle};
use crate::errors::StorageError;
use crate::storage::area::StorageArea;
use crate::storage::key_order::KeyOrder;

/// In-memory mirror of the jar.
#[derive(Debug)]
struct StorageState {
    entries: HashMap<String, String>,
    key_order: KeyOrder,
    /// Item counter, only maintained under [`KeyOrderPolicy::Historical`].
    length: usize,
}

impl StorageState {
    fn new(policy: KeyOrderPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            key_order: KeyOrder::new(policy),
            length: 0,
        }
    }

    fn hydrate(header: &str, policy: KeyOrderPolicy) -> Self {
        let mut state = Self::new(policy);
        for (name, value) in codec::parse(Some(header)) {
            state.insert(&name, value);
        }
        state
    }

    fn insert(&mut self, name: &str, value: String) {
        self.entries.insert(name.to_string(), value);
        self.key_order.append(name);
        if self.key_order.policy() == KeyOrderPolicy::Historical {
            self.length += 1;
        }
    }

    fn remove(&mut self, name: &str) {
        self.entries.remove(name);
        self.key_order.prune(name);
        if self.key_order.policy() == KeyOrderPolicy::Historical {
            if self.length == 0 {
                warn!("remove_item({name:?}) with a zero item count; count stays at 0");
            }
            self.length = self.length.saturating_sub(1);
        }
    }

    /// Non-empty value stored under `name`.
    fn value(&self, name: &str) -> Option<String> {
        self.entries
            .get(name)
            .filter(|v| !v.is_empty())
            .cloned()
    }

    fn len(&self) -> usize {
        match self.key_order.policy() {
            KeyOrderPolicy::Live => self.entries.len(),
            KeyOrderPolicy::Historical => self.length,
        }
    }
}

/// Key/value storage whose durable medium is a cookie jar.
///
/// Reads are served from an in-memory mirror that is hydrated from the jar on
/// construction. Every mutation writes exactly one record into the jar before the
/// mirror is touched, so a failed jar write leaves the mirror as it was.
///
/// Values are stored verbatim. An empty value reads as missing (see [`get_item`]);
/// use [`has_item`] to test for presence.
///
/// [`get_item`]: CookieStorage::get_item
/// [`has_item`]: CookieStorage::has_item
pub struct CookieStorage {
    jar: CookieJarHandle,
    config: StorageConfig,
    state: Mutex<StorageState>,
}

impl Debug for CookieStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CookieStorage {
    /// Creates the storage and hydrates its mirror from the jar's current header.
    pub fn new(jar: CookieJarHandle, config: StorageConfig) -> Result<Self, StorageError> {
        let header = read_header(&jar)?;
        let state = StorageState::hydrate(&header, config.key_order);
        debug!("Cookie storage hydrated with {} entries", state.entries.len());

        Ok(Self {
            jar,
            config,
            state: Mutex::new(state),
        })
    }

    /// Options used by `set_item` when none are given.
    pub fn default_options(&self) -> &CookieOptions {
        &self.config.default_options
    }

    fn state(&self) -> MutexGuard<'_, StorageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record(&self, cookie: &Cookie) -> Result<(), StorageError> {
        trace!("Writing cookie record {:?} (expires {})", cookie.name, cookie.expires);
        let mut jar = self.jar.write().unwrap_or_else(PoisonError::into_inner);
        jar.write_record(cookie)?;
        Ok(())
    }

    /// Stores `value` under `name` and writes the matching cookie record.
    ///
    /// `options` default to [`StorageConfig::default_options`]. A ttl of `f64::INFINITY`
    /// or below zero makes the record effectively permanent.
    pub fn set_item(
        &self,
        name: &str,
        value: &str,
        options: Option<&CookieOptions>,
    ) -> Result<(), StorageError> {
        let options = options.unwrap_or(&self.config.default_options);
        let record = Cookie::new(name, value, options, OffsetDateTime::now_utc())?;

        let mut state = self.state();
        self.write_record(&record)?;
        state.insert(name, value.to_string());
        Ok(())
    }

    /// Value stored under `name`. Missing and empty values both yield `None`.
    pub fn get_item(&self, name: &str) -> Option<String> {
        self.state().value(name)
    }

    /// Like [`get_item`](Self::get_item), falling back to `default` when it is not empty.
    pub fn get_item_or(&self, name: &str, default: Option<&str>) -> Option<String> {
        self.get_item(name)
            .or_else(|| default.filter(|d| !d.is_empty()).map(str::to_string))
    }

    /// Whether `name` is present in the mirror, even with an empty value.
    pub fn has_item(&self, name: &str) -> bool {
        self.state().entries.contains_key(name)
    }

    /// Expires the cookie for `name` and drops it from the mirror.
    pub fn remove_item(&self, name: &str) -> Result<(), StorageError> {
        let mut state = self.state();
        self.remove_locked(&mut state, name)
    }

    fn remove_locked(&self, state: &mut StorageState, name: &str) -> Result<(), StorageError> {
        self.write_record(&Cookie::removal(name))?;
        state.remove(name);
        Ok(())
    }

    /// Removes every cookie currently in the jar.
    ///
    /// The set of names comes from the live header, not from the mirror, so entries
    /// the jar no longer knows about stay in the mirror.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.state();
        let header = read_header(&self.jar)?;
        let live = codec::parse(Some(header.as_str()));
        debug!("Clearing {} cookies", live.len());

        for name in live.names() {
            self.remove_locked(&mut state, name)?;
        }
        Ok(())
    }

    /// Value of the key at creation-order position `index`.
    pub fn key(&self, index: usize) -> Option<String> {
        let state = self.state();
        state.key_order.at(index).and_then(|name| state.value(name))
    }

    /// Name of the key at creation-order position `index`.
    pub fn key_name(&self, index: usize) -> Option<String> {
        self.state().key_order.at(index).map(str::to_string)
    }

    /// Keys in creation order. Under [`KeyOrderPolicy::Historical`] overwritten keys
    /// repeat and removed keys stay listed.
    pub fn keys(&self) -> Vec<String> {
        self.state().key_order.names().to_vec()
    }

    pub fn len(&self) -> usize {
        self.state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Throws the mirror away and hydrates it again from the jar.
    pub fn reload(&self) -> Result<(), StorageError> {
        let mut state = self.state();
        let header = read_header(&self.jar)?;
        *state = StorageState::hydrate(&header, self.config.key_order);
        debug!("Cookie storage reloaded with {} entries", state.entries.len());
        Ok(())
    }
}

fn read_header(jar: &CookieJarHandle) -> Result<String, StorageError> {
    let jar = jar.read().unwrap_or_else(PoisonError::into_inner);
    Ok(jar.read_raw_header()?)
}

impl StorageArea for CookieStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        CookieStorage::get_item(self, key)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        Ok(CookieStorage::set_item(self, key, value, None)?)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        Ok(CookieStorage::remove_item(self, key)?)
    }

    fn clear(&self) -> anyhow::Result<()> {
        Ok(CookieStorage::clear(self)?)
    }

    fn len(&self) -> usize {
        CookieStorage::len(self)
    }

    fn keys(&self) -> Vec<String> {
        CookieStorage::keys(self)
    }
}
