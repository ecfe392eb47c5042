//! Cookie-backed storage.
//!
//! This module provides [`CookieStorage`], a key/value store shaped like the DOM
//! `Storage` interface (`getItem`, `setItem`, `removeItem`, `clear`, `key`, `length`)
//! whose durable medium is a [`CookieJar`](crate::cookies::CookieJar).
//!
//! # Concepts
//!
//! - The storage keeps an in-memory **mirror** of the jar. It is hydrated from the
//!   jar's raw header when the storage is created (or [`reload`](CookieStorage::reload)ed).
//! - Every `set_item`/`remove_item` writes **one record** into the jar, then updates
//!   the mirror. `clear` removes whatever the jar currently holds.
//! - Positional access (`key(index)`) follows creation order; how overwrites and
//!   removals affect that order is chosen with [`KeyOrderPolicy`](crate::KeyOrderPolicy).
//!
//! # Available types
//!
//! - [`CookieStorage`] — The storage itself.
//! - [`StorageArea`] — Object-safe storage trait implemented by [`CookieStorage`].
//! - [`KeyOrder`] — Creation-order key tracking.
//! - [`global`] — Explicitly initialized process-wide instance.
//! - [`bridge`] — Name-based dispatch for script bindings.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, RwLock};
//! use cookie_storage::cookies::{CookieJarHandle, InMemoryCookieJar};
//! use cookie_storage::{CookieOptions, CookieStorage, StorageConfig};
//!
//! let jar: CookieJarHandle = Arc::new(RwLock::new(InMemoryCookieJar::new()));
//! let storage = CookieStorage::new(jar, StorageConfig::default()).unwrap();
//!
//! storage.set_item("theme", "dark", None).unwrap();
//! storage.set_item("token", "abc", Some(&CookieOptions::default().immortal())).unwrap();
//!
//! assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
//! assert_eq!(storage.key(1).as_deref(), Some("abc"));
//! assert_eq!(storage.len(), 2);
//! ```

/// Storage area trait.
pub mod area;
/// Script binding dispatch.
pub mod bridge;
/// Process-wide instance.
pub mod global;

mod cookie_storage;
mod key_order;

pub use area::StorageArea;
pub use cookie_storage::CookieStorage;
pub use key_order::KeyOrder;
