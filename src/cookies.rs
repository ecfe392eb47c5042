//! Cookies: [`Cookie`] records, the [`CookieJar`] trait, the header codec and jar backends.

pub mod codec;
pub mod expiry;

mod cookies;
mod cookie_jar;
mod store;

pub use cookies::Cookie;
pub use cookies::CookieJarHandle;

pub use cookie_jar::CookieJar;
pub use cookie_jar::InMemoryCookieJar;

pub use store::JsonCookieJar;
#[cfg(feature = "sqlite_cookie_jar")]
pub use store::SqliteCookieJar;
