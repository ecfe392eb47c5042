//! Dynamic entry point for script bindings.
//!
//! Script engines call storage methods by name with a list of loosely typed
//! arguments. [`dispatch`] maps those calls onto a [`CookieStorage`], checking
//! argument counts the way the DOM `Storage` interface does and converting values
//! to strings the way a script would (`1` becomes `"1"`).
//!
//! ```rust
//! use std::sync::{Arc, RwLock};
//! use serde_json::json;
//! use cookie_storage::cookies::{CookieJarHandle, InMemoryCookieJar};
//! use cookie_storage::storage::bridge::dispatch;
//! use cookie_storage::{CookieStorage, StorageConfig};
//!
//! let jar: CookieJarHandle = Arc::new(RwLock::new(InMemoryCookieJar::new()));
//! let storage = CookieStorage::new(jar, StorageConfig::default()).unwrap();
//!
//! dispatch(&storage, "setItem", &[json!("visits"), json!(3), json!({ "ttl": 3600 })]).unwrap();
//! assert_eq!(dispatch(&storage, "getItem", &[json!("visits")]).unwrap(), json!("3"));
//! assert_eq!(dispatch(&storage, "length", &[]).unwrap(), json!(1));
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::config::CookieOptions;
use crate::errors::StorageError;
use crate::storage::CookieStorage;

/// String attributes of an options object. Missing fields keep the storage defaults.
#[derive(Debug, Default, Deserialize)]
struct OptionsArg {
    path: Option<String>,
    domain: Option<String>,
}

/// Calls `method` on `storage` with script-style arguments.
///
/// Returns `null` for methods without a result and for missing items.
pub fn dispatch(storage: &CookieStorage, method: &str, args: &[Value]) -> Result<Value, StorageError> {
    match method {
        "getItem" => {
            require(method, args, 1)?;
            let name = to_storage_string(&args[0]);
            let default = args.get(1).filter(|v| !v.is_null()).map(to_storage_string);
            Ok(storage
                .get_item_or(&name, default.as_deref())
                .map(Value::String)
                .unwrap_or(Value::Null))
        }
        "setItem" => {
            require(method, args, 2)?;
            let options = match args.get(2) {
                None | Some(Value::Null) => None,
                Some(v) => Some(parse_options(v, storage.default_options())?),
            };
            storage.set_item(
                &to_storage_string(&args[0]),
                &to_storage_string(&args[1]),
                options.as_ref(),
            )?;
            Ok(Value::Null)
        }
        "removeItem" => {
            require(method, args, 1)?;
            storage.remove_item(&to_storage_string(&args[0]))?;
            Ok(Value::Null)
        }
        "clear" => {
            storage.clear()?;
            Ok(Value::Null)
        }
        "key" => {
            require(method, args, 1)?;
            Ok(to_index(&args[0])?
                .and_then(|i| storage.key(i))
                .map(Value::String)
                .unwrap_or(Value::Null))
        }
        "length" => Ok(Value::from(storage.len())),
        other => Err(StorageError::UnknownMethod(other.to_string())),
    }
}

fn require(method: &str, args: &[Value], required: usize) -> Result<(), StorageError> {
    if args.len() < required {
        return Err(StorageError::Arguments {
            method: method.to_string(),
            required,
            present: args.len(),
        });
    }
    Ok(())
}

/// String conversion of a script value; strings are taken as-is.
fn to_storage_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Index argument of `key()`. Negative or fractional indices address nothing.
fn to_index(value: &Value) -> Result<Option<usize>, StorageError> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| StorageError::InvalidArgument(format!("key index {value} is not a number")))?;

    if n < 0.0 || n.fract() != 0.0 {
        return Ok(None);
    }
    Ok(Some(n as usize))
}

/// Ttl as written by a script; `null` and `"Infinity"` (what `Infinity` becomes once
/// serialized) both mean permanent.
fn to_ttl(value: &Value) -> Result<f64, StorageError> {
    match value {
        Value::Null => Ok(f64::INFINITY),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| StorageError::InvalidArgument(format!("ttl {n} is not representable"))),
        Value::String(s) => match s.trim() {
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => other
                .parse::<f64>()
                .map_err(|_| StorageError::InvalidArgument(format!("ttl {other:?} is not a number"))),
        },
        other => Err(StorageError::InvalidArgument(format!("ttl {other} is not a number"))),
    }
}

fn parse_options(value: &Value, defaults: &CookieOptions) -> Result<CookieOptions, StorageError> {
    if !value.is_object() {
        return Err(StorageError::InvalidArgument(format!(
            "options must be an object, got {value}"
        )));
    }

    let arg: OptionsArg = serde_json::from_value(value.clone())
        .map_err(|e| StorageError::InvalidArgument(format!("options: {e}")))?;

    let mut options = defaults.clone();
    // ttl is looked up by hand: an explicit `null` must not read as "absent".
    if let Some(ttl) = value.get("ttl") {
        options.ttl = to_ttl(ttl)?;
    }
    if let Some(path) = arg.path {
        options.path = path;
    }
    if let Some(domain) = arg.domain {
        options.domain = domain;
    }
    Ok(options)
}
