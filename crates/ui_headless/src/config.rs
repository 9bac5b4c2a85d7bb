//! Lenient configuration decoding.
//!
//! Component configs accept partial JSON objects. Missing fields take their
//! defaults and fields with the wrong shape fall back to the default instead
//! of failing the whole config.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};

/// Field deserializer that replaces undecodable values with `T::default()`.
///
/// Use as `#[serde(deserialize_with = "crate::config::lenient")]`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(raw).unwrap_or_default())
}

/// Like [`lenient`] but falls back to `fallback`, for fields whose default
/// is not `T::default()`. Wrap it in a field-specific function to use it
/// with `deserialize_with`.
pub fn lenient_or<'de, D, T>(deserializer: D, fallback: T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(raw).unwrap_or(fallback))
}

/// Like [`lenient`] but falls back to `true`, for flags that default on.
pub fn lenient_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_bool().unwrap_or(true))
}

/// Decodes a component config from JSON, falling back to `T::default()` when
/// the payload is not an object at all.
pub fn from_json_value<T>(value: serde_json::Value) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_value(value) {
        Ok(config) => config,
        Err(err) => {
            tracing::debug!(error = %err, "component config rejected; using defaults");
            T::default()
        }
    }
}

/// Decodes a component config from a JSON string; see [`from_json_value`].
pub fn from_json_str<T>(raw: &str) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_str::<serde_json::Value>(raw)
        .map(from_json_value)
        .unwrap_or_default()
}
