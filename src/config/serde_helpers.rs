//! Custom serde deserializers for flexible configuration values
//!
//! Configuration may come from hand-written TOML files, so a few fields accept
//! more than one representation.

use serde::{Deserialize, Deserializer, de};

/// Deserialize a non-negative integer that can be:
/// - Integer: `3600`
/// - String: `"3600"` (surrounding whitespace is ignored)
///
/// Negative numbers and non-numeric strings are rejected.
pub fn deserialize_flexible_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlexibleU64 {
        Int(i64),
        String(String),
    }

    match FlexibleU64::deserialize(deserializer)? {
        FlexibleU64::Int(i) => {
            u64::try_from(i).map_err(|_| de::Error::custom(format!("negative value: {}", i)))
        }
        FlexibleU64::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid integer string: {}", s))),
    }
}

/// Deserialize an optional string, treating blank strings as absent
///
/// An `otp_secret = ""` line in a config file then behaves the same as
/// leaving the key out.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
