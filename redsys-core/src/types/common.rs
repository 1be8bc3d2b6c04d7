//! Miscellaneous common types used throughout the Redsys codebase.

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

/// Represents a key-value pair in the Redsys protocol. The key is a `String`.
pub type Record<V> = std::collections::HashMap<String, V>;

/// Represents any JSON value. Used for serializing/deserializing arbitrary JSON data.
pub type AnyJson = serde_json::Value;

/// The only signature version Redsys speaks: `"HMAC_SHA256_V1"`.
///
/// ```
/// use serde::{Serialize, Deserialize};
/// use redsys_core::types::HmacSha256V1;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Example {
///     #[serde(rename = "Ds_SignatureVersion")]
///     version: HmacSha256V1,
/// }
///
/// let example: Example = serde_json::from_value(serde_json::json!({
///     "Ds_SignatureVersion": "HMAC_SHA256_V1",
/// })).unwrap();
///
/// assert_eq!(example.version, HmacSha256V1);
///
/// let json = serde_json::to_value(&example).unwrap();
/// assert_eq!(json.get("Ds_SignatureVersion").unwrap(), "HMAC_SHA256_V1");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HmacSha256V1;

impl HmacSha256V1 {
    pub const NAME: &'static str = "HMAC_SHA256_V1";

    pub fn as_str(&self) -> &'static str {
        Self::NAME
    }
}

impl Serialize for HmacSha256V1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(Self::NAME)
    }
}

impl<'de> Deserialize<'de> for HmacSha256V1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = String::deserialize(deserializer)?;
        match v.as_str() {
            HmacSha256V1::NAME => Ok(HmacSha256V1),
            _ => Err(serde::de::Error::custom(format!(
                "Unsupported signature version {}; expected {}",
                v,
                HmacSha256V1::NAME
            ))),
        }
    }
}

impl Display for HmacSha256V1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::NAME)
    }
}

/// The `Ds_MerchantParameters` value: base64 of the JSON merchant parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64EncodedParameters(pub String);

impl Base64EncodedParameters {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for Base64EncodedParameters {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Base64EncodedParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Base64EncodedParameters(s))
    }
}

impl Display for Base64EncodedParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Base64EncodedParameters {
    fn from(value: String) -> Self {
        Base64EncodedParameters(value)
    }
}

impl From<&str> for Base64EncodedParameters {
    fn from(value: &str) -> Self {
        Base64EncodedParameters(value.to_string())
    }
}
