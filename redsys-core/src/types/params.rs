//! [`MerchantParameters`] is the gateway parameter set exchanged with Redsys.

use serde::{Deserialize, Serialize};

use crate::{errors::MalformedPayload, types::AnyJson};

/// An insertion-ordered mapping of Redsys field names to JSON values.
///
/// Values are usually strings, but numeric fields such as
/// `Ds_Merchant_TransactionType` are kept as JSON numbers so the canonical
/// payload reproduces exactly what was inserted.
///
/// ```
/// use redsys_core::types::{MerchantParameters, fields};
///
/// let params = MerchantParameters::new()
///     .with(fields::MERCHANT_ORDER, "0042T1234567")
///     .with(fields::MERCHANT_TRANSACTION_TYPE, 0);
///
/// assert_eq!(params.text(fields::MERCHANT_ORDER).as_deref(), Some("0042T1234567"));
/// assert_eq!(params.text(fields::MERCHANT_TRANSACTION_TYPE).as_deref(), Some("0"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantParameters(serde_json::Map<String, AnyJson>);

impl MerchantParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnyJson>) -> Option<AnyJson> {
        self.0.insert(key.into(), value.into())
    }

    /// Chaining variant of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnyJson>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AnyJson> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Textual form of a scalar field.
    ///
    /// Strings are returned as-is, numbers and booleans are rendered. Arrays,
    /// objects and `null` yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            AnyJson::String(s) => Some(s.clone()),
            AnyJson::Number(n) => Some(n.to_string()),
            AnyJson::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Like [`text`](Self::text), but a missing field is a malformed payload.
    pub fn require_text(&self, key: &'static str) -> Result<String, MalformedPayload> {
        self.text(key).ok_or(MalformedPayload::MissingField(key))
    }

    /// Names from `required` that are absent, in the order given.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|key| !self.contains_key(key))
            .map(|key| key.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnyJson)> {
        self.0.iter()
    }
}

impl TryFrom<AnyJson> for MerchantParameters {
    type Error = MalformedPayload;

    fn try_from(value: AnyJson) -> Result<Self, Self::Error> {
        match value {
            AnyJson::Object(map) => Ok(MerchantParameters(map)),
            _ => Err(MalformedPayload::NotAnObject),
        }
    }
}
