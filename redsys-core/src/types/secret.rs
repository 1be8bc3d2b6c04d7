use std::fmt::Debug;

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::Deserialize;

use crate::errors::Error;

/// The merchant's shared secret, as issued by Redsys (base64 text).
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MerchantSecret(String);

impl MerchantSecret {
    pub fn new(base64_secret: impl Into<String>) -> Self {
        MerchantSecret(base64_secret.into())
    }

    /// Raw key bytes.
    pub fn decode(&self) -> Result<Vec<u8>, Error> {
        BASE64_STANDARD
            .decode(self.0.trim())
            .map_err(|err| Error::InvalidKeyMaterial(format!("secret is not valid base64: {err}")))
    }
}

impl Debug for MerchantSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MerchantSecret(**redacted**)")
    }
}

impl From<&str> for MerchantSecret {
    fn from(value: &str) -> Self {
        MerchantSecret::new(value)
    }
}

impl From<String> for MerchantSecret {
    fn from(value: String) -> Self {
        MerchantSecret::new(value)
    }
}
