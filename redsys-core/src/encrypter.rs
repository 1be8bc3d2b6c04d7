//! Canonical payload codec and the `HMAC_SHA256_V1` primitives.
//!
//! - The merchant parameters travel as base64 of their JSON serialization.
//! - The signing key of an order is the 3DES-CBC encryption (zero IV, NUL
//!   padded, no cipher padding) of the order number under the merchant secret.
//! - The signature is the HMAC-SHA256 of the base64 payload under that key.
//!
//! Redsys sends signatures in the URL-safe alphabet (`-_`) while requests use
//! the standard one (`+/`); [`normalize`] and [`denormalize`] convert between
//! them at the wire boundary.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    prelude::BASE64_STANDARD,
};
use cbc::cipher::{BlockEncryptMut, KeyIvInit, block_padding::NoPadding};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{
    errors::{Error, MalformedPayload, Result},
    types::{AnyJson, Base64EncodedParameters, MerchantParameters, MerchantSecret},
};

type TdesEde3CbcEnc = cbc::Encryptor<des::TdesEde3>;
type HmacSha256 = Hmac<Sha256>;

pub const TRIPLE_DES_BLOCK_SIZE: usize = 8;
const TRIPLE_DES_IV: [u8; TRIPLE_DES_BLOCK_SIZE] = [0; TRIPLE_DES_BLOCK_SIZE];

/// Standard alphabet, padding optional. Notifications are not always padded.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Serialize the parameters to JSON and base64 it (standard alphabet).
pub fn encode(params: &MerchantParameters) -> Result<Base64EncodedParameters> {
    let json = serde_json::to_string(params).map_err(MalformedPayload::from)?;
    Ok(Base64EncodedParameters(BASE64_STANDARD.encode(json)))
}

/// Inverse of [`encode`]. Accepts either base64 alphabet.
pub fn decode(blob: &str) -> Result<MerchantParameters> {
    let bytes = BASE64_LENIENT
        .decode(normalize(blob.trim()))
        .map_err(MalformedPayload::from)?;
    let json = String::from_utf8(bytes).map_err(MalformedPayload::from)?;
    let value: AnyJson = serde_json::from_str(&json).map_err(MalformedPayload::from)?;
    Ok(MerchantParameters::try_from(value)?)
}

/// URL-safe alphabet to standard alphabet.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect()
}

/// Standard alphabet to URL-safe alphabet.
pub fn denormalize(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

/// Derive the per-order signing key.
///
/// The order value is right-padded with NUL bytes to a multiple of the 3DES
/// block size and encrypted with the decoded merchant secret.
pub fn derive_key(order_value: &str, secret: &MerchantSecret) -> Result<Vec<u8>> {
    let key = secret.decode()?;

    let mut message = order_value.as_bytes().to_vec();
    let tail = message.len() % TRIPLE_DES_BLOCK_SIZE;
    if tail != 0 {
        message.resize(message.len() + TRIPLE_DES_BLOCK_SIZE - tail, 0);
    }

    let cipher = TdesEde3CbcEnc::new_from_slices(&key, &TRIPLE_DES_IV).map_err(|_| {
        Error::InvalidKeyMaterial(format!(
            "3DES key must be 24 bytes, secret decodes to {}",
            key.len()
        ))
    })?;

    Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(&message))
}

/// HMAC-SHA256 of `payload` under `key`, base64 encoded (standard alphabet).
pub fn mac(payload: &str, key: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|err| Error::InvalidKeyMaterial(format!("HMAC key rejected: {err}")))?;
    mac.update(payload.as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}
