//! Redsys core library.
//!
//! This library provides the protocol-level types and primitives of the Redsys
//! `HMAC_SHA256_V1` signature scheme: the merchant parameter set, its canonical
//! base64 JSON form, per-order key derivation and the request / result signatures.

pub mod encrypter;
pub mod errors;
pub mod signature;
pub mod transport;
pub mod types;
