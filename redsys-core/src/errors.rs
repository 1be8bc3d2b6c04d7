/// Error types for Redsys core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more required parameters were not received.
    #[error("Parameters not received: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    /// The merchant parameters blob could not be decoded.
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] MalformedPayload),

    /// The computed signature does not match the received one.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The ISO 4217 code has no Redsys numeric counterpart.
    #[error("Currency not supported: {0}")]
    UnsupportedCurrency(String),

    /// The merchant secret or the derived key is unusable.
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),
}

/// Reasons a merchant parameters payload is rejected.
#[derive(Debug, thiserror::Error)]
pub enum MalformedPayload {
    /// Base64 decoding errors.
    #[error("Base64 decode error: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    /// UTF-8 decoding errors.
    #[error("UTF-8 decode error: {0}")]
    Utf8DecodeError(#[from] std::string::FromUtf8Error),

    /// JSON serialization/deserialization errors.
    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// The payload parsed, but not as a JSON object.
    #[error("Payload is not a JSON object")]
    NotAnObject,

    /// A field needed to process the payload is absent.
    #[error("Field `{0}` is missing")]
    MissingField(&'static str),

    /// The order number does not start with a decimal order id.
    #[error("Invalid order number `{0}`")]
    InvalidOrderNumber(String),
}

/// A specialized `Result` type for Redsys core operations.
pub type Result<T> = std::result::Result<T, Error>;
