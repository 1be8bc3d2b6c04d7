//! The `Ds_Signature` value object.

use std::fmt::Display;

use subtle::ConstantTimeEq;

use crate::{
    encrypter,
    errors::Result,
    types::{MerchantParameters, MerchantSecret, fields},
};

/// A computed Redsys signature, held in the standard base64 alphabet.
///
/// Build it with [`Signature::for_request`] when signing outbound parameters
/// (keyed on `Ds_Merchant_Order`). Notifications are keyed on `Ds_Order`:
/// check them with [`Signature::for_received`], which signs the payload
/// exactly as posted, while [`Signature::for_result`] signs a decoded mapping.
///
/// Compare signatures with [`Signature::matches`] only. There is no
/// `PartialEq`, since it would compare in variable time.
///
/// ```
/// use redsys_core::{
///     signature::Signature,
///     types::{MerchantParameters, MerchantSecret, fields},
/// };
///
/// let secret = MerchantSecret::new("sq7HjrUOBfKmC576ILgskD5srU870gJ7");
/// let sent = MerchantParameters::new()
///     .with(fields::MERCHANT_ORDER, "123")
///     .with(fields::MERCHANT_AMOUNT, "1000");
/// let received = MerchantParameters::new()
///     .with(fields::ORDER, "123")
///     .with(fields::MERCHANT_AMOUNT, "1000");
///
/// let request = Signature::for_request(&sent, &secret).unwrap();
/// let result = Signature::for_result(&received, &secret).unwrap();
/// assert!(!request.matches(result.as_normalized()));
/// assert!(Signature::for_result(&received, &secret).unwrap().matches(&result.denormalized()));
/// ```
#[derive(Debug, Clone)]
pub struct Signature(String);

impl Signature {
    /// Sign outbound request parameters.
    pub fn for_request(params: &MerchantParameters, secret: &MerchantSecret) -> Result<Self> {
        Self::compute(params, secret, fields::MERCHANT_ORDER)
    }

    /// Sign decoded notification parameters, re-encoded by [`encrypter::encode`].
    ///
    /// Redsys escapes `/` and non-ASCII text in its JSON, so a re-encoded
    /// notification may differ from the posted bytes. Use
    /// [`for_received`](Self::for_received) to check a notification.
    pub fn for_result(params: &MerchantParameters, secret: &MerchantSecret) -> Result<Self> {
        Self::compute(params, secret, fields::ORDER)
    }

    /// Signature of a notification over `Ds_MerchantParameters` as posted.
    ///
    /// `decoded` is the decoded form of `payload` and supplies `Ds_Order`.
    /// The payload may be in either base64 alphabet.
    pub fn for_received(
        payload: &str,
        decoded: &MerchantParameters,
        secret: &MerchantSecret,
    ) -> Result<Self> {
        let order = decoded.require_text(fields::ORDER)?;
        Self::sign_payload(&encrypter::normalize(payload.trim()), &order, secret)
    }

    fn compute(
        params: &MerchantParameters,
        secret: &MerchantSecret,
        order_key: &'static str,
    ) -> Result<Self> {
        let order = params.require_text(order_key)?;
        let payload = encrypter::encode(params)?;

        #[cfg(feature = "tracing")]
        tracing::trace!("Signing {} fields keyed on {order_key}", params.len());

        Self::sign_payload(payload.as_str(), &order, secret)
    }

    fn sign_payload(payload: &str, order: &str, secret: &MerchantSecret) -> Result<Self> {
        let key = encrypter::derive_key(order, secret)?;
        Ok(Signature(encrypter::mac(payload, &key)?))
    }

    /// Standard alphabet text, as placed in the hosted form.
    pub fn as_normalized(&self) -> &str {
        &self.0
    }

    /// URL-safe alphabet text, as Redsys sends it back.
    pub fn denormalized(&self) -> String {
        encrypter::denormalize(&self.0)
    }

    /// Compare against a received signature in either alphabet.
    ///
    /// The comparison runs in constant time over the normalized text.
    pub fn matches(&self, other: &str) -> bool {
        let other = encrypter::normalize(other.trim());
        self.0.as_bytes().ct_eq(other.as_bytes()).into()
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
