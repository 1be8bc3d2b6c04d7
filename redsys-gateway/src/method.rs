//! The Redsys payment method value handed to lifecycle hooks.

use redsys_core::{
    errors::Error,
    signature::Signature,
    transport::ResultEnvelope,
    types::{Base64EncodedParameters, MerchantParameters, MerchantSecret, Record, fields},
};

/// A payment method as seen by the payment lifecycle.
pub trait PaymentMethod {
    /// Stable name of the method, e.g. `"redsys"`.
    fn payment_name(&self) -> &'static str;
}

/// Redsys transaction data.
///
/// Empty while a payment is being started; on the result path it carries the
/// received envelope and its decoded parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedsysMethod {
    merchant_parameters: Option<Base64EncodedParameters>,
    decoded: Option<MerchantParameters>,
    signature_version: Option<String>,
    signature: Option<String>,
}

impl RedsysMethod {
    pub fn new() -> Self {
        Self::default()
    }

    /// Method carrying a received, already decoded envelope.
    pub fn from_envelope(envelope: &ResultEnvelope, decoded: MerchantParameters) -> Self {
        RedsysMethod {
            merchant_parameters: Some(envelope.merchant_parameters.clone()),
            decoded: Some(decoded),
            signature_version: Some(envelope.signature_version.clone()),
            signature: Some(envelope.signature.clone()),
        }
    }

    /// Build a method straight from posted fields, checking presence and signature.
    ///
    /// Useful when the notification must be validated without a bridge.
    pub fn from_result(posted: &Record<String>, secret: &MerchantSecret) -> Result<Self, Error> {
        let envelope = ResultEnvelope::from_fields(posted)?;
        let decoded = envelope.decode()?;

        let expected =
            Signature::for_received(envelope.merchant_parameters.as_str(), &decoded, secret)?;
        if !expected.matches(&envelope.signature) {
            return Err(Error::InvalidSignature);
        }

        Ok(Self::from_envelope(&envelope, decoded))
    }

    /// Raw `Ds_MerchantParameters`.
    pub fn merchant_parameters(&self) -> Option<&Base64EncodedParameters> {
        self.merchant_parameters.as_ref()
    }

    /// Decoded `Ds_MerchantParameters`.
    pub fn decoded_parameters(&self) -> Option<&MerchantParameters> {
        self.decoded.as_ref()
    }

    pub fn signature_version(&self) -> Option<&str> {
        self.signature_version.as_deref()
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// `Ds_Order` of the notification.
    pub fn ds_order(&self) -> Option<String> {
        self.decoded.as_ref()?.text(fields::ORDER)
    }

    /// `Ds_Response` of the notification, if it is an integer.
    pub fn ds_response(&self) -> Option<i64> {
        self.decoded
            .as_ref()?
            .text(fields::RESPONSE)?
            .trim()
            .parse()
            .ok()
    }

    /// Redsys response codes 0 to 99 mean the payment was authorised.
    ///
    /// A missing or non-numeric `Ds_Response` is a failure here, where a
    /// lenient integer cast would read it as `0` and accept the payment.
    pub fn is_transaction_successful(&self) -> bool {
        self.ds_response().is_some_and(is_success_code)
    }
}

impl PaymentMethod for RedsysMethod {
    fn payment_name(&self) -> &'static str {
        "redsys"
    }
}

pub(crate) fn is_success_code(code: i64) -> bool {
    (0..=99).contains(&code)
}
