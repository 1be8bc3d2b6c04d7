//! Step-by-step processing of a Redsys result notification.
//!
//! A [`ResultProcessor`] starts in [`Received`] and moves through
//! [`ParametersPresent`], [`Decoded`], [`SignatureVerified`] and
//! [`OrderLocated`]. Each step consumes the processor, so a notification can
//! only reach the order lookup after its signature was checked.
//!
//! See [`RedsysManager::process_result`](crate::manager::RedsysManager::process_result)
//! for the whole flow in one call.

use redsys_core::{
    errors::{Error as Redsys, MalformedPayload},
    signature::Signature,
    transport::ResultEnvelope,
    types::{MerchantParameters, MerchantSecret, Record, fields, parse_order_id},
};

use crate::{
    bridge::{PaymentBridge, PaymentEventDispatcher, PaymentOrder},
    errors::Error,
    method::{RedsysMethod, is_success_code},
};

/// Posted fields, not inspected yet.
#[derive(Debug, Clone)]
pub struct Received {
    pub posted: Record<String>,
}

/// The three envelope fields are present.
#[derive(Debug, Clone)]
pub struct ParametersPresent {
    pub envelope: ResultEnvelope,
}

/// `Ds_MerchantParameters` decoded, signature not checked yet.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub envelope: ResultEnvelope,
    pub decoded: MerchantParameters,
}

/// The notification is authentic.
#[derive(Debug, Clone)]
pub struct SignatureVerified {
    pub method: RedsysMethod,
}

/// The bridge located the order the notification refers to.
#[derive(Debug, Clone)]
pub struct OrderLocated {
    pub method: RedsysMethod,
    pub order: PaymentOrder,
}

/// A successfully classified notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultOutcome {
    pub method: RedsysMethod,
    pub order: PaymentOrder,
    /// `Ds_Response`, always within `0..=99`.
    pub response_code: i64,
}

/// Result notification processing at stage `S`.
pub struct ResultProcessor<'m, B, D, S> {
    pub secret: &'m MerchantSecret,
    pub bridge: &'m B,
    pub dispatcher: &'m D,
    pub state: S,
}

impl<'m, B, D, S> ResultProcessor<'m, B, D, S> {
    fn advance<T>(self, state: T) -> ResultProcessor<'m, B, D, T> {
        ResultProcessor {
            secret: self.secret,
            bridge: self.bridge,
            dispatcher: self.dispatcher,
            state,
        }
    }
}

impl<'m, B, D> ResultProcessor<'m, B, D, Received> {
    pub fn new(
        secret: &'m MerchantSecret,
        bridge: &'m B,
        dispatcher: &'m D,
        posted: Record<String>,
    ) -> Self {
        ResultProcessor {
            secret,
            bridge,
            dispatcher,
            state: Received { posted },
        }
    }

    /// Check that `Ds_MerchantParameters`, `Ds_Signature` and
    /// `Ds_SignatureVersion` were all posted.
    pub fn check_parameters(self) -> Result<ResultProcessor<'m, B, D, ParametersPresent>, Error> {
        let envelope = ResultEnvelope::from_fields(&self.state.posted)?;

        if !envelope.has_known_version() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Unexpected signature version: '{}'",
                envelope.signature_version
            );
        }

        Ok(self.advance(ParametersPresent { envelope }))
    }
}

impl<'m, B, D> ResultProcessor<'m, B, D, ParametersPresent> {
    /// Decode `Ds_MerchantParameters`.
    pub fn decode(self) -> Result<ResultProcessor<'m, B, D, Decoded>, Error> {
        let decoded = self.state.envelope.decode()?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Notification decoded: {} parameters", decoded.len());

        let envelope = self.state.envelope.clone();
        Ok(self.advance(Decoded { envelope, decoded }))
    }
}

impl<'m, B, D> ResultProcessor<'m, B, D, Decoded> {
    /// Sign `Ds_MerchantParameters` as posted, keyed on `Ds_Order`, and
    /// compare with the posted signature.
    pub fn verify(self) -> Result<ResultProcessor<'m, B, D, SignatureVerified>, Error> {
        let Decoded { envelope, decoded } = &self.state;

        let expected =
            Signature::for_received(envelope.merchant_parameters.as_str(), decoded, self.secret)?;
        if !expected.matches(&envelope.signature) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Signature mismatch for order '{}'",
                decoded.text(fields::ORDER).unwrap_or_default()
            );
            return Err(Redsys::InvalidSignature.into());
        }

        let method = RedsysMethod::from_envelope(envelope, decoded.clone());
        Ok(self.advance(SignatureVerified { method }))
    }
}

impl<'m, B: PaymentBridge, D> ResultProcessor<'m, B, D, SignatureVerified> {
    /// Ask the bridge for the order named by `Ds_Order`.
    pub async fn find_order(self) -> Result<ResultProcessor<'m, B, D, OrderLocated>, Error> {
        let ds_order = self
            .state
            .method
            .ds_order()
            .ok_or(Redsys::from(MalformedPayload::MissingField(fields::ORDER)))?;
        let order_id = parse_order_id(&ds_order).map_err(Redsys::from)?;

        let order = self
            .bridge
            .find_order(order_id)
            .await
            .map_err(|err| Error::Bridge(format!("Failed to find order {order_id}: {err}")))?
            .ok_or(Error::OrderNotFound)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Order located: id='{}', ds_order='{}'", order.id, ds_order);

        let method = self.state.method.clone();
        Ok(self.advance(OrderLocated { method, order }))
    }
}

impl<'m, B: PaymentBridge, D: PaymentEventDispatcher<B>> ResultProcessor<'m, B, D, OrderLocated> {
    /// Fire "done", then "success" or "fail" depending on `Ds_Response`.
    ///
    /// A refused payment returns [`Error::PaymentFailed`] after both hooks ran.
    pub async fn classify(self) -> Result<ResultOutcome, Error> {
        let OrderLocated { method, order } = self.state;

        self.dispatcher
            .on_order_done(self.bridge, &method)
            .await
            .map_err(|err| hook_error("done", err))?;

        let response_code = method.ds_response();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Outcome classified: order='{}', response={:?}",
            order.id,
            response_code
        );

        match response_code {
            Some(code) if is_success_code(code) => {
                self.dispatcher
                    .on_order_success(self.bridge, &method)
                    .await
                    .map_err(|err| hook_error("success", err))?;

                Ok(ResultOutcome {
                    method,
                    order,
                    response_code: code,
                })
            }
            _ => {
                self.dispatcher
                    .on_order_fail(self.bridge, &method)
                    .await
                    .map_err(|err| hook_error("fail", err))?;

                Err(Error::PaymentFailed { response_code })
            }
        }
    }
}

pub(crate) fn hook_error(hook: &str, err: impl std::fmt::Display) -> Error {
    Error::Dispatcher(format!("Failed to dispatch '{hook}': {err}"))
}
