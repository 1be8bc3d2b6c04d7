//! The Redsys payment manager.
//!
//! For details, see the [`RedsysManager`] struct documentation.

use bon::Builder;
use redsys_core::types::Record;

use crate::{
    bridge::{PaymentBridge, PaymentEventDispatcher},
    config::RedsysConfig,
    errors::Error,
    form::{RedsysForm, RedsysFormBuilder},
    method::RedsysMethod,
    processor::{Received, ResultOutcome, ResultProcessor, hook_error},
    routes::UrlFactory,
};

/// Drives both Redsys flows for one merchant account.
///
/// - [`process_payment`](Self::process_payment) turns the order held by the
///   bridge into the hosted form the buyer is redirected with.
/// - [`process_result`](Self::process_result) validates the notification
///   Redsys posts back and fires the lifecycle hooks.
///
/// For custom flows, start from [`receive`](Self::receive) and drive the
/// [`ResultProcessor`] step by step:
///
/// ```rust,ignore
/// let outcome = manager
///     .receive(posted)
///     .check_parameters()?
///     .decode()?
///     .verify()?
///     .find_order()
///     .await?
///     .classify()
///     .await?;
/// ```
#[derive(Builder, Debug, Clone)]
pub struct RedsysManager<B, D, U>
where
    B: PaymentBridge,
    D: PaymentEventDispatcher<B>,
    U: UrlFactory,
{
    pub config: RedsysConfig,
    pub routes: U,
    pub bridge: B,
    pub dispatcher: D,
}

impl<B, D, U> RedsysManager<B, D, U>
where
    B: PaymentBridge,
    D: PaymentEventDispatcher<B>,
    U: UrlFactory,
{
    /// Request builder bound to this manager's configuration and routes.
    pub fn form_builder(&self) -> RedsysFormBuilder<'_, U> {
        RedsysFormBuilder::new(&self.config, &self.routes)
    }

    /// Build the hosted form for the order currently held by the bridge.
    ///
    /// Fires `on_order_load` before reading the order and `on_order_created`
    /// once it is known to exist.
    pub async fn process_payment(&self) -> Result<RedsysForm, Error> {
        let method = RedsysMethod::new();

        self.dispatcher
            .on_order_load(&self.bridge, &method)
            .await
            .map_err(|err| hook_error("load", err))?;

        let order = self.bridge.order().ok_or(Error::OrderNotFound)?;

        self.dispatcher
            .on_order_created(&self.bridge, &method)
            .await
            .map_err(|err| hook_error("created", err))?;

        let form = self.form_builder().build_form(&order)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Payment form built: order='{}', action='{}'", order.id, form.action);

        Ok(form)
    }

    /// Start processing a result notification.
    pub fn receive(&self, posted: Record<String>) -> ResultProcessor<'_, B, D, Received> {
        ResultProcessor::new(&self.config.secret_key, &self.bridge, &self.dispatcher, posted)
    }

    /// Validate a result notification and dispatch its outcome.
    ///
    /// Nothing is looked up and no hook fires unless the signature matches.
    /// A refused payment fires "done" and "fail", then returns
    /// [`Error::PaymentFailed`].
    pub async fn process_result(&self, posted: Record<String>) -> Result<ResultOutcome, Error> {
        let outcome = self
            .receive(posted)
            .check_parameters()?
            .decode()?
            .verify()?
            .find_order()
            .await?
            .classify()
            .await?;

        Ok(outcome)
    }
}
