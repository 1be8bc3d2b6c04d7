//! Seams to the host application: the order bridge and the lifecycle events.
//!
//! Orders are owned by the application. The gateway only reads the order being
//! paid, asks the bridge to locate an order from a notification, and tells the
//! application about each step through [`PaymentEventDispatcher`].

use bon::Builder;
use redsys_core::types::AnyJson;

use crate::method::RedsysMethod;

/// Free-form order data forwarded to Redsys.
///
/// Recognized keys: `transaction_type`, `product_description`,
/// `merchant_titular`, `merchant_name` and `merchant_data`.
pub type ExtraData = serde_json::Map<String, AnyJson>;

/// Snapshot of the order being paid.
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct PaymentOrder {
    /// Local order id.
    #[builder(into)]
    pub id: String,
    /// Amount in the smallest currency unit, as Redsys expects it.
    #[builder(into)]
    pub amount: String,
    /// ISO 4217 alphabetic code.
    #[builder(into)]
    pub currency: String,
    #[builder(default)]
    pub extra_data: ExtraData,
}

/// Access to the application's orders.
pub trait PaymentBridge {
    type Error: std::error::Error;

    /// The order currently being paid, if one is loaded.
    fn order(&self) -> Option<PaymentOrder>;

    /// Locate the order a result notification refers to.
    ///
    /// Returns `Ok(None)` when no such order exists.
    fn find_order(
        &self,
        order_id: u64,
    ) -> impl Future<Output = Result<Option<PaymentOrder>, Self::Error>>;
}

/// Payment lifecycle hooks.
///
/// Every hook receives the bridge and the payment method in progress. All
/// hooks default to doing nothing.
pub trait PaymentEventDispatcher<B: PaymentBridge> {
    type Error: std::error::Error;

    /// Before the order is read from the bridge; listeners may load it here.
    fn on_order_load(
        &self,
        _bridge: &B,
        _method: &RedsysMethod,
    ) -> impl Future<Output = Result<(), Self::Error>> {
        async { Ok(()) }
    }

    /// The order exists and the hosted form is about to be built.
    fn on_order_created(
        &self,
        _bridge: &B,
        _method: &RedsysMethod,
    ) -> impl Future<Output = Result<(), Self::Error>> {
        async { Ok(()) }
    }

    /// A verified notification was matched to its order, whatever its outcome.
    fn on_order_done(
        &self,
        _bridge: &B,
        _method: &RedsysMethod,
    ) -> impl Future<Output = Result<(), Self::Error>> {
        async { Ok(()) }
    }

    /// Redsys authorised the payment.
    fn on_order_success(
        &self,
        _bridge: &B,
        _method: &RedsysMethod,
    ) -> impl Future<Output = Result<(), Self::Error>> {
        async { Ok(()) }
    }

    /// Redsys refused the payment.
    fn on_order_fail(
        &self,
        _bridge: &B,
        _method: &RedsysMethod,
    ) -> impl Future<Output = Result<(), Self::Error>> {
        async { Ok(()) }
    }
}
