//! # Redsys Gateway
//!
//! Redsys hosted payment page integration: outbound signed requests and
//! validation of the asynchronous result notification.
//!
//! This crate provides [`RedsysManager`](manager::RedsysManager), which ties a
//! merchant account ([`RedsysConfig`](config::RedsysConfig)) to the
//! application through two seams: a [`PaymentBridge`](bridge::PaymentBridge)
//! giving access to orders, and a
//! [`PaymentEventDispatcher`](bridge::PaymentEventDispatcher) receiving the
//! payment lifecycle hooks.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use url_macro::url;
//! use redsys_gateway::{
//!     bridge::{PaymentBridge, PaymentEventDispatcher, PaymentOrder},
//!     config::{RedsysConfig, REDSYS_TEST_URL},
//!     manager::RedsysManager,
//!     routes::{RedirectionRoute, RedsysRoutes},
//! };
//!
//! struct Checkout(PaymentOrder);
//!
//! impl PaymentBridge for Checkout {
//!     type Error = Infallible;
//!
//!     fn order(&self) -> Option<PaymentOrder> {
//!         Some(self.0.clone())
//!     }
//!
//!     async fn find_order(&self, order_id: u64) -> Result<Option<PaymentOrder>, Infallible> {
//!         Ok((self.0.id == order_id.to_string()).then(|| self.0.clone()))
//!     }
//! }
//!
//! struct NoHooks;
//!
//! impl PaymentEventDispatcher<Checkout> for NoHooks {
//!     type Error = Infallible;
//! }
//!
//! let manager = RedsysManager::builder()
//!     .config(
//!         RedsysConfig::builder()
//!             .merchant_code("999008881")
//!             .secret_key("sq7HjrUOBfKmC576ILgskD5srU870gJ7")
//!             .url(REDSYS_TEST_URL.parse().unwrap())
//!             .build(),
//!     )
//!     .routes(
//!         RedsysRoutes::builder()
//!             .merchant_url(url!("https://shop.example/redsys/result"))
//!             .ok(RedirectionRoute::builder().route(url!("https://shop.example/ok")).build())
//!             .ko(RedirectionRoute::builder().route(url!("https://shop.example/ko")).build())
//!             .build(),
//!     )
//!     .bridge(Checkout(
//!         PaymentOrder::builder().id("42").amount("1000").currency("EUR").build(),
//!     ))
//!     .dispatcher(NoHooks)
//!     .build();
//!
//! let form = manager.form_builder().build_form(&manager.bridge.0).unwrap();
//! assert_eq!(form.fields()[0], ("Ds_SignatureVersion", "HMAC_SHA256_V1"));
//! ```
//!
//! ## Modules
//!
//! - [`manager`]: The [`RedsysManager`](manager::RedsysManager) and both payment flows.
//! - [`processor`]: The result notification state machine,
//!   [`ResultProcessor`](processor::ResultProcessor).
//! - [`form`]: Outbound parameters and the hosted [`RedsysForm`](form::RedsysForm).
//! - [`method`]: The [`RedsysMethod`](method::RedsysMethod) value handed to hooks.
//! - [`bridge`]: Order access and lifecycle hook traits.
//! - [`config`], [`routes`]: Merchant account and redirection routes.
//! - [`errors`]: Error types and HTTP error responses.
//!
//! ## Result Flow
//!
//! The flow run by [`RedsysManager::process_result`](manager::RedsysManager::process_result):
//!
//! 1. **Check Parameters**: `Ds_MerchantParameters`, `Ds_Signature` and
//!    `Ds_SignatureVersion` must all be posted.
//! 2. **Decode**: Decode the base64 JSON parameters.
//! 3. **Verify**: Recompute the signature keyed on `Ds_Order` and compare.
//! 4. **Find Order**: Ask the bridge for the order id encoded in `Ds_Order`.
//! 5. **Classify**: Fire "done", then "success" for `Ds_Response` in `0..=99`,
//!    otherwise "fail" followed by [`Error::PaymentFailed`](errors::Error::PaymentFailed).
//!
//! No hook fires and no order is looked up before the signature is verified.
//!
//! ## Error Handling
//!
//! [`ErrorResponse`](errors::ErrorResponse) implements `IntoResponse` for Axum
//! with the `axum` feature. It maps errors to HTTP status codes:
//!
//! - `400 Bad Request`: Missing fields, malformed payload, invalid signature
//!   or unsupported currency.
//! - `402 Payment Required`: Redsys refused the payment.
//! - `404 Not Found`: The order does not exist.
//! - `500 Internal Server Error`: Unusable secret, bridge or hook failures.

pub mod bridge;
pub mod config;
pub mod errors;
pub mod form;
pub mod manager;
pub mod method;
pub mod processor;
pub mod routes;
