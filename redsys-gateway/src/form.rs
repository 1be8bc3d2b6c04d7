//! Outbound request building: parameters, signature and hosted form.

use http::Method;
use redsys_core::{
    transport::SignedRequest,
    types::{
        AnyJson, MerchantParameters, OrderNumber, fields, format_order_number,
        format_order_number_at, translate_currency,
    },
};
use url::Url;

use crate::{
    bridge::PaymentOrder,
    config::RedsysConfig,
    errors::Error,
    routes::UrlFactory,
};

/// Extra data keys copied into optional request fields.
const OPTIONAL_FIELDS: [(&str, &str); 4] = [
    ("product_description", fields::MERCHANT_PRODUCT_DESCRIPTION),
    ("merchant_titular", fields::MERCHANT_TITULAR),
    ("merchant_name", fields::MERCHANT_MERCHANT_NAME),
    ("merchant_data", fields::MERCHANT_MERCHANT_DATA),
];

/// The form posted by the buyer's browser to the hosted payment page.
#[derive(Debug, Clone)]
pub struct RedsysForm {
    pub action: Url,
    pub method: Method,
    pub request: SignedRequest,
}

impl RedsysForm {
    /// Hidden fields in submission order.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        self.request.fields()
    }
}

/// Assembles and signs the request of an order.
#[derive(Debug, Clone, Copy)]
pub struct RedsysFormBuilder<'c, U: UrlFactory> {
    pub config: &'c RedsysConfig,
    pub urls: &'c U,
}

impl<'c, U: UrlFactory> RedsysFormBuilder<'c, U> {
    pub fn new(config: &'c RedsysConfig, urls: &'c U) -> Self {
        RedsysFormBuilder { config, urls }
    }

    /// Gateway parameters of `order`, with an order number for the current time.
    pub fn build_parameters(&self, order: &PaymentOrder) -> Result<MerchantParameters, Error> {
        self.parameters(order, format_order_number(&order.id))
    }

    /// Gateway parameters of `order`, with an order number for `timestamp`.
    pub fn build_parameters_at(
        &self,
        order: &PaymentOrder,
        timestamp: u64,
    ) -> Result<MerchantParameters, Error> {
        self.parameters(order, format_order_number_at(&order.id, timestamp))
    }

    fn parameters(
        &self,
        order: &PaymentOrder,
        number: OrderNumber,
    ) -> Result<MerchantParameters, Error> {
        let transaction_type = order
            .extra_data
            .get("transaction_type")
            .cloned()
            .unwrap_or(AnyJson::from(0));

        let mut params = MerchantParameters::new()
            .with(fields::MERCHANT_TRANSACTION_TYPE, transaction_type)
            .with(fields::MERCHANT_MERCHANT_URL, self.urls.merchant_url().as_str())
            .with(fields::MERCHANT_URL_OK, self.urls.url_ok(&order.id).as_str())
            .with(fields::MERCHANT_URL_KO, self.urls.url_ko(&order.id).as_str())
            .with(fields::MERCHANT_AMOUNT, order.amount.as_str())
            .with(fields::MERCHANT_ORDER, String::from(number))
            .with(fields::MERCHANT_MERCHANT_CODE, self.config.merchant_code.as_str())
            .with(fields::MERCHANT_CURRENCY, translate_currency(&order.currency)?)
            .with(fields::MERCHANT_TERMINAL, self.config.terminal.as_str());

        for (extra_key, field) in OPTIONAL_FIELDS {
            if let Some(value) = order.extra_data.get(extra_key) {
                params.insert(field, value.clone());
            }
        }

        Ok(params)
    }

    /// Sign the parameters of `order`.
    pub fn build(&self, order: &PaymentOrder) -> Result<SignedRequest, Error> {
        self.sign(self.build_parameters(order)?)
    }

    pub fn build_at(&self, order: &PaymentOrder, timestamp: u64) -> Result<SignedRequest, Error> {
        self.sign(self.build_parameters_at(order, timestamp)?)
    }

    fn sign(&self, params: MerchantParameters) -> Result<SignedRequest, Error> {
        let request = SignedRequest::sign(&params, &self.config.secret_key)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Redsys request signed: number='{}'",
            params.text(fields::MERCHANT_ORDER).unwrap_or_default()
        );

        Ok(request)
    }

    /// The hosted form of `order`.
    pub fn build_form(&self, order: &PaymentOrder) -> Result<RedsysForm, Error> {
        Ok(RedsysForm {
            action: self.config.url.clone(),
            method: Method::POST,
            request: self.build(order)?,
        })
    }
}
