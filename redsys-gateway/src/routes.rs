//! Redirection routes handed to Redsys in the outbound request.

use bon::Builder;
use serde::Deserialize;
use url::Url;

/// Where Redsys should send the buyer or the notification for an order.
pub trait UrlFactory {
    /// Endpoint receiving the asynchronous result notification.
    fn merchant_url(&self) -> Url;

    /// Buyer redirection after a successful payment.
    fn url_ok(&self, order_id: &str) -> Url;

    /// Buyer redirection after a failed or cancelled payment.
    fn url_ko(&self, order_id: &str) -> Url;
}

/// A route that optionally carries the order id as an attribute.
///
/// ```
/// use redsys_gateway::routes::RedirectionRoute;
///
/// let route = RedirectionRoute::builder()
///     .route("https://shop.example/checkout/ok".parse().unwrap())
///     .append(true)
///     .append_field("order_id")
///     .build();
///
/// assert_eq!(
///     route.url_for("42").as_str(),
///     "https://shop.example/checkout/ok?order_id=42"
/// );
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedirectionRoute {
    pub route: Url,
    /// Whether the order id is appended.
    #[builder(default)]
    #[serde(default)]
    pub append: bool,
    /// Attribute name used when appending.
    #[builder(into, default = "order_id".to_string())]
    #[serde(default = "default_append_field")]
    pub append_field: String,
}

impl RedirectionRoute {
    /// Attributes to render the route with.
    pub fn route_attributes(&self, value: &str) -> Vec<(String, String)> {
        if self.append {
            vec![(self.append_field.clone(), value.to_string())]
        } else {
            Vec::new()
        }
    }

    /// The route rendered for `value`.
    pub fn url_for(&self, value: &str) -> Url {
        let mut url = self.route.clone();
        let attributes = self.route_attributes(value);
        if !attributes.is_empty() {
            url.query_pairs_mut().extend_pairs(attributes);
        }
        url
    }
}

fn default_append_field() -> String {
    "order_id".to_string()
}

/// The three routes of a Redsys integration.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedsysRoutes {
    pub merchant_url: Url,
    pub ok: RedirectionRoute,
    pub ko: RedirectionRoute,
}

impl UrlFactory for RedsysRoutes {
    fn merchant_url(&self) -> Url {
        self.merchant_url.clone()
    }

    fn url_ok(&self, order_id: &str) -> Url {
        self.ok.url_for(order_id)
    }

    fn url_ko(&self, order_id: &str) -> Url {
        self.ko.url_for(order_id)
    }
}
