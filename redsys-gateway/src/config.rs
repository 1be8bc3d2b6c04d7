use bon::Builder;
use redsys_core::types::MerchantSecret;
use serde::Deserialize;
use url::Url;

/// Redsys production hosted payment page.
pub const REDSYS_PRODUCTION_URL: &str = "https://sis.redsys.es/sis/realizarPago";
/// Redsys test environment hosted payment page.
pub const REDSYS_TEST_URL: &str = "https://sis-t.redsys.es:25443/sis/realizarPago";

/// Merchant account configuration.
///
/// ```
/// use redsys_gateway::config::{RedsysConfig, REDSYS_TEST_URL};
///
/// let config = RedsysConfig::builder()
///     .merchant_code("999008881")
///     .secret_key("sq7HjrUOBfKmC576ILgskD5srU870gJ7")
///     .url(REDSYS_TEST_URL.parse().unwrap())
///     .build();
///
/// assert_eq!(config.terminal, "1");
/// ```
#[derive(Builder, Debug, Clone, Deserialize)]
pub struct RedsysConfig {
    /// Merchant code (FUC) issued by the bank.
    #[builder(into)]
    pub merchant_code: String,
    /// Merchant secret, base64 encoded.
    #[builder(into)]
    pub secret_key: MerchantSecret,
    /// Terminal number.
    #[builder(into, default = default_terminal())]
    #[serde(default = "default_terminal")]
    pub terminal: String,
    /// Hosted payment page the form is posted to.
    pub url: Url,
}

fn default_terminal() -> String {
    "1".to_string()
}
