//! Well-known Redsys field names.
//!
//! `Ds_Merchant_*` fields travel in outbound requests, the bare `Ds_*` fields
//! come back in result notifications.

pub const MERCHANT_AMOUNT: &str = "Ds_Merchant_Amount";
pub const MERCHANT_ORDER: &str = "Ds_Merchant_Order";
pub const MERCHANT_CURRENCY: &str = "Ds_Merchant_Currency";
pub const MERCHANT_MERCHANT_CODE: &str = "Ds_Merchant_MerchantCode";
pub const MERCHANT_TERMINAL: &str = "Ds_Merchant_Terminal";
pub const MERCHANT_TRANSACTION_TYPE: &str = "Ds_Merchant_TransactionType";
pub const MERCHANT_URL_OK: &str = "Ds_Merchant_UrlOK";
pub const MERCHANT_URL_KO: &str = "Ds_Merchant_UrlKO";
pub const MERCHANT_MERCHANT_URL: &str = "Ds_Merchant_MerchantURL";
pub const MERCHANT_PRODUCT_DESCRIPTION: &str = "Ds_Merchant_ProductDescription";
pub const MERCHANT_TITULAR: &str = "Ds_Merchant_Titular";
pub const MERCHANT_MERCHANT_NAME: &str = "Ds_Merchant_MerchantName";
pub const MERCHANT_MERCHANT_DATA: &str = "Ds_Merchant_MerchantData";

pub const ORDER: &str = "Ds_Order";
pub const RESPONSE: &str = "Ds_Response";

pub const SIGNATURE_VERSION: &str = "Ds_SignatureVersion";
pub const MERCHANT_PARAMETERS: &str = "Ds_MerchantParameters";
pub const SIGNATURE: &str = "Ds_Signature";

/// Fields every outbound request must carry before it is signed.
pub const REQUIRED_REQUEST_FIELDS: [&str; 9] = [
    MERCHANT_MERCHANT_CODE,
    MERCHANT_AMOUNT,
    MERCHANT_ORDER,
    MERCHANT_CURRENCY,
    MERCHANT_TERMINAL,
    MERCHANT_TRANSACTION_TYPE,
    MERCHANT_URL_OK,
    MERCHANT_URL_KO,
    MERCHANT_MERCHANT_URL,
];

/// Fields of a result notification envelope, in check order.
pub const RESULT_ENVELOPE_FIELDS: [&str; 3] = [MERCHANT_PARAMETERS, SIGNATURE, SIGNATURE_VERSION];
