//! Order number encoding.
//!
//! Redsys limits `Ds_Merchant_Order` to 12 characters. The local order id is
//! left-padded with zeros to 4 characters and suffixed with `T` plus the
//! reversed Unix timestamp, then cut to 12 characters. Reading the id back
//! splits on the first `T`.

use std::{
    fmt::Display,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::errors::MalformedPayload;

const MIN_ORDER_ID_LENGTH: usize = 4;
const MAX_ORDER_NUMBER_LENGTH: usize = 12;

/// A Redsys compliant order number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber(pub String);

impl OrderNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.0
    }
}

/// Format an order id using the current time as discriminator.
pub fn format_order_number(order_id: &str) -> OrderNumber {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format_order_number_at(order_id, now)
}

/// Format an order id using `timestamp` (Unix seconds) as discriminator.
///
/// ```
/// use redsys_core::types::format_order_number_at;
///
/// let number = format_order_number_at("7", 1_645_320_913);
/// assert_eq!(number.as_str(), "0007T3190235");
/// ```
pub fn format_order_number_at(order_id: &str, timestamp: u64) -> OrderNumber {
    let reversed: String = timestamp.to_string().chars().rev().collect();
    let number: String = format!("{order_id:0>width$}T{reversed}", width = MIN_ORDER_ID_LENGTH)
        .chars()
        .take(MAX_ORDER_NUMBER_LENGTH)
        .collect();
    OrderNumber(number)
}

/// Extract the local order id from a returned `Ds_Order`.
pub fn parse_order_id(ds_order: &str) -> Result<u64, MalformedPayload> {
    let head = ds_order.split('T').next().unwrap_or_default();
    head.parse::<u64>()
        .map_err(|_| MalformedPayload::InvalidOrderNumber(ds_order.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_ids_are_padded() {
        let number = format_order_number_at("7", 1_645_320_913);
        assert_eq!(number.as_str().len(), 12);
        assert!(number.as_str().starts_with("0007T"));
        assert_eq!(number.as_str(), "0007T3190235");
    }

    #[test]
    fn test_long_ids_are_truncated() {
        let number = format_order_number_at("123456789012345", 1_645_320_913);
        assert_eq!(number.as_str(), "123456789012");
    }

    #[test]
    fn test_four_digit_ids_are_not_padded() {
        let number = format_order_number_at("1234", 1_000_000_009);
        assert_eq!(number.as_str(), "1234T9000000");
    }

    #[test]
    fn test_current_time_number_is_twelve_chars() {
        let number = format_order_number("42");
        assert_eq!(number.as_str().chars().count(), 12);
        assert!(number.as_str().starts_with("0042T"));
    }

    #[test]
    fn test_parse_order_id() {
        assert_eq!(parse_order_id("0007T3190235461").unwrap(), 7);
        assert_eq!(parse_order_id("0042").unwrap(), 42);
        assert_eq!(parse_order_id("123456789012").unwrap(), 123_456_789_012);
    }

    #[test]
    fn test_parse_order_id_rejects_garbage() {
        assert!(matches!(
            parse_order_id("T1234"),
            Err(MalformedPayload::InvalidOrderNumber(_))
        ));
        assert!(parse_order_id("abcdT1234").is_err());
    }

    #[test]
    fn test_format_then_parse() {
        let number = format_order_number_at("42", 1_700_000_000);
        assert_eq!(parse_order_id(number.as_str()).unwrap(), 42);
    }
}
