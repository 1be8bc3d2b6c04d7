//! ISO 4217 currencies accepted by Redsys and their numeric codes.

use std::{fmt::Display, str::FromStr};

use crate::errors::Error;

/// A currency Redsys can charge in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
    Jpy,
    Ars,
    Cad,
    Clf,
    Cop,
    Inr,
    Mxn,
    Pen,
    Chf,
    Brl,
    Vef,
    Try,
}

impl Currency {
    pub const ALL: [Currency; 15] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Ars,
        Currency::Cad,
        Currency::Clf,
        Currency::Cop,
        Currency::Inr,
        Currency::Mxn,
        Currency::Pen,
        Currency::Chf,
        Currency::Brl,
        Currency::Vef,
        Currency::Try,
    ];

    pub fn iso_code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Ars => "ARS",
            Currency::Cad => "CAD",
            Currency::Clf => "CLF",
            Currency::Cop => "COP",
            Currency::Inr => "INR",
            Currency::Mxn => "MXN",
            Currency::Pen => "PEN",
            Currency::Chf => "CHF",
            Currency::Brl => "BRL",
            Currency::Vef => "VEF",
            Currency::Try => "TRY",
        }
    }

    /// The value Redsys expects in `Ds_Merchant_Currency`.
    pub fn numeric_code(&self) -> &'static str {
        match self {
            Currency::Eur => "978",
            Currency::Usd => "840",
            Currency::Gbp => "826",
            Currency::Jpy => "392",
            Currency::Ars => "032",
            Currency::Cad => "124",
            Currency::Clf => "152",
            Currency::Cop => "170",
            Currency::Inr => "356",
            Currency::Mxn => "484",
            Currency::Pen => "604",
            Currency::Chf => "756",
            Currency::Brl => "986",
            Currency::Vef => "937",
            Currency::Try => "949",
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.iso_code() == s)
            .ok_or_else(|| Error::UnsupportedCurrency(s.to_string()))
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iso_code())
    }
}

/// Translate an ISO 4217 alphabetic code into its Redsys numeric code.
///
/// ```
/// use redsys_core::types::translate_currency;
///
/// assert_eq!(translate_currency("EUR").unwrap(), "978");
/// assert!(translate_currency("XXX").is_err());
/// ```
pub fn translate_currency(iso_code: &str) -> Result<&'static str, Error> {
    iso_code.parse::<Currency>().map(|c| c.numeric_code())
}
