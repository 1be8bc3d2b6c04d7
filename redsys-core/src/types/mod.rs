//! Core types used across the Redsys crates.

mod common;
mod currency;
pub mod fields;
mod order;
mod params;
mod secret;

pub use common::*;
pub use currency::*;
pub use order::*;
pub use params::*;
pub use secret::*;
