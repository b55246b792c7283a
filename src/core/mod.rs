//! Core input types, rate table, normalization, and validation.
//!
//! Everything the allocation engine consumes is defined here: cent amounts,
//! the [`RateTable`] configuration value, invoice/labor/material inputs with
//! their builders, and the rules that check them before evaluation.

mod builder;
pub mod currencies;
mod error;
mod normalize;
mod rates;
mod types;
mod validation;

pub use builder::*;
pub use currencies::is_known_currency_code;
pub use error::*;
pub use normalize::*;
pub use rates::*;
pub use types::*;
pub use validation::*;
