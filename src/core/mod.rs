//! Core invoice request types, validation and totals.
//!
//! All monetary values are [`rust_decimal::Decimal`]; quantities are `i64`.

mod error;
mod totals;
mod types;
mod validation;

pub use error::*;
pub use totals::*;
pub use types::*;
pub use validation::*;

pub(crate) use totals::item_amounts;
