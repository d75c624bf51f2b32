//! # rechnungsdruck
//!
//! Validation, totals and deterministic PDF layout for invoices in one
//! fixed visual style: business header, customer block, bordered item
//! table and a totals footer, paginated when the table outgrows a page.
//!
//! All monetary values use [`rust_decimal::Decimal`] and are rounded only
//! for display. The crate never touches sessions, databases or the
//! filesystem; callers own persistence of the rendered bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use rechnungsdruck::core::*;
//! use rust_decimal_macros::dec;
//!
//! let request = InvoiceRequest::new("Acme", "1 Main St", "John", "2 Oak St", dec!(0.1))
//!     .item("Widget", 2, dec!(10.0))
//!     .item("Gadget", 1, dec!(20.0));
//!
//! validate(&request).unwrap();
//!
//! let totals = calculate_totals(request.items.as_deref().unwrap(), dec!(0.1)).unwrap();
//! assert_eq!(format_money(totals.total), "$44.00");
//!
//! # #[cfg(feature = "pdf")]
//! let invoice = rechnungsdruck::pdf::render(&request).unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Request types, validation, totals, page layout |
//! | `pdf` (default) | PDF encoding via `lopdf` |
//! | `json` | Requests from JSON bodies, serialization for records |
//! | `form` | Requests from `item{N}_*` HTML form fields |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod layout;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "form")]
pub mod form;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "pdf")]
pub use crate::pdf::render;
