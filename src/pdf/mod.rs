//! PDF rendering of the invoice layout.
//!
//! Pages use the standard Helvetica fonts, so no font data is embedded and
//! the output stays small and deterministic.

mod encode;
mod extract;

pub use encode::encode_layout;
pub use extract::extract_text;

use crate::core::{InvoiceError, InvoiceRequest, RenderedInvoice};
use crate::layout::{LayoutOptions, layout_invoice};

/// Value of the `Producer` entry in the document info dictionary.
pub const PRODUCER: &str = concat!("rechnungsdruck ", env!("CARGO_PKG_VERSION"));

/// Render a validated request with the default invoice style.
///
/// ```
/// use rechnungsdruck::core::*;
/// use rechnungsdruck::pdf;
/// use rust_decimal_macros::dec;
///
/// let request = InvoiceRequest::new("Acme", "1 Main St", "John", "2 Oak St", dec!(0.1))
///     .item("Widget", 2, dec!(10.0));
/// validate(&request).unwrap();
///
/// let invoice = pdf::render(&request).unwrap();
/// assert!(invoice.bytes.starts_with(b"%PDF"));
/// assert_eq!(invoice.page_count, 1);
/// ```
pub fn render(request: &InvoiceRequest) -> Result<RenderedInvoice, InvoiceError> {
    render_with(request, &LayoutOptions::default())
}

/// Render a validated request with explicit layout options.
pub fn render_with(
    request: &InvoiceRequest,
    options: &LayoutOptions,
) -> Result<RenderedInvoice, InvoiceError> {
    let layout = layout_invoice(request, options)?;
    let bytes = encode_layout(&layout)?;
    log::debug!(
        "rendered invoice: {} page(s), {} bytes",
        layout.page_count(),
        bytes.len()
    );
    Ok(RenderedInvoice {
        bytes,
        page_count: layout.page_count(),
    })
}
