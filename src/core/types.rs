use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An invoice request as received from the application layer.
///
/// Every field is optional so that an incomplete request can be represented
/// and rejected by [`validate`](super::validate) with a message naming the
/// missing field. Once validated, the request is treated as immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    /// Line items in print order.
    pub items: Option<Vec<LineItemRequest>>,
    /// Tax rate as a decimal fraction (0.1 = 10 %).
    pub tax_rate: Option<Decimal>,
}

impl InvoiceRequest {
    /// Start a fully populated request with no items; add them with [`Self::item`].
    pub fn new(
        business_name: impl Into<String>,
        business_address: impl Into<String>,
        customer_name: impl Into<String>,
        customer_address: impl Into<String>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            business_name: Some(business_name.into()),
            business_address: Some(business_address.into()),
            customer_name: Some(customer_name.into()),
            customer_address: Some(customer_address.into()),
            items: Some(Vec::new()),
            tax_rate: Some(tax_rate),
        }
    }

    /// Append a complete line item.
    pub fn item(mut self, description: impl Into<String>, quantity: i64, unit_price: Decimal) -> Self {
        self.items
            .get_or_insert_with(Vec::new)
            .push(LineItemRequest::new(description, quantity, unit_price));
        self
    }
}

/// One billable entry of an [`InvoiceRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub description: Option<String>,
    /// Quantity; zero and negative values are passed through arithmetic.
    pub quantity: Option<i64>,
    /// Price per unit.
    pub unit_price: Option<Decimal>,
}

impl LineItemRequest {
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: Decimal) -> Self {
        Self {
            description: Some(description.into()),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }
}

/// Unrounded invoice totals. Rounding happens only when amounts are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all line totals.
    pub subtotal: Decimal,
    /// `subtotal * tax_rate`.
    pub tax: Decimal,
    /// `subtotal + tax`.
    pub total: Decimal,
}

/// A finished invoice document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvoice {
    /// PDF bytes.
    pub bytes: Vec<u8>,
    /// Number of pages produced by the layout.
    pub page_count: usize,
}

impl RenderedInvoice {
    /// Media type for HTTP downloads.
    pub const MIME_TYPE: &'static str = "application/pdf";

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
