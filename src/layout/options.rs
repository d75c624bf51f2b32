use serde::{Deserialize, Serialize};

use crate::core::InvoiceError;

/// Page geometry and typography for the invoice layout.
///
/// Lengths are millimetres, font sizes are points. [`Default`] is the fixed
/// A4 style every invoice is rendered with unless the caller overrides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    /// Distance from the bottom edge at which a new page is started.
    pub margin_bottom: f32,
    /// Height of every text line and table row.
    pub line_height: f32,
    /// Vertical space after the business header and the customer block.
    pub section_gap: f32,
    /// Vertical space between the item table and the totals.
    pub totals_gap: f32,
    /// Horizontal padding inside left- and right-aligned cells.
    pub cell_padding: f32,
    /// Description, Quantity, Unit Price and Total column widths.
    pub column_widths: [f32; 4],
    pub totals_label_width: f32,
    pub totals_value_width: f32,
    pub business_name_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub currency_prefix: String,
    /// Document title written to the PDF info dictionary.
    pub title: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 10.0,
            margin_right: 10.0,
            margin_top: 10.0,
            margin_bottom: 20.0,
            line_height: 10.0,
            section_gap: 10.0,
            totals_gap: 5.0,
            cell_padding: 1.0,
            column_widths: [80.0, 30.0, 40.0, 40.0],
            totals_label_width: 150.0,
            totals_value_width: 40.0,
            business_name_size: 16.0,
            heading_size: 14.0,
            body_size: 12.0,
            currency_prefix: "$".to_string(),
            title: "Invoice".to_string(),
        }
    }
}

impl LayoutOptions {
    /// Width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest cursor position a line may end at.
    pub fn break_line(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    /// Height of the totals footer: gap plus subtotal, tax and total lines.
    pub fn totals_block(&self) -> f32 {
        self.totals_gap + 3.0 * self.line_height
    }

    /// Reject geometry that cannot hold a table header and one row, or the
    /// totals block, on an empty page.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("line_height", self.line_height),
            ("business_name_size", self.business_name_size),
            ("heading_size", self.heading_size),
            ("body_size", self.body_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvoiceError::Render(format!(
                    "layout option {name} must be positive, got {value}"
                )));
            }
        }
        if self.column_widths.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
            return Err(InvoiceError::Render(
                "layout column widths must be positive".into(),
            ));
        }
        if self.content_width() <= 0.0 {
            return Err(InvoiceError::Render(
                "horizontal margins leave no room for content".into(),
            ));
        }
        if self.margin_top + 2.0 * self.line_height > self.break_line() {
            return Err(InvoiceError::Render(format!(
                "page height {} cannot hold a table header and one row",
                self.page_height
            )));
        }
        if self.margin_top + self.totals_block() > self.break_line() {
            return Err(InvoiceError::Render(format!(
                "page height {} cannot hold the totals block",
                self.page_height
            )));
        }
        Ok(())
    }
}
