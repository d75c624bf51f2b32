//! Deterministic page layout for the invoice document.
//!
//! [`layout_invoice`] turns a validated request into a [`Layout`]: a list of
//! pages holding positioned text runs and cell borders in millimetres from
//! the top-left corner. The PDF encoder only translates this model; every
//! placement and page-break decision is made here.
//!
//! Sections are laid out in fixed order (business header, customer block,
//! item table, totals footer), each consuming and returning a layout context.

mod context;
pub mod metrics;
mod options;

pub use options::LayoutOptions;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    InvoiceError, InvoiceRequest, InvoiceTotals, calculate_totals, format_money_with,
    item_amounts, line_total,
};
use context::{Cell, LayoutContext};

/// The two faces used by the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    /// PostScript name of the standard Type 1 font.
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    /// Name of the font in a page resource dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

/// Horizontal alignment of text within its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A run of text on one baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Left edge of the text.
    pub x: f32,
    /// Baseline, measured from the top of the page.
    pub baseline: f32,
    pub text: String,
    pub font: FontStyle,
    /// Font size in points.
    pub size: f32,
}

/// A stroked cell border. `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Text(TextRun),
    Border(Rect),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(run) => Some(run),
            Element::Border(_) => None,
        })
    }

    pub fn borders(&self) -> impl Iterator<Item = &Rect> {
        self.elements.iter().filter_map(|e| match e {
            Element::Border(rect) => Some(rect),
            Element::Text(_) => None,
        })
    }

    /// Visible text grouped into lines: consecutive runs sharing a baseline.
    pub fn lines(&self) -> Vec<Vec<&str>> {
        let mut lines: Vec<Vec<&str>> = Vec::new();
        let mut last_baseline = None;
        for run in self.text_runs() {
            match lines.last_mut() {
                Some(line) if last_baseline == Some(run.baseline) => line.push(run.text.as_str()),
                _ => lines.push(vec![run.text.as_str()]),
            }
            last_baseline = Some(run.baseline);
        }
        lines
    }
}

/// The finished, device-independent invoice layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<Page>,
    /// Totals printed in the footer.
    pub totals: InvoiceTotals,
    /// Document title for metadata.
    pub title: String,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every visible line of the document, cells joined with `" | "`.
    pub fn text_lines(&self) -> Vec<String> {
        self.pages
            .iter()
            .flat_map(|p| p.lines())
            .map(|line| line.join(" | "))
            .collect()
    }
}

/// One printed row of the item table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableRow {
    description: String,
    quantity: String,
    unit_price: String,
    total: String,
}

const TABLE_HEADER: [&str; 4] = ["Description", "Quantity", "Unit Price", "Total"];
const COLUMN_ALIGN: [Align; 4] = [Align::Left, Align::Center, Align::Center, Align::Center];

/// Lay out a validated request with the given options.
///
/// Missing fields are reported as [`InvoiceError::Render`]; callers are
/// expected to have run [`validate`](crate::core::validate) first.
pub fn layout_invoice(
    request: &InvoiceRequest,
    options: &LayoutOptions,
) -> Result<Layout, InvoiceError> {
    options.validate()?;

    let business_name = required(&request.business_name, "business_name")?;
    let business_address = required(&request.business_address, "business_address")?;
    let customer_name = required(&request.customer_name, "customer_name")?;
    let customer_address = required(&request.customer_address, "customer_address")?;
    let items = required(&request.items, "items")?;
    let tax_rate = required(&request.tax_rate, "tax_rate")?;

    let totals = calculate_totals(items, *tax_rate)?;
    let prefix = options.currency_prefix.as_str();
    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let description = item.description.as_ref().ok_or_else(|| {
                InvoiceError::Render(format!("items[{i}].description is missing"))
            })?;
            let (quantity, unit_price) = item_amounts(item, i)?;
            Ok(TableRow {
                description: description.clone(),
                quantity: quantity.to_string(),
                unit_price: format_money_with(unit_price, prefix),
                total: format_money_with(line_total(quantity, unit_price)?, prefix),
            })
        })
        .collect::<Result<Vec<_>, InvoiceError>>()?;

    let ctx = LayoutContext::new(options);
    let ctx = business_header(ctx, business_name, business_address);
    let ctx = customer_block(ctx, customer_name, customer_address);
    let ctx = item_table(ctx, &rows);
    let ctx = totals_footer(ctx, &totals);
    let pages = ctx.finish();

    log::debug!(
        "laid out invoice with {} items on {} page(s), total {}",
        rows.len(),
        pages.len(),
        totals.total
    );

    Ok(Layout {
        page_width: options.page_width,
        page_height: options.page_height,
        pages,
        totals,
        title: options.title.clone(),
    })
}

fn required<'a, T>(value: &'a Option<T>, field: &str) -> Result<&'a T, InvoiceError> {
    value
        .as_ref()
        .ok_or_else(|| InvoiceError::Render(format!("{field} is missing from a validated request")))
}

fn business_header<'o>(ctx: LayoutContext<'o>, name: &str, address: &str) -> LayoutContext<'o> {
    let opts = ctx.options();
    ctx.line(name, FontStyle::Bold, opts.business_name_size)
        .line(address, FontStyle::Regular, opts.body_size)
        .gap(opts.section_gap)
}

fn customer_block<'o>(ctx: LayoutContext<'o>, name: &str, address: &str) -> LayoutContext<'o> {
    let opts = ctx.options();
    ctx.line("Invoice To:", FontStyle::Bold, opts.heading_size)
        .line(name, FontStyle::Regular, opts.body_size)
        .line(address, FontStyle::Regular, opts.body_size)
        .gap(opts.section_gap)
}

fn table_cells<'a>(texts: [&'a str; 4], font: FontStyle, opts: &LayoutOptions) -> [Cell<'a>; 4] {
    std::array::from_fn(|i| Cell {
        width: opts.column_widths[i],
        text: texts[i],
        font,
        size: opts.body_size,
        align: COLUMN_ALIGN[i],
        border: true,
    })
}

fn table_header(ctx: LayoutContext<'_>) -> LayoutContext<'_> {
    let opts = ctx.options();
    let cells = table_cells(TABLE_HEADER, FontStyle::Bold, opts);
    ctx.row(&cells, opts.line_height)
}

/// Header row followed by one row per item. A row that would cross the
/// bottom margin moves to a new page, which repeats the header.
fn item_table<'o>(ctx: LayoutContext<'o>, rows: &[TableRow]) -> LayoutContext<'o> {
    let opts = ctx.options();
    let height = opts.line_height;

    // Never leave the header alone at the bottom of a page.
    let mut ctx = table_header(ctx.ensure(2.0 * height));
    for row in rows {
        if !ctx.fits(height) {
            ctx = table_header(ctx.new_page());
        }
        let texts = [
            row.description.as_str(),
            row.quantity.as_str(),
            row.unit_price.as_str(),
            row.total.as_str(),
        ];
        ctx = ctx.row(&table_cells(texts, FontStyle::Regular, opts), height);
    }
    ctx
}

/// Subtotal, tax and total lines, kept together on one page.
fn totals_footer<'o>(ctx: LayoutContext<'o>, totals: &InvoiceTotals) -> LayoutContext<'o> {
    let opts = ctx.options();
    let height = opts.line_height;
    let block = opts.totals_block();

    let mut ctx = if ctx.fits(block) {
        ctx.gap(opts.totals_gap)
    } else {
        ctx.new_page()
    };

    let lines: [(&str, Decimal); 3] = [
        ("Subtotal:", totals.subtotal),
        ("Tax:", totals.tax),
        ("Total:", totals.total),
    ];
    for (label, amount) in lines {
        let value = format_money_with(amount, &opts.currency_prefix);
        let cells = [
            Cell {
                width: opts.totals_label_width,
                text: label,
                font: FontStyle::Bold,
                size: opts.body_size,
                align: Align::Right,
                border: false,
            },
            Cell {
                width: opts.totals_value_width,
                text: &value,
                font: FontStyle::Bold,
                size: opts.body_size,
                align: Align::Center,
                border: false,
            },
        ];
        ctx = ctx.row(&cells, height);
    }
    ctx
}
