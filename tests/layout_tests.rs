//! Page layout: section order, table rows, pagination and the totals footer.

use rechnungsdruck::core::*;
use rechnungsdruck::layout::*;
use rust_decimal_macros::dec;

fn acme() -> InvoiceRequest {
    InvoiceRequest::new("Acme", "1 Main St", "John", "2 Oak St", dec!(0.1))
        .item("Widget", 2, dec!(10.0))
        .item("Gadget", 1, dec!(20.0))
}

fn with_items(count: usize) -> InvoiceRequest {
    (1..=count).fold(
        InvoiceRequest::new("Acme", "1 Main St", "John", "2 Oak St", dec!(0.19)),
        |req, i| req.item(format!("Service {i:03}"), i as i64, dec!(12.50)),
    )
}

fn layout(request: &InvoiceRequest) -> Layout {
    layout_invoice(request, &LayoutOptions::default()).unwrap()
}

/// Descriptions of the table rows, in document order across pages.
fn row_descriptions(layout: &Layout) -> Vec<String> {
    layout
        .pages
        .iter()
        .flat_map(|p| p.lines())
        .filter(|line| line.len() == 4 && line[0] != "Description")
        .map(|line| line[0].to_string())
        .collect()
}

fn count_lines_starting_with(layout: &Layout, label: &str) -> usize {
    layout
        .text_lines()
        .iter()
        .filter(|l| l.starts_with(label))
        .count()
}

#[test]
fn acme_document_text() {
    let layout = layout(&acme());
    assert_eq!(layout.page_count(), 1);
    insta::assert_snapshot!(layout.text_lines().join("\n"), @r"
    Acme
    1 Main St
    Invoice To:
    John
    2 Oak St
    Description | Quantity | Unit Price | Total
    Widget | 2 | $10.00 | $20.00
    Gadget | 1 | $20.00 | $20.00
    Subtotal: | $40.00
    Tax: | $4.00
    Total: | $44.00
    ");
}

#[test]
fn header_uses_bold_large_name() {
    let layout = layout(&acme());
    let runs: Vec<&TextRun> = layout.pages[0].text_runs().collect();
    assert_eq!(runs[0].text, "Acme");
    assert_eq!(runs[0].font, FontStyle::Bold);
    assert_eq!(runs[0].size, 16.0);
    assert_eq!(runs[1].text, "1 Main St");
    assert_eq!(runs[1].font, FontStyle::Regular);
    assert_eq!(runs[1].size, 12.0);
    assert_eq!(runs[2].text, "Invoice To:");
    assert_eq!(runs[2].font, FontStyle::Bold);
    assert_eq!(runs[2].size, 14.0);
}

#[test]
fn sections_advance_downwards() {
    let layout = layout(&acme());
    let baselines: Vec<f32> = layout.pages[0].text_runs().map(|r| r.baseline).collect();
    assert!(baselines.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn table_cells_are_bordered_with_fixed_widths() {
    let layout = layout(&acme());
    let borders: Vec<&Rect> = layout.pages[0].borders().collect();
    // Header plus two item rows.
    assert_eq!(borders.len(), 12);
    for row in borders.chunks(4) {
        let widths: Vec<f32> = row.iter().map(|r| r.width).collect();
        assert_eq!(widths, [80.0, 30.0, 40.0, 40.0]);
        assert!(row.iter().all(|r| r.height == 10.0 && r.y == row[0].y));
        assert_eq!(row[0].x, 10.0);
        assert_eq!(row[3].x, 160.0);
    }
}

#[test]
fn totals_values_are_right_of_labels() {
    let layout = layout(&acme());
    let runs: Vec<&TextRun> = layout.pages[0].text_runs().collect();
    let label = runs.iter().find(|r| r.text == "Total:").unwrap();
    let value = runs.iter().find(|r| r.text == "$44.00").unwrap();
    assert_eq!(label.baseline, value.baseline);
    // Label ends inside the 150 mm cell, value is centered in the next 40 mm.
    let label_end = label.x + metrics::text_width("Total:", FontStyle::Bold, 12.0);
    assert!((label_end - 159.0).abs() < 1e-3);
    assert!(value.x > 160.0 && value.x < 200.0);
}

#[test]
fn rows_follow_input_order() {
    let layout = layout(&with_items(40));
    let expected: Vec<String> = (1..=40).map(|i| format!("Service {i:03}")).collect();
    assert_eq!(row_descriptions(&layout), expected);
}

#[test]
fn long_table_spans_pages() {
    let layout = layout(&with_items(60));
    // 18 rows on the first page, 25 on each continuation page.
    assert_eq!(layout.page_count(), 3);
    assert_eq!(count_lines_starting_with(&layout, "Description"), 3);
    assert_eq!(count_lines_starting_with(&layout, "Subtotal:"), 1);
    assert_eq!(count_lines_starting_with(&layout, "Total:"), 1);
}

#[test]
fn totals_follow_last_row() {
    let layout = layout(&with_items(30));
    let lines = layout.text_lines();
    let last_row = lines
        .iter()
        .rposition(|l| l.starts_with("Service 030"))
        .unwrap();
    assert!(lines[last_row + 1].starts_with("Subtotal:"));
    assert!(lines[last_row + 2].starts_with("Tax:"));
    assert!(lines[last_row + 3].starts_with("Total:"));
    assert_eq!(last_row + 4, lines.len());

    let last_page = layout.pages.last().unwrap();
    assert!(last_page.text_runs().any(|r| r.text == "Total:"));
}

#[test]
fn no_row_crosses_the_bottom_margin() {
    let opts = LayoutOptions::default();
    let layout = layout(&with_items(100));
    for page in &layout.pages {
        for rect in page.borders() {
            assert!(rect.y + rect.height <= opts.page_height - opts.margin_bottom);
            assert!(rect.y >= opts.margin_top);
        }
    }
}

#[test]
fn totals_block_moves_whole_to_next_page() {
    // 16 rows leave 27 mm on the first page, less than the 35 mm block.
    let layout = layout(&with_items(16));
    assert_eq!(layout.page_count(), 2);
    let second: Vec<&str> = layout.pages[1].text_runs().map(|r| r.text.as_str()).collect();
    assert_eq!(second[0], "Subtotal:");
    assert!(second.contains(&"Total:"));
}

#[test]
fn layout_is_deterministic() {
    let req = with_items(25);
    assert_eq!(layout(&req), layout(&req));
}

#[test]
fn layout_totals_match_calculation() {
    let req = with_items(5);
    let layout = layout(&req);
    // 12.50 * (1 + 2 + 3 + 4 + 5)
    assert_eq!(layout.totals.subtotal, dec!(187.50));
    assert_eq!(layout.totals.tax, dec!(35.625));
    assert_eq!(layout.totals.total, dec!(223.125));
    assert!(layout.text_lines().contains(&"Tax: | $35.63".to_string()));
    assert!(layout.text_lines().contains(&"Total: | $223.13".to_string()));
}

#[test]
fn smaller_page_holds_fewer_rows() {
    let opts = LayoutOptions {
        page_height: 150.0,
        ..LayoutOptions::default()
    };
    let small = layout_invoice(&with_items(20), &opts).unwrap();
    let a4 = layout(&with_items(20));
    assert!(small.page_count() > a4.page_count());
    assert_eq!(row_descriptions(&small).len(), 20);
}

#[test]
fn unvalidated_request_fails_with_render_error() {
    let mut req = acme();
    if let Some(items) = req.items.as_mut() {
        items[0].description = None;
    }
    let err = layout_invoice(&req, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, InvoiceError::Render(_)));
    assert!(!err.is_client_error());
}

#[test]
fn page_too_short_for_totals_is_rejected() {
    let opts = LayoutOptions {
        page_height: 58.0,
        line_height: 14.0,
        ..LayoutOptions::default()
    };
    let err = layout_invoice(&acme(), &opts).unwrap_err();
    assert!(matches!(err, InvoiceError::Render(_)));
}

#[test]
fn totals_on_shortest_accepted_page_stay_above_margin() {
    // 10 + 5 + 3 * 10 = 45 mm of totals block against a 45 mm break line.
    let opts = LayoutOptions {
        page_height: 65.0,
        ..LayoutOptions::default()
    };
    let layout = layout_invoice(&with_items(3), &opts).unwrap();
    for page in &layout.pages {
        for run in page.text_runs() {
            assert!(run.baseline < opts.break_line());
        }
    }
    assert_eq!(count_lines_starting_with(&layout, "Total:"), 1);
}
