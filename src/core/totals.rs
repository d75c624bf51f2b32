use rust_decimal::{Decimal, RoundingStrategy};

use super::error::InvoiceError;
use super::types::*;

/// Currency prefix used on every displayed amount.
pub const CURRENCY_PREFIX: &str = "$";

/// `quantity * unit_price` for one line.
pub fn line_total(quantity: i64, unit_price: Decimal) -> Result<Decimal, InvoiceError> {
    Decimal::from(quantity)
        .checked_mul(unit_price)
        .ok_or_else(|| {
            InvoiceError::Arithmetic(format!("line total {quantity} * {unit_price} overflows"))
        })
}

/// Compute subtotal, tax and total without any intermediate rounding.
///
/// Items must be complete; a missing quantity or price is reported as a
/// render error since validation should already have rejected it.
pub fn calculate_totals(
    items: &[LineItemRequest],
    tax_rate: Decimal,
) -> Result<InvoiceTotals, InvoiceError> {
    let mut subtotal = Decimal::ZERO;
    for (i, item) in items.iter().enumerate() {
        let (quantity, unit_price) = item_amounts(item, i)?;
        subtotal = subtotal
            .checked_add(line_total(quantity, unit_price)?)
            .ok_or_else(|| InvoiceError::Arithmetic("subtotal overflows".into()))?;
    }

    let tax = subtotal
        .checked_mul(tax_rate)
        .ok_or_else(|| InvoiceError::Arithmetic(format!("tax {subtotal} * {tax_rate} overflows")))?;
    let total = subtotal
        .checked_add(tax)
        .ok_or_else(|| InvoiceError::Arithmetic("total overflows".into()))?;

    Ok(InvoiceTotals {
        subtotal,
        tax,
        total,
    })
}

pub(crate) fn item_amounts(
    item: &LineItemRequest,
    index: usize,
) -> Result<(i64, Decimal), InvoiceError> {
    let quantity = item
        .quantity
        .ok_or_else(|| InvoiceError::Render(format!("items[{index}].quantity is missing")))?;
    let unit_price = item
        .unit_price
        .ok_or_else(|| InvoiceError::Render(format!("items[{index}].unit_price is missing")))?;
    Ok((quantity, unit_price))
}

/// Format an amount for display: two decimals, commercial rounding, `$` prefix.
pub fn format_money(amount: Decimal) -> String {
    format_money_with(amount, CURRENCY_PREFIX)
}

/// Like [`format_money`] with a custom currency prefix.
pub fn format_money_with(amount: Decimal, prefix: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    format!("{prefix}{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_is_padded_to_two_places() {
        assert_eq!(format_money(dec!(20)), "$20.00");
        assert_eq!(format_money(dec!(4.5)), "$4.50");
        assert_eq!(format_money(dec!(1833.481)), "$1833.48");
    }

    #[test]
    fn money_rounds_half_away_from_zero() {
        assert_eq!(format_money(dec!(0.125)), "$0.13");
        assert_eq!(format_money(dec!(-0.125)), "$-0.13");
    }

    #[test]
    fn negative_zero_is_not_displayed() {
        assert_eq!(format_money(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn totals_are_not_rounded_before_summing() {
        let items = vec![LineItemRequest::new("a", 3, dec!(0.333))];
        let totals = calculate_totals(&items, dec!(0.19)).unwrap();
        assert_eq!(totals.subtotal, dec!(0.999));
        assert_eq!(totals.tax, dec!(0.18981));
        assert_eq!(totals.total, dec!(1.18881));
        assert_eq!(format_money(totals.total), "$1.19");
    }

    #[test]
    fn negative_quantity_passes_through() {
        let items = vec![
            LineItemRequest::new("refund", -2, dec!(5)),
            LineItemRequest::new("fee", 1, dec!(3)),
        ];
        let totals = calculate_totals(&items, dec!(0)).unwrap();
        assert_eq!(totals.subtotal, dec!(-7));
        assert_eq!(totals.total, dec!(-7));
    }

    #[test]
    fn overflow_is_an_arithmetic_error() {
        let err = line_total(i64::MAX, Decimal::MAX).unwrap_err();
        assert!(matches!(err, InvoiceError::Arithmetic(_)));
    }

    #[test]
    fn missing_price_is_a_render_error() {
        let items = vec![LineItemRequest {
            description: Some("x".into()),
            quantity: Some(1),
            unit_price: None,
        }];
        assert!(matches!(
            calculate_totals(&items, dec!(0.1)),
            Err(InvoiceError::Render(_))
        ));
    }
}
