//! Collection of decomposed HTML form fields into an invoice request.
//!
//! Line items arrive as `item{N}_desc`, `item{N}_qty` and `item{N}_price`
//! with `N` starting at 1. Numbering may be sparse; items are ordered by
//! `N` and renumbered contiguously. An item exists when its `_desc` key is
//! present; a missing quantity defaults to 0 and a missing price to 0.00.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::core::{InvoiceError, InvoiceRequest, LineItemRequest, ValidationError};

/// Build a request from submitted form fields.
///
/// The business is not part of the form: the application resolves it from
/// its own records and passes name and address in.
///
/// ```
/// use rechnungsdruck::form::request_from_form;
///
/// let fields = [
///     ("customer_name", "John"),
///     ("customer_address", "2 Oak St"),
///     ("tax_rate", "0.1"),
///     ("item3_desc", "Gadget"),
///     ("item3_qty", "1"),
///     ("item3_price", "20"),
///     ("item1_desc", "Widget"),
///     ("item1_qty", "2"),
///     ("item1_price", "10.0"),
/// ];
/// let request = request_from_form(fields, "Acme", "1 Main St").unwrap();
/// let items = request.items.unwrap();
/// assert_eq!(items[0].description.as_deref(), Some("Widget"));
/// assert_eq!(items[1].description.as_deref(), Some("Gadget"));
/// ```
pub fn request_from_form<I, K, V>(
    fields: I,
    business_name: &str,
    business_address: &str,
) -> Result<InvoiceRequest, InvoiceError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let fields: HashMap<String, String> = fields
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();

    let items = collect_items(&fields)?;
    log::debug!("collected {} line item(s) from form", items.len());

    Ok(InvoiceRequest {
        business_name: Some(business_name.to_string()),
        business_address: Some(business_address.to_string()),
        customer_name: fields.get("customer_name").cloned(),
        customer_address: fields.get("customer_address").cloned(),
        items: Some(items),
        tax_rate: fields
            .get("tax_rate")
            .map(|v| parse_decimal("tax_rate", v))
            .transpose()?,
    })
}

/// Gather `item{N}_*` fields into line items ordered by `N`.
pub fn collect_items(fields: &HashMap<String, String>) -> Result<Vec<LineItemRequest>, ValidationError> {
    let indices: BTreeSet<u32> = fields.keys().filter_map(|k| item_index(k)).collect();

    indices
        .into_iter()
        .map(|n| -> Result<LineItemRequest, ValidationError> {
            let description = fields.get(&format!("item{n}_desc")).cloned();

            let qty_key = format!("item{n}_qty");
            let quantity = match fields.get(&qty_key) {
                Some(v) => v
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::new(&qty_key, "must be an integer"))?,
                None => 0,
            };

            let price_key = format!("item{n}_price");
            let unit_price = match fields.get(&price_key) {
                Some(v) => parse_decimal(&price_key, v)?,
                None => Decimal::ZERO,
            };

            Ok(LineItemRequest {
                description,
                quantity: Some(quantity),
                unit_price: Some(unit_price),
            })
        })
        .collect()
}

/// `N` for a key of the form `item{N}_desc`.
fn item_index(key: &str) -> Option<u32> {
    let digits = key.strip_prefix("item")?.strip_suffix("_desc")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|n| *n > 0)
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, ValidationError> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| ValidationError::new(field, "must be a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn index_parsing() {
        assert_eq!(item_index("item1_desc"), Some(1));
        assert_eq!(item_index("item12_desc"), Some(12));
        assert_eq!(item_index("item0_desc"), None);
        assert_eq!(item_index("item_desc"), None);
        assert_eq!(item_index("item1_qty"), None);
        assert_eq!(item_index("itemx_desc"), None);
        assert_eq!(item_index("item+1_desc"), None);
    }

    #[test]
    fn sparse_items_are_ordered_by_number() {
        let items = collect_items(&fields(&[
            ("item10_desc", "ten"),
            ("item2_desc", "two"),
            ("item7_desc", "seven"),
        ]))
        .unwrap();
        let names: Vec<_> = items.iter().filter_map(|i| i.description.as_deref()).collect();
        assert_eq!(names, ["two", "seven", "ten"]);
    }

    #[test]
    fn missing_amounts_default_to_zero() {
        let items = collect_items(&fields(&[("item1_desc", "free")])).unwrap();
        assert_eq!(items[0].quantity, Some(0));
        assert_eq!(items[0].unit_price, Some(Decimal::ZERO));
    }

    #[test]
    fn unparsable_quantity_names_the_key() {
        let err = collect_items(&fields(&[("item1_desc", "a"), ("item1_qty", "two")])).unwrap_err();
        assert_eq!(err.field, "item1_qty");
    }

    #[test]
    fn price_is_parsed_as_decimal() {
        let items =
            collect_items(&fields(&[("item1_desc", "a"), ("item1_price", " 19.99 ")])).unwrap();
        assert_eq!(items[0].unit_price, Some(dec!(19.99)));
    }

    #[test]
    fn missing_tax_rate_is_left_for_validation() {
        let req = request_from_form([("customer_name", "John")], "Acme", "1 Main St").unwrap();
        assert_eq!(req.tax_rate, None);
        assert_eq!(req.customer_address, None);
        assert_eq!(req.items, Some(Vec::new()));
    }

    #[test]
    fn bad_tax_rate_is_rejected() {
        let err = request_from_form([("tax_rate", "ten percent")], "Acme", "1 Main St").unwrap_err();
        assert!(err.is_client_error());
    }
}
