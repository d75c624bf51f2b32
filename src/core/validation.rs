use super::error::{InvoiceError, ValidationError};
use super::types::*;

/// Top-level fields every request must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "business_name",
    "business_address",
    "customer_name",
    "customer_address",
    "items",
    "tax_rate",
];

/// Message for an absent, non-list or empty `items` value.
pub const ITEMS_NOT_A_LIST: &str = "Items must be a non-empty list";
/// Message for an item lacking one of its three fields.
pub const ITEM_INCOMPLETE: &str =
    "Each item must contain 'description', 'quantity', and 'unit_price'";

/// Check a request for structural completeness before any computation.
///
/// Fails fast: the first problem found is returned. Rendering assumes this
/// has been called exactly once and succeeded.
pub fn validate(request: &InvoiceRequest) -> Result<(), InvoiceError> {
    check(request).map_err(|e| {
        log::warn!("rejected invoice request: {e}");
        InvoiceError::Validation(e)
    })
}

fn check(request: &InvoiceRequest) -> Result<(), ValidationError> {
    let present = [
        request.business_name.is_some(),
        request.business_address.is_some(),
        request.customer_name.is_some(),
        request.customer_address.is_some(),
        request.items.is_some(),
        request.tax_rate.is_some(),
    ];
    if let Some((field, _)) = REQUIRED_FIELDS
        .iter()
        .zip(present)
        .find(|(_, present)| !present)
    {
        return Err(ValidationError::missing(*field));
    }

    let items = request.items.as_deref().unwrap_or_default();
    if items.is_empty() {
        return Err(ValidationError::new("items", ITEMS_NOT_A_LIST));
    }

    for (i, item) in items.iter().enumerate() {
        if item.description.is_none() || item.quantity.is_none() || item.unit_price.is_none() {
            return Err(ValidationError::new(format!("items[{i}]"), ITEM_INCOMPLETE));
        }
    }

    Ok(())
}
