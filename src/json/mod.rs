//! JSON ingestion and serialization of invoice requests.
//!
//! Incoming bodies are converted field by field so that a value of the wrong
//! shape is reported with the name of the offending field. Absent keys and
//! `null` values stay `None` and are left for [`validate`] to report.
//!
//! [`validate`]: crate::core::validate

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::core::{
    ITEMS_NOT_A_LIST, InvoiceError, InvoiceRequest, LineItemRequest, ValidationError,
};

/// Build a request from a JSON body.
///
/// ```
/// use rechnungsdruck::json::request_from_json;
///
/// let request = request_from_json(r#"{
///     "business_name": "Acme", "business_address": "1 Main St",
///     "customer_name": "John", "customer_address": "2 Oak St",
///     "items": [{"description": "Widget", "quantity": 2, "unit_price": 10.0}],
///     "tax_rate": 0.1
/// }"#).unwrap();
/// assert_eq!(request.items.unwrap().len(), 1);
/// ```
pub fn request_from_json(body: &str) -> Result<InvoiceRequest, InvoiceError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ValidationError::new("body", format!("invalid JSON: {e}")))?;
    Ok(request_from_value(&value)?)
}

/// Build a request from an already parsed JSON value.
pub fn request_from_value(value: &Value) -> Result<InvoiceRequest, ValidationError> {
    if is_empty_body(value) {
        return Err(no_data());
    }
    let object = match value {
        Value::Object(map) => map,
        _ => {
            return Err(ValidationError::new(
                "body",
                "request body must be a JSON object",
            ));
        }
    };

    Ok(InvoiceRequest {
        business_name: string_field(object, "business_name", "business_name")?,
        business_address: string_field(object, "business_address", "business_address")?,
        customer_name: string_field(object, "customer_name", "customer_name")?,
        customer_address: string_field(object, "customer_address", "customer_address")?,
        items: items_field(object)?,
        tax_rate: decimal_field(object, "tax_rate", "tax_rate")?,
    })
}

/// Serialize a request, e.g. for the application's invoice record.
pub fn request_to_json(request: &InvoiceRequest) -> Result<String, InvoiceError> {
    serde_json::to_string(request)
        .map_err(|e| InvoiceError::Render(format!("failed to serialize request: {e}")))
}

/// `null`, `false`, zero and empty strings, arrays or objects carry no data.
fn is_empty_body(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn no_data() -> ValidationError {
    ValidationError::new("body", "No data provided")
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn string_field(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, ValidationError> {
    match present(object, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::new(path, "must be a string")),
    }
}

fn decimal_field(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<Decimal>, ValidationError> {
    let Some(value) = present(object, key) else {
        return Ok(None);
    };
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| ValidationError::new(path, "must be a number"))
}

fn integer_field(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<i64>, ValidationError> {
    let Some(value) = present(object, key) else {
        return Ok(None);
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| ValidationError::new(path, "must be an integer"))
}

fn items_field(object: &Map<String, Value>) -> Result<Option<Vec<LineItemRequest>>, ValidationError> {
    let Some(value) = present(object, "items") else {
        return Ok(None);
    };
    let Value::Array(elements) = value else {
        return Err(ValidationError::new("items", ITEMS_NOT_A_LIST));
    };

    elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            let Value::Object(item) = element else {
                return Err(ValidationError::new(
                    format!("items[{i}]"),
                    "each item must be an object",
                ));
            };
            Ok(LineItemRequest {
                description: string_field(item, "description", &format!("items[{i}].description"))?,
                quantity: integer_field(item, "quantity", &format!("items[{i}].quantity"))?,
                unit_price: decimal_field(item, "unit_price", &format!("items[{i}].unit_price"))?,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Parse plain or scientific decimal notation.
fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
