use thiserror::Error;

/// Errors that can occur while validating, computing or rendering an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// The request is missing data or carries data of the wrong shape.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Layout or PDF encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Totals could not be computed (e.g. decimal overflow).
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

impl InvoiceError {
    /// True when the caller can fix the failure by correcting the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status the application boundary should answer with.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the invalid field (e.g. "tax_rate" or "items[2]").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error for a required field that is absent.
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("Missing required field: {field}");
        Self { field, message }
    }
}
