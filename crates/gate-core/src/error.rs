//! Quotation error types.

use thiserror::Error;

/// Errors that can occur in quotation operations.
///
/// The pricing path itself never fails: unknown products are skipped and bad
/// dimensions price as zero area. These errors cover the edges around it.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Gate type label not recognised.
    #[error("Unknown gate type: {0}")]
    UnknownGateType(String),

    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Gate not found on a customer.
    #[error("Gate not found: {0}")]
    GateNotFound(String),

    /// Invalid quantity for a selection.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),

    /// A product spec string like `14:2:double` could not be parsed.
    #[error("Invalid product selection '{0}'")]
    InvalidSelection(String),

    /// Catalog definition is malformed.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// One or more validation messages.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for QuoteError {
    fn from(e: toml::de::Error) -> Self {
        QuoteError::InvalidCatalog(e.to_string())
    }
}
