//! Storage error types.

use gate_core::QuoteError;
use thiserror::Error;

/// Errors that can occur when persisting or editing customer data.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the data file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored or imported JSON could not be parsed or written.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The data parsed but is not a list of customers.
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// An operation needs a current customer but none is selected.
    #[error("No customer selected")]
    NoCurrentCustomer,

    /// An operation needs a gate being edited but there is none.
    #[error("No gate being edited")]
    NoCurrentGate,

    /// Domain rule violated.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}
