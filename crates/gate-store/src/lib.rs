//! Persistence and editing sessions for gate quotations.
//!
//! Customers are stored as one JSON array. A [`QuoteSession`] loads them,
//! tracks the customer and gate being edited, and tells subscribers about
//! every change.
//!
//! # Example
//!
//! ```rust
//! use gate_core::catalog::Catalog;
//! use gate_core::customer::CustomerDetails;
//! use gate_store::{MemoryStore, QuoteSession};
//!
//! let mut session = QuoteSession::open(MemoryStore::new(), Catalog::builtin());
//! session.subscribe(|event| println!("{:?}", event));
//!
//! let id = session.add_customer(CustomerDetails::new("Hofer"))?;
//! session.select_customer(&id)?;
//! # Ok::<(), gate_store::StoreError>(())
//! ```

pub mod debounce;
mod error;
pub mod session;
pub mod store;

pub use debounce::{Debouncer, DEFAULT_TIER_SWAP_DEBOUNCE};
pub use error::StoreError;
pub use session::{QuoteSession, SessionEvent, SubscriptionId, TIER_SWAP_MIN_AREA_CHANGE};
pub use store::{
    backup_file_name, export_json, parse_customers, CustomerStore, JsonFileStore, MemoryStore,
    DEFAULT_DATA_FILE,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CustomerStore, JsonFileStore, MemoryStore, QuoteSession, SessionEvent, StoreError,
    };
}
