//! Strings module — analyzed text records
//!
//! Provides REST endpoints for storing text values together with their
//! derived properties, and for retrieving them by exact value, by
//! query-parameter filters, or by a natural-language query. Records live in
//! memory for the lifetime of the process.

pub mod handler;
pub mod repository;
pub mod store;
pub mod types;

pub use handler::{strings_router, StringsState};
pub use repository::StringRepository;
pub use store::StringStore;
pub use types::StringRecord;
