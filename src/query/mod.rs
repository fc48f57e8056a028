//! Query module: filter sets, their evaluation, and the natural-language
//! parser that derives them from free text.

pub mod filters;
pub mod parser;

pub use filters::{matches, FilterSet, RawFilters};
pub use parser::QueryParser;
