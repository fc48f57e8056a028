//! StringLens - text analysis with natural-language filtering
//!
//! StringLens ingests arbitrary text values, computes a fixed set of derived
//! properties for each, keeps them in memory, and answers queries by exact
//! value, by explicit filters, or by filters extracted from a free-text
//! query.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        HTTP API (axum)                        │
//! │   POST /strings   GET /strings   GET /strings/filter-by-...   │
//! └───────┬───────────────────┬──────────────────────┬───────────┘
//!         │                   │                      │
//!  ┌──────▼──────┐     ┌──────▼──────┐        ┌──────▼──────┐
//!  │  Analyzer   │     │ Raw filter  │        │ QueryParser │
//!  │ (properties,│     │  coercion   │        │ (ordered    │
//!  │  sha256 id) │     └──────┬──────┘        │  rules)     │
//!  └──────┬──────┘            │  FilterSet    └──────┬──────┘
//!         │            ┌──────▼──────────────────────▼──────┐
//!         └───────────►│   StringStore / StringRepository    │
//!                      │   (insertion-ordered, one writer)   │
//!                      └──────────────┬─────────────────────┘
//!                                     │
//!                              ┌──────▼──────┐
//!                              │  Evaluator  │
//!                              └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: derived properties of a text value
//! - [`query`]: filter sets, evaluation, and the natural-language parser
//! - [`strings`]: record repository, store, and HTTP handlers
//! - [`api`]: the combined HTTP application
//! - [`config`]: configuration management

pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod query;
pub mod strings;

pub use analyzer::{analyze, PropertyBundle};
pub use config::StringLensConfig;
pub use error::{Error, Result};
pub use query::{FilterSet, QueryParser};
pub use strings::{StringRecord, StringStore};
