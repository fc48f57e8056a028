//! Wire types for the Strings API
//!
//! Field names are snake_case to match the established wire format of the
//! service.

use crate::analyzer::{analyze, PropertyBundle};
use crate::query::FilterSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An analyzed, stored text value. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringRecord {
    /// Content fingerprint, identical to `properties.sha256_hash`
    pub id: String,
    pub value: String,
    pub properties: PropertyBundle,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyze `value` and stamp the record with `created_at`
    pub fn analyze(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = analyze(&value);
        Self {
            id: properties.fingerprint.clone(),
            value,
            properties,
            created_at,
        }
    }
}

/// Response for `GET /strings`
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: FilterSet,
}

/// Response for `GET /strings/filter-by-natural-language`
#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// The original query text and what the parser derived from it
#[derive(Debug, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterSet,
}

/// Query parameters for natural-language filtering
#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: Option<String>,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

/// API error detail
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
