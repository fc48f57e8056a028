//! HTTP handlers for the Strings API
//!
//! Provides 5 REST endpoints:
//! - POST   /strings                              — analyze and store a value
//! - GET    /strings                              — list with query-parameter filters
//! - GET    /strings/filter-by-natural-language   — list with a free-text query
//! - GET    /strings/:value                       — fetch by exact value
//! - DELETE /strings/:value                       — delete by exact value

use crate::error::Error;
use crate::query::{FilterSet, QueryParser, RawFilters};
use crate::strings::store::StringStore;
use crate::strings::types::*;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

/// Shared state for string handlers
#[derive(Clone)]
pub struct StringsState {
    pub store: Arc<StringStore>,
    pub parser: Arc<QueryParser>,
}

/// Create the strings router
pub fn strings_router(state: StringsState) -> Router {
    Router::new()
        .route("/strings", get(list_strings).post(create_string))
        // Static segment takes priority over the `:value` capture below
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language),
        )
        .route("/strings/:value", get(get_string).delete(delete_string))
        .with_state(state)
}

// =============================================================================
// Error mapping
// =============================================================================

/// A core error on its way out as an HTTP response
pub struct HandlerError(Error);

impl From<Error> for HandlerError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            Error::MissingField(_)
            | Error::MalformedBody(_)
            | Error::UnparseableQuery(_)
            | Error::InvalidFilterValue { .. } => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::DuplicateValue => (StatusCode::CONFLICT, "CONFLICT"),
            Error::TypeMismatch { .. } | Error::ConflictingFilters(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY")
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiError::internal(
                        "An error occurred while processing the request",
                    )),
                )
                    .into_response();
            }
        };
        (status, Json(ApiError::new(code, self.0.to_string()))).into_response()
    }
}

type HandlerResult<T> = std::result::Result<T, HandlerError>;

// =============================================================================
// Handlers
// =============================================================================

/// POST /strings
async fn create_string(
    State(state): State<StringsState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> HandlerResult<impl IntoResponse> {
    let Json(body) = body.map_err(|e| Error::MalformedBody(e.body_text()))?;
    let value = match body.get("value") {
        None | Some(Value::Null) => return Err(Error::MissingField("value".to_string()).into()),
        Some(Value::String(value)) => value.clone(),
        Some(_) => {
            return Err(Error::TypeMismatch {
                field: "value".to_string(),
                expected: "string".to_string(),
            }
            .into())
        }
    };

    let record = state.store.create(value).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /strings
async fn list_strings(
    State(state): State<StringsState>,
    raw: std::result::Result<Query<RawFilters>, QueryRejection>,
) -> HandlerResult<Json<ListResponse>> {
    let Query(raw) = raw.map_err(|e| Error::invalid_filter("query", e.body_text()))?;
    let filters = FilterSet::try_from(raw)?;
    let data = state.store.list(&filters).await;
    Ok(Json(ListResponse {
        count: data.len(),
        data,
        filters_applied: filters,
    }))
}

/// GET /strings/filter-by-natural-language
async fn filter_by_natural_language(
    State(state): State<StringsState>,
    params: std::result::Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> HandlerResult<Json<NaturalLanguageResponse>> {
    let Query(params) = params.map_err(|e| Error::invalid_filter("query", e.body_text()))?;
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| Error::MissingField("query".to_string()))?;

    let filters = state.parser.parse_required(&query)?;
    tracing::debug!(query = %query, filters = ?filters, "Interpreted natural language query");

    let data = state.store.list(&filters).await;
    Ok(Json(NaturalLanguageResponse {
        count: data.len(),
        data,
        interpreted_query: InterpretedQuery {
            original: query,
            parsed_filters: filters,
        },
    }))
}

/// GET /strings/:value
async fn get_string(
    State(state): State<StringsState>,
    Path(value): Path<String>,
) -> HandlerResult<Json<StringRecord>> {
    Ok(Json(state.store.get(&value).await?))
}

/// DELETE /strings/:value
async fn delete_string(
    State(state): State<StringsState>,
    Path(value): Path<String>,
) -> HandlerResult<StatusCode> {
    state.store.delete(&value).await?;
    Ok(StatusCode::NO_CONTENT)
}
