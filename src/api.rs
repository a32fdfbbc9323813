// 🌐 HTTP Surface - envelopes, handlers, router
//
// Everything the server serves lives here so tests can drive the real
// router in-process. Failures are always envelope JSON: handler errors map
// through ApiError, unknown paths hit the fallback, and a response mapper
// rewrites the framework's bare 405/408 answers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::entities::{Account, AccountStore, Transaction, TransactionStore};
use crate::error::Error;
use crate::filter::TransactionFilter;

/// Ceiling on how long a single request may run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// RESPONSE ENVELOPES
// ============================================================================

/// Envelope every `/api` endpoint answers with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: &str, error: Option<String>) -> Self {
        ApiResponse {
            success: false,
            message: Some(message.to_string()),
            data: None,
            error,
        }
    }
}

/// Pagination block attached to the transaction listing.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub pages: usize,
}

impl PaginationMeta {
    /// `total` is the pre-pagination filtered count; `limit` is an effective
    /// value and therefore never zero, though it can be as large as the
    /// query string names.
    pub fn new(total: usize, limit: usize, offset: usize) -> Self {
        let pages = total.div_ceil(limit);
        PaginationMeta {
            total,
            limit,
            offset,
            pages,
        }
    }
}

/// Envelope for the paginated transaction listing.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: T,
    pub meta: PaginationMeta,
}

/// Liveness probe payload. Not wrapped in the envelope.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

// ============================================================================
// API ERROR
// ============================================================================

/// Failures a handler can answer with, mapped onto status + envelope JSON.
#[derive(Debug, ThisError)]
#[allow(dead_code)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] Error),

    /// A required path parameter was empty.
    #[error("{0}")]
    BadRequest(&'static str),

    /// Reserved; the stores never fail internally today.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match &self {
            ApiError::Store(e) => {
                let message = match e {
                    Error::AccountNotFound => "Account not found",
                    Error::TransactionNotFound => "Transaction not found",
                };
                (StatusCode::NOT_FOUND, message, Some(e.to_string()))
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, *message, None),
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                Some(detail.clone()),
            ),
        };

        (status, Json(ApiResponse::<()>::err(message, error))).into_response()
    }
}

// ============================================================================
// APP STATE
// ============================================================================

/// Shared store handles the handlers work against. Injected through axum
/// state; there are no package-level globals.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountStore>,
    pub transactions: Arc<TransactionStore>,
}

impl AppState {
    /// State backed by the seeded demo stores.
    pub fn new() -> Self {
        AppState {
            accounts: Arc::new(AccountStore::new()),
            transactions: Arc::new(TransactionStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// QUERY PARSING
// ============================================================================

/// Raw query parameters for the transaction listing. Everything arrives as
/// optional text; values that fail to parse are dropped rather than
/// rejected, so a bad `limit` falls back to the default instead of erroring.
/// A query string that fails to deserialize at all (repeated keys, bad
/// escapes) is treated as absent, handled at the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    pub account_id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl TransactionListQuery {
    fn into_filter(self) -> TransactionFilter {
        TransactionFilter {
            account_id: self.account_id.filter(|v| !v.is_empty()),
            transaction_type: self.transaction_type.filter(|v| !v.is_empty()),
            category: self.category.filter(|v| !v.is_empty()),
            status: self.status.filter(|v| !v.is_empty()),
            start_date: parse_day(self.start_date.as_deref()),
            end_date: parse_day(self.end_date.as_deref()),
            limit: parse_limit(self.limit.as_deref()),
            offset: parse_offset(self.offset.as_deref()),
        }
    }
}

/// Raw query parameters for the per-account transaction listing.
#[derive(Debug, Default, Deserialize)]
pub struct AccountTransactionsQuery {
    pub limit: Option<String>,
}

/// Positive page size, or None for anything else.
fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.parse::<usize>().ok()).filter(|l| *l > 0)
}

/// Non-negative offset; negative and unparsable values clamp to unset.
fn parse_offset(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.parse::<usize>().ok())
}

/// `YYYY-MM-DD` bound to midnight UTC; anything else is ignored.
fn parse_day(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health - Liveness probe
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// GET /api/accounts - List every account
async fn list_accounts(State(state): State<AppState>) -> Json<ApiResponse<Vec<Account>>> {
    let accounts = state.accounts.get_all().await;
    Json(ApiResponse::ok("Accounts retrieved successfully", accounts))
}

/// GET /api/accounts/:id - Fetch one account
async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Account>>, ApiError> {
    if id.is_empty() {
        return Err(ApiError::BadRequest("Account ID is required"));
    }

    let account = state.accounts.get(&id).await?;
    Ok(Json(ApiResponse::ok(
        "Account retrieved successfully",
        account,
    )))
}

/// POST /api/accounts/:id/refresh - Simulate re-syncing one account
async fn refresh_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    if id.is_empty() {
        return Err(ApiError::BadRequest("Account ID is required"));
    }

    let result = state.accounts.refresh(&id).await?;

    // A refresh reporting failure without a lookup error answers 400; the
    // simulator never takes that path today.
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    let body = ApiResponse {
        success: result.success,
        message: Some(result.message.clone()),
        data: Some(result),
        error: None,
    };

    Ok((status, Json(body)).into_response())
}

/// GET /api/accounts/:id/transactions - One account's transactions
///
/// Unknown account IDs answer 200 with an empty list, unlike the account
/// lookup's 404. Intentional asymmetry, kept as-is.
async fn list_account_transactions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Option<Query<AccountTransactionsQuery>>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>, ApiError> {
    if id.is_empty() {
        return Err(ApiError::BadRequest("Account ID is required"));
    }

    let query = query.map(|Query(q)| q).unwrap_or_default();
    let limit = parse_limit(query.limit.as_deref());
    let transactions = state.transactions.get_by_account(&id, limit).await;

    Ok(Json(ApiResponse::ok(
        "Account transactions retrieved successfully",
        transactions,
    )))
}

/// GET /api/transactions - Filtered, paginated listing
async fn list_transactions(
    State(state): State<AppState>,
    query: Option<Query<TransactionListQuery>>,
) -> Json<PaginatedResponse<Vec<Transaction>>> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    info!("GET /api/transactions - query: {:?}", query);

    let filter = query.into_filter();
    let limit = filter.effective_limit();
    let offset = filter.effective_offset();

    let page = state.transactions.get_all(&filter).await;

    Json(PaginatedResponse {
        success: true,
        data: page.items,
        meta: PaginationMeta::new(page.total, limit, offset),
    })
}

/// GET /api/transactions/:id - Fetch one transaction
async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Transaction>>, ApiError> {
    if id.is_empty() {
        return Err(ApiError::BadRequest("Transaction ID is required"));
    }

    let transaction = state.transactions.get(&id).await?;
    Ok(Json(ApiResponse::ok(
        "Transaction retrieved successfully",
        transaction,
    )))
}

/// Fallback for paths no route matches.
async fn unknown_route() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::err("Route not found", None)),
    )
        .into_response()
}

/// The method routers answer unsupported verbs with an empty body, and the
/// timeout layer does the same on expiry; failures on this API are always
/// JSON, so rewrite those. Handler-built responses carry a content type and
/// pass through untouched.
async fn envelope_bare_errors(response: Response) -> Response {
    let bare = matches!(
        response.status(),
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::REQUEST_TIMEOUT
    ) && !response.headers().contains_key(header::CONTENT_TYPE);

    if !bare {
        return response;
    }

    let status = response.status();
    let message = if status == StatusCode::METHOD_NOT_ALLOWED {
        "Method not allowed"
    } else {
        "Request timed out"
    };

    let mut rewritten = (status, Json(ApiResponse::<()>::err(message, None))).into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        rewritten.headers_mut().insert(header::ALLOW, allow.clone());
    }

    rewritten
}

// ============================================================================
// ROUTER
// ============================================================================

/// Full application router: `/health` plus the `/api` surface, wrapped in a
/// request timeout, JSON error rewriting, request tracing, and permissive
/// CORS (any origin; preflight OPTIONS answered 200 with no body).
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/:id", get(get_account))
        .route("/accounts/:id/refresh", post(refresh_account))
        .route("/accounts/:id/transactions", get(list_account_transactions))
        .route("/transactions", get(list_transactions))
        .route("/transactions/:id", get(get_transaction))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .fallback(unknown_route)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(middleware::map_response(envelope_bare_errors))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_skips_error_field() {
        let json = serde_json::to_value(ApiResponse::ok("done", vec![1, 2])).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "done");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_err_envelope_skips_data_field() {
        let json =
            serde_json::to_value(ApiResponse::<()>::err("nope", Some("why".to_string()))).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "nope");
        assert_eq!(json["error"], "why");
        assert!(json.get("data").is_none());

        let json = serde_json::to_value(ApiResponse::<()>::err("nope", None)).unwrap();
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_pagination_meta_pages() {
        assert_eq!(PaginationMeta::new(10, 3, 0).pages, 4);
        assert_eq!(PaginationMeta::new(10, 5, 0).pages, 2);
        assert_eq!(PaginationMeta::new(1, 50, 0).pages, 1);
        assert_eq!(PaginationMeta::new(0, 50, 0).pages, 0);

        // A parsed limit can be anything up to usize::MAX.
        assert_eq!(PaginationMeta::new(10, usize::MAX, 0).pages, 1);
        assert_eq!(PaginationMeta::new(0, usize::MAX, 0).pages, 0);
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(Some("5")), Some(5));
        assert_eq!(parse_limit(Some("0")), None);
        assert_eq!(parse_limit(Some("-3")), None);
        assert_eq!(parse_limit(Some("abc")), None);
        assert_eq!(parse_limit(None), None);
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset(Some("0")), Some(0));
        assert_eq!(parse_offset(Some("12")), Some(12));
        assert_eq!(parse_offset(Some("-1")), None);
        assert_eq!(parse_offset(Some("junk")), None);
    }

    #[test]
    fn test_parse_day() {
        let parsed = parse_day(Some("2024-01-15")).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T00:00:00+00:00");

        assert_eq!(parse_day(Some("01/15/2024")), None);
        assert_eq!(parse_day(Some("2024-13-40")), None);
        assert_eq!(parse_day(Some("")), None);
        assert_eq!(parse_day(None), None);
    }

    #[test]
    fn test_query_into_filter_drops_empty_and_bad_values() {
        let query = TransactionListQuery {
            account_id: Some("acc_001".to_string()),
            transaction_type: Some(String::new()),
            category: None,
            status: Some("completed".to_string()),
            start_date: Some("not-a-date".to_string()),
            end_date: Some("2024-02-01".to_string()),
            limit: Some("abc".to_string()),
            offset: Some("4".to_string()),
        };

        let filter = query.into_filter();
        assert_eq!(filter.account_id.as_deref(), Some("acc_001"));
        assert_eq!(filter.transaction_type, None);
        assert_eq!(filter.category, None);
        assert_eq!(filter.status.as_deref(), Some("completed"));
        assert_eq!(filter.start_date, None);
        assert!(filter.end_date.is_some());
        assert_eq!(filter.limit, None);
        assert_eq!(filter.offset, Some(4));
    }
}
