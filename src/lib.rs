// 💰 Financial Aggregator - mock account and transaction API
//
// In-memory stores seeded with demo data, a filter/pagination engine, a
// refresh simulator, and the axum surface that exposes them. The binary in
// bin/server.rs is a thin shell over `api::router`.

pub mod api;
pub mod entities;
pub mod error;
pub mod filter;
pub mod refresh;
pub mod seed;

// Re-export the main types for convenience
pub use api::{router, ApiResponse, AppState, PaginatedResponse, PaginationMeta};
pub use entities::{
    Account, AccountStore, AccountType, RefreshResult, Transaction, TransactionStatus,
    TransactionStore, TransactionType,
};
pub use error::{Error, Result};
pub use filter::{TransactionFilter, TransactionPage, DEFAULT_LIMIT};
pub use refresh::{ClockDelta, DeltaSource, FixedDelta, REFRESH_LATENCY};

/// Crate version, surfaced for logs.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
