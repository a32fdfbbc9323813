// Error types for store lookups.
//
// The display strings are wire-visible: the HTTP layer copies them into the
// `error` field of failure envelopes, so they stay lowercase and stable.

use thiserror::Error;

/// Convenience alias used by the stores.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// No account with the requested ID.
    #[error("account not found")]
    AccountNotFound,

    /// No transaction with the requested ID.
    #[error("transaction not found")]
    TransactionNotFound,
}

// ============================================================================
// TESTS
// ============================================================================
