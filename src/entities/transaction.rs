// 💸 Transaction Entity - record + in-memory store
//
// Transactions are seeded at startup and immutable afterwards: no insert,
// update, or delete paths exist. Listing goes through the filter engine so
// every query gets the same predicate/sort/slice treatment.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::filter::{self, TransactionFilter, TransactionPage};
use crate::seed;

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

/// Direction of a transaction. Serializes lowercase ("debit", ...).
///
/// The amount sign is NOT tied to this: a debit with a positive amount is
/// legal data, and nothing validates the pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money leaving the account
    Debit,

    /// Money entering the account
    Credit,

    /// Movement between own accounts
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Debit => "debit",
            TransactionType::Credit => "credit",
            TransactionType::Transfer => "transfer",
        }
    }
}

// ============================================================================
// TRANSACTION STATUS
// ============================================================================

/// Settlement state reported by the institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

// ============================================================================
// TRANSACTION ENTITY
// ============================================================================

/// A financial movement tied to an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identifier, unique within the store
    pub id: String,

    /// Owning account; a foreign key by convention only, never enforced
    pub account_id: String,

    /// Signed amount; negative is money leaving the account
    pub amount: f64,

    /// ISO 4217 currency code
    pub currency: String,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Free-form spending category ("food", "utilities", ...)
    pub category: String,

    pub description: String,

    pub date: DateTime<Utc>,

    pub status: TransactionStatus,

    /// Provider reference code, when the institution supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

// ============================================================================
// TRANSACTION STORE
// ============================================================================

/// In-memory transaction store. Reads share the lock; nothing ever writes
/// after construction.
pub struct TransactionStore {
    transactions: RwLock<HashMap<String, Transaction>>,
}

impl TransactionStore {
    /// Store pre-loaded with the demo transactions.
    pub fn new() -> Self {
        Self::with_transactions(seed::transactions())
    }

    /// Store holding exactly the given transactions.
    pub fn with_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        let map = transactions
            .into_iter()
            .map(|tx| (tx.id.clone(), tx))
            .collect();

        TransactionStore {
            transactions: RwLock::new(map),
        }
    }

    /// One page of transactions matching `filter`, newest first, plus the
    /// pre-pagination total.
    pub async fn get_all(&self, filter: &TransactionFilter) -> TransactionPage {
        let transactions = self.transactions.read().await;
        let snapshot: Vec<Transaction> = transactions.values().cloned().collect();
        drop(transactions);

        filter::apply(snapshot, filter)
    }

    /// Exact-match lookup by ID.
    pub async fn get(&self, id: &str) -> Result<Transaction> {
        let transactions = self.transactions.read().await;
        transactions
            .get(id)
            .cloned()
            .ok_or(Error::TransactionNotFound)
    }

    /// One account's transactions, newest first, from the start. Unknown
    /// account IDs simply match nothing.
    pub async fn get_by_account(&self, account_id: &str, limit: Option<usize>) -> Vec<Transaction> {
        let filter = TransactionFilter::for_account(account_id, limit);
        self.get_all(&filter).await.items
    }

    /// Number of transactions held.
    pub async fn count(&self) -> usize {
        self.transactions.read().await.len()
    }
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
