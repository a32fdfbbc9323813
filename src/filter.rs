// 🔍 Transaction Filtering - conjunctive predicates + pagination
//
// Pure functions: the store hands in a snapshot, this module narrows, sorts,
// and slices it. `total` is counted before the slice so pagination metadata
// reflects the whole filtered set, not just the returned page.

use chrono::{DateTime, Utc};

use crate::entities::Transaction;

/// Page size applied when a query names none (or a non-positive one).
pub const DEFAULT_LIMIT: usize = 50;

// ============================================================================
// FILTER DESCRIPTOR
// ============================================================================

/// Optional predicates narrowing a transaction query. Built per-request,
/// never stored.
///
/// String predicates compare exactly and case-sensitively against the
/// serialized field values, so an unknown `transaction_type` like "refund"
/// is a legal filter that matches nothing.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,

    /// Keep transactions dated at or after this instant
    pub start_date: Option<DateTime<Utc>>,

    /// Keep transactions dated at or before this instant
    pub end_date: Option<DateTime<Utc>>,

    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TransactionFilter {
    /// Filter selecting one account's transactions from the start.
    pub fn for_account(account_id: impl Into<String>, limit: Option<usize>) -> Self {
        TransactionFilter {
            account_id: Some(account_id.into()),
            limit,
            ..TransactionFilter::default()
        }
    }

    /// True when `tx` passes every set predicate. Unset fields impose no
    /// constraint.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(account_id) = &self.account_id {
            if tx.account_id != *account_id {
                return false;
            }
        }

        if let Some(transaction_type) = &self.transaction_type {
            if tx.transaction_type.as_str() != transaction_type {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if tx.category != *category {
                return false;
            }
        }

        if let Some(status) = &self.status {
            if tx.status.as_str() != status {
                return false;
            }
        }

        if let Some(start) = self.start_date {
            if tx.date < start {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if tx.date > end {
                return false;
            }
        }

        true
    }

    /// Page size to slice with; unset and non-positive fall back to the
    /// default.
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_LIMIT,
        }
    }

    /// Slice start; unset means the beginning.
    pub fn effective_offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

// ============================================================================
// PAGE
// ============================================================================

/// One page of filtered results plus the pre-pagination count.
#[derive(Debug, Clone)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,

    /// Size of the whole filtered set, not of `items`
    pub total: usize,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Filter, sort newest-first, then slice out the requested page.
///
/// An offset past the end yields an empty page, never an error; `total`
/// still reports the full filtered count.
pub fn apply(mut transactions: Vec<Transaction>, filter: &TransactionFilter) -> TransactionPage {
    transactions.retain(|tx| filter.matches(tx));

    // Stable sort keyed on date alone: equal-dated rows keep a repeatable
    // relative order between identical queries on unchanged data.
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    let total = transactions.len();
    let items = transactions
        .into_iter()
        .skip(filter.effective_offset())
        .take(filter.effective_limit())
        .collect();

    TransactionPage { items, total }
}

// ============================================================================
// TESTS
// ============================================================================
