// 💳 Account Entity - record + in-memory store
//
// Accounts are created once at startup from the demo seed and live for the
// whole process. The only mutation is `refresh`, which nudges the balance
// and stamps `last_updated`; nothing is ever inserted or deleted afterwards.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{Error, Result};
use crate::refresh::{ClockDelta, DeltaSource, REFRESH_LATENCY};
use crate::seed;

// ============================================================================
// ACCOUNT TYPE
// ============================================================================

/// Kind of bank account. Serializes lowercase ("checking", "credit", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking account
    Checking,

    /// Savings account
    Savings,

    /// Credit card
    Credit,

    /// Brokerage / investment account
    Investment,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Credit => "credit",
            AccountType::Investment => "investment",
        }
    }

    /// Depository accounts hold the customer's own money and never report a
    /// negative balance; credit and investment accounts may.
    pub fn is_depository(&self) -> bool {
        matches!(self, AccountType::Checking | AccountType::Savings)
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// A bank account as reported by the (mock) aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier, unique within the store
    pub id: String,

    /// Display name
    pub name: String,

    /// Institution holding the account
    pub bank: String,

    pub account_type: AccountType,

    /// Current balance; negative means owed (credit accounts)
    pub balance: f64,

    /// ISO 4217 currency code
    pub currency: String,

    /// Last time the balance was (pretend-)synced from the institution
    pub last_updated: DateTime<Utc>,

    pub is_active: bool,
}

// ============================================================================
// REFRESH RESULT
// ============================================================================

/// Report returned by a successful account refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResult {
    pub account_id: String,
    pub success: bool,
    pub message: String,
    pub last_updated: DateTime<Utc>,
    pub new_balance: f64,
}

// ============================================================================
// ACCOUNT STORE
// ============================================================================

/// In-memory account store.
///
/// Reads share the lock; `refresh` takes it exclusively and keeps it across
/// the simulated provider call, so concurrent refreshes of the same account
/// serialize instead of losing updates.
pub struct AccountStore {
    accounts: RwLock<HashMap<String, Account>>,
    delta_source: Box<dyn DeltaSource>,
}

impl AccountStore {
    /// Store pre-loaded with the demo accounts.
    pub fn new() -> Self {
        Self::with_accounts(seed::accounts())
    }

    /// Store holding exactly the given accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let map = accounts
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();

        AccountStore {
            accounts: RwLock::new(map),
            delta_source: Box::new(ClockDelta),
        }
    }

    /// Swap the balance delta source (deterministic refresh outcomes in tests).
    pub fn with_delta_source(mut self, source: impl DeltaSource + 'static) -> Self {
        self.delta_source = Box::new(source);
        self
    }

    /// Every account currently held, in no particular order.
    pub async fn get_all(&self) -> Vec<Account> {
        let accounts = self.accounts.read().await;
        accounts.values().cloned().collect()
    }

    /// Exact-match lookup by ID.
    pub async fn get(&self, id: &str) -> Result<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(id).cloned().ok_or(Error::AccountNotFound)
    }

    /// Number of accounts held.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Simulate re-syncing one account from its institution.
    ///
    /// Waits out the provider latency, applies a small balance delta, stamps
    /// `last_updated`, and clamps depository accounts at zero so they never
    /// report negative.
    pub async fn refresh(&self, id: &str) -> Result<RefreshResult> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(id).ok_or(Error::AccountNotFound)?;

        // Pretend to call the institution. The write guard stays held so a
        // concurrent refresh of the same account waits its turn.
        tokio::time::sleep(REFRESH_LATENCY).await;

        account.balance += self.delta_source.delta();
        account.last_updated = Utc::now();

        if account.account_type.is_depository() && account.balance < 0.0 {
            account.balance = 0.0;
        }

        info!(
            account_id = %account.id,
            new_balance = account.balance,
            "account refreshed"
        );

        Ok(RefreshResult {
            account_id: account.id.clone(),
            success: true,
            message: "account data refreshed successfully".to_string(),
            last_updated: account.last_updated,
            new_balance: account.balance,
        })
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::FixedDelta;
    use std::sync::Arc;

    fn test_account(id: &str, account_type: AccountType, balance: f64) -> Account {
        Account {
            id: id.to_string(),
            name: format!("Test {}", id),
            bank: "Test Bank".to_string(),
            account_type,
            balance,
            currency: "USD".to_string(),
            last_updated: Utc::now(),
            is_active: true,
        }
    }

    #[test]
    fn test_account_type_as_str() {
        assert_eq!(AccountType::Checking.as_str(), "checking");
        assert_eq!(AccountType::Savings.as_str(), "savings");
        assert_eq!(AccountType::Credit.as_str(), "credit");
        assert_eq!(AccountType::Investment.as_str(), "investment");
    }

    #[test]
    fn test_account_type_depository() {
        assert!(AccountType::Checking.is_depository());
        assert!(AccountType::Savings.is_depository());
        assert!(!AccountType::Credit.is_depository());
        assert!(!AccountType::Investment.is_depository());
    }

    #[test]
    fn test_account_serializes_lowercase_type() {
        let account = test_account("acc_x", AccountType::Checking, 10.0);
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["account_type"], "checking");
        assert_eq!(json["id"], "acc_x");
        assert_eq!(json["is_active"], true);
    }

    #[tokio::test]
    async fn test_store_seeds_six_accounts() {
        let store = AccountStore::new();
        assert_eq!(store.count().await, 6);

        let ids: Vec<String> = store.get_all().await.into_iter().map(|a| a.id).collect();
        for expected in ["acc_001", "acc_002", "acc_003", "acc_004", "acc_005", "acc_006"] {
            assert!(ids.contains(&expected.to_string()), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_get_returns_matching_account() {
        let store = AccountStore::new();

        let account = store.get("acc_001").await.unwrap();
        assert_eq!(account.id, "acc_001");
        assert_eq!(account.name, "Primary Checking");
        assert_eq!(account.account_type, AccountType::Checking);
    }

    #[tokio::test]
    async fn test_get_unknown_account_fails() {
        let store = AccountStore::new();
        assert_eq!(
            store.get("acc_999").await.unwrap_err(),
            Error::AccountNotFound
        );
    }

    #[tokio::test]
    async fn test_refresh_moves_balance_within_bound() {
        let store = AccountStore::new();
        let before = store.get("acc_001").await.unwrap();

        let result = store.refresh("acc_001").await.unwrap();

        assert!(result.success);
        assert_eq!(result.account_id, "acc_001");
        assert_eq!(result.message, "account data refreshed successfully");
        assert!((result.new_balance - before.balance).abs() <= 1.0 + 1e-9);
        assert!(result.last_updated >= before.last_updated);
    }

    #[tokio::test]
    async fn test_refresh_unknown_account_fails() {
        let store = AccountStore::new();
        assert_eq!(
            store.refresh("acc_999").await.unwrap_err(),
            Error::AccountNotFound
        );
    }

    #[tokio::test]
    async fn test_refresh_updates_stored_state() {
        let store = AccountStore::with_accounts([test_account(
            "acc_t",
            AccountType::Investment,
            100.0,
        )])
        .with_delta_source(FixedDelta(0.25));

        let result = store.refresh("acc_t").await.unwrap();
        assert_eq!(result.new_balance, 100.25);

        // The mutation is visible to later reads.
        let stored = store.get("acc_t").await.unwrap();
        assert_eq!(stored.balance, 100.25);
        assert_eq!(stored.last_updated, result.last_updated);
    }

    #[tokio::test]
    async fn test_refresh_clamps_depository_at_zero() {
        let store =
            AccountStore::with_accounts([test_account("acc_t", AccountType::Checking, 0.40)])
                .with_delta_source(FixedDelta(-1.0));

        let result = store.refresh("acc_t").await.unwrap();
        assert_eq!(result.new_balance, 0.0);
        assert_eq!(store.get("acc_t").await.unwrap().balance, 0.0);
    }

    #[tokio::test]
    async fn test_refresh_lets_credit_go_negative() {
        let store =
            AccountStore::with_accounts([test_account("acc_t", AccountType::Credit, -0.5)])
                .with_delta_source(FixedDelta(-1.0));

        let result = store.refresh("acc_t").await.unwrap();
        assert_eq!(result.new_balance, -1.5);
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_both_apply() {
        let store = Arc::new(
            AccountStore::with_accounts([test_account("acc_t", AccountType::Savings, 10.0)])
                .with_delta_source(FixedDelta(0.5)),
        );

        let a = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh("acc_t").await }
        });
        let b = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh("acc_t").await }
        });

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        // Both deltas land; neither write is lost.
        assert_eq!(store.get("acc_t").await.unwrap().balance, 11.0);
    }

    #[tokio::test]
    async fn test_reads_do_not_mutate() {
        let store = AccountStore::new();

        let first = store.get("acc_002").await.unwrap();
        let _ = store.get_all().await;
        let second = store.get("acc_002").await.unwrap();

        assert_eq!(first.balance, second.balance);
        assert_eq!(first.last_updated, second.last_updated);
    }
}
