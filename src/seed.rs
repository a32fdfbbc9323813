// 🌱 Seed Data - the fixed demo dataset
//
// Every process starts from the same six accounts and ten transactions,
// dated relative to startup so the data always looks freshly synced.

use chrono::{DateTime, Duration, Utc};

use crate::entities::{
    Account, AccountType, Transaction, TransactionStatus, TransactionType,
};

fn account(
    id: &str,
    name: &str,
    bank: &str,
    account_type: AccountType,
    balance: f64,
    last_updated: DateTime<Utc>,
) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        bank: bank.to_string(),
        account_type,
        balance,
        currency: "USD".to_string(),
        last_updated,
        is_active: true,
    }
}

#[allow(clippy::too_many_arguments)]
fn transaction(
    id: &str,
    account_id: &str,
    amount: f64,
    transaction_type: TransactionType,
    category: &str,
    description: &str,
    date: DateTime<Utc>,
    reference: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        account_id: account_id.to_string(),
        amount,
        currency: "USD".to_string(),
        transaction_type,
        category: category.to_string(),
        description: description.to_string(),
        date,
        status: TransactionStatus::Completed,
        reference: Some(reference.to_string()),
    }
}

/// The six demo accounts.
pub fn accounts() -> Vec<Account> {
    let now = Utc::now();

    vec![
        // 1. Everyday checking
        account(
            "acc_001",
            "Primary Checking",
            "Chase Bank",
            AccountType::Checking,
            2500.75,
            now - Duration::hours(2),
        ),
        // 2. Savings
        account(
            "acc_002",
            "High Yield Savings",
            "Ally Bank",
            AccountType::Savings,
            15000.00,
            now - Duration::hours(1),
        ),
        // 3. Credit card (negative = owed)
        account(
            "acc_003",
            "Credit Card",
            "Capital One",
            AccountType::Credit,
            -1200.50,
            now - Duration::minutes(30),
        ),
        // 4. Brokerage
        account(
            "acc_004",
            "Investment Account",
            "Fidelity",
            AccountType::Investment,
            45000.25,
            now - Duration::minutes(15),
        ),
        // 5. Business checking
        account(
            "acc_005",
            "Business Checking",
            "Wells Fargo",
            AccountType::Checking,
            8500.00,
            now - Duration::minutes(45),
        ),
        // 6. Emergency fund
        account(
            "acc_006",
            "Emergency Fund",
            "Marcus by Goldman Sachs",
            AccountType::Savings,
            25000.00,
            now - Duration::hours(1),
        ),
    ]
}

/// The ten demo transactions. Dates spread from two hours to four days back
/// so date filters and the newest-first sort have something to bite on.
pub fn transactions() -> Vec<Transaction> {
    let now = Utc::now();

    vec![
        transaction(
            "txn_001",
            "acc_001",
            -45.50,
            TransactionType::Debit,
            "food",
            "Grocery Store Purchase",
            now - Duration::hours(2),
            "TXN001234567",
        ),
        transaction(
            "txn_002",
            "acc_001",
            5000.00,
            TransactionType::Credit,
            "salary",
            "Monthly Salary",
            now - Duration::hours(1),
            "SAL001234567",
        ),
        transaction(
            "txn_003",
            "acc_003",
            -120.00,
            TransactionType::Debit,
            "utilities",
            "Electric Bill",
            now - Duration::hours(3),
            "UTL001234567",
        ),
        transaction(
            "txn_004",
            "acc_002",
            500.00,
            TransactionType::Credit,
            "transfer",
            "Transfer from Checking",
            now - Duration::hours(4),
            "TRF001234567",
        ),
        transaction(
            "txn_005",
            "acc_001",
            -25.00,
            TransactionType::Debit,
            "transportation",
            "Gas Station",
            now - Duration::hours(5),
            "GAS001234567",
        ),
        transaction(
            "txn_006",
            "acc_004",
            150.00,
            TransactionType::Credit,
            "investment",
            "Dividend Payment",
            now - Duration::hours(6),
            "DIV001234567",
        ),
        transaction(
            "txn_007",
            "acc_001",
            -80.00,
            TransactionType::Debit,
            "entertainment",
            "Movie Theater",
            now - Duration::hours(24),
            "ENT001234567",
        ),
        transaction(
            "txn_008",
            "acc_005",
            2500.00,
            TransactionType::Credit,
            "business",
            "Client Payment",
            now - Duration::hours(48),
            "BIZ001234567",
        ),
        transaction(
            "txn_009",
            "acc_001",
            -200.00,
            TransactionType::Debit,
            "healthcare",
            "Doctor Visit",
            now - Duration::hours(72),
            "HLT001234567",
        ),
        transaction(
            "txn_010",
            "acc_002",
            1000.00,
            TransactionType::Credit,
            "transfer",
            "Emergency Fund Contribution",
            now - Duration::hours(96),
            "EMG001234567",
        ),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
