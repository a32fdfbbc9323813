// Entity Models
//
// Each entity file pairs the record type with the in-memory store that owns
// it: accounts mutate only through refresh, transactions never mutate at all.

pub mod account;
pub mod transaction;

pub use account::{Account, AccountStore, AccountType, RefreshResult};
pub use transaction::{Transaction, TransactionStatus, TransactionStore, TransactionType};
