//! Ledger domain models: transactions, fixed-point money, and id minting.

pub mod ids;
pub mod money;
pub mod transaction;

pub use ids::{Clock, FixedClock, IdGenerator, SystemClock};
pub use money::{Amount, Money};
pub use transaction::{Transaction, TransactionId, TransactionInput, TransactionKind};
