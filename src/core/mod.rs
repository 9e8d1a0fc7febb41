//! The ledger state engine: store, aggregates, theme preference, and the
//! session that drives them.

pub mod aggregates;
pub mod ledger_store;
pub mod session;
pub mod theme;

pub use aggregates::{aggregates, Totals};
pub use ledger_store::LedgerStore;
pub use session::Session;
pub use theme::{Theme, ThemePreference};
