//! Household ledger domain models shared with the obligation engine.

pub mod account;
pub mod category;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use category::CategoryMain;
pub use transaction::LedgerTransaction;
