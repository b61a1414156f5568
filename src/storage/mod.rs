//! Boundary stores the engine's callers persist into.
//!
//! The engine itself performs no I/O; these types implement its external
//! collaborators: an additive budget-cell store and an obligation store that
//! answers the sibling reconciliation query.

pub mod book;
pub mod json_backend;

pub use book::{BudgetBook, BudgetCell, ObligationBook};

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;
