#![doc(test(attr(deny(warnings))))]

//! Ledger Core offers household ledger primitives (accounts, categories,
//! transactions, budgets) built around a recurring obligation engine that
//! schedules planned transactions and distributes their amounts across
//! monthly budget cells.

pub mod engine;
pub mod errors;
pub mod ledger;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
