use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::engine::obligation::Frequency;

/// Error type covering the obligation engine's input and invariant failures.
///
/// Every variant carries enough context (obligation id, period, frequency) to
/// log and display without consulting external state. Input errors indicate a
/// data-integrity problem and must never result in a partially-applied budget
/// mutation; `ScheduleDidNotAdvance` indicates a defect in the calendar
/// stepping itself.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("obligation {obligation_id}: subcategory reference `{reference}` could not be resolved")]
    SubcategoryUnresolved {
        obligation_id: Uuid,
        reference: String,
    },
    #[error(
        "obligation {obligation_id}: start date {start_date} falls outside target year {target_year}"
    )]
    YearMismatch {
        obligation_id: Uuid,
        start_date: NaiveDate,
        target_year: i32,
    },
    #[error("unsupported frequency tag `{0}`")]
    UnsupportedFrequency(String),
    #[error("obligation {obligation_id}: {reason}")]
    IllegalState { obligation_id: Uuid, reason: String },
    #[error(
        "obligation {obligation_id}: {frequency:?} schedule did not advance past {stuck_at}"
    )]
    ScheduleDidNotAdvance {
        obligation_id: Uuid,
        frequency: Frequency,
        stuck_at: NaiveDate,
    },
}

/// Error type that captures common ledger storage failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
