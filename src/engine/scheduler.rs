use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::obligation::{Frequency, Obligation};
use super::period::shift_month;
use crate::errors::EngineError;

/// Derived `Due` predicate: active and scheduled on or before `now`.
///
/// `Due` is never stored; the caller evaluates it against an explicit clock.
pub fn is_due(obligation: &Obligation, now: NaiveDate) -> bool {
    obligation.is_active && obligation.next_due_date <= now
}

/// The calendar step applied to the schedule by a materialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduleStep {
    Days(i64),
    Months(i32),
    /// One-time obligation: no next occurrence, the obligation is retired.
    Completed,
}

/// Result of advancing an obligation past a materialized occurrence.
#[derive(Debug, Clone)]
pub struct Materialized {
    pub updated: Obligation,
    pub step: ScheduleStep,
}

/// Advances an obligation's schedule past the occurrence just materialized.
///
/// Only legal while the obligation is active and due; creating the ledger
/// transaction for the occurrence is the caller's responsibility, as is
/// calling this under per-obligation mutual exclusion.
///
/// The returned `next_due_date` strictly exceeds the old one for every
/// frequency except `OneTime`, which retires the obligation instead. The
/// invariant is re-checked after stepping: a non-advancing schedule is the
/// documented cause of unbounded re-materialization loops, so it is reported
/// as `ScheduleDidNotAdvance` rather than returned.
pub fn materialize(obligation: &Obligation, now: NaiveDate) -> Result<Materialized, EngineError> {
    if !obligation.is_active {
        return Err(EngineError::IllegalState {
            obligation_id: obligation.id,
            reason: "cannot materialize an inactive obligation".into(),
        });
    }
    if !is_due(obligation, now) {
        return Err(EngineError::IllegalState {
            obligation_id: obligation.id,
            reason: format!(
                "not due until {} (now {})",
                obligation.next_due_date, now
            ),
        });
    }

    let due = obligation.next_due_date;
    let (next, step) = match obligation.frequency {
        Frequency::Weekly => (Some(due + Duration::days(7)), ScheduleStep::Days(7)),
        Frequency::Monthly => (Some(shift_month(due, 1)), ScheduleStep::Months(1)),
        Frequency::Quarterly => (Some(shift_month(due, 3)), ScheduleStep::Months(3)),
        Frequency::Semiannual => (Some(shift_month(due, 6)), ScheduleStep::Months(6)),
        Frequency::Yearly => (Some(shift_month(due, 12)), ScheduleStep::Months(12)),
        Frequency::OneTime => (None, ScheduleStep::Completed),
    };

    let mut updated = obligation.clone();
    match next {
        Some(next) => {
            if next <= due {
                return Err(EngineError::ScheduleDidNotAdvance {
                    obligation_id: obligation.id,
                    frequency: obligation.frequency,
                    stuck_at: due,
                });
            }
            updated.next_due_date = next;
        }
        None => updated.deactivate(),
    }

    Ok(Materialized { updated, step })
}
