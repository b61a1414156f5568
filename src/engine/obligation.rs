use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::subcategory::SubcategoryRef;
use crate::errors::EngineError;
use crate::ledger::CategoryMain;

/// A recurring (or one-time) planned transaction definition.
///
/// Obligations are templates, not ledger entries: the scheduler decides when
/// one is due, materialization turns a due occurrence into a real transaction,
/// and the distribution calculator spreads the amount across budget cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obligation {
    pub id: Uuid,
    pub title: String,
    /// Signed magnitude; the engine always works with its absolute value and
    /// the caller re-applies sign via `CategoryMain::signed_amount`.
    pub amount: f64,
    pub frequency: Frequency,
    pub confirmation_mode: ConfirmationMode,
    pub is_active: bool,
    pub start_date: NaiveDate,
    /// Next scheduled occurrence. Mutated only by the scheduler, which
    /// guarantees it strictly increases across materializations.
    pub next_due_date: NaiveDate,
    pub category_main: CategoryMain,
    pub subcategory: SubcategoryRef,
}

impl Obligation {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        confirmation_mode: ConfirmationMode,
        start_date: NaiveDate,
        category_main: CategoryMain,
        subcategory: SubcategoryRef,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            frequency,
            confirmation_mode,
            is_active: true,
            start_date,
            next_due_date: start_date,
            category_main,
            subcategory,
        }
    }

    /// Reactivates a dormant obligation without touching its schedule.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Deactivates the obligation. The caller is expected to follow up with a
    /// budget removal pass for the affected year.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// Cadence of a recurring obligation.
///
/// Closed set: every consumer matches exhaustively, so adding a frequency
/// without updating each consumer is a build-time error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Semiannual,
    Yearly,
    OneTime,
}

impl Frequency {
    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Semiannual => "Semiannual",
            Frequency::Yearly => "Yearly",
            Frequency::OneTime => "One-time",
        }
    }
}

impl FromStr for Frequency {
    type Err = EngineError;

    /// Boundary parser for external tags. Unknown tags are a hard error, never
    /// a default fallback: a silently defaulted frequency would misallocate
    /// money.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "QUARTERLY" => Ok(Frequency::Quarterly),
            "SEMIANNUAL" => Ok(Frequency::Semiannual),
            "YEARLY" => Ok(Frequency::Yearly),
            "ONE_TIME" => Ok(Frequency::OneTime),
            other => Err(EngineError::UnsupportedFrequency(other.to_string())),
        }
    }
}

/// Whether a due obligation may be materialized without human confirmation.
///
/// Pure data for the caller to branch on; the engine has no access to
/// identity or request context and does not enforce the distinction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ConfirmationMode {
    #[default]
    Automatic,
    Manual,
}
