use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::obligation::{Frequency, Obligation};
use super::period::Period;
use super::subcategory::SubcategoryTable;
use crate::errors::EngineError;
use crate::ledger::CategoryMain;

const WEEKS_PER_YEAR: f64 = 52.0;

/// How a budget cell's value was authored.
///
/// Engine-authored cells are always `Fixed`; other styles belong to the
/// budget editor and never appear in engine output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Fixed,
}

/// One additive mutation of a budget cell, keyed by
/// `(category_main, subcategory_id, period)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCellDelta {
    pub category_main: CategoryMain,
    pub subcategory_id: Uuid,
    pub period: Period,
    /// Signed contribution; positive for distribution, negative for removal.
    pub amount: f64,
    pub style: CellStyle,
    /// `None` means "leave the stored flag unchanged".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_automatically: Option<bool>,
    /// Audit note naming the source obligation, distinguishing engine-written
    /// cells from manually-edited ones.
    pub notes: String,
}

/// How a `Yearly` obligation lands in the budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum YearlyMode {
    /// Amortize the annual charge evenly across all twelve months.
    #[default]
    Divide,
    /// Charge a single month: the given 0-based month index, or the month of
    /// the obligation's start date when none is given.
    Specific { target_month: Option<u32> },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DistributionOptions {
    pub yearly: YearlyMode,
}

impl DistributionOptions {
    pub fn yearly_specific(target_month: Option<u32>) -> Self {
        Self {
            yearly: YearlyMode::Specific { target_month },
        }
    }
}

/// Distributes an obligation's amount across the budget cells of
/// `target_year`.
///
/// Pure and deterministic: identical inputs yield identical output, with no
/// clock or randomness involved. Frequency dispatch is exhaustive; the amount
/// used is always the obligation's absolute value.
pub fn distribute(
    obligation: &Obligation,
    target_year: i32,
    table: &SubcategoryTable,
    options: &DistributionOptions,
) -> Result<Vec<BudgetCellDelta>, EngineError> {
    let subcategory = table.resolve(obligation)?;
    let amount = obligation.amount.abs();
    let notes = format!(
        "Planned automatically from recurring obligation \"{}\"",
        obligation.title
    );
    let delta = |period: Period, amount: f64| BudgetCellDelta {
        category_main: obligation.category_main,
        subcategory_id: subcategory.id,
        period,
        amount,
        style: CellStyle::Fixed,
        managed_automatically: Some(true),
        notes: notes.clone(),
    };

    let deltas = match obligation.frequency {
        Frequency::Monthly => Period::months_of(target_year)
            .map(|period| delta(period, amount))
            .collect(),
        Frequency::Weekly => {
            let monthly_equivalent = amount * WEEKS_PER_YEAR / 12.0;
            Period::months_of(target_year)
                .map(|period| delta(period, monthly_equivalent))
                .collect()
        }
        Frequency::Quarterly => Period::months_of(target_year)
            .map(|period| delta(period, amount / 3.0))
            .collect(),
        Frequency::Semiannual => Period::months_of(target_year)
            .map(|period| delta(period, amount / 6.0))
            .collect(),
        Frequency::Yearly => match &options.yearly {
            YearlyMode::Divide => Period::months_of(target_year)
                .map(|period| delta(period, amount / 12.0))
                .collect(),
            YearlyMode::Specific { target_month } => {
                let month = match target_month {
                    Some(index) if *index < 12 => index + 1,
                    Some(index) => {
                        return Err(EngineError::IllegalState {
                            obligation_id: obligation.id,
                            reason: format!("target month index {index} out of range 0..=11"),
                        })
                    }
                    None => obligation.start_date.month(),
                };
                vec![delta(Period::new(target_year, month), amount)]
            }
        },
        Frequency::OneTime => {
            if obligation.start_date.year() != target_year {
                return Err(EngineError::YearMismatch {
                    obligation_id: obligation.id,
                    start_date: obligation.start_date,
                    target_year,
                });
            }
            vec![delta(Period::from_date(obligation.start_date), amount)]
        }
    };

    Ok(deltas)
}
