use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::distribution::{BudgetCellDelta, CellStyle};
use crate::engine::obligation::{Frequency, Obligation};
use crate::engine::period::Period;
use crate::engine::subcategory::SubcategoryTable;
use crate::ledger::CategoryMain;

/// The smallest addressable unit of a budget, keyed by main category,
/// subcategory, and month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCell {
    pub category_main: CategoryMain,
    pub subcategory_id: Uuid,
    pub period: Period,
    pub amount: f64,
    pub style: CellStyle,
    pub managed_automatically: bool,
    pub notes: String,
}

/// Budget persistence store. Deltas are applied as additive mutations; the
/// caller must serialize concurrent applies targeting the same cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetBook {
    pub cells: Vec<BudgetCell>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies each delta by addition: the amount accumulates, the notes and
    /// style follow the latest write, and the managed flag is overwritten
    /// only when the delta carries one.
    pub fn apply(&mut self, deltas: &[BudgetCellDelta]) {
        for delta in deltas {
            match self.cell_mut(delta.category_main, delta.subcategory_id, delta.period) {
                Some(cell) => {
                    cell.amount += delta.amount;
                    cell.style = delta.style;
                    cell.notes = delta.notes.clone();
                    if let Some(flag) = delta.managed_automatically {
                        cell.managed_automatically = flag;
                    }
                }
                None => self.cells.push(BudgetCell {
                    category_main: delta.category_main,
                    subcategory_id: delta.subcategory_id,
                    period: delta.period,
                    amount: delta.amount,
                    style: delta.style,
                    managed_automatically: delta.managed_automatically.unwrap_or(false),
                    notes: delta.notes.clone(),
                }),
            }
        }
    }

    pub fn cell(
        &self,
        category_main: CategoryMain,
        subcategory_id: Uuid,
        period: Period,
    ) -> Option<&BudgetCell> {
        self.cells.iter().find(|cell| {
            cell.category_main == category_main
                && cell.subcategory_id == subcategory_id
                && cell.period == period
        })
    }

    fn cell_mut(
        &mut self,
        category_main: CategoryMain,
        subcategory_id: Uuid,
        period: Period,
    ) -> Option<&mut BudgetCell> {
        self.cells.iter_mut().find(|cell| {
            cell.category_main == category_main
                && cell.subcategory_id == subcategory_id
                && cell.period == period
        })
    }

    /// Net budgeted amount for a subcategory across a whole year.
    pub fn year_total(&self, category_main: CategoryMain, subcategory_id: Uuid, year: i32) -> f64 {
        self.cells
            .iter()
            .filter(|cell| {
                cell.category_main == category_main
                    && cell.subcategory_id == subcategory_id
                    && cell.period.year == year
            })
            .map(|cell| cell.amount)
            .sum()
    }
}

/// Obligation store: persists scheduler mutations and answers the
/// reconciliation query the reversal layer injects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObligationBook {
    pub obligations: Vec<Obligation>,
}

impl ObligationBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, obligation: Obligation) -> Uuid {
        let id = obligation.id;
        self.obligations.push(obligation);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&Obligation> {
        self.obligations.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Obligation> {
        self.obligations.iter_mut().find(|o| o.id == id)
    }

    /// Persists an updated obligation snapshot (scheduler output) in place.
    pub fn persist(&mut self, updated: Obligation) {
        match self.get_mut(updated.id) {
            Some(existing) => *existing = updated,
            None => self.obligations.push(updated),
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Obligation> {
        let index = self.obligations.iter().position(|o| o.id == id)?;
        Some(self.obligations.remove(index))
    }

    /// Whether any *other* active obligation still targets the given
    /// subcategory and month.
    ///
    /// Spread frequencies cover every month of the year; one-time obligations
    /// cover only their start month.
    pub fn has_other_active_obligation(
        &self,
        table: &SubcategoryTable,
        category_main: CategoryMain,
        subcategory_name: &str,
        month_index: u32,
        excluding: Uuid,
    ) -> bool {
        self.obligations
            .iter()
            .filter(|o| o.id != excluding && o.is_active && o.category_main == category_main)
            .filter(|o| {
                table
                    .resolve(o)
                    .map(|sub| sub.name.eq_ignore_ascii_case(subcategory_name))
                    .unwrap_or(false)
            })
            .any(|o| match o.frequency {
                Frequency::OneTime => {
                    use chrono::Datelike;
                    o.start_date.month() - 1 == month_index
                }
                Frequency::Weekly
                | Frequency::Monthly
                | Frequency::Quarterly
                | Frequency::Semiannual
                | Frequency::Yearly => true,
            })
    }
}
