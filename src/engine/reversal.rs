use std::error::Error;

use uuid::Uuid;

use super::distribution::{distribute, BudgetCellDelta, DistributionOptions};
use super::obligation::Obligation;
use super::subcategory::SubcategoryTable;
use crate::errors::EngineError;
use crate::ledger::CategoryMain;

/// Injected query against the obligation store: does any *other* active
/// obligation still target this subcategory and month?
///
/// Budget cells are shared storage; removing one obligation must not blindly
/// clear the auto-managed marker while a sibling still owns the cell.
pub trait SiblingQuery {
    fn has_other_active(
        &self,
        category_main: CategoryMain,
        subcategory_name: &str,
        month_index: u32,
        excluding: Uuid,
    ) -> Result<bool, Box<dyn Error + Send + Sync>>;
}

impl<F> SiblingQuery for F
where
    F: Fn(CategoryMain, &str, u32, Uuid) -> Result<bool, Box<dyn Error + Send + Sync>>,
{
    fn has_other_active(
        &self,
        category_main: CategoryMain,
        subcategory_name: &str,
        month_index: u32,
        excluding: Uuid,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        self(category_main, subcategory_name, month_index, excluding)
    }
}

/// Produces the budget-cell deltas that undo an obligation's distribution.
///
/// Each delta's amount is the negative magnitude of the distribution amount;
/// removal is always a subtraction, regardless of category sign conventions.
/// When `query` is supplied, `managed_automatically` is reconciled per cell
/// against the remaining active obligations; when it is absent the field is
/// left as `None` so the persistence layer keeps the stored flag untouched.
///
/// A failing query does not abort the removal: aborting would leave deltas
/// unapplied while the obligation is already deactivated, a worse
/// inconsistency. The failure is logged and the affected cell's flag is left
/// unchanged.
pub fn remove(
    obligation: &Obligation,
    target_year: i32,
    table: &SubcategoryTable,
    options: &DistributionOptions,
    query: Option<&dyn SiblingQuery>,
) -> Result<Vec<BudgetCellDelta>, EngineError> {
    let subcategory = table.resolve(obligation)?;
    let mut deltas = distribute(obligation, target_year, table, options)?;
    let notes = format!(
        "Removed automatic distribution for obligation \"{}\"",
        obligation.title
    );

    for delta in &mut deltas {
        delta.amount = -delta.amount.abs();
        delta.notes = notes.clone();
        delta.managed_automatically = match query {
            None => None,
            Some(query) => {
                let month_index = delta.period.month - 1;
                match query.has_other_active(
                    delta.category_main,
                    &subcategory.name,
                    month_index,
                    obligation.id,
                ) {
                    Ok(still_owned) => Some(still_owned),
                    Err(error) => {
                        tracing::warn!(
                            obligation = %obligation.id,
                            period = %delta.period,
                            %error,
                            "sibling query failed; leaving managed flag unchanged"
                        );
                        None
                    }
                }
            }
        };
    }

    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::obligation::{ConfirmationMode, Frequency};
    use crate::engine::subcategory::{Subcategory, SubcategoryRef};
    use chrono::NaiveDate;

    fn fixture(frequency: Frequency, amount: f64) -> (Obligation, SubcategoryTable) {
        let mut table = SubcategoryTable::new();
        let sub_id = Uuid::new_v4();
        table.insert(
            CategoryMain::Expense,
            Subcategory {
                id: sub_id,
                name: "Insurance".into(),
            },
        );
        let obligation = Obligation::new(
            "Car insurance",
            amount,
            frequency,
            ConfirmationMode::Automatic,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            CategoryMain::Expense,
            SubcategoryRef::Id(sub_id),
        );
        (obligation, table)
    }

    #[test]
    fn removal_negates_every_delta() {
        let (obligation, table) = fixture(Frequency::Quarterly, 300.0);
        let deltas = remove(
            &obligation,
            2025,
            &table,
            &DistributionOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(deltas.len(), 12);
        assert!(deltas.iter().all(|d| d.amount == -100.0));
    }

    #[test]
    fn absent_query_leaves_managed_flag_untouched() {
        let (obligation, table) = fixture(Frequency::Monthly, 50.0);
        let deltas = remove(
            &obligation,
            2025,
            &table,
            &DistributionOptions::default(),
            None,
        )
        .unwrap();
        assert!(deltas.iter().all(|d| d.managed_automatically.is_none()));
    }

    #[test]
    fn query_result_drives_the_managed_flag() {
        let (obligation, table) = fixture(Frequency::Monthly, 50.0);
        let query = |_main: CategoryMain,
                     name: &str,
                     month_index: u32,
                     excluding: Uuid|
         -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            assert_eq!(name, "Insurance");
            assert_ne!(excluding, Uuid::nil());
            Ok(month_index == 0)
        };
        let deltas = remove(
            &obligation,
            2025,
            &table,
            &DistributionOptions::default(),
            Some(&query),
        )
        .unwrap();
        assert_eq!(deltas[0].managed_automatically, Some(true));
        assert!(deltas[1..]
            .iter()
            .all(|d| d.managed_automatically == Some(false)));
    }

    #[test]
    fn query_failure_is_contained_per_cell() {
        let (obligation, table) = fixture(Frequency::Monthly, 50.0);
        let query = |_main: CategoryMain,
                     _name: &str,
                     month_index: u32,
                     _excluding: Uuid|
         -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            if month_index == 5 {
                Err("store unreachable".into())
            } else {
                Ok(false)
            }
        };
        let deltas = remove(
            &obligation,
            2025,
            &table,
            &DistributionOptions::default(),
            Some(&query),
        )
        .unwrap();
        assert_eq!(deltas[5].managed_automatically, None);
        assert_eq!(deltas[4].managed_automatically, Some(false));
        assert!(deltas.iter().all(|d| d.amount == -50.0));
    }
}
