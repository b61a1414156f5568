use chrono::NaiveDate;
use uuid::Uuid;

use crate::engine::distribution::{distribute, DistributionOptions};
use crate::engine::obligation::{ConfirmationMode, Obligation};
use crate::engine::reversal::remove;
use crate::engine::scheduler::{is_due, materialize};
use crate::engine::subcategory::SubcategoryTable;
use crate::ledger::{CategoryMain, LedgerTransaction};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{BudgetBook, ObligationBook};

/// Validated lifecycle helpers for recurring obligations.
///
/// The engine stays pure; this service owns the read-modify-write against the
/// stores. Callers running it concurrently must serialize per obligation and
/// per budget cell.
pub struct ObligationService;

impl ObligationService {
    /// Registers a new obligation and distributes it into the budget.
    pub fn create(
        obligations: &mut ObligationBook,
        budget: &mut BudgetBook,
        table: &SubcategoryTable,
        obligation: Obligation,
        target_year: i32,
        options: &DistributionOptions,
    ) -> ServiceResult<Uuid> {
        let deltas = distribute(&obligation, target_year, table, options)?;
        budget.apply(&deltas);
        Ok(obligations.add(obligation))
    }

    /// Edits an obligation by removing its old distribution and applying the
    /// new one, in that order, so the budget cells stay additive.
    pub fn edit<F>(
        obligations: &mut ObligationBook,
        budget: &mut BudgetBook,
        table: &SubcategoryTable,
        id: Uuid,
        target_year: i32,
        options: &DistributionOptions,
        mutator: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut Obligation),
    {
        let old = obligations
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Obligation not found".into()))?;
        let removal = Self::removal_deltas(obligations, table, &old, target_year, options)?;

        let mut updated = old;
        mutator(&mut updated);
        let addition = distribute(&updated, target_year, table, options)?;

        budget.apply(&removal);
        budget.apply(&addition);
        obligations.persist(updated);
        Ok(())
    }

    /// Deactivates an obligation and backs its distribution out of the
    /// budget, reconciling the managed flag against surviving siblings.
    pub fn deactivate(
        obligations: &mut ObligationBook,
        budget: &mut BudgetBook,
        table: &SubcategoryTable,
        id: Uuid,
        target_year: i32,
        options: &DistributionOptions,
    ) -> ServiceResult<()> {
        let subject = obligations
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Obligation not found".into()))?;
        let deltas = Self::removal_deltas(obligations, table, &subject, target_year, options)?;
        budget.apply(&deltas);
        if let Some(stored) = obligations.get_mut(id) {
            stored.deactivate();
        }
        Ok(())
    }

    /// Deletes an obligation outright. Same budget reversal as deactivation,
    /// then the record is dropped from the store.
    pub fn delete(
        obligations: &mut ObligationBook,
        budget: &mut BudgetBook,
        table: &SubcategoryTable,
        id: Uuid,
        target_year: i32,
        options: &DistributionOptions,
    ) -> ServiceResult<Obligation> {
        let subject = obligations
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Obligation not found".into()))?;
        let deltas = Self::removal_deltas(obligations, table, &subject, target_year, options)?;
        budget.apply(&deltas);
        obligations
            .remove(id)
            .ok_or_else(|| ServiceError::Invalid("Obligation vanished during delete".into()))
    }

    /// Materializes every due obligation in automatic mode, recording one
    /// ledger transaction per occurrence and persisting the advanced
    /// schedule. Manual obligations are skipped; they wait for
    /// [`ObligationService::confirm`].
    pub fn materialize_due(
        obligations: &mut ObligationBook,
        transactions: &mut Vec<LedgerTransaction>,
        table: &SubcategoryTable,
        account_id: Uuid,
        now: NaiveDate,
    ) -> ServiceResult<Vec<Uuid>> {
        let due_ids: Vec<Uuid> = obligations
            .obligations
            .iter()
            .filter(|o| o.confirmation_mode == ConfirmationMode::Automatic && is_due(o, now))
            .map(|o| o.id)
            .collect();

        let mut materialized = Vec::new();
        for id in due_ids {
            Self::materialize_one(obligations, transactions, table, account_id, id, now)?;
            materialized.push(id);
        }
        Ok(materialized)
    }

    /// Explicit user-confirmation call site for manual obligations.
    pub fn confirm(
        obligations: &mut ObligationBook,
        transactions: &mut Vec<LedgerTransaction>,
        table: &SubcategoryTable,
        account_id: Uuid,
        id: Uuid,
        now: NaiveDate,
    ) -> ServiceResult<()> {
        Self::materialize_one(obligations, transactions, table, account_id, id, now)
    }

    fn materialize_one(
        obligations: &mut ObligationBook,
        transactions: &mut Vec<LedgerTransaction>,
        table: &SubcategoryTable,
        account_id: Uuid,
        id: Uuid,
        now: NaiveDate,
    ) -> ServiceResult<()> {
        let subject = obligations
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Obligation not found".into()))?;
        let subcategory = table.resolve(&subject)?;
        let occurrence_date = subject.next_due_date;
        let result = materialize(&subject, now)?;

        transactions.push(LedgerTransaction::from_obligation(
            &subject,
            subcategory.id,
            account_id,
            occurrence_date,
        ));
        tracing::info!(
            obligation = %subject.id,
            occurrence = %occurrence_date,
            next = %result.updated.next_due_date,
            "materialized obligation occurrence"
        );
        obligations.persist(result.updated);
        Ok(())
    }

    fn removal_deltas(
        obligations: &ObligationBook,
        table: &SubcategoryTable,
        subject: &Obligation,
        target_year: i32,
        options: &DistributionOptions,
    ) -> ServiceResult<Vec<crate::engine::distribution::BudgetCellDelta>> {
        let query = |main: CategoryMain,
                     name: &str,
                     month_index: u32,
                     excluding: Uuid|
         -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            Ok(obligations.has_other_active_obligation(table, main, name, month_index, excluding))
        };
        Ok(remove(subject, target_year, table, options, Some(&query))?)
    }
}
