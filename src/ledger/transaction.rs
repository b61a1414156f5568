use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryMain;
use crate::engine::obligation::Obligation;

/// A real, persisted ledger transaction.
///
/// Distinct from an [`Obligation`], which is only the recurring definition a
/// transaction may be materialized from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub category_main: CategoryMain,
    pub subcategory_id: Uuid,
    pub date: NaiveDate,
    /// Signed amount; sign follows `CategoryMain::signed_amount`.
    pub amount: f64,
    pub title: String,
    /// Set when this transaction was materialized from an obligation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obligation_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LedgerTransaction {
    pub fn new(
        account_id: Uuid,
        category_main: CategoryMain,
        subcategory_id: Uuid,
        date: NaiveDate,
        amount: f64,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            category_main,
            subcategory_id,
            date,
            amount,
            title: title.into(),
            obligation_id: None,
            notes: None,
        }
    }

    /// Builds the transaction a due obligation materializes into.
    pub fn from_obligation(
        obligation: &Obligation,
        subcategory_id: Uuid,
        account_id: Uuid,
        date: NaiveDate,
    ) -> Self {
        let amount = obligation.category_main.signed_amount(obligation.amount);
        let mut txn = Self::new(
            account_id,
            obligation.category_main,
            subcategory_id,
            date,
            amount,
            obligation.title.clone(),
        );
        txn.obligation_id = Some(obligation.id);
        txn
    }
}
