use serde::{Deserialize, Serialize};

/// Top-level category key that classifies ledger activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryMain {
    Expense,
    Income,
    Debt,
    Saving,
}

impl CategoryMain {
    /// Re-applies the category's sign convention to an engine magnitude.
    ///
    /// The obligation engine works with absolute values throughout; the sign
    /// is decided here, at the caller boundary. Income is an inflow,
    /// everything else leaves the spendable pool.
    pub fn signed_amount(self, amount: f64) -> f64 {
        match self {
            CategoryMain::Income => amount.abs(),
            CategoryMain::Expense | CategoryMain::Debt | CategoryMain::Saving => -amount.abs(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryMain::Expense => "Expense",
            CategoryMain::Income => "Income",
            CategoryMain::Debt => "Debt",
            CategoryMain::Saving => "Saving",
        }
    }
}
