//! Recurring obligation engine: distribution, reversal, and scheduling.

pub mod distribution;
pub mod obligation;
pub mod period;
pub mod reversal;
pub mod scheduler;
pub mod subcategory;

pub use distribution::{
    distribute, BudgetCellDelta, CellStyle, DistributionOptions, YearlyMode,
};
pub use obligation::{ConfirmationMode, Frequency, Obligation};
pub use period::Period;
pub use reversal::{remove, SiblingQuery};
pub use scheduler::{is_due, materialize, Materialized, ScheduleStep};
pub use subcategory::{Subcategory, SubcategoryRef, SubcategoryTable};
