#![allow(dead_code)]

use chrono::NaiveDate;
use uuid::Uuid;

use ledger_core::engine::obligation::{ConfirmationMode, Frequency, Obligation};
use ledger_core::engine::subcategory::{Subcategory, SubcategoryRef, SubcategoryTable};
use ledger_core::ledger::CategoryMain;

pub fn expense_table(name: &str) -> (SubcategoryTable, Uuid) {
    let mut table = SubcategoryTable::new();
    let id = Uuid::new_v4();
    table.insert(
        CategoryMain::Expense,
        Subcategory {
            id,
            name: name.to_string(),
        },
    );
    (table, id)
}

pub fn obligation(
    title: &str,
    amount: f64,
    frequency: Frequency,
    start: NaiveDate,
    sub_id: Uuid,
) -> Obligation {
    Obligation::new(
        title,
        amount,
        frequency,
        ConfirmationMode::Automatic,
        start,
        CategoryMain::Expense,
        SubcategoryRef::Id(sub_id),
    )
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
