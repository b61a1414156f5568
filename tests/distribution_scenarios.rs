mod common;

use common::{date, expense_table, obligation};
use ledger_core::engine::distribution::{
    distribute, CellStyle, DistributionOptions, YearlyMode,
};
use ledger_core::engine::obligation::Frequency;
use ledger_core::engine::reversal::remove;
use ledger_core::ledger::CategoryMain;
use uuid::Uuid;

const TOLERANCE: f64 = 1e-9;

#[test]
fn scenario_a_monthly_writes_twelve_full_cells() {
    let (table, sub_id) = expense_table("Housing");
    let subject = obligation("Rent", 100.0, Frequency::Monthly, date(2025, 1, 1), sub_id);
    let deltas = distribute(&subject, 2025, &table, &DistributionOptions::default()).unwrap();

    assert_eq!(deltas.len(), 12);
    let keys: Vec<String> = deltas.iter().map(|d| d.period.key()).collect();
    let expected: Vec<String> = (1..=12).map(|m| format!("2025-{m:02}")).collect();
    assert_eq!(keys, expected);
    assert!(deltas.iter().all(|d| d.amount == 100.0));
    assert!(deltas.iter().all(|d| d.style == CellStyle::Fixed));
}

#[test]
fn scenario_b_quarterly_spreads_each_quarter_evenly() {
    let (table, sub_id) = expense_table("Insurance");
    let subject = obligation(
        "Car insurance",
        300.0,
        Frequency::Quarterly,
        date(2025, 1, 1),
        sub_id,
    );
    let deltas = distribute(&subject, 2025, &table, &DistributionOptions::default()).unwrap();

    assert_eq!(deltas.len(), 12);
    assert!(deltas.iter().all(|d| (d.amount - 100.0).abs() < TOLERANCE));
    for (quarter, chunk) in deltas.chunks(3).enumerate() {
        let months: Vec<u32> = chunk.iter().map(|d| d.period.month).collect();
        let base = quarter as u32 * 3 + 1;
        assert_eq!(months, vec![base, base + 1, base + 2]);
    }
}

#[test]
fn scenario_c_yearly_specific_hits_one_month() {
    let (table, sub_id) = expense_table("Taxes");
    let subject = obligation(
        "Property tax",
        1200.0,
        Frequency::Yearly,
        date(2025, 1, 1),
        sub_id,
    );
    let options = DistributionOptions::yearly_specific(Some(5));
    let deltas = distribute(&subject, 2025, &table, &options).unwrap();

    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].period.key(), "2025-06");
    assert_eq!(deltas[0].amount, 1200.0);
}

#[test]
fn scenario_d_weekly_normalizes_to_monthly_equivalent() {
    let (table, sub_id) = expense_table("Groceries");
    let subject = obligation(
        "Weekly shop",
        50.0,
        Frequency::Weekly,
        date(2025, 1, 1),
        sub_id,
    );
    let deltas = distribute(&subject, 2025, &table, &DistributionOptions::default()).unwrap();

    assert_eq!(deltas.len(), 12);
    let expected = 50.0 * 52.0 / 12.0;
    assert!(deltas.iter().all(|d| (d.amount - expected).abs() < TOLERANCE));
}

#[test]
fn scenario_e_removal_reconciles_the_managed_flag_per_month() {
    let (table, sub_id) = expense_table("Housing");
    let subject = obligation("Rent", 100.0, Frequency::Monthly, date(2025, 1, 1), sub_id);
    let query = |_main: CategoryMain,
                 _name: &str,
                 month_index: u32,
                 _excluding: Uuid|
     -> Result<bool, Box<dyn std::error::Error + Send + Sync>> { Ok(month_index == 0) };
    let deltas = remove(
        &subject,
        2025,
        &table,
        &DistributionOptions::default(),
        Some(&query),
    )
    .unwrap();

    assert_eq!(deltas.len(), 12);
    assert!(deltas.iter().all(|d| d.amount == -100.0));
    assert_eq!(deltas[0].managed_automatically, Some(true));
    assert!(deltas[1..]
        .iter()
        .all(|d| d.managed_automatically == Some(false)));
}

#[test]
fn yearly_sum_invariants_hold_per_frequency() {
    let cases = [
        (Frequency::Monthly, 100.0, 100.0 * 12.0),
        (Frequency::Weekly, 50.0, 50.0 * 52.0),
        (Frequency::Quarterly, 300.0, 300.0 * 4.0),
        (Frequency::Semiannual, 600.0, 600.0 * 2.0),
        (Frequency::Yearly, 1200.0, 1200.0),
    ];
    for (frequency, amount, expected_total) in cases {
        let (table, sub_id) = expense_table("Misc");
        let subject = obligation("Bill", amount, frequency, date(2025, 1, 1), sub_id);
        let deltas = distribute(&subject, 2025, &table, &DistributionOptions::default()).unwrap();
        let total: f64 = deltas.iter().map(|d| d.amount).sum();
        assert!(
            (total - expected_total).abs() < TOLERANCE,
            "{frequency:?}: total {total} != {expected_total}"
        );
    }
}

#[test]
fn distribute_and_remove_cancel_to_the_cent() {
    for frequency in [
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Semiannual,
        Frequency::Yearly,
        Frequency::OneTime,
    ] {
        let (table, sub_id) = expense_table("Misc");
        let subject = obligation("Bill", 87.31, frequency, date(2025, 7, 9), sub_id);
        let options = DistributionOptions::default();
        let applied = distribute(&subject, 2025, &table, &options).unwrap();
        let removed = remove(&subject, 2025, &table, &options, None).unwrap();
        let net: f64 = applied
            .iter()
            .chain(removed.iter())
            .map(|d| d.amount)
            .sum();
        assert!(net.abs() < TOLERANCE, "{frequency:?}: net {net}");
    }
}

#[test]
fn distribution_is_deterministic_for_identical_inputs() {
    let (table, sub_id) = expense_table("Housing");
    let subject = obligation("Rent", 950.0, Frequency::Quarterly, date(2025, 1, 1), sub_id);
    let options = DistributionOptions {
        yearly: YearlyMode::Divide,
    };
    let first = distribute(&subject, 2025, &table, &options).unwrap();
    let second = distribute(&subject, 2025, &table, &options).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
