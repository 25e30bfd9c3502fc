use chrono::NaiveDate;
use loansim_core::schedule::{payment_plan, withholding};
use loansim_core::LoanSimError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_loan() -> payment_plan::PaymentPlanInput {
    // 10,000 released over 3 installments of 3,500 at 2% a month, 50 of
    // IOF, released on 2024-01-01. Hand-checked below row by row.
    payment_plan::PaymentPlanInput {
        principal: dec!(10000),
        installment_count: 3,
        monthly_rate: dec!(0.02),
        iof: dec!(50),
        tac: dec!(0),
        installment_amount: dec!(3500),
        start_date: date(2024, 1, 1),
    }
}

fn two_year_loan() -> payment_plan::PaymentPlanInput {
    payment_plan::PaymentPlanInput {
        principal: dec!(50000),
        installment_count: 26,
        monthly_rate: dec!(0.015),
        iof: dec!(180.50),
        tac: dec!(25),
        installment_amount: dec!(2400),
        start_date: date(2023, 3, 10),
    }
}

// ===========================================================================
// Worked scenario
// ===========================================================================

#[test]
fn test_scenario_full_schedule() {
    let plan = payment_plan::build_payment_plan(&sample_loan())
        .unwrap()
        .result;

    assert_eq!(plan.financed_amount, dec!(10050));

    let rows = &plan.installments;
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].ending_balance, dec!(10050));
    assert_eq!(rows[0].amortization, dec!(10050));

    assert_eq!(rows[1].begin_balance, Some(dec!(10050.00)));
    assert_eq!(rows[1].interest, Some(dec!(201.00)));
    assert_eq!(rows[1].amortization, dec!(-3500));
    assert_eq!(rows[1].ending_balance, dec!(6751.00));
    assert_eq!(rows[1].principal_amortization, dec!(3299.00));

    assert_eq!(rows[2].begin_balance, Some(dec!(6751.00)));
    assert_eq!(rows[2].interest, Some(dec!(135.02)));
    assert_eq!(rows[2].ending_balance, dec!(3386.02));
    assert_eq!(rows[2].principal_amortization, dec!(3364.98));

    // Raw ending balance of the last row was -46.26 before settlement.
    assert_eq!(rows[3].interest, Some(dec!(67.72)));
    assert_eq!(rows[3].ending_balance, dec!(0.00));
    assert_eq!(rows[3].begin_balance, Some(dec!(3432.28)));
    assert_eq!(rows[3].principal_amortization, dec!(3386.02));
}

#[test]
fn test_scenario_due_dates_and_days() {
    let plan = payment_plan::build_payment_plan(&sample_loan())
        .unwrap()
        .result;
    let rows = &plan.installments;

    assert_eq!(rows[0].due_date, date(2024, 1, 1));
    assert_eq!(rows[1].due_date, date(2024, 2, 1));
    assert_eq!(rows[2].due_date, date(2024, 3, 1));
    assert_eq!(rows[3].due_date, date(2024, 4, 1));

    let days: Vec<i64> = rows.iter().map(|r| r.days_since_release).collect();
    assert_eq!(days, vec![0, 31, 60, 91]);
}

// ===========================================================================
// Schedule laws
// ===========================================================================

#[test]
fn test_terminal_balance_is_exactly_zero() {
    for input in [sample_loan(), two_year_loan()] {
        let plan = payment_plan::build_payment_plan(&input).unwrap().result;
        let last = plan.installments.last().unwrap();
        assert_eq!(
            last.ending_balance,
            Decimal::ZERO,
            "last ending balance must close at exactly zero"
        );
    }
}

#[test]
fn test_row_count_law() {
    let plan = payment_plan::build_payment_plan(&two_year_loan())
        .unwrap()
        .result;
    assert_eq!(plan.installments.len(), 27);
}

#[test]
fn test_recurrence_consistency() {
    // Every payment row except the settled last one opens on the previous
    // row's ending balance.
    let plan = payment_plan::build_payment_plan(&two_year_loan())
        .unwrap()
        .result;
    let rows = &plan.installments;

    for i in 2..rows.len() - 1 {
        assert_eq!(
            rows[i].begin_balance,
            Some(rows[i - 1].ending_balance),
            "row {} must open on row {}'s ending balance",
            i,
            i - 1
        );
    }
}

#[test]
fn test_days_monotonic() {
    let plan = payment_plan::build_payment_plan(&two_year_loan())
        .unwrap()
        .result;
    let rows = &plan.installments;

    assert_eq!(rows[0].days_since_release, 0);
    for pair in rows.windows(2) {
        assert!(pair[0].days_since_release <= pair[1].days_since_release);
    }
}

#[test]
fn test_idempotence() {
    let input = two_year_loan();
    let first = payment_plan::build_payment_plan(&input).unwrap().result;
    let second = payment_plan::build_payment_plan(&input).unwrap().result;
    assert_eq!(first, second);
}

#[test]
fn test_principal_amortization_sums_to_financed_amount() {
    let plan = payment_plan::build_payment_plan(&two_year_loan())
        .unwrap()
        .result;
    assert_eq!(
        plan.summary.total_principal_amortized,
        plan.financed_amount
    );
}

// ===========================================================================
// Calendar behavior
// ===========================================================================

#[test]
fn test_month_end_release_clamps() {
    let input = payment_plan::PaymentPlanInput {
        principal: dec!(9000),
        installment_count: 3,
        monthly_rate: dec!(0.02),
        iof: dec!(0),
        tac: dec!(0),
        installment_amount: dec!(3200),
        start_date: date(2024, 1, 31),
    };
    let plan = payment_plan::build_payment_plan(&input).unwrap().result;
    let rows = &plan.installments;

    assert_eq!(rows[1].due_date, date(2024, 2, 29));
    assert_eq!(rows[2].due_date, date(2024, 3, 31));
    assert_eq!(rows[3].due_date, date(2024, 4, 30));
    assert_eq!(rows[1].days_since_release, 29);
    assert_eq!(rows[2].days_since_release, 60);
    assert_eq!(rows[3].days_since_release, 90);
}

// ===========================================================================
// Withholding brackets
// ===========================================================================

#[test]
fn test_withholding_bracket_boundaries() {
    assert_eq!(withholding::rate_for_days(180), dec!(0.2250));
    assert_eq!(withholding::rate_for_days(181), dec!(0.2000));
    assert_eq!(withholding::rate_for_days(360), dec!(0.2000));
    assert_eq!(withholding::rate_for_days(361), dec!(0.1750));
    assert_eq!(withholding::rate_for_days(720), dec!(0.1750));
    assert_eq!(withholding::rate_for_days(721), dec!(0.1500));
}

#[test]
fn test_withholding_follows_elapsed_days() {
    let plan = payment_plan::build_payment_plan(&two_year_loan())
        .unwrap()
        .result;

    for row in plan.installments.iter().skip(1) {
        let interest = row.interest.unwrap();
        let expected = (interest * withholding::rate_for_days(row.days_since_release)).round_dp(2);
        assert_eq!(row.tax, Some(expected), "row {}", row.number);
    }
}

// ===========================================================================
// Release row treatment
// ===========================================================================

#[test]
fn test_release_row_has_no_interest_or_tax() {
    let plan = payment_plan::build_payment_plan(&sample_loan())
        .unwrap()
        .result;
    let release = &plan.installments[0];

    assert_eq!(release.begin_balance, None);
    assert_eq!(release.interest, None);
    assert_eq!(release.tax, None);
    assert_eq!(release.principal_amortization, -plan.financed_amount);
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn test_invalid_inputs_name_the_field() {
    let cases: Vec<(&str, payment_plan::PaymentPlanInput)> = vec![
        ("principal", {
            let mut i = sample_loan();
            i.principal = dec!(0);
            i
        }),
        ("installment_count", {
            let mut i = sample_loan();
            i.installment_count = 0;
            i
        }),
        ("monthly_rate", {
            let mut i = sample_loan();
            i.monthly_rate = dec!(-0.02);
            i
        }),
        ("iof", {
            let mut i = sample_loan();
            i.iof = dec!(-1);
            i
        }),
        ("tac", {
            let mut i = sample_loan();
            i.tac = dec!(-1);
            i
        }),
        ("installment_amount", {
            let mut i = sample_loan();
            i.installment_amount = dec!(0);
            i
        }),
    ];

    for (expected_field, input) in cases {
        let err = payment_plan::build_payment_plan(&input).unwrap_err();
        match err {
            LoanSimError::InvalidInput { field, .. } => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidInput for {expected_field}, got {other:?}"),
        }
    }
}

#[test]
fn test_divergent_balance_is_rejected() {
    let input = payment_plan::PaymentPlanInput {
        principal: dec!(200000),
        installment_count: 6,
        monthly_rate: dec!(0.03),
        iof: dec!(0),
        tac: dec!(0),
        installment_amount: dec!(2000),
        start_date: date(2024, 1, 1),
    };

    let err = payment_plan::build_payment_plan(&input).unwrap_err();
    assert!(matches!(err, LoanSimError::ArithmeticAnomaly { .. }));
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_envelope_metadata_populated() {
    let report = payment_plan::build_payment_plan(&sample_loan()).unwrap();

    assert!(report.methodology.contains("payment plan"));
    assert_eq!(report.metadata.precision, "rust_decimal_128bit");
    assert_eq!(
        report.assumptions.get("financed_amount").and_then(|v| v.as_str()),
        Some("10050")
    );
}
