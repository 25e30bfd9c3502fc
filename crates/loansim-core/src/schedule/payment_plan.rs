//! Fixed-installment payment plans for released credit.
//!
//! Builds the full amortization schedule for a loan: due dates advanced by
//! calendar months, the carried balance/interest recurrence with cent
//! rounding at every step, the zero-balance correction on the final
//! installment, and the regressive withholding tax on interest. All math
//! uses `rust_decimal::Decimal`.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanSimError;
use crate::schedule::withholding;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Rate};
use crate::LoanSimResult;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Input for building a payment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPlanInput {
    /// Amount released to the borrower.
    pub principal: Money,
    /// Number of future installments. The release row is added on top.
    pub installment_count: u32,
    /// Periodic interest rate per month (0.02 = 2%).
    pub monthly_rate: Rate,
    /// One-time credit tax added to the financed principal.
    pub iof: Money,
    /// One-time administration fee added to the financed principal.
    pub tac: Money,
    /// Fixed amount paid on every installment.
    pub installment_amount: Money,
    /// Release date; installment 0 falls on it.
    pub start_date: NaiveDate,
}

/// A single row of the payment plan. Row 0 is the disbursement itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// Period number; 0 is the release row.
    pub number: u32,
    /// The release date advanced by `number` calendar months.
    pub due_date: NaiveDate,
    /// Whole days between the due date and the release date.
    pub days_since_release: i64,
    /// Cash flow of the period: the financed amount as an inflow on row 0,
    /// the fixed installment as an outflow afterwards.
    pub amortization: Money,
    /// Outstanding balance at the start of the period. Absent on row 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_balance: Option<Money>,
    /// Interest accrued over the period. Absent on row 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<Money>,
    /// Outstanding balance at the end of the period.
    pub ending_balance: Money,
    /// Portion of the cash flow that reduces principal.
    pub principal_amortization: Money,
    /// Withholding tax on the period's interest. Absent on row 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Money>,
}

/// Output of a payment plan build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlanOutput {
    /// Principal plus one-time charges; the amount that accrues interest.
    pub financed_amount: Money,
    /// `installment_count + 1` rows, release row first. Order is
    /// load-bearing: each row consumes the previous row's ending balance.
    pub installments: Vec<Installment>,
    pub summary: PaymentPlanSummary,
}

/// Aggregates over the whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlanSummary {
    /// Sum of interest across all installments.
    pub total_interest: Money,
    /// Sum of withholding tax across all installments.
    pub total_tax: Money,
    /// Sum of principal amortization on the payment rows. Equals the
    /// financed amount once the final installment absorbs the residual.
    pub total_principal_amortized: Money,
    /// Residual the final installment absorbed to close the balance at
    /// exactly zero. Negative when the fixed installment overshoots.
    pub final_installment_adjustment: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full payment plan for a released credit.
///
/// Stages run strictly in order: due-date table, balance/interest
/// recurrence, final-installment settlement, withholding. Any stage
/// failure propagates unchanged; no partial plan is ever returned.
pub fn build_payment_plan(
    input: &PaymentPlanInput,
) -> LoanSimResult<ComputationOutput<PaymentPlanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_payment_plan_input(input)?;

    let financed_amount = round_money(input.principal + input.iof + input.tac);

    let dates = date_table(input.installment_count, input.start_date)?;
    let mut installments = run_recurrence(
        &dates,
        financed_amount,
        input.monthly_rate,
        input.installment_amount,
    )?;
    let adjustment = settle_final_installment(&mut installments);
    apply_withholding(&mut installments);

    if adjustment.abs() >= input.installment_amount {
        warnings.push(format!(
            "Final installment absorbed a residual of {} at least as large as the fixed installment {}; the installment amount is poorly sized for this plan",
            adjustment, input.installment_amount
        ));
    }

    let summary = summarize(&installments, adjustment);
    let output = PaymentPlanOutput {
        financed_amount,
        installments,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-installment payment plan — calendar-month due dates, carried balance recurrence, regressive withholding on interest",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "financed_amount": financed_amount.to_string(),
            "installment_count": input.installment_count,
            "monthly_rate": input.monthly_rate.to_string(),
            "installment_amount": input.installment_amount.to_string(),
            "start_date": input.start_date.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_payment_plan_input(input: &PaymentPlanInput) -> LoanSimResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.installment_count == 0 {
        return Err(LoanSimError::InvalidInput {
            field: "installment_count".into(),
            reason: "At least one installment is required".into(),
        });
    }
    if input.monthly_rate < Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "monthly_rate".into(),
            reason: "Monthly rate cannot be negative".into(),
        });
    }
    if input.iof < Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "iof".into(),
            reason: "IOF cannot be negative".into(),
        });
    }
    if input.tac < Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "tac".into(),
            reason: "TAC cannot be negative".into(),
        });
    }
    if input.installment_amount <= Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "installment_amount".into(),
            reason: "Installment amount must be positive".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Skeleton row: period number, due date, day offset. Built before any
/// money math runs.
struct DatedRow {
    number: u32,
    due_date: NaiveDate,
    days_since_release: i64,
}

/// One row per period 0..=count. Each due date is the release date advanced
/// by the period number in calendar months, clamped to the last valid day
/// of shorter target months (Jan 31 -> Feb 29 -> Mar 31 in a leap year).
fn date_table(count: u32, start_date: NaiveDate) -> LoanSimResult<Vec<DatedRow>> {
    let mut rows = Vec::with_capacity(count as usize + 1);
    for number in 0..=count {
        let due_date = start_date
            .checked_add_months(Months::new(number))
            .ok_or_else(|| {
                LoanSimError::DateError(format!(
                    "{} plus {} months is out of range",
                    start_date, number
                ))
            })?;
        rows.push(DatedRow {
            number,
            due_date,
            days_since_release: (due_date - start_date).num_days(),
        });
    }
    Ok(rows)
}

/// The carried-balance recurrence.
///
/// Row i consumes row i-1's ending balance, so the loop is strictly
/// sequential. Every monetary field is rounded to cents at the point it is
/// produced and the rounded value is what carries forward; rounding error
/// propagates into later rows rather than accumulating in full precision.
fn run_recurrence(
    dates: &[DatedRow],
    financed_amount: Money,
    monthly_rate: Rate,
    installment_amount: Money,
) -> LoanSimResult<Vec<Installment>> {
    let mut rows = Vec::with_capacity(dates.len());

    // Row 0 records the release: the financed amount flows in and becomes
    // the opening outstanding balance. It never enters the recurrence.
    if let Some(release) = dates.first() {
        rows.push(Installment {
            number: release.number,
            due_date: release.due_date,
            days_since_release: release.days_since_release,
            amortization: financed_amount,
            begin_balance: None,
            interest: None,
            ending_balance: financed_amount,
            principal_amortization: -financed_amount,
            tax: None,
        });
    }

    let mut carry = financed_amount;
    for dated in dates.iter().skip(1) {
        let begin_balance = round_money(carry);
        let interest = round_money(monthly_rate * begin_balance);
        if interest >= installment_amount {
            return Err(LoanSimError::ArithmeticAnomaly {
                context: format!(
                    "interest {} on installment {} is not below the fixed installment {}; the balance would grow without bound",
                    interest, dated.number, installment_amount
                ),
            });
        }
        let amortization = -installment_amount;
        let ending_balance = round_money(begin_balance + interest + amortization);

        rows.push(Installment {
            number: dated.number,
            due_date: dated.due_date,
            days_since_release: dated.days_since_release,
            amortization,
            begin_balance: Some(begin_balance),
            interest: Some(interest),
            ending_balance,
            principal_amortization: -interest - amortization,
            tax: None,
        });

        carry = ending_balance;
    }

    Ok(rows)
}

/// Force the last installment to close the balance at exactly zero.
///
/// The residual moves into the begin balance and principal amortization of
/// the same row, leaving its begin balance intentionally out of step with
/// the previous row's ending balance by the same amount. The last
/// installment absorbs all rounding and sizing drift.
fn settle_final_installment(rows: &mut [Installment]) -> Money {
    let last = match rows.last_mut() {
        Some(row) => row,
        None => return Decimal::ZERO,
    };

    let adjustment = last.ending_balance;
    last.ending_balance -= adjustment;
    last.principal_amortization += adjustment;
    if let Some(begin) = last.begin_balance.as_mut() {
        *begin -= adjustment;
    }
    adjustment
}

/// Charge withholding tax on every row that accrued interest. Row 0 has no
/// interest and keeps no tax.
fn apply_withholding(rows: &mut [Installment]) {
    for row in rows.iter_mut() {
        row.tax = row.interest.map(|interest| {
            round_money(interest * withholding::rate_for_days(row.days_since_release))
        });
    }
}

fn summarize(rows: &[Installment], adjustment: Money) -> PaymentPlanSummary {
    let total_interest: Money = rows.iter().filter_map(|r| r.interest).sum();
    let total_tax: Money = rows.iter().filter_map(|r| r.tax).sum();
    let total_principal_amortized: Money = rows
        .iter()
        .skip(1)
        .map(|r| r.principal_amortization)
        .sum();

    PaymentPlanSummary {
        total_interest,
        total_tax,
        total_principal_amortized,
        final_installment_adjustment: adjustment,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
