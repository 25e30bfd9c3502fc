use loansim_core::schedule::payment_plan::PaymentPlanOutput;
use loansim_core::types::ComputationOutput;

use crate::commands::tax_rate::TaxBracket;

/// Print the headline figures of a plan on a single line.
pub fn print_plan(report: &ComputationOutput<PaymentPlanOutput>) {
    let plan = &report.result;
    let periods = plan.installments.len().saturating_sub(1);
    println!(
        "financed {} over {} installments: interest {}, tax {}",
        plan.financed_amount, periods, plan.summary.total_interest, plan.summary.total_tax
    );
}

/// Print a withholding bracket as a single line.
pub fn print_bracket(bracket: &TaxBracket) {
    println!(
        "{} days: {} ({}%)",
        bracket.days_since_release, bracket.rate, bracket.rate_pct
    );
}
