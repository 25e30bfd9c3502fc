use std::io;

use loansim_core::schedule::payment_plan::PaymentPlanOutput;
use loansim_core::types::{ComputationOutput, Money};

/// Write the installment schedule as CSV to stdout, one record per row.
pub fn print_plan(report: &ComputationOutput<PaymentPlanOutput>) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let _ = wtr.write_record([
        "number",
        "due_date",
        "days_since_release",
        "amortization",
        "begin_balance",
        "interest",
        "ending_balance",
        "principal_amortization",
        "tax",
    ]);

    for row in &report.result.installments {
        let _ = wtr.write_record([
            row.number.to_string(),
            row.due_date.to_string(),
            row.days_since_release.to_string(),
            row.amortization.to_string(),
            opt_money(row.begin_balance),
            opt_money(row.interest),
            row.ending_balance.to_string(),
            row.principal_amortization.to_string(),
            opt_money(row.tax),
        ]);
    }

    let _ = wtr.flush();
}

fn opt_money(value: Option<Money>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
