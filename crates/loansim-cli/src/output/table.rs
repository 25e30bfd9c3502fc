use tabled::{builder::Builder, Table};

use loansim_core::schedule::payment_plan::PaymentPlanOutput;
use loansim_core::types::{ComputationOutput, Money};

/// Render the payment plan as a schedule table followed by the summary.
pub fn print_plan(report: &ComputationOutput<PaymentPlanOutput>) {
    let plan = &report.result;

    let mut builder = Builder::default();
    builder.push_record([
        "#",
        "due date",
        "days",
        "amortization",
        "begin balance",
        "interest",
        "ending balance",
        "principal",
        "tax",
    ]);

    for row in &plan.installments {
        builder.push_record([
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

    println!("{}", Table::from(builder));

    println!();
    println!("Financed amount:    {}", plan.financed_amount);
    println!("Total interest:     {}", plan.summary.total_interest);
    println!("Total tax:          {}", plan.summary.total_tax);
    println!(
        "Final adjustment:   {}",
        plan.summary.final_installment_adjustment
    );

    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for w in &report.warnings {
            println!("  - {}", w);
        }
    }

    println!("\nMethodology: {}", report.methodology);
}

fn opt_money(value: Option<Money>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
