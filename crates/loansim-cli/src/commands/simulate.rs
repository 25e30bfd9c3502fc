use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use loansim_core::schedule::payment_plan::{self, PaymentPlanInput, PaymentPlanOutput};
use loansim_core::types::ComputationOutput;

use crate::input;

/// Arguments for payment-plan simulation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SimulateArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount released to the borrower
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Number of installments
    #[arg(long, alias = "installment-count")]
    pub installments: Option<u32>,

    /// Monthly interest rate as a decimal (0.02 = 2%)
    #[arg(long)]
    pub monthly_rate: Option<Decimal>,

    /// One-time credit tax added to the financed principal
    #[arg(long)]
    pub iof: Option<Decimal>,

    /// One-time administration fee added to the financed principal
    #[arg(long)]
    pub tac: Option<Decimal>,

    /// Fixed amount paid on every installment
    #[arg(long)]
    pub installment_amount: Option<Decimal>,

    /// Release date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run(
    args: SimulateArgs,
) -> Result<ComputationOutput<PaymentPlanOutput>, Box<dyn std::error::Error>> {
    let plan_input: PaymentPlanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_piped()? {
        piped
    } else {
        PaymentPlanInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            installment_count: args
                .installments
                .ok_or("--installments is required (or provide --input)")?,
            monthly_rate: args
                .monthly_rate
                .ok_or("--monthly-rate is required (or provide --input)")?,
            iof: args.iof.ok_or("--iof is required (or provide --input)")?,
            tac: args.tac.ok_or("--tac is required (or provide --input)")?,
            installment_amount: args
                .installment_amount
                .ok_or("--installment-amount is required (or provide --input)")?,
            start_date: args
                .start_date
                .ok_or("--start-date is required (or provide --input)")?,
        }
    };

    let report = payment_plan::build_payment_plan(&plan_input)?;
    Ok(report)
}
