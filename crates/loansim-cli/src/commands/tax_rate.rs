use clap::Args;
use rust_decimal_macros::dec;
use serde::Serialize;

use loansim_core::schedule::withholding;
use loansim_core::types::Rate;

/// Arguments for withholding-bracket lookup
#[derive(Args)]
pub struct TaxRateArgs {
    /// Days elapsed since the credit release
    #[arg(long)]
    pub days: i64,
}

/// A resolved withholding bracket.
#[derive(Debug, Clone, Serialize)]
pub struct TaxBracket {
    pub days_since_release: i64,
    pub rate: Rate,
    pub rate_pct: Rate,
}

pub fn run(args: TaxRateArgs) -> Result<TaxBracket, Box<dyn std::error::Error>> {
    let rate = withholding::rate_for_days(args.days);
    Ok(TaxBracket {
        days_since_release: args.days,
        rate,
        rate_pct: rate * dec!(100),
    })
}
