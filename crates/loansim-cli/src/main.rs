mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::simulate::SimulateArgs;
use commands::tax_rate::TaxRateArgs;

/// Loan payment-plan simulation with decimal precision
#[derive(Parser)]
#[command(
    name = "loansim",
    version,
    about = "Loan payment-plan simulation with decimal precision",
    long_about = "Builds fixed-installment payment plans for released credit: \
                  calendar-month due dates, carried balance and interest with \
                  cent rounding, a final installment settled at exactly zero, \
                  and the regressive withholding tax on interest."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the payment plan for a loan
    Simulate(SimulateArgs),
    /// Look up the withholding bracket for a day count
    TaxRate(TaxRateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args)
            .map(|report| output::render_plan(&cli.output, &report)),
        Commands::TaxRate(args) => commands::tax_rate::run(args)
            .map(|bracket| output::render_bracket(&cli.output, &bracket)),
        Commands::Version => {
            println!("loansim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
