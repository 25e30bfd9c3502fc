pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use loansim_core::schedule::payment_plan::PaymentPlanOutput;
use loansim_core::types::ComputationOutput;

use crate::commands::tax_rate::TaxBracket;
use crate::OutputFormat;

/// Render a payment-plan report in the selected format.
pub fn render_plan(format: &OutputFormat, report: &ComputationOutput<PaymentPlanOutput>) {
    match format {
        OutputFormat::Json => json::print_json(report),
        OutputFormat::Table => table::print_plan(report),
        OutputFormat::Csv => csv_out::print_plan(report),
        OutputFormat::Minimal => minimal::print_plan(report),
    }
}

/// Render a withholding bracket in the selected format. A bracket is a
/// single scalar, so everything except JSON prints the one-line form.
pub fn render_bracket(format: &OutputFormat, bracket: &TaxBracket) {
    match format {
        OutputFormat::Json => json::print_json(bracket),
        OutputFormat::Table | OutputFormat::Csv | OutputFormat::Minimal => {
            minimal::print_bracket(bracket)
        }
    }
}
