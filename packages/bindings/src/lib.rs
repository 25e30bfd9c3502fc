use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Payment plan
// ---------------------------------------------------------------------------

#[napi]
pub fn build_payment_plan(input_json: String) -> NapiResult<String> {
    let input: loansim_core::schedule::payment_plan::PaymentPlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loansim_core::schedule::payment_plan::build_payment_plan(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Withholding
// ---------------------------------------------------------------------------

#[napi]
pub fn withholding_rate(days_since_release: i64) -> NapiResult<String> {
    let rate = loansim_core::schedule::withholding::rate_for_days(days_since_release);
    serde_json::to_string(&rate).map_err(to_napi_error)
}
