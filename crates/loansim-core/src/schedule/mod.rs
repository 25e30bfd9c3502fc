//! Payment-plan construction: due-date table, carried balance recurrence,
//! and the regressive withholding tax on interest.

pub mod payment_plan;
pub mod withholding;
