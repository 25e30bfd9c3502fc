//! Regressive withholding tax on interest income.
//!
//! The rate is selected by the number of whole days between the credit
//! release and the payment date. Longer holding periods pay less.

use rust_decimal_macros::dec;

use crate::types::Rate;

/// Withholding rate for a payment falling `days_since_release` days after
/// the credit release.
///
/// | days       | rate   |
/// |------------|--------|
/// | <= 180     | 0.2250 |
/// | 181..=360  | 0.2000 |
/// | 361..=720  | 0.1750 |
/// | > 720      | 0.1500 |
///
/// Each bracket's upper bound is inclusive: a payment at exactly 720 days
/// still withholds at 0.1750.
pub fn rate_for_days(days_since_release: i64) -> Rate {
    match days_since_release {
        d if d <= 180 => dec!(0.2250),
        d if d <= 360 => dec!(0.2000),
        d if d <= 720 => dec!(0.1750),
        _ => dec!(0.1500),
    }
}
