pub mod error;
pub mod schedule;
pub mod types;

pub use error::LoanSimError;
pub use types::*;

/// Standard result type for all loansim operations
pub type LoanSimResult<T> = Result<T, LoanSimError>;
