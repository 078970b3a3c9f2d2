//! Overdue interest accrual.
//!
//! Recomputes simple daily interest on overdue pending payments. Accrual
//! only updates the interest carried on each payment; the interest ledger
//! entry is written when the payment is eventually approved.
//!
//! # Modules
//!
//! - `error` - Accrual-specific error types
//! - `service` - The periodic accrual batch
//! - `types` - Accrual run results

pub mod error;
pub mod service;
pub mod types;

pub use error::AccrualError;
pub use service::OverdueInterestService;
pub use types::{AccrualFailure, AccrualRun, InterestUpdate};
