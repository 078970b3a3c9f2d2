//! Capital repayment handling.
//!
//! Applies an out-of-schedule principal reduction to an approved contract
//! and marks the scheduled installments whose amounts became stale.
//!
//! # Modules
//!
//! - `error` - Repayment-specific error types
//! - `service` - Repayment application and readjustment marking

pub mod error;
pub mod service;

#[cfg(test)]
mod service_props;

pub use error::RepaymentError;
pub use service::{RepaymentOutcome, RepaymentService};
