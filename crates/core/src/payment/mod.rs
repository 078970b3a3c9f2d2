//! Payment lifecycle management.
//!
//! This module implements the per-payment state machine: receipt
//! submission, approval (with balance application and auto-close),
//! rejection, and undo.
//!
//! # Modules
//!
//! - `types` - Payment domain types (PaymentStatus, PaymentAction)
//! - `error` - Payment-specific error types
//! - `service` - State transition logic

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::PaymentError;
pub use service::PaymentService;
pub use types::{
    NewPayment, Payment, PaymentAction, PaymentStatus, PaymentTransition, PaymentType,
};
