//! Credit score calculation.
//!
//! Weighted score over a borrower's contract and payment history, computed
//! by the background job the other services request through
//! [`crate::events::EngineEvent::CreditScoreRecalcRequested`].
//!
//! # Modules
//!
//! - `service` - The weighted score calculation
//! - `types` - Score result types

pub mod service;
pub mod types;

pub use service::CreditScoreService;
pub use types::CreditScore;
