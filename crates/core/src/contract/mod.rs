//! Contract lifecycle management.
//!
//! This module implements the contract state machine and the payment
//! schedule generator it invokes on approval.
//!
//! # Modules
//!
//! - `types` - Contract domain types (ContractStatus, ContractAction)
//! - `error` - Contract-specific error types
//! - `service` - State transition logic
//! - `schedule` - Payment schedule generation

pub mod error;
pub mod schedule;
pub mod service;
pub mod types;


pub use error::ContractError;
pub use schedule::ScheduledItem;
pub use service::ContractService;
pub use types::{
    CancellationContext, Contract, ContractAction, ContractStatus, ContractTransition,
    FinancingType,
};
