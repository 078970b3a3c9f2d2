//! Core financial lifecycle engine for Lotfin.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Services are stateless: entity snapshots come in as arguments, outcomes go out
//! as value types the caller persists inside one database transaction, together
//! with a list of events to dispatch after that transaction commits.
//!
//! # Modules
//!
//! - `contract` - Contract lifecycle state machine and schedule generation
//! - `payment` - Payment lifecycle state machine
//! - `ledger` - Append-only contract ledger and balance reconciliation
//! - `repayment` - Capital repayment and installment readjustment marking
//! - `accrual` - Overdue interest accrual batch
//! - `score` - Credit score calculation
//! - `events` - Engine events and external collaborator interfaces

pub mod accrual;
pub mod contract;
pub mod events;
pub mod ledger;
pub mod payment;
pub mod repayment;
pub mod score;
