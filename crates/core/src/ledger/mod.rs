//! Append-only contract ledger.
//!
//! The ledger is the source of truth for a contract's financial history.
//! Entries are created once per financial event and never mutated; the
//! contract `balance` column is a cached projection reconciled from them.
//!
//! # Modules
//!
//! - `types` - Entry types and the entry records
//! - `error` - Ledger-specific error types
//! - `service` - Entry validation and balance reconciliation

pub mod error;
pub mod service;
pub mod types;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{EntryType, LedgerEntry, NewLedgerEntry};
