//! Entry validation and balance reconciliation.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{LedgerEntry, NewLedgerEntry};

/// Stateless ledger service.
///
/// The ledger exposes exactly two operations: validating an entry before it
/// is appended, and aggregating entries into a balance. Entries are never
/// mutated or deleted here; the only deletion path is whole-contract
/// cancellation cleanup, directed by the contract state machine.
pub struct LedgerService;

impl LedgerService {
    /// Validates an entry draft before it is appended.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ZeroAmount` for a zero amount and
    /// `LedgerError::DescriptionRequired` for a blank description.
    pub fn validate(entry: &NewLedgerEntry) -> Result<(), LedgerError> {
        if entry.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if entry.description.trim().is_empty() {
            return Err(LedgerError::DescriptionRequired);
        }
        Ok(())
    }

    /// Sums the signed amounts of all entries.
    #[must_use]
    pub fn entry_sum(entries: &[LedgerEntry]) -> Decimal {
        entries.iter().map(|e| e.amount).sum()
    }

    /// Signed sum of applied money (payment and prepayment entries).
    ///
    /// Payments are negative, undo reversals positive, so the sum nets
    /// to the total reduction currently applied to the contract.
    #[must_use]
    pub fn applied_delta(entries: &[LedgerEntry]) -> Decimal {
        entries
            .iter()
            .filter(|e| e.entry_type.affects_balance())
            .map(|e| e.amount)
            .sum()
    }

    /// Reconciles the contract balance from the ledger.
    ///
    /// Invariant: at any point, the cached `Contract::balance` must equal
    /// this value for the contract's entries.
    #[must_use]
    pub fn reconciled_balance(amount: Decimal, entries: &[LedgerEntry]) -> Decimal {
        amount + Self::applied_delta(entries)
    }
}
