//! Ledger domain types.
//!
//! Sign convention, applied consistently across the engine:
//! - Reductions of what the borrower still owes (`Payment`, `Prepayment`)
//!   are recorded with NEGATIVE amounts.
//! - Charges (`Interest`) are recorded with POSITIVE amounts.
//! - Scheduled future-due items (`Reservation`, `DownPayment`, `Installment`,
//!   `Due`) are recorded with NEGATIVE amounts and do not affect the balance
//!   projection; they describe the schedule, not money that moved.

use chrono::NaiveDate;
use lotfin_shared::types::{ContractId, LedgerEntryId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Scheduled lump payment due (bank/cash financing).
    Due,
    /// A received payment applied to the contract.
    Payment,
    /// Overdue interest charged at collection time.
    Interest,
    /// Manual correction or reversal of a charge.
    Adjustment,
    /// Scheduled reservation payment.
    Reservation,
    /// Scheduled down payment.
    DownPayment,
    /// Scheduled installment.
    Installment,
    /// Out-of-schedule capital repayment.
    Prepayment,
}

impl EntryType {
    /// Returns the string representation of the entry type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Due => "due",
            Self::Payment => "payment",
            Self::Interest => "interest",
            Self::Adjustment => "adjustment",
            Self::Reservation => "reservation",
            Self::DownPayment => "down_payment",
            Self::Installment => "installment",
            Self::Prepayment => "prepayment",
        }
    }

    /// Returns true if entries of this type reduce the contract balance.
    ///
    /// Only applied money moves the balance; scheduled items and charges
    /// do not participate in the balance projection.
    #[must_use]
    pub fn affects_balance(&self) -> bool {
        matches!(self, Self::Payment | Self::Prepayment)
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted, immutable ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier.
    pub id: LedgerEntryId,
    /// The contract this entry belongs to.
    pub contract_id: ContractId,
    /// The payment this entry traces back to, if any.
    pub payment_id: Option<PaymentId>,
    /// Signed amount (see the module-level sign convention).
    pub amount: Decimal,
    /// Human-readable description of the financial event.
    pub description: String,
    /// Entry classification.
    pub entry_type: EntryType,
    /// The date the financial event was recorded.
    pub entry_date: NaiveDate,
}

/// A ledger entry draft produced by the engine for the caller to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    /// Pre-generated unique identifier.
    pub id: LedgerEntryId,
    /// The contract this entry belongs to.
    pub contract_id: ContractId,
    /// The payment this entry traces back to, if any.
    pub payment_id: Option<PaymentId>,
    /// Signed amount (see the module-level sign convention).
    pub amount: Decimal,
    /// Human-readable description of the financial event.
    pub description: String,
    /// Entry classification.
    pub entry_type: EntryType,
    /// The date the financial event was recorded.
    pub entry_date: NaiveDate,
}

impl NewLedgerEntry {
    /// Creates a new entry draft with a freshly generated id.
    #[must_use]
    pub fn new(
        contract_id: ContractId,
        payment_id: Option<PaymentId>,
        amount: Decimal,
        description: impl Into<String>,
        entry_type: EntryType,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            id: LedgerEntryId::new(),
            contract_id,
            payment_id,
            amount,
            description: description.into(),
            entry_type,
            entry_date,
        }
    }

    /// Converts the draft into a persisted entry record.
    #[must_use]
    pub fn into_entry(self) -> LedgerEntry {
        LedgerEntry {
            id: self.id,
            contract_id: self.contract_id,
            payment_id: self.payment_id,
            amount: self.amount,
            description: self.description,
            entry_type: self.entry_type,
            entry_date: self.entry_date,
        }
    }
}
