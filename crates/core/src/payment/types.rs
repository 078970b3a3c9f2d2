//! Payment domain types.
//!
//! A payment is a scheduled obligation under a contract. The valid
//! lifecycle transitions are:
//! - Pending → Submitted (submit, receipt required)
//! - Submitted → Paid (approve)
//! - Submitted → Rejected (reject)
//! - Paid → Submitted (undo)
//! - Pending → Readjustment (capital repayment marking)

use chrono::{DateTime, NaiveDate, Utc};
use lotfin_shared::types::{ContractId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::NewLedgerEntry;
use crate::ledger::types::EntryType;

/// Payment status in the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment is scheduled and awaiting a receipt.
    Pending,
    /// A receipt has been submitted and awaits review.
    Submitted,
    /// Payment has been approved and applied to the contract balance.
    Paid,
    /// The submitted receipt was rejected.
    Rejected,
    /// Scheduled amount is stale after a capital repayment and must be
    /// recomputed by the recalculation process.
    Readjustment,
}

impl PaymentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
            Self::Readjustment => "readjustment",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "submitted" => Some(Self::Submitted),
            "paid" => Some(Self::Paid),
            "rejected" => Some(Self::Rejected),
            "readjustment" => Some(Self::Readjustment),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Lot reservation payment.
    Reservation,
    /// Down payment.
    DownPayment,
    /// Amortized installment (direct financing).
    Installment,
    /// Single lump payment (bank/cash financing).
    Full,
    /// Out-of-schedule advance payment.
    Advance,
}

impl PaymentType {
    /// Returns the string representation of the payment type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reservation => "reservation",
            Self::DownPayment => "down_payment",
            Self::Installment => "installment",
            Self::Full => "full",
            Self::Advance => "advance",
        }
    }

    /// The ledger entry type paired with this payment when it is scheduled.
    #[must_use]
    pub fn scheduled_entry_type(&self) -> EntryType {
        match self {
            Self::Reservation => EntryType::Reservation,
            Self::DownPayment => EntryType::DownPayment,
            Self::Installment => EntryType::Installment,
            Self::Full => EntryType::Due,
            Self::Advance => EntryType::Prepayment,
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted scheduled payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The contract this payment belongs to (back-reference only).
    pub contract_id: ContractId,
    /// Original scheduled amount (> 0).
    pub amount: Decimal,
    /// Amount actually collected; set only on approval.
    pub paid_amount: Option<Decimal>,
    /// Accrued overdue interest (≥ 0). Never decreases without an undo.
    pub interest_amount: Decimal,
    /// Scheduled due date.
    pub due_date: NaiveDate,
    /// Date the receipt was recorded.
    pub payment_date: Option<NaiveDate>,
    /// When the payment was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: PaymentStatus,
    /// Payment classification.
    pub payment_type: PaymentType,
}

/// A payment draft produced by the schedule generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    /// Pre-generated unique identifier.
    pub id: PaymentId,
    /// The owning contract.
    pub contract_id: ContractId,
    /// Scheduled amount (> 0).
    pub amount: Decimal,
    /// Scheduled due date.
    pub due_date: NaiveDate,
    /// Payment classification.
    pub payment_type: PaymentType,
}

impl NewPayment {
    /// Converts the draft into a persisted payment in `Pending` status.
    #[must_use]
    pub fn into_payment(self) -> Payment {
        Payment {
            id: self.id,
            contract_id: self.contract_id,
            amount: self.amount,
            paid_amount: None,
            interest_amount: Decimal::ZERO,
            due_date: self.due_date,
            payment_date: None,
            approved_at: None,
            status: PaymentStatus::Pending,
            payment_type: self.payment_type,
        }
    }
}

/// Payment state transition with audit data and persistence directives.
#[derive(Debug, Clone)]
pub enum PaymentAction {
    /// Submit a receipt for a pending payment.
    Submit {
        /// The new status after submission (Submitted).
        new_status: PaymentStatus,
        /// The recorded receipt date.
        payment_date: NaiveDate,
    },
    /// Approve a submitted payment and apply it to the contract.
    Approve {
        /// The new status after approval (Paid).
        new_status: PaymentStatus,
        /// When the payment was approved.
        approved_at: DateTime<Utc>,
        /// The receipt date to stamp: the recorded one, or the approval
        /// date when the undo flow cleared it.
        payment_date: NaiveDate,
        /// Collected amount: scheduled amount plus accrued interest.
        paid_amount: Decimal,
        /// Contract balance after applying the payment.
        new_contract_balance: Decimal,
        /// True when the new balance closed the contract (≤ 0).
        close_contract: bool,
        /// Ledger entries to append in the same transaction.
        entries: Vec<NewLedgerEntry>,
    },
    /// Reject a submitted payment.
    Reject {
        /// The new status after rejection (Rejected).
        new_status: PaymentStatus,
        /// The reason for rejection.
        rejection_reason: String,
    },
    /// Reverse a paid payment back to submitted.
    Undo {
        /// The new status after the undo (Submitted).
        new_status: PaymentStatus,
        /// Contract balance after restoring the collected amount.
        new_contract_balance: Decimal,
        /// Reversing ledger entries to append in the same transaction.
        entries: Vec<NewLedgerEntry>,
    },
}

impl PaymentAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> PaymentStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Undo { new_status, .. } => *new_status,
        }
    }
}

/// Result of a payment transition: the action to persist and the events
/// to dispatch after the transaction commits.
#[derive(Debug, Clone)]
pub struct PaymentTransition {
    /// The state transition with its persistence directives.
    pub action: PaymentAction,
    /// Side effects to dispatch after commit.
    pub events: Vec<crate::events::EngineEvent>,
}
