//! Contract domain types.
//!
//! A contract is a financing agreement for one lot. The valid lifecycle
//! transitions are:
//! - Pending → Submitted (submit)
//! - Pending | Submitted | Rejected → Approved (approve)
//! - Pending | Submitted → Rejected (reject)
//! - Pending | Submitted | Rejected → Cancelled (cancel)
//! - Approved → Closed (close, automatic when balance ≤ 0)

use chrono::{DateTime, Utc};
use lotfin_shared::types::{ContractId, LotId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contract::schedule::ScheduledItem;
use crate::events::EngineEvent;

/// Contract status in the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    /// Contract is being drafted.
    Pending,
    /// Contract has been submitted for review.
    Submitted,
    /// Contract is live; payments are collected against it.
    Approved,
    /// Contract was rejected during review.
    Rejected,
    /// Contract was cancelled; its payments and ledger are destroyed.
    Cancelled,
    /// Contract is fully paid (terminal).
    Closed,
}

impl ContractStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Closed => "closed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Returns true if no further transition is allowed from this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Closed)
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the lot purchase is financed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingType {
    /// Amortized installments collected directly by the business.
    Direct,
    /// Bank financing: single lump payment after reservation.
    Bank,
    /// Cash purchase: single lump payment after reservation.
    Cash,
}

impl FinancingType {
    /// Returns the string representation of the financing type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Bank => "bank",
            Self::Cash => "cash",
        }
    }
}

impl std::fmt::Display for FinancingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted financing contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier.
    pub id: ContractId,
    /// The lot being financed. Exactly one active contract may exist per lot.
    pub lot_id: LotId,
    /// The borrower; required before submission.
    pub applicant_id: Option<UserId>,
    /// The staff member who created the contract.
    pub created_by: UserId,
    /// Number of installments; must be > 0 at submission.
    pub payment_term: u32,
    /// Financing type; required before submission.
    pub financing_type: Option<FinancingType>,
    /// Principal, set at creation from the lot's effective price.
    pub amount: Decimal,
    /// Cached projection of the ledger; see `LedgerService::reconciled_balance`.
    pub balance: Decimal,
    /// Reservation amount (≥ 0).
    pub reserve_amount: Decimal,
    /// Down payment amount (≥ 0).
    pub down_payment: Decimal,
    /// Lifecycle status.
    pub status: ContractStatus,
    /// Whether this is the lot's live contract.
    pub active: bool,
    /// When the contract was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the contract was closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// When the contract was created.
    pub created_at: DateTime<Utc>,
}

/// Explicit actor context for a cancellation.
///
/// Threaded through the call instead of ambient per-request state so the
/// audit note always names who cancelled and why.
#[derive(Debug, Clone)]
pub struct CancellationContext {
    /// The user performing the cancellation.
    pub cancelled_by: UserId,
    /// Optional audit note.
    pub note: Option<String>,
}

/// Contract state transition with audit data and persistence directives.
#[derive(Debug, Clone)]
pub enum ContractAction {
    /// Submit a pending contract for review.
    Submit {
        /// The new status after submission (Submitted).
        new_status: ContractStatus,
        /// The user who submitted the contract.
        submitted_by: UserId,
        /// When the contract was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a contract and generate its payment schedule.
    Approve {
        /// The new status after approval (Approved).
        new_status: ContractStatus,
        /// The user who approved the contract.
        approved_by: UserId,
        /// When the contract was approved.
        approved_at: DateTime<Utc>,
        /// The contract becomes the lot's live contract.
        active: bool,
        /// Generated payments with their paired ledger entries; persist in
        /// the same transaction as the status change.
        schedule: Vec<ScheduledItem>,
    },
    /// Reject a contract during review.
    Reject {
        /// The new status after rejection (Rejected).
        new_status: ContractStatus,
        /// The reason for rejection.
        rejection_reason: String,
    },
    /// Cancel a contract and clean up its financial state.
    Cancel {
        /// The new status after cancellation (Cancelled).
        new_status: ContractStatus,
        /// The user who cancelled the contract.
        cancelled_by: UserId,
        /// Optional audit note.
        note: Option<String>,
        /// The contract is no longer the lot's live contract.
        active: bool,
        /// Mark this lot available again, in the same transaction.
        release_lot: LotId,
        /// Destroy all payments and ledger entries of this contract, in the
        /// same transaction.
        destroy_financials: bool,
    },
    /// Close a fully paid contract.
    Close {
        /// The new status after closing (Closed).
        new_status: ContractStatus,
        /// When the contract was closed.
        closed_at: DateTime<Utc>,
    },
    /// Idempotent no-op: the contract is already closed or cancelled.
    AlreadyClosed,
}

impl ContractAction {
    /// Returns the new status resulting from this action, if it changes.
    #[must_use]
    pub fn new_status(&self) -> Option<ContractStatus> {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Cancel { new_status, .. }
            | Self::Close { new_status, .. } => Some(*new_status),
            Self::AlreadyClosed => None,
        }
    }
}

/// Result of a contract transition: the action to persist and the events
/// to dispatch after the transaction commits.
#[derive(Debug, Clone)]
pub struct ContractTransition {
    /// The state transition with its persistence directives.
    pub action: ContractAction,
    /// Side effects to dispatch after commit.
    pub events: Vec<EngineEvent>,
}
