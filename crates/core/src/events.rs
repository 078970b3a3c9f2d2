//! Engine events and external collaborator interfaces.
//!
//! Every state transition returns the list of side effects it produced as
//! [`EngineEvent`] values instead of performing them inline. The caller
//! persists the financial change first, commits, and only then dispatches
//! the events. A dispatch failure is logged and swallowed: it must never
//! roll back a financial transition.

use lotfin_shared::types::UserId;
use thiserror::Error;

/// Category tag attached to every outgoing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    /// Contract lifecycle notifications (approval, rejection, cancellation, closing).
    Contract,
    /// Payment lifecycle notifications (submitted, approved, rejected).
    Payment,
    /// Overdue interest notifications.
    Interest,
    /// Capital repayment notifications.
    Repayment,
}

impl NotificationCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Payment => "payment",
            Self::Interest => "interest",
            Self::Repayment => "repayment",
        }
    }
}

/// A side effect produced by a state transition.
///
/// Dispatched by the caller after the financial transaction commits.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Send a notification to a user.
    Notify {
        /// The user to notify.
        recipient: UserId,
        /// Notification title.
        title: String,
        /// Notification body.
        message: String,
        /// Notification category.
        category: NotificationCategory,
    },
    /// Enqueue a credit score recomputation for a borrower.
    CreditScoreRecalcRequested {
        /// The borrower whose score must be recomputed.
        user_id: UserId,
    },
    /// Enqueue the staff summary notification for an accrual batch.
    AccrualSummaryRequested {
        /// Number of payments whose interest was updated.
        updated: usize,
    },
}

/// Error returned by an external collaborator.
#[derive(Debug, Error)]
#[error("collaborator dispatch failed: {0}")]
pub struct DispatchError(pub String);

/// Fire-and-forget notification sink.
pub trait NotificationSink {
    /// Delivers a notification to a recipient.
    fn notify(
        &self,
        recipient: UserId,
        title: &str,
        message: &str,
        category: NotificationCategory,
    ) -> Result<(), DispatchError>;
}

/// Background job to enqueue through the job dispatch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRequest {
    /// Recompute the credit score of a borrower.
    RecalculateCreditScore {
        /// The borrower.
        user_id: UserId,
    },
    /// Notify staff with the accrual batch summary.
    NotifyAccrualSummary {
        /// Number of payments updated by the batch.
        updated: usize,
    },
}

/// Generic background job enqueue interface.
///
/// The engine never manages queues or retries itself.
pub trait JobQueue {
    /// Enqueues a background job.
    fn enqueue(&self, job: JobRequest) -> Result<(), DispatchError>;
}

/// Dispatches engine events to the external collaborators.
///
/// Failures are logged and swallowed; the financial transaction that
/// produced the events has already committed by the time this runs.
pub fn dispatch_events<N, J>(events: Vec<EngineEvent>, sink: &N, jobs: &J)
where
    N: NotificationSink,
    J: JobQueue,
{
    for event in events {
        let result = match event {
            EngineEvent::Notify {
                recipient,
                title,
                message,
                category,
            } => sink.notify(recipient, &title, &message, category),
            EngineEvent::CreditScoreRecalcRequested { user_id } => {
                jobs.enqueue(JobRequest::RecalculateCreditScore { user_id })
            }
            EngineEvent::AccrualSummaryRequested { updated } => {
                jobs.enqueue(JobRequest::NotifyAccrualSummary { updated })
            }
        };

        if let Err(err) = result {
            tracing::warn!(%err, "event dispatch failed");
        }
    }
}
