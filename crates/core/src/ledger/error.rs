//! Ledger error types.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Entry amount is zero.
    #[error("Ledger entry amount must be non-zero")]
    ZeroAmount,

    /// Entry description is missing.
    #[error("Ledger entry description is required")]
    DescriptionRequired,
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::ZeroAmount | Self::DescriptionRequired => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::DescriptionRequired => "DESCRIPTION_REQUIRED",
        }
    }
}
