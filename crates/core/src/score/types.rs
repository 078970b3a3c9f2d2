//! Credit score domain types.

use rust_decimal::Decimal;

/// A computed credit score with its contributing factors.
///
/// The factors are kept alongside the final score so callers can show a
/// breakdown without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditScore {
    /// Final weighted score, rounded to a whole number.
    pub score: Decimal,
    /// On-time percentage across settled payments, 0-100.
    pub payment_history: Decimal,
    /// Outstanding balance as a percentage of total contracted amount.
    pub utilization: Decimal,
    /// Mean contract age in years.
    pub credit_age_years: Decimal,
    /// Number of contracts, unnormalized.
    pub total_accounts: usize,
}
