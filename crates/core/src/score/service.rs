//! Weighted credit score calculation.
//!
//! Pure function over a borrower's contracts and payments. The persistence
//! layer loads the borrower's history and stores the resulting score; this
//! service only does the arithmetic.

use chrono::NaiveDate;
use rust_decimal::prelude::*;

use crate::contract::types::Contract;
use crate::payment::types::Payment;
use crate::score::types::CreditScore;

/// Weight of the on-time payment percentage (0.40).
const W_PAYMENT_HISTORY: Decimal = Decimal::from_parts(40, 0, 0, false, 2);
/// Weight of the balance utilization percentage (0.20).
const W_UTILIZATION: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
/// Weight of the mean contract age in years (0.21).
const W_CREDIT_AGE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);
/// Weight of the raw contract count (0.19).
///
/// The count is deliberately NOT normalized to a 0-100 band, so a borrower
/// with many contracts inflates this factor without bound. Kept as-is; see
/// DESIGN.md before changing the banding.
const W_TOTAL_ACCOUNTS: Decimal = Decimal::from_parts(19, 0, 0, false, 2);

const DAYS_PER_YEAR: u32 = 365;

/// Stateless credit score calculator.
pub struct CreditScoreService;

impl CreditScoreService {
    /// Calculates the weighted credit score for one borrower.
    ///
    /// `contracts` and `payments` are the borrower's full history. A
    /// borrower with no settled payments scores the no-history baseline of
    /// exactly 40 (a perfect payment-history factor and nothing else).
    #[must_use]
    pub fn calculate(contracts: &[Contract], payments: &[Payment], today: NaiveDate) -> CreditScore {
        let payment_history = Self::payment_history(payments);
        let utilization = Self::utilization(contracts);
        let credit_age_years = Self::credit_age_years(contracts, today);
        let total_accounts = contracts.len();

        let score = (payment_history * W_PAYMENT_HISTORY
            + utilization * W_UTILIZATION
            + credit_age_years * W_CREDIT_AGE
            + Decimal::from(total_accounts) * W_TOTAL_ACCOUNTS)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

        CreditScore {
            score,
            payment_history,
            utilization,
            credit_age_years,
            total_accounts,
        }
    }

    /// Percentage of settled payments made on or before their due date.
    ///
    /// Only payments that actually carry a payment date count; a borrower
    /// with no settled payments gets a perfect 100.
    fn payment_history(payments: &[Payment]) -> Decimal {
        let settled: Vec<_> = payments
            .iter()
            .filter_map(|p| p.payment_date.map(|paid| (p.due_date, paid)))
            .collect();
        if settled.is_empty() {
            return Decimal::ONE_HUNDRED;
        }

        let on_time = settled.iter().filter(|(due, paid)| due >= paid).count();
        Decimal::from(on_time) / Decimal::from(settled.len()) * Decimal::ONE_HUNDRED
    }

    /// Outstanding balance as a percentage of the total contracted amount.
    fn utilization(contracts: &[Contract]) -> Decimal {
        let total_amount: Decimal = contracts.iter().map(|c| c.amount).sum();
        if total_amount == Decimal::ZERO {
            return Decimal::ZERO;
        }

        let total_balance: Decimal = contracts.iter().map(|c| c.balance).sum();
        total_balance / total_amount * Decimal::ONE_HUNDRED
    }

    /// Mean contract age in years, counting 365 days per year.
    fn credit_age_years(contracts: &[Contract], today: NaiveDate) -> Decimal {
        if contracts.is_empty() {
            return Decimal::ZERO;
        }

        let total_days: i64 = contracts
            .iter()
            .map(|c| (today - c.created_at.date_naive()).num_days().max(0))
            .sum();
        Decimal::from(total_days) / Decimal::from(DAYS_PER_YEAR) / Decimal::from(contracts.len())
    }
}
