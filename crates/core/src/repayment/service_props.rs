//! Property-based tests for RepaymentService.
//!
//! Randomized coverage of the balance arithmetic, the amount bounds, and
//! the readjustment marking walk: marked payments are exactly the shortest
//! latest-due-first prefix whose scheduled amounts cover the remaining
//! balance.

use chrono::NaiveDate;
use lotfin_shared::types::{ContractId, LotId, PaymentId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::contract::types::{Contract, ContractStatus, FinancingType};
use crate::ledger::types::EntryType;
use crate::payment::types::{Payment, PaymentStatus, PaymentType};
use crate::repayment::error::RepaymentError;
use crate::repayment::service::RepaymentService;

fn cents(n: i64) -> Decimal {
    Decimal::new(n, 2)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
}

fn approved_contract(balance: Decimal) -> Contract {
    Contract {
        id: ContractId::new(),
        lot_id: LotId::new(),
        applicant_id: Some(UserId::new()),
        created_by: UserId::new(),
        payment_term: 12,
        financing_type: Some(FinancingType::Direct),
        amount: balance,
        balance,
        reserve_amount: Decimal::ZERO,
        down_payment: Decimal::ZERO,
        status: ContractStatus::Approved,
        active: true,
        approved_at: None,
        closed_at: None,
        created_at: chrono::Utc::now(),
    }
}

/// Builds monthly pending installments from a list of amounts.
fn pending_installments(contract: &Contract, amounts: &[i64]) -> Vec<Payment> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, &amount_cents)| Payment {
            id: PaymentId::new(),
            contract_id: contract.id,
            amount: cents(amount_cents),
            paid_amount: None,
            interest_amount: Decimal::ZERO,
            due_date: NaiveDate::from_ymd_opt(2026, 2, 15)
                .unwrap()
                .checked_add_months(chrono::Months::new(i as u32))
                .unwrap(),
            payment_date: None,
            approved_at: None,
            status: PaymentStatus::Pending,
            payment_type: PaymentType::Installment,
        })
        .collect()
}

/// Strategy: a schedule of 1-8 pending amounts plus a repayment expressed
/// as a fraction of the balance, so the amount never exceeds it.
fn arb_schedule_and_fraction() -> impl Strategy<Value = (Vec<i64>, u32)> {
    (
        prop::collection::vec(1i64..=1_000_000, 1..=8),
        1u32..=100,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The balance drops by exactly the repaid amount, the ledger entry is
    /// the negated amount, and the close flag fires only at zero.
    #[test]
    fn prop_balance_arithmetic((amounts, pct) in arb_schedule_and_fraction()) {
        let balance_cents: i64 = amounts.iter().sum();
        let amount_cents = (balance_cents * i64::from(pct) / 100).max(1);
        let contract = approved_contract(cents(balance_cents));
        let payments = pending_installments(&contract, &amounts);

        let outcome =
            RepaymentService::apply(&contract, &payments, cents(amount_cents), today()).unwrap();

        prop_assert_eq!(outcome.new_balance, cents(balance_cents - amount_cents));
        prop_assert_eq!(outcome.entry.amount, -cents(amount_cents));
        prop_assert_eq!(outcome.entry.entry_type, EntryType::Prepayment);
        prop_assert_eq!(outcome.close_contract, balance_cents == amount_cents);
    }

    /// Marked payments form the shortest latest-due-first prefix covering
    /// the remaining balance: their sum reaches it (or every pending
    /// payment is marked), and dropping the last mark falls short.
    #[test]
    fn prop_marking_is_minimal_cover((amounts, pct) in arb_schedule_and_fraction()) {
        let balance_cents: i64 = amounts.iter().sum();
        let amount_cents = (balance_cents * i64::from(pct) / 100).max(1);
        let contract = approved_contract(cents(balance_cents));
        let payments = pending_installments(&contract, &amounts);
        let by_id: HashMap<PaymentId, &Payment> =
            payments.iter().map(|p| (p.id, p)).collect();

        let outcome =
            RepaymentService::apply(&contract, &payments, cents(amount_cents), today()).unwrap();
        let remaining = outcome.new_balance;

        if remaining == Decimal::ZERO {
            prop_assert!(outcome.marked_for_readjustment.is_empty());
            return Ok(());
        }

        let marked: Vec<&Payment> = outcome
            .marked_for_readjustment
            .iter()
            .map(|id| by_id[id])
            .collect();

        // Latest due dates first, no duplicates.
        for pair in marked.windows(2) {
            prop_assert!(pair[0].due_date > pair[1].due_date);
        }

        let marked_sum: Decimal = marked.iter().map(|p| p.amount).sum();
        prop_assert!(
            marked_sum >= remaining || marked.len() == payments.len(),
            "marked sum {} does not cover remaining {}",
            marked_sum,
            remaining
        );
        if let Some(last) = marked.last() {
            prop_assert!(marked_sum - last.amount < remaining);
        }
    }

    /// Amounts outside (0, balance] are rejected without an outcome.
    #[test]
    fn prop_amount_bounds(balance_cents in 1i64..=100_000_000, excess in 1i64..=1_000_000) {
        let contract = approved_contract(cents(balance_cents));

        prop_assert!(matches!(
            RepaymentService::apply(&contract, &[], Decimal::ZERO, today()),
            Err(RepaymentError::NonPositiveAmount(_))
        ));
        prop_assert!(matches!(
            RepaymentService::apply(&contract, &[], -cents(excess), today()),
            Err(RepaymentError::NonPositiveAmount(_))
        ));
        let over_balance =
            RepaymentService::apply(&contract, &[], cents(balance_cents + excess), today());
        let exceeds = matches!(over_balance, Err(RepaymentError::ExceedsBalance { .. }));
        prop_assert!(exceeds);
    }

    /// Only an approved contract can receive a repayment.
    #[test]
    fn prop_requires_approved_contract(amount_cents in 1i64..=1_000_000) {
        for status in [
            ContractStatus::Pending,
            ContractStatus::Submitted,
            ContractStatus::Rejected,
            ContractStatus::Cancelled,
            ContractStatus::Closed,
        ] {
            let mut contract = approved_contract(cents(100_000_000));
            contract.status = status;
            prop_assert!(matches!(
                RepaymentService::apply(&contract, &[], cents(amount_cents), today()),
                Err(RepaymentError::ContractNotApproved(_))
            ));
        }
    }
}
