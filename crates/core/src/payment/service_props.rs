//! Property-based tests for PaymentService.
//!
//! Randomized coverage of the lifecycle legality grid and of the balance
//! arithmetic: approval debits exactly the collected amount and undo is its
//! exact inverse, at any balance, amount, and accrued interest.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use lotfin_shared::types::{ContractId, LotId, PaymentId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::contract::types::{Contract, ContractStatus, FinancingType};
use crate::ledger::types::EntryType;
use crate::payment::error::PaymentError;
use crate::payment::service::PaymentService;
use crate::payment::types::{Payment, PaymentAction, PaymentStatus, PaymentType};

/// Strategy for generating random PaymentStatus values.
fn arb_status() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::Submitted),
        Just(PaymentStatus::Paid),
        Just(PaymentStatus::Rejected),
        Just(PaymentStatus::Readjustment),
    ]
}

fn cents(n: i64) -> Decimal {
    Decimal::new(n, 2)
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 18, 10, 0, 0).unwrap()
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
        approved_at: Some(Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()),
        closed_at: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
    }
}

fn payment_in(contract: &Contract, status: PaymentStatus, amount: Decimal) -> Payment {
    Payment {
        id: PaymentId::new(),
        contract_id: contract.id,
        amount,
        paid_amount: None,
        interest_amount: Decimal::ZERO,
        due_date: NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
        payment_date: None,
        approved_at: None,
        status,
        payment_type: PaymentType::Installment,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Submit succeeds exactly from Pending (with a receipt attached).
    #[test]
    fn prop_submit_legality(status in arb_status()) {
        let contract = approved_contract(cents(4_000_000));
        let payment = payment_in(&contract, status, cents(333_333));
        let receipt_date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        let result = PaymentService::submit(&payment, &contract, true, receipt_date);

        if status == PaymentStatus::Pending {
            let transition = result.unwrap();
            prop_assert_eq!(transition.action.new_status(), PaymentStatus::Submitted);
        } else {
            match result {
                Err(PaymentError::InvalidTransition { from, to }) => {
                    prop_assert_eq!(from, status);
                    prop_assert_eq!(to, PaymentStatus::Submitted);
                }
                _ => prop_assert!(false, "Expected InvalidTransition error"),
            }
        }
    }

    /// Approve succeeds exactly from Submitted; reject likewise; undo
    /// succeeds exactly from Paid.
    #[test]
    fn prop_review_legality(status in arb_status()) {
        let contract = approved_contract(cents(4_000_000));
        let mut payment = payment_in(&contract, status, cents(333_333));
        payment.paid_amount = Some(payment.amount);

        let approve = PaymentService::approve(&payment, &contract, now());
        prop_assert_eq!(approve.is_ok(), status == PaymentStatus::Submitted);

        let reject = PaymentService::reject(&payment, &contract, "blurry receipt".to_string());
        prop_assert_eq!(reject.is_ok(), status == PaymentStatus::Submitted);

        let undo = PaymentService::undo(&payment, &contract, now());
        prop_assert_eq!(undo.is_ok(), status == PaymentStatus::Paid);
    }

    /// Approval collects `amount + interest`, debits the balance by exactly
    /// that, and flags closing iff the new balance is ≤ 0.
    #[test]
    fn prop_approve_balance_arithmetic(
        balance_cents in 1i64..=100_000_000,
        amount_cents in 1i64..=100_000_000,
        interest_cents in 0i64..=1_000_000,
    ) {
        let contract = approved_contract(cents(balance_cents));
        let mut payment = payment_in(&contract, PaymentStatus::Submitted, cents(amount_cents));
        payment.interest_amount = cents(interest_cents);

        let transition = PaymentService::approve(&payment, &contract, now()).unwrap();
        let PaymentAction::Approve {
            paid_amount,
            new_contract_balance,
            close_contract,
            entries,
            ..
        } = &transition.action
        else {
            prop_assert!(false, "Expected Approve action");
            unreachable!();
        };

        let expected_paid = cents(amount_cents) + cents(interest_cents);
        prop_assert_eq!(*paid_amount, expected_paid);
        prop_assert_eq!(*new_contract_balance, cents(balance_cents) - expected_paid);
        prop_assert_eq!(*close_contract, *new_contract_balance <= Decimal::ZERO);

        // One debit entry for the collection, plus the interest charge when
        // interest was accrued; together they apply exactly -amount.
        prop_assert_eq!(entries.len(), 1 + usize::from(interest_cents > 0));
        prop_assert_eq!(entries[0].amount, -expected_paid);
        prop_assert_eq!(entries[0].entry_type, EntryType::Payment);
        let entry_sum: Decimal = entries.iter().map(|e| e.amount).sum();
        prop_assert_eq!(entry_sum, -cents(amount_cents));
    }

    /// Undo is the exact inverse of approve: the balance returns to its
    /// pre-approval value and the reversing entries net the originals out.
    #[test]
    fn prop_undo_inverts_approve(
        balance_cents in 1i64..=100_000_000,
        amount_cents in 1i64..=100_000_000,
        interest_cents in 0i64..=1_000_000,
    ) {
        let contract = approved_contract(cents(balance_cents));
        let mut payment = payment_in(&contract, PaymentStatus::Submitted, cents(amount_cents));
        payment.interest_amount = cents(interest_cents);

        let approve = PaymentService::approve(&payment, &contract, now()).unwrap();
        let PaymentAction::Approve {
            paid_amount,
            new_contract_balance,
            entries: approve_entries,
            ..
        } = approve.action
        else {
            prop_assert!(false, "Expected Approve action");
            unreachable!();
        };

        // Snapshot after the approval was persisted.
        let mut settled_contract = approved_contract(new_contract_balance);
        settled_contract.id = contract.id;
        payment.contract_id = settled_contract.id;
        payment.status = PaymentStatus::Paid;
        payment.paid_amount = Some(paid_amount);
        payment.approved_at = Some(now());

        let undo = PaymentService::undo(&payment, &settled_contract, now()).unwrap();
        let PaymentAction::Undo {
            new_contract_balance: restored_balance,
            entries: undo_entries,
            ..
        } = undo.action
        else {
            prop_assert!(false, "Expected Undo action");
            unreachable!();
        };

        prop_assert_eq!(restored_balance, cents(balance_cents));
        let net: Decimal = approve_entries
            .iter()
            .chain(undo_entries.iter())
            .map(|e| e.amount)
            .sum();
        prop_assert_eq!(net, Decimal::ZERO);
    }

    /// Transitions against a foreign contract snapshot are always refused.
    #[test]
    fn prop_contract_mismatch_rejected(status in arb_status()) {
        let contract = approved_contract(cents(4_000_000));
        let other = approved_contract(cents(4_000_000));
        let payment = payment_in(&other, status, cents(333_333));

        let result = PaymentService::approve(&payment, &contract, now());
        let mismatch = matches!(result, Err(PaymentError::ContractMismatch { .. }));
        prop_assert!(mismatch);
    }
}

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    #[test]
    fn test_approve_requires_approved_contract_in_every_other_status() {
        for status in [
            ContractStatus::Pending,
            ContractStatus::Submitted,
            ContractStatus::Rejected,
            ContractStatus::Cancelled,
            ContractStatus::Closed,
        ] {
            let mut contract = approved_contract(cents(4_000_000));
            contract.status = status;
            let payment = payment_in(&contract, PaymentStatus::Submitted, cents(333_333));
            assert!(matches!(
                PaymentService::approve(&payment, &contract, now()),
                Err(PaymentError::ContractNotApproved(s)) if s == status
            ));
        }
    }

    #[test]
    fn test_reject_whitespace_only_reason_fails() {
        let contract = approved_contract(cents(4_000_000));
        let payment = payment_in(&contract, PaymentStatus::Submitted, cents(333_333));
        assert!(matches!(
            PaymentService::reject(&payment, &contract, "  \t".to_string()),
            Err(PaymentError::RejectionReasonRequired)
        ));
    }
}
