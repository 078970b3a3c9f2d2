//! Payment schedule generation.
//!
//! Builds the initial set of payments (and their paired ledger entries)
//! for a contract being approved. Two algorithms exist:
//!
//! - Direct financing: reservation, down payment, then `payment_term`
//!   equal monthly installments.
//! - Bank/cash financing: reservation, then one lump "full" payment.
//!
//! Installments are all equal: `round(financed / term, 2)` with banker's
//! rounding. The residual cents of an inexact division stay on the
//! contract balance and are settled by the closing flow; the last
//! installment does NOT absorb the remainder.

use chrono::{Days, Months, NaiveDate};
use lotfin_shared::config::ScheduleConfig;
use rust_decimal::prelude::*;

use crate::contract::error::ContractError;
use crate::contract::types::{Contract, FinancingType};
use crate::ledger::NewLedgerEntry;
use crate::payment::types::{NewPayment, PaymentType};

/// A scheduled payment draft paired with its ledger entry draft.
///
/// The entry has the matching scheduled type and the negated amount
/// (future due items are negative, see the ledger sign convention).
#[derive(Debug, Clone)]
pub struct ScheduledItem {
    /// The payment to create.
    pub payment: NewPayment,
    /// Its paired ledger entry.
    pub entry: NewLedgerEntry,
}

/// Generates the payment schedule for a contract being approved.
///
/// # Errors
///
/// Returns `ContractError::MissingFinancingType`, `InvalidPaymentTerm`,
/// `ScheduleUnderfunded` or `DateOverflow` when the contract cannot be
/// scheduled.
pub fn generate(
    contract: &Contract,
    today: NaiveDate,
    config: &ScheduleConfig,
) -> Result<Vec<ScheduledItem>, ContractError> {
    let financing = contract
        .financing_type
        .ok_or(ContractError::MissingFinancingType)?;

    match financing {
        FinancingType::Direct => direct_schedule(contract, today, config),
        FinancingType::Bank | FinancingType::Cash => lump_schedule(contract, today, config),
    }
}

/// Reservation + down payment + `payment_term` equal monthly installments.
fn direct_schedule(
    contract: &Contract,
    today: NaiveDate,
    config: &ScheduleConfig,
) -> Result<Vec<ScheduledItem>, ContractError> {
    if contract.payment_term == 0 {
        return Err(ContractError::InvalidPaymentTerm);
    }

    let financed = contract.amount - contract.reserve_amount - contract.down_payment;
    if financed < Decimal::ZERO {
        return Err(ContractError::ScheduleUnderfunded {
            shortfall: -financed,
        });
    }

    let reservation_due = add_days(
        contract.created_at.date_naive(),
        config.reservation_offset_days,
    )?;
    let down_payment_due = add_months(reservation_due, config.installment_interval_months)?;

    let mut items = Vec::with_capacity(contract.payment_term as usize + 2);

    if contract.reserve_amount > Decimal::ZERO {
        items.push(scheduled_item(
            contract,
            contract.reserve_amount,
            reservation_due,
            PaymentType::Reservation,
            "Reservation scheduled".to_string(),
            today,
        ));
    }
    if contract.down_payment > Decimal::ZERO {
        items.push(scheduled_item(
            contract,
            contract.down_payment,
            down_payment_due,
            PaymentType::DownPayment,
            "Down payment scheduled".to_string(),
            today,
        ));
    }

    let per_installment = (financed / Decimal::from(contract.payment_term))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

    if per_installment > Decimal::ZERO {
        let mut due = down_payment_due;
        for number in 1..=contract.payment_term {
            due = add_months(due, config.installment_interval_months)?;
            items.push(scheduled_item(
                contract,
                per_installment,
                due,
                PaymentType::Installment,
                format!(
                    "Installment {number} of {term} scheduled",
                    term = contract.payment_term
                ),
                today,
            ));
        }
    }

    Ok(items)
}

/// Reservation + one lump "full" payment (bank and cash financing).
fn lump_schedule(
    contract: &Contract,
    today: NaiveDate,
    config: &ScheduleConfig,
) -> Result<Vec<ScheduledItem>, ContractError> {
    let full_amount = contract.amount - contract.reserve_amount;
    if full_amount < Decimal::ZERO {
        return Err(ContractError::ScheduleUnderfunded {
            shortfall: -full_amount,
        });
    }

    let reservation_due = add_days(today, config.reservation_offset_days)?;
    let full_due = add_months(reservation_due, config.installment_interval_months)?;

    let mut items = Vec::with_capacity(2);

    if contract.reserve_amount > Decimal::ZERO {
        items.push(scheduled_item(
            contract,
            contract.reserve_amount,
            reservation_due,
            PaymentType::Reservation,
            "Reservation scheduled".to_string(),
            today,
        ));
    }
    if full_amount > Decimal::ZERO {
        items.push(scheduled_item(
            contract,
            full_amount,
            full_due,
            PaymentType::Full,
            "Full payment scheduled".to_string(),
            today,
        ));
    }

    Ok(items)
}

fn scheduled_item(
    contract: &Contract,
    amount: Decimal,
    due_date: NaiveDate,
    payment_type: PaymentType,
    description: String,
    today: NaiveDate,
) -> ScheduledItem {
    let payment = NewPayment {
        id: lotfin_shared::types::PaymentId::new(),
        contract_id: contract.id,
        amount,
        due_date,
        payment_type,
    };
    let entry = NewLedgerEntry::new(
        contract.id,
        Some(payment.id),
        -amount,
        description,
        payment_type.scheduled_entry_type(),
        today,
    );
    ScheduledItem { payment, entry }
}

fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, ContractError> {
    let days = u64::try_from(days).map_err(|_| ContractError::DateOverflow)?;
    date.checked_add_days(Days::new(days))
        .ok_or(ContractError::DateOverflow)
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, ContractError> {
    date.checked_add_months(Months::new(months))
        .ok_or(ContractError::DateOverflow)
}
