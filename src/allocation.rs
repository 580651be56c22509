// ➗ Allocator - Split one expense into per-payee owed amounts
//
// EVENLY:    owed = amount / payees            (no remainder redistribution)
// BY_AMOUNT: owed = amount * shares / total    (proportional to weight)
//            falls back to amount * (shares / total) when the product
//            does not fit in a Decimal
//
// Any other split mode produces no allocations.

use crate::model::{Expense, SplitMode};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

// ============================================================================
// ALLOCATION
// ============================================================================

/// One participant's share of one expense
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub participant_id: String,
    pub expense_title: String,
    pub category: String,
    pub owed_amount: Decimal,
    pub date: NaiveDate,
}

// ============================================================================
// ALLOCATOR
// ============================================================================

/// Compute the owed amount of every payee of `expense`, in payee order
///
/// Assumes a validated expense (payees present, positive BY_AMOUNT weight).
pub fn allocate(expense: &Expense) -> Vec<Allocation> {
    let amount = expense.amount_decimal();

    match &expense.split_mode {
        SplitMode::Evenly => {
            let per_payee = amount / Decimal::from(expense.paid_for.len());
            expense
                .paid_for
                .iter()
                .map(|payee| allocation_for(expense, &payee.participant_id, per_payee))
                .collect()
        }
        SplitMode::ByAmount => {
            let total_shares = expense.total_shares();
            expense
                .paid_for
                .iter()
                .map(|payee| {
                    let owed = weighted_share(amount, Decimal::from(payee.shares), total_shares);
                    allocation_for(expense, &payee.participant_id, owed)
                })
                .collect()
        }
        SplitMode::Other(_) => {
            warn!(
                expense = %expense.title,
                split_mode = expense.split_mode.as_str(),
                "unsupported split mode, expense skipped"
            );
            Vec::new()
        }
    }
}

/// `amount * shares / total`, dividing first if the product overflows
///
/// Weights are validated non-negative, so `shares / total` stays within [0, 1].
fn weighted_share(amount: Decimal, shares: Decimal, total_shares: Decimal) -> Decimal {
    match amount.checked_mul(shares) {
        Some(product) => product / total_shares,
        None => amount * (shares / total_shares),
    }
}

fn allocation_for(expense: &Expense, participant_id: &str, owed_amount: Decimal) -> Allocation {
    Allocation {
        participant_id: participant_id.to_string(),
        expense_title: expense.title.clone(),
        category: expense.category.name.clone(),
        owed_amount,
        date: expense.expense_date,
    }
}
