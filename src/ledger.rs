// 📒 Participant Ledger - Allocations grouped by participant
//
// Built once per run from the allocator output and handed to the reporter.
// Every participant in the document has an entry, even with nothing owed.

use crate::allocation::{allocate, Allocation};
use crate::model::{Expense, Participant};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::warn;

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantLedger {
    entries: HashMap<String, Vec<Allocation>>,
}

impl ParticipantLedger {
    pub fn new() -> Self {
        ParticipantLedger::default()
    }

    /// Allocations for a participant in insertion order (empty if unknown)
    pub fn allocations_for(&self, participant_id: &str) -> &[Allocation] {
        self.entries
            .get(participant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of owed amounts, unrounded
    pub fn total_for(&self, participant_id: &str) -> Decimal {
        self.allocations_for(participant_id)
            .iter()
            .map(|a| a.owed_amount)
            .sum()
    }

    pub fn contains(&self, participant_id: &str) -> bool {
        self.entries.contains_key(participant_id)
    }

    pub fn participant_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of participants with an entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of allocations across all participants
    pub fn allocation_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    fn open(&mut self, participant_id: &str) {
        self.entries.entry(participant_id.to_string()).or_default();
    }

    fn push(&mut self, allocation: Allocation) {
        self.entries
            .entry(allocation.participant_id.clone())
            .or_default()
            .push(allocation);
    }
}

// ============================================================================
// AGGREGATOR
// ============================================================================

/// Allocate every expense and group the results by participant
///
/// Order inside each participant's list is expense order (pre-sort).
pub fn aggregate(participants: &[Participant], expenses: &[Expense]) -> ParticipantLedger {
    let mut ledger = ParticipantLedger::new();

    for participant in participants {
        ledger.open(&participant.id);
    }

    for expense in expenses {
        for allocation in allocate(expense) {
            if !ledger.contains(&allocation.participant_id) {
                warn!(
                    expense = %expense.title,
                    participant_id = %allocation.participant_id,
                    "payee is not a group participant, allocation will not be reported"
                );
            }
            ledger.push(allocation);
        }
    }

    ledger
}
