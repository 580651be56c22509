// 👥 Group Model - Participants and expenses from a group export
// Shapes the JSON export (participants + expenses) into typed records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

// ============================================================================
// PARTICIPANT
// ============================================================================

/// Group member, identified by a stable id from the export
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// EXPENSE
// ============================================================================

/// Category reference embedded in each expense (only the name is used)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

/// One payee entry of an expense
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidFor {
    pub participant_id: String,

    /// Weight used by BY_AMOUNT splits, ignored otherwise
    #[serde(default)]
    pub shares: i64,
}

/// SplitMode - how an expense amount is divided between its payees
///
/// Unknown modes are kept by name so the allocator can report what it skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SplitMode {
    Evenly,
    ByAmount,
    Other(String),
}

impl SplitMode {
    pub fn as_str(&self) -> &str {
        match self {
            SplitMode::Evenly => "EVENLY",
            SplitMode::ByAmount => "BY_AMOUNT",
            SplitMode::Other(name) => name,
        }
    }
}

impl From<String> for SplitMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "EVENLY" => SplitMode::Evenly,
            "BY_AMOUNT" => SplitMode::ByAmount,
            _ => SplitMode::Other(value),
        }
    }
}

/// Expense as exported by the group
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub title: String,

    /// Amount in minor units (cents)
    pub amount: i64,

    /// Calendar date of the expense; any time portion is dropped
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub expense_date: NaiveDate,

    pub category: CategoryRef,

    pub split_mode: SplitMode,

    pub paid_for: Vec<PaidFor>,
}

impl Expense {
    /// Amount in currency units (`amount / 100`), fixed-point
    pub fn amount_decimal(&self) -> Decimal {
        Decimal::new(self.amount, 2)
    }

    /// Sum of payee weights, used by BY_AMOUNT splits
    ///
    /// Summed as Decimal so that weights near i64::MAX cannot overflow.
    pub fn total_shares(&self) -> Decimal {
        self.paid_for.iter().map(|p| Decimal::from(p.shares)).sum()
    }
}

/// Parse "2025-03-14T00:00:00.000Z" (or a bare "2025-03-14") into its date part
fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| format!("invalid expense date '{}': {}", raw, e))
}

// ============================================================================
// GROUP DOCUMENT
// ============================================================================

/// Parsed group export: participants in document order plus all expenses
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupDocument {
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
}

impl GroupDocument {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Check the invariants the allocator relies on
    ///
    /// - participant ids are unique
    /// - EVENLY / BY_AMOUNT expenses have at least one payee
    /// - BY_AMOUNT weights are non-negative with a positive total
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for participant in &self.participants {
            if !seen.insert(participant.id.as_str()) {
                return Err(format!("duplicate participant id '{}'", participant.id));
            }
        }

        for expense in &self.expenses {
            match expense.split_mode {
                SplitMode::Evenly | SplitMode::ByAmount if expense.paid_for.is_empty() => {
                    return Err(format!("expense '{}' has no payees", expense.title));
                }
                SplitMode::ByAmount if expense.paid_for.iter().any(|p| p.shares < 0) => {
                    return Err(format!("expense '{}' has a negative share weight", expense.title));
                }
                SplitMode::ByAmount if expense.total_shares() <= Decimal::ZERO => {
                    return Err(format!(
                        "expense '{}' has a non-positive total share weight ({})",
                        expense.title,
                        expense.total_shares()
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
