// 🧾 Reporter - Per-participant breakdown of what each person owes
//
// Layout (one block per participant, in document order):
//
//   <name>
//   ----------------------------------------
//   Item: <title>
//   Category: <category>
//   Amount Owed: $1,234.56
//
//   Total Owed by <name>: $1,234.56
//   ========================================

use crate::allocation::Allocation;
use crate::ledger::ParticipantLedger;
use crate::model::Participant;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

pub const REPORT_TITLE: &str = "Detailed Owed Amounts Breakdown (in $):";
pub const NO_EXPENSES_MARKER: &str = "No expenses owed";

const HEADER_RULE_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 40;

// ============================================================================
// RENDERING
// ============================================================================

/// Render the full breakdown for `participants` from `ledger`
///
/// Pure function of its inputs: the same ledger always renders the same text.
pub fn render(participants: &[Participant], ledger: &ParticipantLedger) -> String {
    let mut out = String::new();

    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(HEADER_RULE_WIDTH));
    out.push('\n');

    for participant in participants {
        render_participant(&mut out, participant, ledger.allocations_for(&participant.id));
    }

    out
}

fn render_participant(out: &mut String, participant: &Participant, allocations: &[Allocation]) {
    // Writing into a String never fails
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", participant.name);
    let _ = writeln!(out, "{}", "-".repeat(SECTION_RULE_WIDTH));

    if allocations.is_empty() {
        let _ = writeln!(out, "{}", NO_EXPENSES_MARKER);
    } else {
        let mut sorted: Vec<&Allocation> = allocations.iter().collect();
        // stable: same-day allocations keep their input order
        sorted.sort_by_key(|a| a.date);

        let mut total = Decimal::ZERO;
        for allocation in sorted {
            let _ = writeln!(out, "Item: {}", allocation.expense_title);
            let _ = writeln!(out, "Category: {}", allocation.category);
            let _ = writeln!(out, "Amount Owed: {}", format_currency(allocation.owed_amount));
            let _ = writeln!(out);
            total += allocation.owed_amount;
        }

        let _ = writeln!(
            out,
            "Total Owed by {}: {}",
            participant.name,
            format_currency(total)
        );
    }

    let _ = writeln!(out, "{}", "=".repeat(SECTION_RULE_WIDTH));
}

// ============================================================================
// CURRENCY FORMATTING
// ============================================================================

/// Format as dollars: two decimals, thousands separators ("$1,234.50")
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), fraction)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::aggregate;
    use crate::model::{CategoryRef, Expense, PaidFor, SplitMode};
    use chrono::NaiveDate;

    fn create_test_expense(title: &str, category: &str, amount: i64, date: (i32, u32, u32), payees: &[&str]) -> Expense {
        Expense {
            title: title.to_string(),
            amount,
            expense_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category: CategoryRef { name: category.to_string() },
            split_mode: SplitMode::Evenly,
            paid_for: payees
                .iter()
                .map(|id| PaidFor {
                    participant_id: id.to_string(),
                    shares: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(Decimal::new(10, 0)), "$10.00");
        assert_eq!(format_currency(Decimal::new(250, 2)), "$2.50");
        assert_eq!(format_currency(Decimal::new(999, 0)), "$999.00");
        assert_eq!(format_currency(Decimal::new(1000, 0)), "$1,000.00");
        assert_eq!(format_currency(Decimal::new(123456789, 2)), "$1,234,567.89");
        assert_eq!(format_currency(Decimal::new(-150075, 2)), "-$1,500.75");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(Decimal::new(5, 3)), "$0.01");
        assert_eq!(format_currency(Decimal::new(4, 3)), "$0.00");
        assert_eq!(format_currency(Decimal::new(10, 0) / Decimal::from(3)), "$3.33");
        assert_eq!(format_currency(Decimal::new(20, 0) / Decimal::from(3)), "$6.67");
        assert_eq!(format_currency(Decimal::new(-4, 3)), "$0.00");
    }

    #[test]
    fn test_render_full_report() {
        let participants = vec![Participant::new("a", "Alice"), Participant::new("b", "Bob")];
        let expenses = vec![create_test_expense("Dinner", "Dining Out", 3000, (2025, 3, 14), &["a", "b"])];
        let ledger = aggregate(&participants, &expenses);

        let expected = "\
Detailed Owed Amounts Breakdown (in $):
============================================================

Alice
----------------------------------------
Item: Dinner
Category: Dining Out
Amount Owed: $15.00

Total Owed by Alice: $15.00
========================================

Bob
----------------------------------------
Item: Dinner
Category: Dining Out
Amount Owed: $15.00

Total Owed by Bob: $15.00
========================================
";
        assert_eq!(render(&participants, &ledger), expected);
    }

    #[test]
    fn test_participant_without_expenses_gets_marker() {
        let participants = vec![Participant::new("a", "Alice"), Participant::new("z", "Zoe")];
        let expenses = vec![create_test_expense("Coffee", "Drinks", 500, (2025, 1, 1), &["a"])];
        let ledger = aggregate(&participants, &expenses);

        let report = render(&participants, &ledger);
        let zoe_block = report.split("\nZoe\n").nth(1).unwrap();

        assert!(zoe_block.starts_with(&format!("{}\n{}\n", "-".repeat(40), NO_EXPENSES_MARKER)));
        assert!(!report.contains("Total Owed by Zoe"));
    }

    #[test]
    fn test_allocations_sorted_by_date_stable() {
        let participants = vec![Participant::new("a", "Alice")];
        let expenses = vec![
            create_test_expense("Late", "Misc", 100, (2025, 2, 10), &["a"]),
            create_test_expense("Early", "Misc", 100, (2024, 12, 31), &["a"]),
            create_test_expense("Same day first", "Misc", 100, (2025, 1, 5), &["a"]),
            create_test_expense("Same day second", "Misc", 100, (2025, 1, 5), &["a"]),
        ];
        let ledger = aggregate(&participants, &expenses);

        let report = render(&participants, &ledger);
        let items: Vec<&str> = report
            .lines()
            .filter_map(|line| line.strip_prefix("Item: "))
            .collect();

        assert_eq!(items, vec!["Early", "Same day first", "Same day second", "Late"]);
    }

    #[test]
    fn test_total_sums_unrounded_amounts() {
        let participants = vec![Participant::new("a", "Alice")];
        // 3 x (10.00 / 3) = 9.999... which formats as $10.00
        let expenses = vec![
            create_test_expense("One", "Misc", 1000, (2025, 1, 1), &["a", "x", "y"]),
            create_test_expense("Two", "Misc", 1000, (2025, 1, 2), &["a", "x", "y"]),
            create_test_expense("Three", "Misc", 1000, (2025, 1, 3), &["a", "x", "y"]),
        ];
        let ledger = aggregate(&participants, &expenses);

        let report = render(&participants, &ledger);
        assert!(report.contains("Amount Owed: $3.33\n"));
        assert!(report.contains("Total Owed by Alice: $10.00\n"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let participants = vec![Participant::new("a", "Alice"), Participant::new("b", "Bob")];
        let expenses = vec![
            create_test_expense("Rent", "Housing", 250000, (2025, 3, 1), &["a", "b"]),
            create_test_expense("Power", "Utilities", 9000, (2025, 2, 1), &["b"]),
        ];
        let ledger = aggregate(&participants, &expenses);

        let first = render(&participants, &ledger);
        let second = render(&participants, &ledger);
        assert_eq!(first, second);
        assert!(first.contains("Amount Owed: $1,250.00"));
    }

    #[test]
    fn test_render_follows_participant_order() {
        let participants = vec![Participant::new("b", "Bob"), Participant::new("a", "Alice")];
        let ledger = aggregate(&participants, &[]);

        let report = render(&participants, &ledger);
        let bob = report.find("\nBob\n").unwrap();
        let alice = report.find("\nAlice\n").unwrap();
        assert!(bob < alice);
    }
}
