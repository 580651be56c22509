// Owed Breakdown - Core Library
// Splits group expenses per participant and renders who owes what

pub mod allocation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod report;
pub mod source;

use tracing::info;

// Re-export commonly used types
pub use allocation::{allocate, Allocation};
pub use config::{SourceConfig, DEFAULT_BASE_URL};
pub use error::SourceError;
pub use ledger::{aggregate, ParticipantLedger};
pub use model::{CategoryRef, Expense, GroupDocument, PaidFor, Participant, SplitMode};
pub use report::{format_currency, render};
#[cfg(feature = "remote")]
pub use source::RemoteSource;
pub use source::{build_source, FileSource, GroupSource, SourceKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the whole pipeline: fetch → aggregate → render
///
/// Nothing is rendered unless the fetch succeeds.
pub fn build_report(source: &dyn GroupSource) -> Result<String, SourceError> {
    info!(source = source.kind().code(), location = %source.describe(), "loading group export");
    let document = source.fetch()?;

    let ledger = aggregate(&document.participants, &document.expenses);
    info!(
        participants = document.participants.len(),
        expenses = document.expenses.len(),
        allocations = ledger.allocation_count(),
        "aggregated allocations"
    );

    Ok(render(&document.participants, &ledger))
}
