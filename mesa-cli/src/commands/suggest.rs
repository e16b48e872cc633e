//! Suggest command implementation.

use crate::error::CliError;
use crate::utils::{effective_format, load_configuration, open_database, print_records, GlobalOptions, Records};
use clap::Args;
use mesa::allocation::{AllocationService, CandidateSolution, SuggestRequest};
use mesa::config::OutputFormat;

const COLUMN_HEADERS: [&str; 5] = ["tables", "capacity", "kind", "venue", "description"];

/// Suggest tables for a party.
#[derive(Args)]
pub struct SuggestCommand {
    /// Service date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Meal shift (lunch or dinner)
    #[arg(long, value_name = "SHIFT")]
    pub shift: String,

    /// Number of guests
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub party_size: i64,

    /// Usage type (personal, corporate or event)
    #[arg(long, value_name = "USAGE", default_value = "personal")]
    pub usage: String,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Show at most this many suggestions
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

impl SuggestCommand {
    /// Execute the suggest command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Validate before touching any data
        let request = SuggestRequest::parse(&self.date, &self.shift, self.party_size, &self.usage)?;

        let config = load_configuration(global)?;
        let service = AllocationService::from_config(&config)?;
        let mut db = open_database(global, &config)?;

        let mut suggestions = {
            let snapshot = db.read_snapshot()?;
            service.suggest(&snapshot, &snapshot, &request)?
        };
        if let Some(limit) = self.limit {
            suggestions.truncate(limit);
        }

        if suggestions.is_empty() && !global.quiet {
            eprintln!(
                "No tables fit a party of {} for {} {}",
                request.party_size(),
                request.date(),
                request.shift()
            );
        }

        let records = Records {
            headers: &COLUMN_HEADERS,
            rows: suggestions.iter().map(row).collect(),
            items: &suggestions,
        };
        print_records(effective_format(self.format, &config), &records)
    }
}

fn row(candidate: &CandidateSolution) -> Vec<String> {
    vec![
        candidate.codes_label(),
        candidate.total_capacity().to_string(),
        candidate.kind().to_string(),
        candidate.venue().unwrap_or_default().to_string(),
        candidate.description().to_string(),
    ]
}
