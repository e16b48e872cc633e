//! Tables command implementation.

use crate::error::CliError;
use crate::utils::{effective_format, load_configuration, open_database, print_records, GlobalOptions, Records};
use clap::Args;
use mesa::config::OutputFormat;
use mesa::{Table, TableCode};

const COLUMN_HEADERS: [&str; 8] = [
    "code",
    "venue",
    "capacity",
    "joinable",
    "join_partners",
    "events_only",
    "available",
    "note",
];

/// List the table catalog.
#[derive(Args)]
pub struct TablesCommand {
    /// Only show tables in this venue
    #[arg(long, value_name = "VENUE")]
    pub venue: Option<String>,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl TablesCommand {
    /// Execute the tables command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut tables = db.list_tables()?;
        if let Some(ref venue) = self.venue {
            let wanted = venue.trim().to_lowercase();
            tables.retain(|t| t.venue().trim().to_lowercase() == wanted);
        }

        let records = Records {
            headers: &COLUMN_HEADERS,
            rows: tables.iter().map(row).collect(),
            items: &tables,
        };
        print_records(effective_format(self.format, &config), &records)
    }
}

fn row(table: &Table) -> Vec<String> {
    let partners: Vec<&str> = table.join_partners().iter().map(TableCode::as_str).collect();
    vec![
        table.code().to_string(),
        table.venue().to_string(),
        table.capacity().to_string(),
        table.joinable().to_string(),
        partners.join(" "),
        table
            .events_only()
            .map(|b| b.to_string())
            .unwrap_or_default(),
        table.available().to_string(),
        table.note().unwrap_or_default().to_string(),
    ]
}
