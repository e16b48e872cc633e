//! Reservations command implementation.

use crate::error::CliError;
use crate::utils::{
    effective_format, format_timestamp, load_configuration, open_database, print_records,
    GlobalOptions, Records,
};
use chrono::NaiveDate;
use clap::Args;
use mesa::config::OutputFormat;
use mesa::reservation::format_assigned_tables;
use mesa::{Reservation, Shift};

const COLUMN_HEADERS: [&str; 8] = [
    "id",
    "date",
    "shift",
    "party_size",
    "usage",
    "tables",
    "stage",
    "customer",
];

/// List reservations for a date and shift.
#[derive(Args)]
pub struct ReservationsCommand {
    /// Service date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Meal shift (lunch or dinner)
    #[arg(long, value_name = "SHIFT")]
    pub shift: String,

    /// Include pending and cancelled reservations
    #[arg(long)]
    pub all_stages: bool,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            CliError::InvalidArguments(format!("expected YYYY-MM-DD, got '{}': {e}", self.date))
        })?;
        let shift: Shift = self.shift.parse()?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let reservations = if self.all_stages {
            db.list_reservations(date, shift)?
        } else {
            db.list_confirmed_reservations(date, shift)?
        };

        if global.verbose {
            for r in &reservations {
                eprintln!(
                    "reservation {} created {}",
                    r.id().unwrap_or_default(),
                    format_timestamp(r.created_at())
                );
            }
        }

        let records = Records {
            headers: &COLUMN_HEADERS,
            rows: reservations.iter().map(row).collect(),
            items: &reservations,
        };
        print_records(effective_format(self.format, &config), &records)
    }
}

fn row(reservation: &Reservation) -> Vec<String> {
    vec![
        reservation.id().map(|id| id.to_string()).unwrap_or_default(),
        reservation.date().to_string(),
        reservation.shift().to_string(),
        reservation.party_size().to_string(),
        reservation.usage().to_string(),
        format_assigned_tables(reservation.assigned_tables()),
        reservation.stage().to_string(),
        reservation.customer().unwrap_or_default().to_string(),
    ]
}
