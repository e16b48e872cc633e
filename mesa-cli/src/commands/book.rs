//! Book command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use mesa::allocation::SuggestRequest;
use mesa::{Reservation, Stage};

/// Book a reservation.
///
/// The occupancy check and the insert happen in one write transaction, so a
/// table taken since `suggest` ran is reported as a conflict.
#[derive(Args)]
pub struct BookCommand {
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

    /// Table codes to assign, comma-separated
    #[arg(long, value_name = "CODES", value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Record as pending instead of confirmed
    #[arg(long)]
    pub pending: bool,

    /// Customer label
    #[arg(long, value_name = "NAME")]
    pub customer: Option<String>,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = SuggestRequest::parse(&self.date, &self.shift, self.party_size, &self.usage)?;
        let stage = if self.pending {
            Stage::Pending
        } else {
            Stage::Confirmed
        };

        let reservation = Reservation::builder(request.date(), request.shift(), request.party_size())
            .usage(request.usage())
            .tables(self.tables.iter().map(|t| t.trim().to_string()))
            .stage(stage)
            .customer(self.customer)
            .build()?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let id = db.book_reservation(&reservation)?;

        println!("{id}");
        Ok(())
    }
}
