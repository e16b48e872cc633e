//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;

/// Cancel a reservation, freeing its tables.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        db.cancel_reservation(self.id)?;

        if !global.quiet {
            eprintln!("Cancelled reservation {}", self.id);
        }
        Ok(())
    }
}
