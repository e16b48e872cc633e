//! Confirm command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;

/// Confirm a pending reservation.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        db.confirm_reservation(self.id)?;

        if !global.quiet {
            eprintln!("Confirmed reservation {}", self.id);
        }
        Ok(())
    }
}
