//! Validate command implementation.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use mesa::allocation::AllocationService;
use mesa::config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;

/// Check a policy and combination file without touching the database.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to check
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.config_path.is_file() {
            return Err(CliError::InvalidArguments(format!(
                "no configuration file at {}",
                self.config_path.display()
            )));
        }

        let config = ConfigLoader::load_file(&self.config_path).map_err(|e| {
            eprintln!("{}: {e}", self.config_path.display());
            CliError::SemanticFailure("configuration could not be parsed".to_string())
        })?;

        // The validator checks shape; building the service checks every group
        ConfigValidator::validate(&config)
            .and_then(|()| AllocationService::from_config(&config))
            .map_err(|e| {
                eprintln!("{}: {e}", self.config_path.display());
                CliError::SemanticFailure("configuration is invalid".to_string())
            })?;

        if !global.quiet {
            let groups = config.combinations.as_ref().map_or(0, Vec::len);
            println!(
                "{} is valid ({} combination group{})",
                self.config_path.display(),
                groups,
                if groups == 1 { "" } else { "s" }
            );
        }
        Ok(())
    }
}
