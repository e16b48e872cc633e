//! Init command implementation.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use mesa::config::{CombinationGroupConfig, Config, PolicyConfig, USER_CONFIG_FILE};
use mesa::database::DATABASE_FILE_NAME;
use mesa::{Database, DatabaseConfig};
use std::fs;
use std::path::PathBuf;

/// Initialize the mesa data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long = "dir", value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Also write a configuration file with the built-in policy
    #[arg(long)]
    with_config: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.dir {
            Some(dir) => dir,
            None => resolve_data_dir(global)?,
        };

        let data_dir_created = !data_dir.exists();
        fs::create_dir_all(&data_dir)?;

        let db_path = data_dir.join(DATABASE_FILE_NAME);
        let database_created = !db_path.exists();
        Database::open(DatabaseConfig::new(&db_path))?;

        println!("{}", db_path.display());

        if !global.quiet {
            if data_dir_created {
                eprintln!("Created data directory {}", data_dir.display());
            }
            if database_created {
                eprintln!("Created database");
            }
        }

        if self.with_config {
            let config_path = data_dir.join(USER_CONFIG_FILE);
            if config_path.exists() {
                if !global.quiet {
                    eprintln!("Configuration file already exists (not overwritten)");
                }
            } else {
                let config = Config {
                    policy: Some(PolicyConfig::builtin()),
                    combinations: Some(CombinationGroupConfig::builtin()),
                    ..Default::default()
                };
                let yaml = serde_yaml::to_string(&config)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                fs::write(&config_path, yaml)?;
                if !global.quiet {
                    eprintln!("Created configuration file {}", config_path.display());
                }
            }
        }

        Ok(())
    }
}
