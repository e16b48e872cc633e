//! Import-tables command implementation.
//!
//! The catalog file is YAML with a single `tables` list:
//!
//! ```yaml
//! tables:
//!   - code: "21"
//!     venue: Cristal
//!     capacity: 4
//!     joinable: true
//!     join_partners: ["22"]
//! ```

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use mesa::{join_partner_issues, Table, TableCode};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Upsert tables from a YAML catalog.
#[derive(Args)]
pub struct ImportTablesCommand {
    /// Catalog file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Remove tables that are not in the file
    #[arg(long)]
    pub replace: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    tables: Vec<Table>,
}

impl ImportTablesCommand {
    /// Execute the import-tables command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let tables = read_catalog(&self.file)?;

        for issue in join_partner_issues(&tables) {
            if !global.quiet {
                eprintln!("Warning: {issue}");
            }
        }

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let count = db.import_tables(&tables, self.replace)?;

        println!("{count}");
        if global.verbose {
            eprintln!("Imported {count} tables from {}", self.file.display());
        }
        Ok(())
    }
}

/// Reads and checks a catalog file.
pub fn read_catalog(path: &Path) -> Result<Vec<Table>, CliError> {
    if !path.exists() {
        return Err(CliError::InvalidArguments(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let contents = std::fs::read_to_string(path)?;
    let catalog: CatalogFile = serde_yaml::from_str(&contents)
        .map_err(|e| CliError::InvalidArguments(format!("{}: {e}", path.display())))?;

    let mut seen = BTreeSet::new();
    for table in &catalog.tables {
        let canonical = TableCode::new(table.code().as_str()).map_err(mesa::Error::from)?;
        if &canonical != table.code() {
            return Err(CliError::InvalidArguments(format!(
                "table code '{}' has surrounding whitespace",
                table.code()
            )));
        }
        table.validate().map_err(mesa::Error::from)?;
        if !seen.insert(canonical) {
            return Err(CliError::InvalidArguments(format!(
                "table {} is listed more than once",
                table.code()
            )));
        }
    }

    Ok(catalog.tables)
}
