//! CLI structure and command definitions.

use crate::commands::{
    BookCommand, CancelCommand, CompletionsCommand, ConfirmCommand, ImportTablesCommand,
    InitCommand, ReservationsCommand, SuggestCommand, TablesCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Back-office tool for table allocation and reservation booking.
#[derive(Parser)]
#[command(name = "mesa")]
#[command(version, about = "Allocate restaurant tables and book reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "MESA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read an additional configuration file
    #[arg(long, value_name = "FILE", global = true, env = "MESA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the database lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "MESA_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "MESA_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory and database
    Init(InitCommand),

    /// Load tables from a YAML catalog
    ImportTables(ImportTablesCommand),

    /// List the table catalog
    Tables(TablesCommand),

    /// Suggest tables for a party
    Suggest(SuggestCommand),

    /// Book a reservation after re-checking occupancy
    Book(BookCommand),

    /// Confirm a pending reservation
    Confirm(ConfirmCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// List reservations for a date and shift
    Reservations(ReservationsCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
