//! Build script for mesa-cli.
//!
//! Renders the `mesa.1` man page into `OUT_DIR/man` with clap_mangen. The
//! command tree is declared here because a build script cannot depend on the
//! crate it builds; keep it in step with `src/cli.rs`.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("mesa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Allocate restaurant tables and book reservations")
        .long_about(
            "Back-office tool that suggests tables or declared table combinations for a party \
             and books reservations with an atomic conflict check",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("MESA_DATA_DIR"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read an additional configuration file")
                .value_name("FILE")
                .global(true)
                .env("MESA_CONFIG"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("MESA_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("MESA_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Create the data directory and database")
                .long_about("Create the data directory and database, printing the database path"),
            Command::new("import-tables")
                .about("Load tables from a YAML catalog")
                .long_about("Upsert tables from a YAML catalog, warning about one-sided join partners"),
            Command::new("tables")
                .about("List the table catalog")
                .long_about("Display the table catalog in various formats"),
            Command::new("suggest")
                .about("Suggest tables for a party")
                .long_about("List individual tables and declared combinations that fit a party"),
            Command::new("book")
                .about("Book a reservation after re-checking occupancy")
                .long_about("Insert a reservation, failing if any table is already confirmed"),
            Command::new("confirm")
                .about("Confirm a pending reservation")
                .long_about("Promote a pending reservation to confirmed after a conflict check"),
            Command::new("cancel")
                .about("Cancel a reservation")
                .long_about("Cancel a reservation and free its tables"),
            Command::new("reservations")
                .about("List reservations for a date and shift")
                .long_about("Display the reservation ledger for one date and shift"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a mesa configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();
    fs::write(man_dir.join("mesa.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
