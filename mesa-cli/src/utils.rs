//! Shared helpers for CLI commands: configuration, database access and
//! output rendering.

use crate::error::CliError;
use mesa::config::{Config, ConfigBuilder, OutputFormat};
use mesa::database::{resolve_data_dir as library_data_dir, DATABASE_FILE_NAME};
use mesa::{Database, DatabaseConfig};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Additional configuration file.
    pub config: Option<PathBuf>,

    /// Override the database lock wait (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolves the data directory: `--data-dir`, then `MESA_DATA_DIR`, then
/// `~/.mesa`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => library_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Loads the layered configuration for this invocation.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    let mut builder = ConfigBuilder::new().with_data_dir(&data_dir);
    if let Some(ref file) = global.config {
        builder = builder.with_file(file);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Opens the database in the data directory.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);
    if let Some(seconds) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(seconds.into()));
    } else if let Some(seconds) = config.maximum_lock_wait_seconds {
        db_config = db_config.with_busy_timeout(Duration::from_secs(seconds));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Picks `--format`, falling back to the configured default.
pub fn effective_format(requested: Option<OutputFormat>, config: &Config) -> OutputFormat {
    requested
        .or(config.output_format)
        .unwrap_or_default()
}

/// A set of rows ready to render in any output format.
pub struct Records<'a, T: Serialize> {
    /// Column headers, lowercase.
    pub headers: &'a [&'a str],
    /// One row of display strings per item.
    pub rows: Vec<Vec<String>>,
    /// The items themselves, for JSON output.
    pub items: &'a [T],
}

/// Writes records to stdout in `format`.
pub fn print_records<T: Serialize>(
    format: OutputFormat,
    records: &Records<'_, T>,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_records(&mut handle, format, records)
}

/// Writes records to `out` in `format`.
pub fn write_records<W: Write, T: Serialize>(
    out: &mut W,
    format: OutputFormat,
    records: &Records<'_, T>,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            let header_line = records
                .headers
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{header_line}")?;
            for row in &records.rows {
                let cells: Vec<&str> = row
                    .iter()
                    .map(|c| if c.is_empty() { "-" } else { c.as_str() })
                    .collect();
                writeln!(out, "{}", cells.join("\t"))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records.items)?;
            writeln!(out)?;
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(&mut *out);
            writer.write_record(records.headers)?;
            for row in &records.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Formats a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<Vec<String>>, Vec<serde_json::Value>) {
        let rows = vec![
            vec!["21".to_string(), "Cristal".to_string(), String::new()],
            vec!["7".to_string(), "Terraza".to_string(), "patio".to_string()],
        ];
        let items = vec![
            serde_json::json!({"code": "21"}),
            serde_json::json!({"code": "7"}),
        ];
        (rows, items)
    }

    fn render(format: OutputFormat) -> String {
        let (rows, items) = sample();
        let records = Records {
            headers: &["code", "venue", "note"],
            rows,
            items: &items,
        };
        let mut out = Vec::new();
        write_records(&mut out, format, &records).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_output() {
        let text = render(OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "CODE\tVENUE\tNOTE");
        assert_eq!(lines[1], "21\tCristal\t-");
    }

    #[test]
    fn test_delimited_output() {
        assert_eq!(
            render(OutputFormat::Csv),
            "code,venue,note\n21,Cristal,\n7,Terraza,patio\n"
        );
        assert!(render(OutputFormat::Tsv).starts_with("code\tvenue\tnote\n"));
    }

    #[test]
    fn test_json_output() {
        let parsed: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(parsed[1]["code"], "7");
    }

    #[test]
    fn test_format_timestamp() {
        use std::time::{Duration, UNIX_EPOCH};
        let st = UNIX_EPOCH + Duration::from_secs(1_705_323_045);
        assert!(format_timestamp(st).starts_with("2024-01-15"));
    }

    #[test]
    fn test_effective_format() {
        let config = Config {
            output_format: Some(OutputFormat::Csv),
            ..Default::default()
        };
        assert_eq!(effective_format(None, &config), OutputFormat::Csv);
        assert_eq!(
            effective_format(Some(OutputFormat::Json), &config),
            OutputFormat::Json
        );
        assert_eq!(effective_format(None, &Config::default()), OutputFormat::Table);
    }
}
