//! `MESA_*` environment variable overrides.

use std::env;

use crate::config::schema::{CodeRange, Config, OutputFormat, PolicyConfig};
use crate::error::{Error, Result};

/// Comma-separated personal-only venue names.
pub const PERSONAL_ONLY_VENUES_ENV: &str = "MESA_PERSONAL_ONLY_VENUES";
/// Comma-separated events-only code ranges (`40..49,60..69`).
pub const EVENTS_ONLY_RANGES_ENV: &str = "MESA_EVENTS_ONLY_RANGES";
/// Database lock wait in seconds.
pub const MAXIMUM_LOCK_WAIT_SECONDS_ENV: &str = "MESA_MAXIMUM_LOCK_WAIT_SECONDS";
/// Default output format.
pub const OUTPUT_FORMAT_ENV: &str = "MESA_OUTPUT_FORMAT";

/// Applies environment variable overrides to a configuration.
///
/// # Examples
///
/// ```no_run
/// use mesa::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Reads every `MESA_*` override and writes it into `config`.
    ///
    /// Unset variables leave the configuration untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the variable if a value is malformed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(venues) = env::var(PERSONAL_ONLY_VENUES_ENV) {
            let policy = config.policy.get_or_insert_with(PolicyConfig::default);
            policy.personal_only_venues = Some(Self::parse_list(&venues));
        }

        if let Ok(ranges) = env::var(EVENTS_ONLY_RANGES_ENV) {
            let ranges = Self::parse_ranges(&ranges)?;
            let policy = config.policy.get_or_insert_with(PolicyConfig::default);
            policy.events_only_ranges = Some(ranges);
        }

        if let Ok(seconds) = env::var(MAXIMUM_LOCK_WAIT_SECONDS_ENV) {
            config.maximum_lock_wait_seconds = Some(seconds.trim().parse().map_err(|_| {
                Error::validation(MAXIMUM_LOCK_WAIT_SECONDS_ENV, "must be a non-negative integer")
            })?);
        }

        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(
                format
                    .parse::<OutputFormat>()
                    .map_err(|e| Error::validation(OUTPUT_FORMAT_ENV, e))?,
            );
        }

        Ok(())
    }

    fn parse_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    fn parse_ranges(value: &str) -> Result<Vec<CodeRange>> {
        Self::parse_list(value)
            .iter()
            .map(|r| {
                r.parse::<CodeRange>()
                    .map_err(|e| Error::validation(EVENTS_ONLY_RANGES_ENV, e))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for var in [
            PERSONAL_ONLY_VENUES_ENV,
            EVENTS_ONLY_RANGES_ENV,
            MAXIMUM_LOCK_WAIT_SECONDS_ENV,
            OUTPUT_FORMAT_ENV,
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_no_variables_no_changes() {
        clear();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_policy_overrides() {
        clear();
        env::set_var(PERSONAL_ONLY_VENUES_ENV, "Terraza, Jardin ,");
        env::set_var(EVENTS_ONLY_RANGES_ENV, "40..49, 77");
        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear();
        result.unwrap();

        let policy = config.policy.unwrap();
        assert_eq!(
            policy.personal_only_venues,
            Some(vec!["Terraza".to_string(), "Jardin".to_string()])
        );
        assert_eq!(
            policy.events_only_ranges,
            Some(vec![
                CodeRange { start: 40, end: 49 },
                CodeRange { start: 77, end: 77 },
            ])
        );
    }

    #[test]
    #[serial]
    fn test_scalar_overrides() {
        clear();
        env::set_var(MAXIMUM_LOCK_WAIT_SECONDS_ENV, "2");
        env::set_var(OUTPUT_FORMAT_ENV, "TSV");
        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear();
        result.unwrap();

        assert_eq!(config.maximum_lock_wait_seconds, Some(2));
        assert_eq!(config.output_format, Some(OutputFormat::Tsv));
    }

    #[test]
    #[serial]
    fn test_malformed_value_names_variable() {
        clear();
        env::set_var(MAXIMUM_LOCK_WAIT_SECONDS_ENV, "soon");
        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear();

        match result {
            Err(Error::Validation { field, .. }) => assert_eq!(field, MAXIMUM_LOCK_WAIT_SECONDS_ENV),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
