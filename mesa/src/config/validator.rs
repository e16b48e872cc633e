//! Configuration validation.

use std::collections::HashSet;

use crate::config::schema::{CombinationGroupConfig, Config, PolicyConfig};
use crate::error::{Error, Result};
use crate::TableCode;

/// Checks a configuration for values the engine cannot use.
///
/// # Examples
///
/// ```
/// use mesa::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates every section that is present.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref policy) = config.policy {
            Self::validate_policy(policy)?;
        }

        if let Some(ref groups) = config.combinations {
            Self::validate_combinations(groups)?;
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::validation(
                "maximum_lock_wait_seconds",
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    fn validate_policy(policy: &PolicyConfig) -> Result<()> {
        for venue in policy.personal_only_venues.iter().flatten() {
            Self::validate_name("policy.personal_only_venues", venue)?;
        }

        for range in policy.events_only_ranges.iter().flatten() {
            if range.start > range.end {
                return Err(Error::validation(
                    "policy.events_only_ranges",
                    format!("range {}..{} is inverted", range.start, range.end),
                ));
            }
        }

        for restriction in policy.media_restrictions.iter().flatten() {
            Self::validate_name("policy.media_restrictions.venue", &restriction.venue)?;
            if restriction.tables.is_empty() {
                return Err(Error::validation(
                    "policy.media_restrictions.tables",
                    format!("restriction for {} lists no tables", restriction.venue),
                ));
            }
            for table in &restriction.tables {
                Self::validate_code("policy.media_restrictions.tables", table)?;
            }
        }

        Ok(())
    }

    fn validate_combinations(groups: &[CombinationGroupConfig]) -> Result<()> {
        let mut names = HashSet::new();
        let mut member_sets: Vec<(String, Vec<TableCode>)> = Vec::new();

        for group in groups {
            Self::validate_name("combinations.name", &group.name)?;
            Self::validate_name("combinations.venue", &group.venue)?;
            if !names.insert(group.name.trim().to_string()) {
                return Err(Error::validation(
                    "combinations.name",
                    format!("group {} is declared twice", group.name),
                ));
            }

            let mut members = group
                .tables
                .iter()
                .map(|t| Self::validate_code("combinations.tables", t))
                .collect::<Result<Vec<_>>>()?;
            if members.len() < 2 {
                return Err(Error::validation(
                    "combinations.tables",
                    format!("group {} needs at least two tables", group.name),
                ));
            }
            members.sort();
            if members.windows(2).any(|w| w[0] == w[1]) {
                return Err(Error::validation(
                    "combinations.tables",
                    format!("group {} lists a table more than once", group.name),
                ));
            }
            if let Some((other, _)) = member_sets.iter().find(|(_, set)| *set == members) {
                return Err(Error::validation(
                    "combinations.tables",
                    format!("groups {other} and {} have the same tables", group.name),
                ));
            }
            member_sets.push((group.name.clone(), members));
        }

        Ok(())
    }

    fn validate_name(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::validation(field, "cannot be empty or only whitespace"));
        }
        Ok(())
    }

    fn validate_code(field: &str, value: &str) -> Result<TableCode> {
        TableCode::new(value).map_err(|e| Error::validation(field, e.reason))
    }
}
