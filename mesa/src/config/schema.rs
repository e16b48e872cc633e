//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for mesa: the
//! venue policy tables, the combination registry and a few operational
//! settings.

use serde::{Deserialize, Deserializer, Serialize};

/// Complete configuration structure.
///
/// Every field is optional so that configuration sources can be layered;
/// [`crate::config::ConfigBuilder`] fills in the built-in defaults.
///
/// # Examples
///
/// ```
/// use mesa::config::{Config, PolicyConfig};
///
/// let config = Config {
///     policy: Some(PolicyConfig {
///         personal_only_venues: Some(vec!["Jardin".to_string()]),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert!(config.combinations.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Venue usage policy.
    pub policy: Option<PolicyConfig>,

    /// Declared table combination groups (replaces the built-in registry).
    pub combinations: Option<Vec<CombinationGroupConfig>>,

    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Default output format for listing commands.
    pub output_format: Option<OutputFormat>,
}

/// Venue usage policy tables.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Venues that only accept personal reservations.
    pub personal_only_venues: Option<Vec<String>>,

    /// Numeric code ranges treated as events-only when a table carries no flag.
    pub events_only_ranges: Option<Vec<CodeRange>>,

    /// Tables that refuse corporate reservations.
    pub media_restrictions: Option<Vec<MediaRestriction>>,
}

impl PolicyConfig {
    /// The built-in policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesa::config::PolicyConfig;
    ///
    /// let policy = PolicyConfig::builtin();
    /// assert_eq!(policy.personal_only_venues, Some(vec!["Terraza".to_string()]));
    /// ```
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            personal_only_venues: Some(vec!["Terraza".to_string()]),
            events_only_ranges: Some(vec![
                CodeRange { start: 40, end: 49 },
                CodeRange { start: 60, end: 69 },
            ]),
            media_restrictions: Some(vec![MediaRestriction {
                venue: "Salon Principal".to_string(),
                tables: vec!["10".to_string(), "11".to_string(), "12".to_string()],
            }]),
        }
    }
}

/// An inclusive range of numeric table codes.
///
/// Accepts `{start, end}` maps, `"40..49"` strings or a single number.
///
/// # Examples
///
/// ```
/// use mesa::config::CodeRange;
///
/// let range: CodeRange = serde_yaml::from_str("\"40..49\"").unwrap();
/// assert_eq!(range, CodeRange { start: 40, end: 49 });
/// assert!(range.contains(45));
/// assert!(!range.contains(50));
/// ```
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CodeRange {
    /// First code in the range (inclusive).
    pub start: u32,
    /// Last code in the range (inclusive).
    pub end: u32,
}

impl CodeRange {
    /// Returns `true` if `code` lies within the range.
    #[must_use]
    pub const fn contains(&self, code: u32) -> bool {
        code >= self.start && code <= self.end
    }
}

impl std::str::FromStr for CodeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((start_str, end_str)) = s.split_once("..") {
            let end_str = end_str.trim_start_matches('=');
            let start = start_str
                .trim()
                .parse()
                .map_err(|_| format!("Invalid code in range: {start_str}"))?;
            let end = end_str
                .trim()
                .parse()
                .map_err(|_| format!("Invalid code in range: {end_str}"))?;
            Ok(Self { start, end })
        } else {
            let code = s
                .trim()
                .parse()
                .map_err(|_| format!("Invalid code: {s}"))?;
            Ok(Self {
                start: code,
                end: code,
            })
        }
    }
}

impl<'de> Deserialize<'de> for CodeRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Single(u32),
            Range { start: u32, end: u32 },
            String(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Single(code) => Ok(CodeRange {
                start: code,
                end: code,
            }),
            Helper::Range { start, end } => Ok(CodeRange { start, end }),
            Helper::String(s) => s.parse().map_err(D::Error::custom),
        }
    }
}

/// A set of tables in one venue that refuse corporate reservations.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MediaRestriction {
    /// The venue the tables belong to.
    pub venue: String,
    /// The restricted table codes.
    pub tables: Vec<String>,
}

/// A declared combination of tables that may be seated as one unit.
///
/// Only membership and a description are declared; the capacity is always
/// the live sum of the member tables.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CombinationGroupConfig {
    /// Short identifier.
    pub name: String,
    /// The venue the group belongs to.
    pub venue: String,
    /// Member table codes, in display order.
    pub tables: Vec<String>,
    /// Human-readable description shown with suggestions.
    #[serde(default)]
    pub description: String,
}

impl CombinationGroupConfig {
    /// The built-in combination groups.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        let group = |name: &str, venue: &str, tables: &[&str], description: &str| Self {
            name: name.to_string(),
            venue: venue.to_string(),
            tables: tables.iter().map(|t| (*t).to_string()).collect(),
            description: description.to_string(),
        };
        vec![
            group(
                "cristal-imperial",
                "Cristal",
                &["21", "22", "23", "24"],
                "Cristal imperial (four tables joined)",
            ),
            group("cristal-ventana", "Cristal", &["21", "22"], "Cristal window pair"),
            group(
                "principal-banquete",
                "Salon Principal",
                &["1", "2", "3"],
                "Salon Principal banquet row",
            ),
            group("privado-mesa-larga", "Privado", &["30", "31"], "Private room long table"),
        ]
    }
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated, human-readable table.
    #[default]
    Table,
    /// JSON array.
    Json,
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
policy:
  personal_only_venues: [Terraza, Jardin]
  events_only_ranges: ["40..49", {start: 60, end: 69}, 77]
  media_restrictions:
    - venue: Salon Principal
      tables: ["10", "11"]
combinations:
  - name: cristal-imperial
    venue: Cristal
    tables: ["21", "22", "23", "24"]
    description: Cristal imperial
maximum_lock_wait_seconds: 3
output_format: json
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let policy = config.policy.unwrap();
        assert_eq!(policy.personal_only_venues.unwrap().len(), 2);
        assert_eq!(
            policy.events_only_ranges.unwrap(),
            vec![
                CodeRange { start: 40, end: 49 },
                CodeRange { start: 60, end: 69 },
                CodeRange { start: 77, end: 77 },
            ]
        );
        assert_eq!(config.combinations.unwrap()[0].tables.len(), 4);
        assert_eq!(config.maximum_lock_wait_seconds, Some(3));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_yaml::from_str::<Config>("ports: {min: 1}\n").is_err());
        assert!(serde_yaml::from_str::<Config>("policy: {vip_venues: []}\n").is_err());
    }

    #[test]
    fn test_code_range_inclusive_syntax() {
        let range: CodeRange = "60..=69".parse().unwrap();
        assert_eq!(range, CodeRange { start: 60, end: 69 });
        assert!("a..b".parse::<CodeRange>().is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
