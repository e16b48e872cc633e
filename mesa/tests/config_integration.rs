//! Configuration driving the allocation engine end to end.
//!
//! Tests that touch `MESA_*` variables are `#[serial]`.

mod common;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use mesa::allocation::{AllocationService, OccupiedSet, SuggestRequest};
use mesa::config::{Config, ConfigBuilder, OutputFormat, PolicyConfig};
use mesa::{Error, Shift, UsageType};

use common::{service_date, table};

// ============================================================================
// Test Utilities
// ============================================================================

/// Sets or removes an environment variable and restores it on drop.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

fn clear_mesa_env_vars() -> Vec<EnvGuard> {
    [
        "MESA_PERSONAL_ONLY_VENUES",
        "MESA_EVENTS_ONLY_RANGES",
        "MESA_MAXIMUM_LOCK_WAIT_SECONDS",
        "MESA_OUTPUT_FORMAT",
    ]
    .iter()
    .map(|k| EnvGuard::remove(k))
    .collect()
}

fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn request(party: i64, usage: UsageType) -> SuggestRequest {
    SuggestRequest::new(service_date(), Shift::Dinner, party, usage).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[serial]
fn test_custom_registry_replaces_builtin() {
    let _guards = clear_mesa_env_vars();
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "config.yaml",
        r#"
combinations:
  - name: jardin-largo
    venue: Jardin
    tables: ["50", "51", "52"]
    description: Garden long table
"#,
    );

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap();
    let service = AllocationService::from_config(&config).unwrap();
    assert_eq!(service.registry().len(), 1);

    let tables = vec![
        table("50", "Jardin", 4),
        table("51", "Jardin", 4),
        table("52", "Jardin", 4),
        table("21", "Cristal", 4),
        table("22", "Cristal", 4),
    ];
    let out = service.suggest_with(&tables, &OccupiedSet::empty(), &request(8, UsageType::Personal));
    let labels: Vec<String> = out.iter().map(mesa::CandidateSolution::codes_label).collect();
    assert_eq!(labels, vec!["50+51+52".to_string()]);
    assert_eq!(out[0].description(), "Garden long table");
}

#[test]
#[serial]
fn test_policy_file_overrides_single_field() {
    let _guards = clear_mesa_env_vars();
    let dir = TempDir::new().unwrap();
    let explicit = write_config(
        dir.path(),
        "venue.yaml",
        "policy:\n  personal_only_venues: [Jardin]\n",
    );

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .with_file(&explicit)
        .build()
        .unwrap();
    let service = AllocationService::from_config(&config).unwrap();

    let tables = vec![
        table("7", "Terraza", 4),
        table("50", "Jardin", 4),
        table("45", "Salon Principal", 4),
    ];
    let out = service.suggest_with(
        &tables,
        &OccupiedSet::empty(),
        &request(4, UsageType::Corporate),
    );
    let labels: Vec<String> = out.iter().map(mesa::CandidateSolution::codes_label).collect();
    // Terraza is no longer personal-only; 45 stays events-only from the builtin ranges
    assert_eq!(labels, vec!["7".to_string()]);
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    let _guards = clear_mesa_env_vars();
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "config.yaml",
        "output_format: csv\nmaximum_lock_wait_seconds: 9\n",
    );
    let _format = EnvGuard::new("MESA_OUTPUT_FORMAT", "json");
    let _ranges = EnvGuard::new("MESA_EVENTS_ONLY_RANGES", "7");

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap();
    assert_eq!(config.output_format, Some(OutputFormat::Json));
    assert_eq!(config.maximum_lock_wait_seconds, Some(9));

    let service = AllocationService::from_config(&config).unwrap();
    let tables = vec![table("7", "Cristal", 4), table("45", "Cristal", 4)];
    let out = service.suggest_with(&tables, &OccupiedSet::empty(), &request(2, UsageType::Personal));
    let labels: Vec<String> = out.iter().map(mesa::CandidateSolution::codes_label).collect();
    assert_eq!(labels, vec!["45".to_string()]);
}

#[test]
#[serial]
fn test_malformed_environment_is_reported() {
    let _guards = clear_mesa_env_vars();
    let _ranges = EnvGuard::new("MESA_EVENTS_ONLY_RANGES", "40..");

    let err = ConfigBuilder::new().skip_files().build().unwrap_err();
    match err {
        Error::Validation { field, .. } => assert_eq!(field, "MESA_EVENTS_ONLY_RANGES"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_invalid_file_is_rejected() {
    let _guards = clear_mesa_env_vars();
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "config.yaml",
        "combinations:\n  - name: solo\n    venue: Cristal\n    tables: [\"21\"]\n",
    );

    let err = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap_err();
    assert!(err.is_validation());

    write_config(dir.path(), "config.yaml", "tables_per_room: 4\n");
    let err = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_programmatic_policy_without_files() {
    let config = ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(Config {
            policy: Some(PolicyConfig {
                events_only_ranges: Some(Vec::new()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .build()
        .unwrap();
    let service = AllocationService::from_config(&config).unwrap();

    let tables = vec![table("45", "Cristal", 4)];
    let out = service.suggest_with(&tables, &OccupiedSet::empty(), &request(4, UsageType::Personal));
    assert_eq!(out.len(), 1);
}
