//! Configuration for the allocation engine.
//!
//! The venue policy tables, the combination registry and a few operational
//! settings can be supplied in YAML. Every section is optional; anything left
//! unset falls back to the built-in values.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`MESA_*`)
//! 3. An explicit file (via `ConfigBuilder::with_file`)
//! 4. User config (`~/.mesa/config.yaml`, or `$MESA_DATA_DIR/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use mesa::config::{Config, ConfigBuilder, PolicyConfig};
//!
//! let custom = Config {
//!     policy: Some(PolicyConfig {
//!         personal_only_venues: Some(vec!["Jardin".to_string()]),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! let policy = config.policy.unwrap();
//! assert_eq!(policy.personal_only_venues, Some(vec!["Jardin".to_string()]));
//! assert!(policy.events_only_ranges.is_some());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::{ConfigBuilder, DEFAULT_LOCK_WAIT_SECONDS};
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, USER_CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{
    CodeRange, CombinationGroupConfig, Config, MediaRestriction, OutputFormat, PolicyConfig,
};
pub use validator::ConfigValidator;
