//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{CombinationGroupConfig, Config, OutputFormat, PolicyConfig};
use crate::config::validator::ConfigValidator;
use crate::database::resolve_data_dir;
use crate::error::Result;

/// Lock wait used when no layer sets one.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Builds the effective configuration from every layer.
///
/// Layers, lowest to highest: built-in defaults, the user configuration in
/// the data directory, an explicit file, `MESA_*` environment variables, and
/// a programmatic configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    explicit_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the user configuration from `dir` instead of the resolved data
    /// directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Adds an explicit configuration file that must exist.
    #[must_use]
    pub fn with_file(mut self, path: &Path) -> Self {
        self.explicit_file = Some(path.to_path_buf());
        self
    }

    /// Skips every configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `MESA_*` overrides.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Layers `config` over everything else.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Loads, merges, validates and completes the configuration.
    ///
    /// Every field of the result is set.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be loaded, an environment variable
    /// is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let data_dir = match self.data_dir {
                Some(dir) => Some(dir),
                None => resolve_data_dir().ok(),
            };
            let sources =
                ConfigLoader::load_all(data_dir.as_deref(), self.explicit_file.as_deref())?;
            log::debug!("loaded {} configuration file(s)", sources.len());
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(Self::fill_defaults(config))
    }

    fn fill_defaults(mut config: Config) -> Config {
        let builtin = PolicyConfig::builtin();
        let policy = config.policy.get_or_insert_with(PolicyConfig::default);
        if policy.personal_only_venues.is_none() {
            policy.personal_only_venues = builtin.personal_only_venues;
        }
        if policy.events_only_ranges.is_none() {
            policy.events_only_ranges = builtin.events_only_ranges;
        }
        if policy.media_restrictions.is_none() {
            policy.media_restrictions = builtin.media_restrictions;
        }

        if config.combinations.is_none() {
            config.combinations = Some(CombinationGroupConfig::builtin());
        }
        if config.maximum_lock_wait_seconds.is_none() {
            config.maximum_lock_wait_seconds = Some(DEFAULT_LOCK_WAIT_SECONDS);
        }
        if config.output_format.is_none() {
            config.output_format = Some(OutputFormat::default());
        }
        config
    }
}
