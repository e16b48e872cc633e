//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::database::default_data_dir;
use crate::error::{Error, Result};

/// File name of the user configuration inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// A parsed configuration file and its precedence.
///
/// Higher precedence values override lower ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Where the configuration was read from.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use mesa::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Some(Path::new("/srv/mesa")), None).unwrap();
/// println!("found {} configuration files", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the user configuration and an optional explicit file.
    ///
    /// The user configuration is `<data_dir>/config.yaml` (precedence 1) and
    /// is skipped when absent. An explicit file (precedence 2) must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or the explicit
    /// file is missing.
    pub fn load_all(data_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user) = Self::load_user_config(data_dir)? {
            sources.push(user);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::NotFound {
                    resource: format!("configuration file {}", path.display()),
                });
            }
            sources.push(ConfigSource {
                path: path.to_path_buf(),
                precedence: 2,
                config: Self::load_file(path)?,
            });
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Loads `config.yaml` from `data_dir`, or from the default data
    /// directory when none is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let path = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => match default_data_dir() {
                Ok(dir) => dir.join(USER_CONFIG_FILE),
                Err(_) => return Ok(None),
            },
        };

        if !path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&path)?;
        Ok(Some(ConfigSource {
            path,
            precedence: 1,
            config,
        }))
    }

    /// Reads and parses one YAML configuration file.
    ///
    /// An empty file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML for
    /// the schema.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parses YAML configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for malformed YAML or unknown keys.
    pub fn parse(contents: &str) -> Result<Config> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}
