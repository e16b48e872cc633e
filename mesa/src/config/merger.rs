//! Configuration layering.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, PolicyConfig};

/// Merges configuration layers, lowest precedence first.
///
/// # Examples
///
/// ```
/// use mesa::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(1), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(1));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources in the order given.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merges `source` over `target`.
    ///
    /// Scalars are overwritten when set. The policy merges field by field.
    /// The combination list is replaced as a whole.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_policy) = source.policy {
            let policy = target.policy.get_or_insert_with(PolicyConfig::default);
            Self::merge_policy(policy, source_policy);
        }

        if source.combinations.is_some() {
            target.combinations.clone_from(&source.combinations);
        }
    }

    fn merge_policy(target: &mut PolicyConfig, source: &PolicyConfig) {
        if source.personal_only_venues.is_some() {
            target
                .personal_only_venues
                .clone_from(&source.personal_only_venues);
        }
        if source.events_only_ranges.is_some() {
            target
                .events_only_ranges
                .clone_from(&source.events_only_ranges);
        }
        if source.media_restrictions.is_some() {
            target
                .media_restrictions
                .clone_from(&source.media_restrictions);
        }
    }
}
