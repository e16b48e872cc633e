//! Declared combination groups.
//!
//! A group names a fixed set of tables in one venue that may be seated as a
//! single unit. Groups carry membership and a description only; the capacity
//! of a group is always recomputed from the live member tables.

use crate::config::CombinationGroupConfig;
use crate::error::{Error, Result};
use crate::TableCode;

/// A named, sanctioned combination of tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationGroup {
    name: String,
    venue: String,
    members: Vec<TableCode>,
    description: String,
}

impl CombinationGroup {
    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any member code is invalid or fewer than
    /// two distinct members are given.
    pub fn new<I, S>(
        name: impl Into<String>,
        venue: impl Into<String>,
        members: I,
        description: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let members = members
            .into_iter()
            .map(|m| {
                TableCode::new(m).map_err(|e| {
                    Error::validation("combinations", format!("group {name}: {}", e.reason))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut distinct = members.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() != members.len() {
            return Err(Error::validation(
                "combinations",
                format!("group {name} lists a table more than once"),
            ));
        }
        if distinct.len() < 2 {
            return Err(Error::validation(
                "combinations",
                format!("group {name} must have at least two tables"),
            ));
        }

        Ok(Self {
            name,
            venue: venue.into(),
            members,
            description: description.into(),
        })
    }

    /// Returns the group identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the venue the group belongs to.
    #[must_use]
    pub fn venue(&self) -> &str {
        &self.venue
    }

    /// Returns the member codes in declared order.
    #[must_use]
    pub fn members(&self) -> &[TableCode] {
        &self.members
    }

    /// Returns the description shown with suggestions.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl TryFrom<&CombinationGroupConfig> for CombinationGroup {
    type Error = Error;

    fn try_from(config: &CombinationGroupConfig) -> Result<Self> {
        Self::new(
            config.name.clone(),
            config.venue.clone(),
            &config.tables,
            config.description.clone(),
        )
    }
}

/// The static registry of legal combination groups, in declaration order.
///
/// # Examples
///
/// ```
/// use mesa::allocation::CombinationRegistry;
///
/// let registry = CombinationRegistry::builtin();
/// let imperial = registry.find("cristal-imperial").unwrap();
/// assert_eq!(imperial.members().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CombinationRegistry {
    groups: Vec<CombinationGroup>,
}

impl CombinationRegistry {
    /// Creates a registry from groups, keeping their order.
    #[must_use]
    pub fn new(groups: Vec<CombinationGroup>) -> Self {
        Self { groups }
    }

    /// The built-in registry.
    #[must_use]
    pub fn builtin() -> Self {
        let groups = CombinationGroupConfig::builtin()
            .iter()
            .filter_map(|g| CombinationGroup::try_from(g).ok())
            .collect();
        Self { groups }
    }

    /// Builds a registry from configured groups.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a group is malformed.
    pub fn from_config(groups: &[CombinationGroupConfig]) -> Result<Self> {
        groups
            .iter()
            .map(CombinationGroup::try_from)
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Returns the groups in declaration order.
    #[must_use]
    pub fn groups(&self) -> &[CombinationGroup] {
        &self.groups
    }

    /// Looks up a group by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CombinationGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no group is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
