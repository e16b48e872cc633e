//! Error types for the mesa library.
//!
//! This module provides the error hierarchy for all operations in the mesa
//! library, using `thiserror` for ergonomic error handling.
//!
//! Policy rejections of individual tables are *not* errors: they are reported
//! as [`crate::allocation::PolicyViolation`] values and simply exclude the
//! table from the suggestion list.

use thiserror::Error;

/// Result type alias for operations that may fail with a mesa error.
///
/// # Examples
///
/// ```
/// use mesa::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the mesa library.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input, rejected before any data access.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A collaborator (table catalog or reservation ledger) could not be read.
    #[error("data access failed while reading {collaborator}: {source}")]
    DataAccess {
        /// The collaborator that failed.
        collaborator: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A table definition is invalid.
    #[error("invalid table {code}: {reason}")]
    InvalidTable {
        /// The code of the offending table.
        code: String,
        /// Why the table is invalid.
        reason: String,
    },

    /// A booking collides with tables already committed for the same date and shift.
    #[error("reservation conflict: {details}")]
    ReservationConflict {
        /// Details about the conflict.
        details: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::table::InvalidTableError> for Error {
    fn from(err: crate::table::InvalidTableError) -> Self {
        Self::InvalidTable {
            code: err.code,
            reason: err.reason,
        }
    }
}

impl Error {
    /// Shorthand for a [`Error::Validation`] error.
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wraps a collaborator failure into [`Error::DataAccess`].
    ///
    /// Failures that are already `DataAccess` are passed through unchanged.
    #[must_use]
    pub fn data_access(collaborator: impl Into<String>, source: Error) -> Self {
        if source.is_data_access() {
            return source;
        }
        Self::DataAccess {
            collaborator: collaborator.into(),
            source: Box::new(source),
        }
    }

    /// Check if the error is a rejected input.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesa::Error;
    ///
    /// let err = Error::Validation {
    ///     field: "party_size".to_string(),
    ///     message: "must be at least 1".to_string(),
    /// };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the error is a collaborator read failure.
    #[must_use]
    pub fn is_data_access(&self) -> bool {
        matches!(self, Self::DataAccess { .. })
    }

    /// Check if the error comes from SQLite lock contention.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            Self::DataAccess { source, .. } => source.is_busy(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "shift".to_string(),
            message: "unknown shift 'brunch'".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("shift"));
        assert!(display.contains("brunch"));
        assert!(err.is_validation());
        assert!(!err.is_data_access());
    }

    #[test]
    fn test_data_access_wraps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "catalog offline");
        let err = Error::data_access("table inventory", Error::Io(io));
        let display = format!("{err}");
        assert!(display.contains("table inventory"));
        assert!(display.contains("catalog offline"));
        assert!(err.is_data_access());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_data_access_is_not_double_wrapped() {
        let inner = Error::data_access(
            "reservation ledger",
            Error::NotFound {
                resource: "ledger".to_string(),
            },
        );
        let err = Error::data_access("table inventory", inner);
        match err {
            Error::DataAccess { collaborator, .. } => {
                assert_eq!(collaborator, "reservation ledger");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reservation_conflict_error() {
        let err = Error::ReservationConflict {
            details: "table 21 is already booked for 2026-10-16 dinner".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("reservation conflict"));
        assert!(display.contains("21"));
    }

    #[test]
    fn test_invalid_table_error() {
        let err = Error::InvalidTable {
            code: "7".to_string(),
            reason: "capacity must be at least 1".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "invalid table 7: capacity must be at least 1"
        );
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_is_busy() {
        let busy = Error::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        ));
        assert!(busy.is_busy());
        assert!(Error::data_access("table inventory", busy).is_busy());

        let other = Error::NotFound {
            resource: "reservation 9".to_string(),
        };
        assert!(!other.is_busy());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
