//! Error types for the Dossin MCP server.
//!
//! Every tool operation fails with one of five error categories. The
//! dispatcher turns each of them into an `isError` tool result, so none of
//! them ever reaches the transport as a protocol fault.
//!
//! # Examples
//!
//! ```
//! use dossin_core::{Error, Result};
//!
//! fn require_query(query: &str) -> Result<()> {
//!     if query.trim().is_empty() {
//!         return Err(Error::InvalidInput(
//!             "query is required and must be a non-empty string".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = require_query("").unwrap_err();
//! assert!(err.is_invalid_input());
//! ```

use serde::Serialize;
use thiserror::Error;

/// Main error type for the Dossin MCP server.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied argument is malformed.
    ///
    /// Raised before any network or filesystem I/O is attempted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The database backend answered with a non-2xx status or could not be
    /// reached at all.
    ///
    /// The display form is the bare message so that structured backend
    /// errors (`{"error": "db down"}`) surface verbatim.
    #[error("{message}")]
    BackendUnavailable {
        /// HTTP status, `None` for transport failures
        status: Option<u16>,
        /// Backend-provided or status-derived message
        message: String,
    },

    /// The bundler could not resolve an import.
    ///
    /// Displays as the remediation text, which tells the user which package
    /// to install.
    #[error("{remediation}")]
    MissingDependency {
        /// Package name exactly as it appeared in the failing import
        package: String,
        /// Human-actionable instructions
        remediation: String,
    },

    /// Any other bundler failure, message passed through unchanged.
    #[error("Failed to compile component: {0}")]
    CompileFailed(String),

    /// Filesystem operation failure while persisting a document.
    #[error("Failed to {operation}: {source}")]
    PersistenceError {
        /// What was being attempted (e.g. "create output directory")
        operation: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Serializable discriminant of [`Error`], reported in error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// See [`Error::InvalidInput`]
    InvalidInput,
    /// See [`Error::BackendUnavailable`]
    BackendUnavailable,
    /// See [`Error::MissingDependency`]
    MissingDependency,
    /// See [`Error::CompileFailed`]
    CompileFailed,
    /// See [`Error::PersistenceError`]
    PersistenceError,
}

impl Error {
    /// Builds a [`Error::PersistenceError`] from an I/O error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dossin_core::Error;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    /// let err = Error::persistence("write file", io);
    /// assert_eq!(err.to_string(), "Failed to write file: denied");
    /// ```
    #[must_use]
    pub fn persistence(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::PersistenceError {
            operation: operation.into(),
            source,
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
            Self::MissingDependency { .. } => ErrorKind::MissingDependency,
            Self::CompileFailed(_) => ErrorKind::CompileFailed,
            Self::PersistenceError { .. } => ErrorKind::PersistenceError,
        }
    }

    /// Returns `true` if this is an invalid input error.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns `true` if this is a backend error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dossin_core::Error;
    ///
    /// let err = Error::BackendUnavailable {
    ///     status: Some(500),
    ///     message: "db down".to_string(),
    /// };
    /// assert!(err.is_backend_error());
    /// assert_eq!(err.to_string(), "db down");
    /// ```
    #[must_use]
    pub const fn is_backend_error(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }

    /// Returns `true` if the bundler could not resolve a package.
    #[must_use]
    pub const fn is_missing_dependency(&self) -> bool {
        matches!(self, Self::MissingDependency { .. })
    }

    /// Returns `true` if this is an unclassified compile failure.
    #[must_use]
    pub const fn is_compile_failure(&self) -> bool {
        matches!(self, Self::CompileFailed(_))
    }

    /// Returns `true` if this is a filesystem persistence error.
    #[must_use]
    pub const fn is_persistence_error(&self) -> bool {
        matches!(self, Self::PersistenceError { .. })
    }

    /// Returns the missing package name, if this is a dependency error.
    #[must_use]
    pub fn missing_package(&self) -> Option<&str> {
        match self {
            Self::MissingDependency { package, .. } => Some(package),
            _ => None,
        }
    }
}

/// Result type alias for Dossin operations.
pub type Result<T> = std::result::Result<T, Error>;
