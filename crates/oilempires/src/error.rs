//! Crate-wide error type.
//!
//! Every failure talking to the content store is a store error, whatever its
//! cause. Callers that face visitors collapse those into one generic message;
//! the variants below exist for logs and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::feedback::SubmissionState;

/// Anything that can go wrong in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The database file could not be opened or created.
    #[error("cannot open content store {path}: {source}")]
    StoreOpen {
        /// File that was being opened.
        path: PathBuf,
        /// Driver error.
        #[source]
        source: rusqlite::Error,
    },

    /// A statement against an open store failed.
    #[error("content store query failed: {0}")]
    Store(#[from] rusqlite::Error),

    /// The on-disk schema is unusable or could not be upgraded.
    #[error("content store migration failed: {message}")]
    Schema {
        /// What was wrong with the schema.
        message: String,
    },

    /// The store could not be reached at all.
    #[error("content store unavailable: {0}")]
    StoreUnavailable(String),

    /// A configuration layer did not parse or had the wrong shape.
    #[error("cannot read configuration: {0}")]
    ConfigParse(Box<figment::Error>),

    /// Configuration parsed but holds a value the crate cannot use.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// The offending key and why.
        message: String,
    },

    /// Local presence or range check failed before reaching the store.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A submission form was driven through a transition it does not allow.
    #[error("invalid submission transition from {from} to {to}")]
    InvalidTransition {
        /// State the form was in.
        from: SubmissionState,
        /// State that was requested.
        to: SubmissionState,
    },

    /// Parent directory of the database could not be created.
    #[error("cannot create {path}: {source}")]
    CreateDir {
        /// Directory being created.
        path: PathBuf,
        /// OS error.
        #[source]
        source: std::io::Error,
    },

    /// Other filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Rendering or parsing JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Broken internal invariant.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

// figment::Error is large; boxing keeps Result<T> small.
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigParse(Box::new(err))
    }
}

impl Error {
    /// Shorthand for [`Error::StoreUnavailable`].
    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Shorthand for [`Error::Validation`].
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for [`Error::Internal`].
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True for any failure that originated in the content store.
    ///
    /// Connectivity, constraint and migration failures are not told apart.
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::StoreOpen { .. }
                | Self::Store(_)
                | Self::Schema { .. }
                | Self::StoreUnavailable(_)
        )
    }

    /// True when the input was rejected before any store call.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
