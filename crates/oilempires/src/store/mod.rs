//! Content store access.
//!
//! [`ContentStore`] is the data access layer: three reads and two
//! append-only writes against the relational store that holds companies and
//! visitor feedback. Failures are returned as-is; nothing here retries.
//! [`SqliteStore`] is the bundled implementation.

pub mod migrations;
pub mod schema;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Comment, Company, Rating, RatingValue, SectionKey};

pub use sqlite::{SqliteStore, StoreStats};

/// Read and write operations against the content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All companies, sorted by name ascending.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails.
    async fn list_companies(&self) -> Result<Vec<Company>>;

    /// Comments for `section`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails.
    async fn list_comments(&self, section: &SectionKey) -> Result<Vec<Comment>>;

    /// Every rating row for `section`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails.
    async fn list_ratings(&self, section: &SectionKey) -> Result<Vec<Rating>>;

    /// Append a comment. The returned row marks success.
    ///
    /// There is no idempotency key: calling this twice stores two rows.
    ///
    /// # Errors
    ///
    /// Returns a store error if the insert fails.
    async fn insert_comment(&self, section: &SectionKey, name: &str, body: &str)
        -> Result<Comment>;

    /// Append a rating. The returned row marks success.
    ///
    /// # Errors
    ///
    /// Returns a store error if the insert fails.
    async fn insert_rating(&self, section: &SectionKey, value: RatingValue) -> Result<Rating>;
}
