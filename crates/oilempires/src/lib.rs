//! `oilempires` - The rise of the oil empires, with visitor feedback
//!
//! This library provides the content of an infographic on early oil industry
//! monopolies (company profiles, a hotspot map, a timeline) and the feedback
//! subsystem that lets visitors rate and comment on each section. Feedback is
//! kept in a relational content store behind the [`ContentStore`] trait.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod model;
pub mod query;
pub mod store;

pub use aggregate::{summarize, RatingSummary, RatingTally};
pub use config::Config;
pub use error::{Error, Result};
pub use feedback::{FeedbackOptions, FeedbackSection, Identity, Notice, SubmissionState};
pub use logging::init_logging;
pub use model::{Comment, Company, IconTag, Rating, RatingValue, SectionKey};
pub use store::{ContentStore, SqliteStore, StoreStats};
