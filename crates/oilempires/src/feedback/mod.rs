//! Visitor feedback for one section of the page.
//!
//! A [`FeedbackSection`] owns the form fields, the two submission machines
//! (comment and rating), the cached comment list and rating summary for its
//! current section, and a queue of transient notices for the visitor.
//!
//! Reads happen on [`load`](FeedbackSection::load) and on every section
//! change. A successful write invalidates the matching cached read and
//! refetches it. Store failures never escape: they are logged and turned into
//! one generic notice.

mod state;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{summarize, RatingSummary};
use crate::config::FeedbackConfig;
use crate::error::Result;
use crate::model::{Comment, RatingValue, SectionKey};
use crate::query::{Cached, Ticket};
use crate::store::ContentStore;

pub use state::{SubmissionMachine, SubmissionState};

/// Shown for every store failure; causes are not distinguished for visitors.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Who is leaving feedback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    /// Nobody signed in.
    #[default]
    Anonymous,
    /// A signed-in visitor.
    Authenticated {
        /// Name to attribute comments to.
        display_name: String,
    },
}

impl Identity {
    /// An authenticated identity.
    #[must_use]
    pub fn authenticated(display_name: impl Into<String>) -> Self {
        Self::Authenticated {
            display_name: display_name.into(),
        }
    }

    fn display_name(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { display_name } => Some(display_name.as_str()),
        }
    }
}

/// Construction-time settings for a [`FeedbackSection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackOptions {
    /// Section the feedback belongs to.
    pub section: SectionKey,
    /// Heading shown above the form.
    pub title: String,
    /// The visitor, passed in rather than looked up.
    pub identity: Identity,
    /// Whether an authenticated identity may leave the name field empty.
    pub identity_waives_name: bool,
}

impl FeedbackOptions {
    /// Options for an anonymous visitor with default settings.
    #[must_use]
    pub fn new(section: impl Into<SectionKey>) -> Self {
        Self::from_config(section, &FeedbackConfig::default())
    }

    /// Options taking title and name policy from configuration.
    #[must_use]
    pub fn from_config(section: impl Into<SectionKey>, config: &FeedbackConfig) -> Self {
        Self {
            section: section.into(),
            title: config.default_title.clone(),
            identity: Identity::Anonymous,
            identity_waives_name: config.identity_waives_name,
        }
    }

    /// Set the visitor identity.
    #[must_use]
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Set the heading.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Confirmation.
    Info,
    /// Something the visitor needs to act on.
    Error,
}

/// A transient, visitor-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub description: String,
}

impl Notice {
    fn info(title: &str, description: &str) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn error(title: &str, description: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The row was written.
    Stored,
    /// Local validation failed; the store was not called.
    Rejected,
    /// The store call failed.
    Failed,
}

/// Comments and rating rows for one section, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSnapshot {
    /// Newest first.
    pub comments: Vec<Comment>,
    /// Derived from the rating rows.
    pub ratings: RatingSummary,
}

/// Tickets for the two reads a load performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTickets {
    comments: Ticket<SectionKey>,
    ratings: Ticket<SectionKey>,
}

impl LoadTickets {
    /// The section the load was started for.
    #[must_use]
    pub fn section(&self) -> &SectionKey {
        self.comments.key()
    }
}

/// Feedback form and listings for one section.
#[derive(Debug)]
pub struct FeedbackSection<S: ContentStore + ?Sized> {
    store: Arc<S>,
    options: FeedbackOptions,
    name: String,
    body: String,
    selected_rating: Option<RatingValue>,
    hovered_rating: Option<u8>,
    comment_form: SubmissionMachine,
    rating_form: SubmissionMachine,
    comments: Cached<SectionKey, Vec<Comment>>,
    ratings: Cached<SectionKey, RatingSummary>,
    notices: Vec<Notice>,
}

impl<S: ContentStore + ?Sized> FeedbackSection<S> {
    /// Create the component. Nothing is fetched until [`load`](Self::load).
    pub fn new(store: Arc<S>, options: FeedbackOptions) -> Self {
        Self {
            store,
            options,
            name: String::new(),
            body: String::new(),
            selected_rating: None,
            hovered_rating: None,
            comment_form: SubmissionMachine::new(),
            rating_form: SubmissionMachine::new(),
            comments: Cached::new(),
            ratings: Cached::new(),
            notices: Vec::new(),
        }
    }

    /// Current section.
    #[must_use]
    pub fn section(&self) -> &SectionKey {
        &self.options.section
    }

    /// Heading for the form.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.options.title
    }

    /// Name field contents.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Comment field contents.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace the name field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the comment field.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Track the star under the pointer (`None` when it leaves).
    pub fn hover_rating(&mut self, stars: Option<u8>) {
        self.hovered_rating = stars;
    }

    /// How many stars to draw filled: the hovered star if any, else the last pick.
    #[must_use]
    pub fn highlighted_stars(&self) -> u8 {
        self.hovered_rating
            .or(self.selected_rating.map(RatingValue::get))
            .unwrap_or(0)
    }

    /// Comments for the current section, newest first. Empty until loaded.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        self.comments.get().map(Vec::as_slice).unwrap_or_default()
    }

    /// Rating summary for the current section, once loaded.
    #[must_use]
    pub fn rating_summary(&self) -> Option<&RatingSummary> {
        self.ratings.get()
    }

    /// The comment form's submission machine.
    #[must_use]
    pub fn comment_form(&self) -> &SubmissionMachine {
        &self.comment_form
    }

    /// The rating form's submission machine.
    #[must_use]
    pub fn rating_form(&self) -> &SubmissionMachine {
        &self.rating_form
    }

    /// Pending notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Remove and return pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fetch comments and ratings for the current section.
    pub async fn load(&mut self) {
        let tickets = self.begin_load();
        let snapshot = Self::fetch(&self.store, tickets.section()).await;
        self.apply(tickets, snapshot);
    }

    /// Switch to another section and load it.
    ///
    /// Loads still in flight for the previous section are superseded.
    pub async fn change_section(&mut self, section: impl Into<SectionKey>) {
        let section = section.into();
        if section != self.options.section {
            debug!("Feedback section {} -> {}", self.options.section, section);
            self.options.section = section;
            self.selected_rating = None;
            self.hovered_rating = None;
        }
        self.load().await;
    }

    /// Take tickets for loading the current section.
    pub fn begin_load(&mut self) -> LoadTickets {
        let section = self.options.section.clone();
        LoadTickets {
            comments: self.comments.begin(section.clone()),
            ratings: self.ratings.begin(section),
        }
    }

    /// Read comments and ratings for `section` concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first store error from either read.
    pub async fn fetch(store: &S, section: &SectionKey) -> Result<SectionSnapshot> {
        let (comments, ratings) =
            tokio::try_join!(store.list_comments(section), store.list_ratings(section))?;
        Ok(SectionSnapshot {
            comments,
            ratings: summarize(&ratings),
        })
    }

    /// Apply a fetched snapshot if `tickets` are still current.
    ///
    /// Returns `false` when the result was discarded as superseded. A failed
    /// fetch that is still current produces an error notice.
    pub fn apply(&mut self, tickets: LoadTickets, snapshot: Result<SectionSnapshot>) -> bool {
        if tickets.comments.generation() != self.comments.generation()
            || tickets.ratings.generation() != self.ratings.generation()
        {
            debug!("Dropping superseded load for section {}", tickets.section());
            return false;
        }

        match snapshot {
            Ok(snapshot) => {
                self.comments.settle(tickets.comments, snapshot.comments);
                self.ratings.settle(tickets.ratings, snapshot.ratings);
                true
            }
            Err(e) => {
                warn!("Loading feedback for {} failed: {}", tickets.section(), e);
                self.notices.push(Notice::error("Error", GENERIC_FAILURE));
                false
            }
        }
    }

    /// Submit the comment form.
    ///
    /// Store failures come back as [`SubmitOutcome::Failed`] with a notice
    /// queued and the form fields untouched.
    ///
    /// # Errors
    ///
    /// Only returns an error if the form's submission machine is driven out
    /// of order, which indicates a bug.
    pub async fn submit_comment(&mut self) -> Result<SubmitOutcome> {
        let body = self.body.trim().to_string();
        let author = self.author();

        let Some(author) = author.filter(|_| !body.is_empty()) else {
            let description = if self.name_waived() {
                "Please enter a comment"
            } else {
                "Please provide both your name and comment"
            };
            self.notices.push(Notice::error("Missing Information", description));
            return Ok(SubmitOutcome::Rejected);
        };

        self.comment_form.begin()?;
        let section = self.options.section.clone();

        match self.store.insert_comment(&section, &author, &body).await {
            Ok(comment) => {
                info!("Comment {} added to section {}", comment.id, section);
                self.comment_form.succeed()?;
                self.body.clear();
                self.notices
                    .push(Notice::info("Comment Added", "Thank you for your feedback!"));
                self.comments.invalidate();
                self.refresh_comments().await;
                Ok(SubmitOutcome::Stored)
            }
            Err(e) => {
                warn!("Adding comment to section {} failed: {}", section, e);
                self.comment_form.fail()?;
                self.notices.push(Notice::error("Error", GENERIC_FAILURE));
                self.comment_form.acknowledge()?;
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Submit a star rating for the current section.
    ///
    /// Follows the same cycle as comments: the rating form enters
    /// `Submitting` for the duration of the write.
    ///
    /// # Errors
    ///
    /// Only returns an error if the form's submission machine is driven out
    /// of order, which indicates a bug.
    pub async fn submit_rating(&mut self, stars: u8) -> Result<SubmitOutcome> {
        let value = match RatingValue::new(stars) {
            Ok(value) => value,
            Err(e) => {
                debug!("Rejected rating: {}", e);
                self.notices.push(Notice::error(
                    "Invalid Rating",
                    "Please choose between 1 and 5 stars",
                ));
                return Ok(SubmitOutcome::Rejected);
            }
        };

        self.selected_rating = Some(value);
        self.rating_form.begin()?;
        let section = self.options.section.clone();

        match self.store.insert_rating(&section, value).await {
            Ok(_) => {
                self.rating_form.succeed()?;
                self.notices.push(Notice::info(
                    "Rating Submitted",
                    "Thank you for rating this section!",
                ));
                self.ratings.invalidate();
                self.refresh_ratings().await;
                Ok(SubmitOutcome::Stored)
            }
            Err(e) => {
                warn!("Rating section {} failed: {}", section, e);
                self.rating_form.fail()?;
                self.notices.push(Notice::error("Error", GENERIC_FAILURE));
                self.rating_form.acknowledge()?;
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Refetch the comment list for the current section.
    pub async fn refresh_comments(&mut self) {
        let section = self.options.section.clone();
        let ticket = self.comments.begin(section.clone());
        match self.store.list_comments(&section).await {
            Ok(comments) => {
                self.comments.settle(ticket, comments);
            }
            Err(e) => self.read_failed(&ticket, &e),
        }
    }

    /// Refetch the rating summary for the current section.
    pub async fn refresh_ratings(&mut self) {
        let section = self.options.section.clone();
        let ticket = self.ratings.begin(section.clone());
        match self.store.list_ratings(&section).await {
            Ok(ratings) => {
                self.ratings.settle(ticket, summarize(&ratings));
            }
            Err(e) => self.read_failed(&ticket, &e),
        }
    }

    fn read_failed(&mut self, ticket: &Ticket<SectionKey>, err: &crate::Error) {
        warn!("Refetch for section {} failed: {}", ticket.key(), err);
        self.notices.push(Notice::error("Error", GENERIC_FAILURE));
    }

    fn name_waived(&self) -> bool {
        self.options.identity_waives_name && self.options.identity.display_name().is_some()
    }

    /// Name to store with a comment, if one can be determined.
    fn author(&self) -> Option<String> {
        let typed = self.name.trim();
        if !typed.is_empty() {
            return Some(typed.to_string());
        }
        if self.name_waived() {
            return self.options.identity.display_name().map(str::to_string);
        }
        None
    }
}
