//! Core record types for oilempires.
//!
//! Companies are read-only reference data. Comments and ratings are
//! append-only rows that visitors create against a section key.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Opaque key grouping feedback to one region of the page.
///
/// No validation is applied to its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKey(String);

impl SectionKey {
    /// Wrap a raw section identifier.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SectionKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Icon shown next to a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IconTag {
    /// Head office / corporate power.
    #[default]
    Building,
    /// Refining.
    Factory,
    /// Ocean transport.
    Ship,
    /// Production.
    Droplet,
    /// Pipelines.
    PipeLine,
}

impl fmt::Display for IconTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Building => write!(f, "Building"),
            Self::Factory => write!(f, "Factory"),
            Self::Ship => write!(f, "Ship"),
            Self::Droplet => write!(f, "Droplet"),
            Self::PipeLine => write!(f, "PipeLine"),
        }
    }
}

impl FromStr for IconTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Building" => Ok(Self::Building),
            "Factory" => Ok(Self::Factory),
            "Ship" => Ok(Self::Ship),
            "Droplet" => Ok(Self::Droplet),
            "PipeLine" => Ok(Self::PipeLine),
            other => Err(Error::validation(format!("unknown icon tag: {other}"))),
        }
    }
}

/// An oil company record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier.
    pub id: Uuid,
    /// Company name; listings sort on it.
    pub name: String,
    /// Region of operation.
    pub region: String,
    /// Founding year, when known. Free text ("1890s" is valid).
    pub founded: Option<String>,
    /// Narrative description.
    pub description: String,
    /// How the company controlled the supply of oil.
    pub control_method: String,
    /// Icon tag.
    pub icon: IconTag,
}

impl Company {
    /// Build a company with a fresh identifier.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        founded: Option<&str>,
        control_method: impl Into<String>,
        icon: IconTag,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            region: region.into(),
            founded: founded.map(str::to_string),
            description: description.into(),
            control_method: control_method.into(),
            icon,
        }
    }

    /// Founding year for display, `"Unknown"` when missing.
    #[must_use]
    pub fn founded_label(&self) -> &str {
        self.founded.as_deref().unwrap_or("Unknown")
    }
}

/// A visitor comment on a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier.
    pub id: Uuid,
    /// Author name as entered (or the authenticated display name).
    pub name: String,
    /// Comment body.
    pub body: String,
    /// Section the comment belongs to.
    pub section: SectionKey,
    /// When the comment was stored.
    pub created_at: DateTime<Utc>,
}

/// A star rating between 1 and 5.
///
/// The range is checked here, on the submitting side. Stores accept whatever
/// value they are handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingValue(u8);

impl RatingValue {
    /// Lowest allowed star count.
    pub const MIN: u8 = 1;
    /// Highest allowed star count.
    pub const MAX: u8 = 5;

    /// Create a rating value.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is outside `1..=5`.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::validation(format!(
                "rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// The star count.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RatingValue> for u8 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A visitor rating on a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Unique identifier.
    pub id: Uuid,
    /// Star count.
    pub value: RatingValue,
    /// Section the rating belongs to.
    pub section: SectionKey,
    /// When the rating was stored.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key_display() {
        let key = SectionKey::new("intro");
        assert_eq!(key.to_string(), "intro");
        assert_eq!(key.as_str(), "intro");
        assert_eq!(SectionKey::from("intro"), key);
    }

    #[test]
    fn test_section_key_serializes_as_string() {
        let json = serde_json::to_string(&SectionKey::new("timeline")).unwrap();
        assert_eq!(json, "\"timeline\"");
    }

    #[test]
    fn test_rating_value_bounds() {
        assert!(RatingValue::new(0).is_err());
        assert_eq!(RatingValue::new(1).unwrap().get(), 1);
        assert_eq!(RatingValue::new(5).unwrap().get(), 5);

        let err = RatingValue::new(6).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("between 1 and 5"));
    }

    #[test]
    fn test_rating_value_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<RatingValue>("4").is_ok());
        assert!(serde_json::from_str::<RatingValue>("9").is_err());
    }

    #[test]
    fn test_icon_tag_round_trip() {
        for tag in [
            IconTag::Building,
            IconTag::Factory,
            IconTag::Ship,
            IconTag::Droplet,
            IconTag::PipeLine,
        ] {
            assert_eq!(tag.to_string().parse::<IconTag>().unwrap(), tag);
        }
        assert!("Train".parse::<IconTag>().is_err());
    }

    #[test]
    fn test_company_founded_label() {
        let mut company = Company::new(
            "Burmah Oil",
            "Burma (Myanmar)",
            Some("1886"),
            "Production, Refining",
            IconTag::Droplet,
            "Controlled oil production in Burma.",
        );
        assert_eq!(company.founded_label(), "1886");

        company.founded = None;
        assert_eq!(company.founded_label(), "Unknown");
    }

    #[test]
    fn test_company_ids_are_unique() {
        let a = Company::new("A", "R", None, "C", IconTag::Ship, "D");
        let b = Company::new("A", "R", None, "C", IconTag::Ship, "D");
        assert_ne!(a.id, b.id);
    }
}
