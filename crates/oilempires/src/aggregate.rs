//! Rating aggregation.
//!
//! The summary for a section is derived from a snapshot of its rating rows
//! and never stored. `summarize` folds the snapshot through a [`RatingTally`];
//! anything that wants to maintain the tally incrementally can push values
//! into one directly and produce the same [`RatingSummary`].

use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::{Rating, RatingValue};

/// Average and count of the ratings for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingSummary {
    /// Mean star count in tenths, rounded half up (47 means 4.7).
    average_tenths: u32,
    /// Number of ratings.
    count: usize,
}

impl RatingSummary {
    /// Number of ratings the average was computed from.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The average, rounded to one fractional digit.
    #[must_use]
    pub fn average(&self) -> f64 {
        f64::from(self.average_tenths) / 10.0
    }

    /// The average rendered with exactly one fractional digit, e.g. `"4.7"`.
    #[must_use]
    pub fn average_label(&self) -> String {
        format!("{}.{}", self.average_tenths / 10, self.average_tenths % 10)
    }

    /// `"rating"` or `"ratings"` depending on the count.
    #[must_use]
    pub fn noun(&self) -> &'static str {
        if self.count == 1 {
            "rating"
        } else {
            "ratings"
        }
    }
}

impl fmt::Display for RatingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.average_label(), self.count, self.noun())
    }
}

impl Serialize for RatingSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("RatingSummary", 2)?;
        state.serialize_field("average", &self.average_label())?;
        state.serialize_field("count", &self.count)?;
        state.end()
    }
}

/// Running sum and count of star values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingTally {
    sum: u64,
    count: u64,
}

impl RatingTally {
    /// An empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rating.
    pub fn push(&mut self, value: RatingValue) {
        self.sum += u64::from(value.get());
        self.count += 1;
    }

    /// Summary of everything pushed so far.
    #[must_use]
    pub fn summary(&self) -> RatingSummary {
        if self.count == 0 {
            return RatingSummary::default();
        }
        // Exact half-up on the rational mean, no float ties:
        // round(sum / count, 1) == floor((20 * sum + count) / (2 * count)) / 10
        let tenths = (self.sum * 20 + self.count) / (self.count * 2);
        RatingSummary {
            // Star values cap the mean at 5.0, so tenths never exceeds 50.
            average_tenths: u32::try_from(tenths).unwrap_or(u32::MAX),
            count: usize::try_from(self.count).unwrap_or(usize::MAX),
        }
    }
}

impl Extend<RatingValue> for RatingTally {
    fn extend<I: IntoIterator<Item = RatingValue>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Summarize a snapshot of rating rows.
#[must_use]
pub fn summarize(ratings: &[Rating]) -> RatingSummary {
    let mut tally = RatingTally::new();
    tally.extend(ratings.iter().map(|rating| rating.value));
    tally.summary()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::model::SectionKey;

    fn ratings(values: &[u8]) -> Vec<Rating> {
        values
            .iter()
            .map(|&v| Rating {
                id: Uuid::new_v4(),
                value: RatingValue::new(v).unwrap(),
                section: SectionKey::new("intro"),
                created_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_empty_set() {
        let summary = summarize(&[]);
        assert_eq!(summary.count(), 0);
        assert_eq!(summary.average_label(), "0.0");
        assert!(summary.average().abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_rounded_to_one_digit() {
        let summary = summarize(&ratings(&[5, 4, 5]));
        assert_eq!(summary.average_label(), "4.7");
        assert_eq!(summary.count(), 3);
        assert!((summary.average() - 4.7).abs() < 1e-9);
    }

    #[test]
    fn test_rounds_half_up() {
        // 4.25 -> 4.3
        assert_eq!(summarize(&ratings(&[5, 4, 4, 4])).average_label(), "4.3");
        // 1.5 stays 1.5
        assert_eq!(summarize(&ratings(&[1, 2])).average_label(), "1.5");
        // 3.333.. -> 3.3
        assert_eq!(summarize(&ratings(&[3, 3, 4])).average_label(), "3.3");
        // 23 / 20 = 1.15 exactly -> 1.2
        let mut values = vec![1; 17];
        values.extend([2, 2, 2]);
        assert_eq!(summarize(&ratings(&values)).average_label(), "1.2");
    }

    #[test]
    fn test_matches_float_mean() {
        let values = [1, 5, 2, 4, 3, 5, 5, 1];
        let summary = summarize(&ratings(&values));
        let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64;
        assert!((summary.average() - (mean * 10.0).round() / 10.0).abs() < 1e-9);
        assert_eq!(summary.count(), values.len());
    }

    #[test]
    fn test_single_rating() {
        let summary = summarize(&ratings(&[2]));
        assert_eq!(summary.to_string(), "2.0 (1 rating)");
    }

    #[test]
    fn test_display_plural() {
        let summary = summarize(&ratings(&[5, 5]));
        assert_eq!(summary.to_string(), "5.0 (2 ratings)");
        assert_eq!(RatingSummary::default().to_string(), "0.0 (0 ratings)");
    }

    #[test]
    fn test_incremental_tally_matches_snapshot() {
        let rows = ratings(&[4, 2, 5]);
        let mut tally = RatingTally::new();
        for row in &rows {
            tally.push(row.value);
        }
        assert_eq!(tally.summary(), summarize(&rows));
    }

    #[test]
    fn test_serialize_summary() {
        let json = serde_json::to_value(summarize(&ratings(&[5, 4, 5]))).unwrap();
        assert_eq!(json["average"], "4.7");
        assert_eq!(json["count"], 3);
    }
}
