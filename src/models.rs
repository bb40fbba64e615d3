//! Core data models used throughout pubscout.
//!
//! These types represent the query sent to the summarizer service and the
//! records and result items that flow back over the wire. Wire field names
//! are camelCase; the serde renames keep the Rust side conventional.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive publication date window for a search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

/// Immutable input to one search. Constructed once per user-initiated
/// search; a new search always builds a new query and a new accumulator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub date_range: DateRange,
    pub max_results: u32,
}

impl SearchQuery {
    /// Validate the query before any request is issued.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            bail!("search topic must not be empty");
        }
        if !(1..=100).contains(&self.max_results) {
            bail!("maxResults must be in [1, 100], got {}", self.max_results);
        }
        if let (Some(start), Some(end)) = (self.date_range.start, self.date_range.end) {
            if start > end {
                bail!("date range start {} is after end {}", start, end);
            }
        }
        Ok(())
    }
}

/// One article summary returned by the service.
///
/// Identity is `id` (unique within a search on a well-behaved service);
/// duplicate ids are handled by the accumulator's duplicate policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub id: String,
    pub title: String,
    pub body_text: String,
    pub summary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Reported stage of the transfer, as carried on every stream record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Fetching,
    Processing,
    Completed,
}

/// One decoded unit from the wire: a progress tick, optionally carrying a
/// newly available result item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRecord {
    pub status: RecordStatus,
    pub total: u64,
    pub completed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ResultItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(topic: &str, max: u32) -> SearchQuery {
        SearchQuery {
            topic: topic.to_string(),
            origin: Some("India".to_string()),
            date_range: DateRange::default(),
            max_results: max,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(query("machine learning", 10).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_topic() {
        assert!(query("   ", 10).validate().is_err());
    }

    #[test]
    fn test_validate_max_results_bounds() {
        assert!(query("x", 0).validate().is_err());
        assert!(query("x", 101).validate().is_err());
        assert!(query("x", 1).validate().is_ok());
        assert!(query("x", 100).validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_date_range() {
        let mut q = query("x", 10);
        q.date_range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 1),
            end: NaiveDate::from_ymd_opt(2023, 1, 1),
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_query_wire_shape() {
        let mut q = query("cancer screening", 25);
        q.date_range = DateRange {
            start: NaiveDate::from_ymd_opt(2020, 1, 1),
            end: None,
        };
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v["topic"], "cancer screening");
        assert_eq!(v["origin"], "India");
        assert_eq!(v["maxResults"], 25);
        assert_eq!(v["dateRange"]["start"], "2020-01-01");
        assert!(v["dateRange"].get("end").is_none());
    }

    #[test]
    fn test_item_wire_shape() {
        let json = r#"{"id":"38912345","title":"T","bodyText":"B","summaryText":"S","year":2023,"origin":"India"}"#;
        let item: ResultItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "38912345");
        assert_eq!(item.body_text, "B");
        assert_eq!(item.summary_text, "S");
        assert_eq!(item.year, Some(2023));
    }
}
