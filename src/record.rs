// src/record.rs
// =============================================================================
// The record produced for every page the crawler fetches successfully.
//
// A PageRecord holds exactly what goes into one <url> entry of the sitemap:
// - location:         the page URL (fragment already stripped)
// - last_modified:    from the Last-Modified header, or today's date
// - priority:         1.0 for the seed page, 0.8 for everything else
// - change_frequency: daily for the seed page, weekly for everything else
//
// Records are built once and never modified afterwards.
// =============================================================================

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// Sitemap `<priority>` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    #[serde(rename = "1.0")]
    Seed,
    #[serde(rename = "0.8")]
    Linked,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Seed => "1.0",
            Priority::Linked => "0.8",
        }
    }
}

/// Sitemap `<changefreq>` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
        }
    }
}

/// One successfully crawled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub location: String,
    /// Serialized as YYYY-MM-DD
    pub last_modified: NaiveDate,
    pub priority: Priority,
    pub change_frequency: ChangeFrequency,
    /// Images found on the page (only filled when image collection is on)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl PageRecord {
    // Builds the record for a fetched page
    //
    // Parameters:
    //   location:      the fragment-stripped page URL
    //   seed:          the fragment-stripped seed URL (exact string comparison)
    //   last_modified: raw Last-Modified header value, if the server sent one
    //   today:         fallback date when the header is missing or unparseable
    pub fn new(
        location: String,
        seed: &str,
        last_modified: Option<&str>,
        today: NaiveDate,
    ) -> Self {
        let (priority, change_frequency) = if location == seed {
            (Priority::Seed, ChangeFrequency::Daily)
        } else {
            (Priority::Linked, ChangeFrequency::Weekly)
        };

        Self {
            location,
            last_modified: last_modified
                .and_then(parse_http_date)
                .unwrap_or(today),
            priority,
            change_frequency,
            images: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// The `<lastmod>` text
    pub fn last_modified_str(&self) -> String {
        self.last_modified.format("%Y-%m-%d").to_string()
    }
}

/// Local calendar date, used when a page has no usable Last-Modified header
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// Parses an HTTP date such as "Wed, 21 Oct 2015 07:28:00 GMT"
//
// The date is taken as written in the header (no timezone conversion).
// Returns None for anything that isn't a valid RFC 2822 date.
pub fn parse_http_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "https://example.test/";

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seed_gets_top_priority() {
        let record = PageRecord::new(SEED.to_string(), SEED, None, day(2024, 1, 1));
        assert_eq!(record.priority, Priority::Seed);
        assert_eq!(record.change_frequency, ChangeFrequency::Daily);
        assert_eq!(record.priority.as_str(), "1.0");
        assert_eq!(record.change_frequency.as_str(), "daily");
    }

    #[test]
    fn test_other_pages_get_weekly() {
        let record = PageRecord::new(
            "https://example.test/about".to_string(),
            SEED,
            None,
            day(2024, 1, 1),
        );
        assert_eq!(record.priority.as_str(), "0.8");
        assert_eq!(record.change_frequency.as_str(), "weekly");
    }

    #[test]
    fn test_last_modified_from_header() {
        let record = PageRecord::new(
            SEED.to_string(),
            SEED,
            Some("Wed, 21 Oct 2015 07:28:00 GMT"),
            day(2024, 1, 1),
        );
        assert_eq!(record.last_modified, day(2015, 10, 21));
        assert_eq!(record.last_modified_str(), "2015-10-21");
    }

    #[test]
    fn test_malformed_header_falls_back_to_today() {
        let record = PageRecord::new(
            SEED.to_string(),
            SEED,
            Some("last tuesday, probably"),
            day(2024, 3, 9),
        );
        assert_eq!(record.last_modified_str(), "2024-03-09");
    }

    #[test]
    fn test_date_is_not_shifted_by_offset() {
        // 23:30 at -0500 is already the next day in UTC; keep the written date
        assert_eq!(
            parse_http_date("Tue, 31 Dec 2019 23:30:00 -0500"),
            Some(day(2019, 12, 31))
        );
    }

    #[test]
    fn test_json_shape() {
        let record = PageRecord::new(SEED.to_string(), SEED, None, day(2024, 5, 2));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["last_modified"], "2024-05-02");
        assert_eq!(json["priority"], "1.0");
        assert_eq!(json["change_frequency"], "daily");
        assert!(json.get("images").is_none());
    }
}
