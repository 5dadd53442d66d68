use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Field coercion – raw cell text → typed course fields
// ---------------------------------------------------------------------------

/// Coerce a raw price cell to a non-negative number.
///
/// `TRUE` and `Free` count as zero, everything but digits and `.` is
/// stripped (`$12.99` → 12.99), and whatever fails to parse becomes 0.
pub fn parse_price(raw: &str) -> f64 {
    let replaced = raw.replace("TRUE", "0").replace("Free", "0");
    let cleaned: String = replaced
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

/// Parse a subscriber count.  Integral floats such as `120.0` are accepted.
pub fn parse_subscribers(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return Some(n);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
        .map(|v| v as u64)
}

/// Trimmed categorical value; blank cells are missing.
pub fn parse_category(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Truncate a `2017-03-15T00:00:00Z` style timestamp to its calendar date.
pub fn parse_published(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// RawCourse – one row as read from disk, before coercion
// ---------------------------------------------------------------------------

/// Cell text of the required columns for one row.  `None` is a null cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCourse {
    pub title: Option<String>,
    pub url: Option<String>,
    pub price: Option<String>,
    pub subscribers: Option<String>,
    pub level: Option<String>,
    pub published: Option<String>,
    pub subject: Option<String>,
}

// ---------------------------------------------------------------------------
// Course – one row of the dataset
// ---------------------------------------------------------------------------

/// A single course listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub title: String,
    pub url: String,
    /// Always finite and non-negative.
    pub price: f64,
    pub subscribers: Option<u64>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub published: Option<NaiveDate>,
}

impl Course {
    /// Apply the coercion rules to a raw row.
    pub fn from_raw(raw: &RawCourse) -> Self {
        let text = |cell: &Option<String>| cell.as_deref().unwrap_or("").to_string();
        Course {
            title: text(&raw.title),
            url: text(&raw.url),
            price: raw.price.as_deref().map(parse_price).unwrap_or(0.0),
            subscribers: raw.subscribers.as_deref().and_then(parse_subscribers),
            level: raw.level.as_deref().and_then(parse_category),
            subject: raw.subject.as_deref().and_then(parse_category),
            published: raw.published.as_deref().and_then(parse_published),
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.published.map(|d| d.year())
    }

    /// Calendar month, 1 through 12.
    pub fn month(&self) -> Option<u32> {
        self.published.map(|d| d.month())
    }

    /// Price × subscribers.  A proxy, not real revenue.
    pub fn profit(&self) -> Option<f64> {
        self.subscribers.map(|s| self.price * s as f64)
    }
}

// ---------------------------------------------------------------------------
// CourseTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset.  Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseTable {
    courses: Vec<Course>,
}

impl CourseTable {
    pub fn from_courses(courses: Vec<Course>) -> Self {
        CourseTable { courses }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Course> {
        self.courses.get(index)
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_tokens_and_symbols_are_coerced() {
        assert_eq!(parse_price("20"), 20.0);
        assert_eq!(parse_price("$12.99"), 12.99);
        assert_eq!(parse_price("1,200"), 1200.0);
        assert_eq!(parse_price("Free"), 0.0);
        assert_eq!(parse_price("TRUE"), 0.0);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("n/a"), 0.0);
        assert_eq!(parse_price("1.2.3"), 0.0);
    }

    #[test]
    fn price_is_never_negative() {
        assert_eq!(parse_price("-5"), 5.0);
    }

    #[test]
    fn subscribers_accept_integral_floats_only() {
        assert_eq!(parse_subscribers(" 120 "), Some(120));
        assert_eq!(parse_subscribers("120.0"), Some(120));
        assert_eq!(parse_subscribers("12.5"), None);
        assert_eq!(parse_subscribers("-3"), None);
        assert_eq!(parse_subscribers(""), None);
    }

    #[test]
    fn published_timestamp_is_truncated_to_date() {
        assert_eq!(
            parse_published("2017-03-15T00:00:00Z"),
            NaiveDate::from_ymd_opt(2017, 3, 15)
        );
        assert_eq!(
            parse_published("2016-07-01"),
            NaiveDate::from_ymd_opt(2016, 7, 1)
        );
        assert_eq!(parse_published("2017-13-01T00:00:00Z"), None);
        assert_eq!(parse_published("yesterday"), None);
        assert_eq!(parse_published(""), None);
    }

    #[test]
    fn blank_categories_are_missing() {
        assert_eq!(parse_category("  Beginner Level "), Some("Beginner Level".into()));
        assert_eq!(parse_category("   "), None);
    }

    #[test]
    fn from_raw_derives_year_month_and_profit() {
        let raw = RawCourse {
            title: Some("Excel Basics".into()),
            url: Some("https://example.com/excel".into()),
            price: Some("10".into()),
            subscribers: Some("100".into()),
            level: Some("Beginner".into()),
            published: Some("2015-03-01T12:00:00Z".into()),
            subject: Some("Business".into()),
        };
        let course = Course::from_raw(&raw);
        assert_eq!(course.year(), Some(2015));
        assert_eq!(course.month(), Some(3));
        assert_eq!(course.profit(), Some(1000.0));
    }

    #[test]
    fn from_raw_tolerates_null_cells() {
        let course = Course::from_raw(&RawCourse::default());
        assert_eq!(course.title, "");
        assert_eq!(course.price, 0.0);
        assert_eq!(course.subscribers, None);
        assert_eq!(course.profit(), None);
        assert_eq!(course.year(), None);
        assert_eq!(course.level, None);
    }
}
