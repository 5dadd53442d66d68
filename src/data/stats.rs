use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use std::path::Path;

use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::model::{Course, CourseTable};

// ---------------------------------------------------------------------------
// Measure – the numeric value of an aggregate
// ---------------------------------------------------------------------------

/// Values a [`Tally`] can hold: counts and sums.
pub trait Measure: Copy + Default + PartialOrd + Add<Output = Self> {
    fn as_f64(self) -> f64;
}

impl Measure for u64 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Measure for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

// ---------------------------------------------------------------------------
// Tally – ordered key → value mapping consumed by the charts
// ---------------------------------------------------------------------------

/// An ordered mapping from category to value.
///
/// Iteration order is fixed when the tally is built and survives
/// serialization, so a chart's labels and values always line up.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Tally<K, V> {
    fn default() -> Self {
        Tally {
            entries: Vec::new(),
        }
    }
}

impl<K: Ord, V: Measure> Tally<K, V> {
    /// Keep the key order of the grouped map.
    fn by_key(groups: BTreeMap<K, V>) -> Self {
        Tally {
            entries: groups.into_iter().collect(),
        }
    }

    /// Largest value first; ties keep ascending key order.
    fn ranked(groups: BTreeMap<K, V>) -> Self {
        let mut entries: Vec<(K, V)> = groups.into_iter().collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Tally { entries }
    }
}

impl<K, V: Measure> Tally<K, V> {
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all values.
    pub fn total(&self) -> V {
        self.entries
            .iter()
            .fold(V::default(), |acc, (_, v)| acc + *v)
    }

    /// Values as `f64`, parallel to [`Tally::labels`].
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| v.as_f64()).collect()
    }
}

impl<K: PartialEq, V> Tally<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl<K: fmt::Display, V> Tally<K, V> {
    /// Category labels in iteration order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.to_string()).collect()
    }
}

impl<K: Serialize, V: Serialize> Serialize for Tally<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// CalendarMonth – month-of-year key, ordered January → December
// ---------------------------------------------------------------------------

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month of the year, independent of the year itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth(u32);

impl CalendarMonth {
    /// `number` is 1-based; anything outside 1..=12 is rejected.
    pub fn new(number: u32) -> Option<Self> {
        (1..=12).contains(&number).then_some(CalendarMonth(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[(self.0 - 1) as usize]
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CalendarMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CrossTab – level → subject → course count
// ---------------------------------------------------------------------------

/// Subject bucket for courses that have a level but no subject.
pub const UNKNOWN_SUBJECT: &str = "(no subject)";

/// Course counts per subject within each level, both in key order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct CrossTab {
    cells: BTreeMap<String, BTreeMap<String, u64>>,
}

impl CrossTab {
    pub fn get(&self, level: &str, subject: &str) -> Option<u64> {
        self.cells.get(level)?.get(subject).copied()
    }

    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn level_total(&self, level: &str) -> u64 {
        self.cells
            .get(level)
            .map_or(0, |subjects| subjects.values().sum())
    }

    pub fn total(&self) -> u64 {
        self.cells.values().flat_map(|s| s.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// One entry per cell labelled `Subject_Level`, subject-major, for a single bar chart.
    pub fn flattened(&self) -> Tally<String, u64> {
        let mut cells: Vec<(&str, &str, u64)> = self
            .cells
            .iter()
            .flat_map(|(level, subjects)| {
                subjects
                    .iter()
                    .map(move |(subject, n)| (subject.as_str(), level.as_str(), *n))
            })
            .collect();
        cells.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let entries = cells
            .into_iter()
            .map(|(subject, level, n)| (format!("{subject}_{level}"), n))
            .collect();
        Tally { entries }
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Group courses by `key` and add up `measure`.  Rows missing either are skipped.
fn group_sum<'a, K, V>(
    courses: impl Iterator<Item = &'a Course>,
    key: impl Fn(&Course) -> Option<K>,
    measure: impl Fn(&Course) -> Option<V>,
) -> BTreeMap<K, V>
where
    K: Ord,
    V: Measure,
{
    let mut groups: BTreeMap<K, V> = BTreeMap::new();
    for course in courses {
        let (Some(k), Some(v)) = (key(course), measure(course)) else {
            continue;
        };
        let slot = groups.entry(k).or_default();
        *slot = *slot + v;
    }
    groups
}

fn month_of(course: &Course) -> Option<CalendarMonth> {
    course.month().and_then(CalendarMonth::new)
}

/// Total subscribers per subject, largest first.
pub fn subscribers_by_subject(table: &CourseTable) -> Tally<String, u64> {
    Tally::ranked(group_sum(
        table.iter(),
        |c| c.subject.clone(),
        |c| c.subscribers,
    ))
}

/// Number of courses per level, largest first.
pub fn courses_by_level(table: &CourseTable) -> Tally<String, u64> {
    Tally::ranked(group_sum(table.iter(), |c| c.level.clone(), |_| Some(1)))
}

/// Number of courses per (level, subject) pair.
///
/// Rows without a level are skipped, as in [`courses_by_level`].  Rows with a
/// level but no subject count under [`UNKNOWN_SUBJECT`], so each level's row
/// sums to its course count.
pub fn subjects_per_level(table: &CourseTable) -> CrossTab {
    let mut cells: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    for course in table.iter() {
        let Some(level) = &course.level else {
            continue;
        };
        let subject = course.subject.as_deref().unwrap_or(UNKNOWN_SUBJECT);
        *cells
            .entry(level.clone())
            .or_default()
            .entry(subject.to_string())
            .or_default() += 1;
    }
    CrossTab { cells }
}

pub fn profit_by_year(table: &CourseTable) -> Tally<i32, f64> {
    Tally::by_key(group_sum(table.iter(), Course::year, Course::profit))
}

/// Profit per calendar month, pooled across years.
pub fn profit_by_month(table: &CourseTable) -> Tally<CalendarMonth, f64> {
    Tally::by_key(group_sum(table.iter(), month_of, Course::profit))
}

pub fn subscribers_by_year(table: &CourseTable) -> Tally<i32, u64> {
    Tally::by_key(group_sum(table.iter(), Course::year, |c| c.subscribers))
}

pub fn subscribers_by_month(table: &CourseTable) -> Tally<CalendarMonth, u64> {
    Tally::by_key(group_sum(table.iter(), month_of, |c| c.subscribers))
}

// ---------------------------------------------------------------------------
// Dashboard – every aggregate for one table
// ---------------------------------------------------------------------------

/// All dashboard statistics, computed together from one table.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Dashboard {
    pub subscribers_by_subject: Tally<String, u64>,
    pub courses_by_level: Tally<String, u64>,
    pub subjects_per_level: CrossTab,
    pub profit_by_year: Tally<i32, f64>,
    pub subscribers_by_year: Tally<i32, u64>,
    pub profit_by_month: Tally<CalendarMonth, f64>,
    pub subscribers_by_month: Tally<CalendarMonth, u64>,
}

impl Dashboard {
    pub fn from_table(table: &CourseTable) -> Self {
        let dashboard = Dashboard {
            subscribers_by_subject: subscribers_by_subject(table),
            courses_by_level: courses_by_level(table),
            subjects_per_level: subjects_per_level(table),
            profit_by_year: profit_by_year(table),
            subscribers_by_year: subscribers_by_year(table),
            profit_by_month: profit_by_month(table),
            subscribers_by_month: subscribers_by_month(table),
        };
        log::debug!(
            "Dashboard over {} courses: {} subjects, {} levels, {} years",
            table.len(),
            dashboard.subscribers_by_subject.len(),
            dashboard.courses_by_level.len(),
            dashboard.profit_by_year.len(),
        );
        dashboard
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing dashboard")
    }

    /// Write the dashboard as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported dashboard to {}", path.display());
        Ok(())
    }
}
