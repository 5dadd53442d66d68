use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Course, CourseTable, RawCourse};

/// Columns every course file must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "course_title",
    "url",
    "price",
    "num_subscribers",
    "level",
    "published_timestamp",
    "subject",
];

/// Fatal load failures that callers may want to tell apart.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("missing required columns {missing:?}; available: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a course dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one course per line (recommended)
/// * `.json`    – `[{ "course_title": ..., "price": ..., ... }, ...]`
/// * `.parquet` – one column per required field, string or numeric
pub fn load_file(path: &Path) -> Result<CourseTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} courses from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Column resolution and coercion bookkeeping
// ---------------------------------------------------------------------------

/// Position of each required column, in `REQUIRED_COLUMNS` order.
#[derive(Debug)]
struct ColumnIndex([usize; 7]);

impl ColumnIndex {
    /// Match trimmed header names against the required columns.
    fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, LoadError> {
        let trimmed: Vec<&str> = headers.iter().map(|h| h.as_ref().trim()).collect();
        let mut positions = [0usize; 7];
        let mut missing = Vec::new();

        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            match trimmed.iter().position(|h| *h == name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(ColumnIndex(positions))
        } else {
            Err(LoadError::MissingColumns {
                missing,
                available: trimmed.iter().map(|h| h.to_string()).collect(),
            })
        }
    }

    /// Build a raw row by asking `cell` for the text at each column position.
    fn raw_course<F>(&self, mut cell: F) -> Result<RawCourse>
    where
        F: FnMut(usize) -> Result<Option<String>>,
    {
        let [title, url, price, subscribers, level, published, subject] = self.0;
        Ok(RawCourse {
            title: cell(title)?,
            url: cell(url)?,
            price: cell(price)?,
            subscribers: cell(subscribers)?,
            level: cell(level)?,
            published: cell(published)?,
            subject: cell(subject)?,
        })
    }
}

/// Counts of cells that fell back to a default during coercion.
#[derive(Debug, Default)]
struct CoercionSummary {
    rows: usize,
    bad_prices: usize,
    bad_dates: usize,
    bad_subscribers: usize,
}

impl CoercionSummary {
    fn record(&mut self, raw: &RawCourse, course: &Course) {
        self.rows += 1;
        let is_blank = |cell: &Option<String>| cell.as_deref().map_or(true, |s| s.trim().is_empty());

        let literal_zero = raw
            .price
            .as_deref()
            .is_some_and(|p| p.trim().parse::<f64>().is_ok_and(|v| v == 0.0));
        if course.price == 0.0 && !literal_zero {
            self.bad_prices += 1;
        }
        if course.published.is_none() && !is_blank(&raw.published) {
            self.bad_dates += 1;
        }
        if course.subscribers.is_none() {
            self.bad_subscribers += 1;
        }
    }

    fn log(&self) {
        if self.bad_prices > 0 || self.bad_dates > 0 || self.bad_subscribers > 0 {
            log::warn!(
                "Coerced fields across {} rows: {} prices set to 0, {} unparseable dates, {} missing subscriber counts",
                self.rows,
                self.bad_prices,
                self.bad_dates,
                self.bad_subscribers,
            );
        }
    }
}

/// Coerce raw rows into the final table, logging what fell back to defaults.
fn finish(raws: Vec<RawCourse>) -> CourseTable {
    let mut summary = CoercionSummary::default();
    let courses = raws
        .iter()
        .map(|raw| {
            let course = Course::from_raw(raw);
            summary.record(raw, &course);
            course
        })
        .collect();
    summary.log();
    CourseTable::from_courses(courses)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<CourseTable> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    load_csv_from_reader(file)
}

/// Read CSV course data from any byte source.  Empty cells are nulls.
pub fn load_csv_from_reader<R: Read>(source: R) -> Result<CourseTable> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut raws = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let raw = columns.raw_course(|idx| {
            Ok(record
                .get(idx)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string))
        })?;
        raws.push(raw);
    }

    Ok(finish(raws))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "course_title": "Excel Basics", "price": "20", "num_subscribers": 100, ... },
///   ...
/// ]
/// ```
///
/// A column counts as present when any record carries the key.
fn load_json(path: &Path) -> Result<CourseTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    load_json_str(&text)
}

fn load_json_str(text: &str) -> Result<CourseTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let objects = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))
        })
        .collect::<Result<Vec<_>>>()?;

    let keys: BTreeSet<String> = objects
        .iter()
        .flat_map(|obj| obj.keys().cloned())
        .collect();
    let headers: Vec<String> = keys.into_iter().collect();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut raws = Vec::with_capacity(objects.len());
    for obj in objects {
        let raw = columns.raw_course(|idx| {
            let key = &headers[idx];
            let value = obj
                .iter()
                .find(|(k, _)| k.trim() == key.trim())
                .map(|(_, v)| v);
            Ok(value.and_then(json_to_text))
        })?;
        raws.push(raw);
    }

    Ok(finish(raws))
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of course listings.
///
/// Each required field is its own column.  Text columns are read as-is;
/// numeric, boolean and temporal columns go through Arrow's display
/// formatting so the same coercion rules apply as for CSV.
fn load_parquet(path: &Path) -> Result<CourseTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = ColumnIndex::resolve(&headers)?;

    let reader = builder.build().context("building parquet reader")?;
    let mut raws = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let raw = columns
                .raw_course(|idx| cell_text(batch.column(idx), row))
                .with_context(|| format!("Row {row}"))?;
            raws.push(raw);
        }
    }

    Ok(finish(raws))
}

/// Text of a single Arrow cell; nulls and empty strings are `None`.
fn cell_text(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        _ => array_value_to_string(col, row)
            .with_context(|| format!("formatting {:?} cell", col.data_type()))?,
    };
    Ok(if text.is_empty() { None } else { Some(text) })
}
