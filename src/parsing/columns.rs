//! Normalizer for the parallel-array filing blocks of the submissions API.
//!
//! EDGAR does not send one object per filing. A block looks like this, where
//! index `i` of every array describes filing `i`:
//!
//! ```json
//! {
//!   "accessionNumber": ["0000320193-24-000123", "0000320193-24-000120"],
//!   "form": ["8-K", "10-Q"],
//!   "filingDate": ["2024-11-01", "2024-08-02"],
//!   "acceptanceDateTime": ["2024-11-01T16:30:00.000Z", "2024-08-02T16:05:10.000Z"],
//!   "size": [31457, 5321854],
//!   "items": ["2.02,9.01", ""]
//! }
//! ```
//!
//! [`FilingColumns`] keeps each array as an optional column of raw JSON values
//! and converts one index at a time, so a malformed entry costs only its own
//! record. The outcome of a block is a [`NormalizedFilings`]: the records that
//! were built, and a [`SkippedRecord`] for every index that was not.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::filings::Filing;

const DATE_FORMAT: &str = "%Y-%m-%d";
const ACCEPTANCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Suffix EDGAR puts on every acceptance timestamp, and its numeric-offset equivalent.
const MILLIS_UTC_SUFFIX: &str = ".000Z";
const UTC_OFFSET: &str = "+0000";

/// One parallel-array block, as found under `filings.recent` of a submissions
/// document or at the top level of an overflow document.
///
/// The number of records is the length of `accessionNumber`; a block without that
/// array cannot be decoded at all. Every other column may be missing or shorter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingColumns {
    pub accession_number: Vec<Value>,
    pub form: Option<Vec<Value>>,
    pub filing_date: Option<Vec<Value>>,
    pub acceptance_date_time: Option<Vec<Value>>,
    pub size: Option<Vec<Value>>,
    pub report_date: Option<Vec<Value>>,
    pub act: Option<Vec<Value>>,
    pub items: Option<Vec<Value>>,
    #[serde(rename = "isXBRL")]
    pub is_xbrl: Option<Vec<Value>>,
    #[serde(rename = "isInlineXBRL")]
    pub is_inline_xbrl: Option<Vec<Value>>,
    pub primary_document: Option<Vec<Value>>,
    pub primary_doc_description: Option<Vec<Value>>,
}

/// Why a record was left out of a normalized block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl SkipReason {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SkipReason::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// A record index of a block that could not be turned into a [`Filing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: SkipReason,
}

/// Result of normalizing one block.
#[derive(Debug, Clone, Default)]
pub struct NormalizedFilings {
    /// Filings in the order of the source arrays
    pub filings: Vec<Filing>,
    /// Indices that were skipped, in ascending order
    pub skipped: Vec<SkippedRecord>,
}

impl FilingColumns {
    /// Number of records in the block.
    pub fn len(&self) -> usize {
        self.accession_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accession_number.is_empty()
    }

    /// Converts every index of the block, keeping source order.
    ///
    /// A record whose required fields are missing or malformed is reported in
    /// `skipped` and the remaining indices are still processed.
    pub fn normalize(&self) -> NormalizedFilings {
        let mut out = NormalizedFilings {
            filings: Vec::with_capacity(self.len()),
            skipped: Vec::new(),
        };

        for index in 0..self.len() {
            match self.filing_at(index) {
                Ok(filing) => out.filings.push(filing),
                Err(reason) => out.skipped.push(SkippedRecord { index, reason }),
            }
        }

        out
    }

    /// Builds the filing at `idx`.
    pub fn filing_at(&self, idx: usize) -> Result<Filing, SkipReason> {
        let accession_number = required_str(
            self.accession_number.get(idx),
            "accessionNumber",
        )?
        .to_string();
        let form = required_str(cell(&self.form, idx), "form")?.to_string();

        let filing_date = required_str(cell(&self.filing_date, idx), "filingDate")?;
        let filing_date = parse_date(filing_date).map_err(|e| {
            SkipReason::invalid("filingDate", format!("'{}': {}", filing_date, e))
        })?;

        let acceptance = required_str(
            cell(&self.acceptance_date_time, idx),
            "acceptanceDateTime",
        )?;
        let acceptance_time = parse_acceptance_time(acceptance).map_err(|e| {
            SkipReason::invalid("acceptanceDateTime", format!("'{}': {}", acceptance, e))
        })?;

        let size = required_size(cell(&self.size, idx))?;

        let report_date = match conditional_str(cell(&self.report_date, idx), "reportDate")? {
            Some(raw) => Some(parse_date(raw).map_err(|e| {
                SkipReason::invalid("reportDate", format!("'{}': {}", raw, e))
            })?),
            None => None,
        };
        let act = conditional_str(cell(&self.act, idx), "act")?.map(str::to_string);
        let items = conditional_str(cell(&self.items, idx), "items")?.map(split_items);

        Ok(Filing {
            accession_number,
            form,
            filing_date,
            report_date,
            acceptance_time,
            act,
            size,
            items,
            is_xbrl: cell(&self.is_xbrl, idx).is_some_and(is_truthy),
            is_inline_xbrl: cell(&self.is_inline_xbrl, idx).is_some_and(is_truthy),
            primary_document: optional_string(
                cell(&self.primary_document, idx),
                "primaryDocument",
            )?,
            primary_document_description: optional_string(
                cell(&self.primary_doc_description, idx),
                "primaryDocDescription",
            )?,
        })
    }
}

/// Bounds-checked access into an optional column.
fn cell(column: &Option<Vec<Value>>, idx: usize) -> Option<&Value> {
    column.as_deref().and_then(|values| values.get(idx))
}

fn required_str<'a>(value: Option<&'a Value>, field: &'static str) -> Result<&'a str, SkipReason> {
    match value {
        None => Err(SkipReason::MissingField { field }),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(SkipReason::invalid(
            field,
            format!("expected a string, got {}", other),
        )),
    }
}

fn required_size(value: Option<&Value>) -> Result<u64, SkipReason> {
    let value = value.ok_or(SkipReason::MissingField { field: "size" })?;
    let size = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    size.ok_or_else(|| {
        SkipReason::invalid("size", format!("expected a non-negative integer, got {}", value))
    })
}

/// A conditionally present string: absent, out of range, or falsy means `None`.
fn conditional_str<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<Option<&'a str>, SkipReason> {
    match value {
        Some(v) if !is_truthy(v) => Ok(None),
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(SkipReason::invalid(
            field,
            format!("expected a string, got {}", other),
        )),
    }
}

/// A string column with an empty-string default for absent, out-of-range or null cells.
fn optional_string(value: Option<&Value>, field: &'static str) -> Result<String, SkipReason> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SkipReason::invalid(
            field,
            format!("expected a string, got {}", other),
        )),
    }
}

/// Truthiness of a JSON cell: `null`, `false`, zero, and empty strings or containers are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
}

/// Parses an EDGAR acceptance timestamp such as `2024-03-15T16:30:00.000Z`.
///
/// The `.000Z` suffix is rewritten to `+0000` first; EDGAR always emits whole-second
/// UTC timestamps in that shape.
pub fn parse_acceptance_time(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let rewritten = raw.replace(MILLIS_UTC_SUFFIX, UTC_OFFSET);
    DateTime::parse_from_str(&rewritten, ACCEPTANCE_FORMAT)
}

/// Splits a comma-separated item list, trimming pieces and dropping blank ones.
pub fn split_items(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
