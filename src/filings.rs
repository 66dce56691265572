//! Filing histories from the submissions API.
//!
//! A filer's history is split across documents: the primary submissions document
//! (`CIK##########.json`) carries the most recent filings under `filings.recent`
//! and lists older overflow documents under `filings.files`. Each overflow
//! document is a bare parallel-array block. `filing_history` fetches them one by
//! one and concatenates the normalized records in fetch order.

use super::Edgar;
use super::error::Result;
use super::options::FilingOptions;
use super::parsing::columns::{FilingColumns, SkipReason};
use super::parsing::utils::normalize_cik;
use super::traits::FilingOperations;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;

/// One filed document submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filing {
    /// Unique identifier, `NNNNNNNNNN-NN-NNNNNN`
    pub accession_number: String,
    /// Form type, e.g. "10-K" or "8-K"
    pub form: String,
    pub filing_date: NaiveDate,
    /// Period covered by the filing, when reported
    pub report_date: Option<NaiveDate>,
    pub acceptance_time: DateTime<FixedOffset>,
    /// Governing statute, e.g. "34" or "33"
    pub act: Option<String>,
    /// Document size in bytes
    pub size: u64,
    /// Disclosure item codes, e.g. `["2.02", "9.01"]`
    pub items: Option<Vec<String>>,
    pub is_xbrl: bool,
    pub is_inline_xbrl: bool,
    pub primary_document: String,
    pub primary_document_description: String,
}

/// The `filings` section of a primary submissions document.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingsSection {
    pub recent: FilingColumns,
    #[serde(default)]
    pub files: Vec<FilingFile>,
}

/// Reference to an overflow document holding older filings.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingFile {
    /// File name relative to the submissions directory
    pub name: String,
    #[serde(rename = "filingCount", default)]
    pub filing_count: Option<u64>,
    #[serde(rename = "filingFrom", default)]
    pub filing_from: Option<String>,
    #[serde(rename = "filingTo", default)]
    pub filing_to: Option<String>,
}

/// Only the part of the submissions document the filing pipeline reads.
#[derive(Debug, Deserialize)]
struct SubmissionFilings {
    filings: FilingsSection,
}

/// A record that was dropped while normalizing one of the history's documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFiling {
    /// Document the record came from
    pub url: String,
    /// Position of the record inside that document's arrays
    pub index: usize,
    pub reason: SkipReason,
}

/// Every filing of a filer, in fetch order, plus the records that were dropped.
#[derive(Debug, Clone, Default)]
pub struct FilingHistory {
    /// Canonical 10-digit CIK
    pub cik: String,
    /// Primary-document filings in source order, then each overflow document's
    pub filings: Vec<Filing>,
    pub skipped: Vec<SkippedFiling>,
}

impl FilingHistory {
    /// Normalizes one document's block and appends its records.
    fn extend_from(&mut self, url: &str, columns: &FilingColumns) {
        let normalized = columns.normalize();

        for skipped in normalized.skipped {
            tracing::warn!(
                url,
                index = skipped.index,
                reason = %skipped.reason,
                "Skipping malformed filing record"
            );
            self.skipped.push(SkippedFiling {
                url: url.to_string(),
                index: skipped.index,
                reason: skipped.reason,
            });
        }

        tracing::debug!(url, count = normalized.filings.len(), "Normalized filings");
        self.filings.extend(normalized.filings);
    }
}

/// Keeps the filings that pass the options' criteria, in their existing order.
///
/// Iteration stops as soon as `limit` filings have matched, so the result holds the
/// first matches in sequence order, not the best ones by date.
pub fn filter_filings(
    filings: impl IntoIterator<Item = Filing>,
    opts: &FilingOptions,
) -> Vec<Filing> {
    let matching = filings
        .into_iter()
        .filter(|filing| opts.matches(filing.filing_date, &filing.form));

    match opts.effective_limit() {
        Some(limit) => matching.take(limit).collect(),
        None => matching.collect(),
    }
}

impl Edgar {
    /// URL of the primary submissions document for a normalized CIK.
    fn submission_url(&self, cik: &str) -> String {
        format!("{}/submissions/CIK{}.json", self.edgar_data_url, cik)
    }

    /// URL of an overflow document listed in `filings.files`.
    fn submission_file_url(&self, name: &str) -> String {
        format!("{}/submissions/{}", self.edgar_data_url, name)
    }
}

/// Filing history operations for the Edgar client.
///
/// # Examples
///
/// ```ignore
/// # use edgar_client::{Edgar, FilingOperations, FilingOptions};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let edgar = Edgar::new("MyApp contact@example.com")?;
///
/// // Two most recent 10-K filings
/// let opts = FilingOptions::new().with_form_type("10-K").with_limit(2);
/// let filings = edgar.filings("320193", Some(opts)).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - `EdgarError::InvalidCik`: the identifier is not numeric; nothing is fetched
/// - `EdgarError::NotFound` and other transport errors from any document fetch
/// - `EdgarError::DocumentDecode`: a document is not a valid submissions payload
///
/// Malformed individual records never fail an operation; they are skipped.
#[async_trait]
impl FilingOperations for Edgar {
    /// Retrieves the filings listed in the primary submissions document.
    ///
    /// Overflow documents are not fetched, so this costs one request.
    async fn recent_filings(&self, cik: &str) -> Result<Vec<Filing>> {
        let cik = normalize_cik(cik)?;
        let url = self.submission_url(&cik);
        let submission: SubmissionFilings = self.get_json(&url).await?;

        let mut history = FilingHistory {
            cik,
            ..FilingHistory::default()
        };
        history.extend_from(&url, &submission.filings.recent);
        Ok(history.filings)
    }

    /// Retrieves every filing of a filer across the primary and overflow documents.
    ///
    /// Documents are fetched strictly in sequence: the primary document first, then each
    /// overflow file in the order it is listed. The result keeps that order and never
    /// re-sorts across documents. Any failed fetch aborts the whole operation.
    async fn filing_history(&self, cik: &str) -> Result<FilingHistory> {
        let cik = normalize_cik(cik)?;
        let url = self.submission_url(&cik);
        let submission: SubmissionFilings = self.get_json(&url).await?;

        let mut history = FilingHistory {
            cik,
            ..FilingHistory::default()
        };
        history.extend_from(&url, &submission.filings.recent);

        for file in &submission.filings.files {
            let file_url = self.submission_file_url(&file.name);
            let columns: FilingColumns = self.get_json(&file_url).await?;
            history.extend_from(&file_url, &columns);
        }

        Ok(history)
    }

    /// Retrieves the full history and applies date, form and limit filters.
    ///
    /// Without options the full history is returned unchanged.
    async fn filings(&self, cik: &str, opts: Option<FilingOptions>) -> Result<Vec<Filing>> {
        let history = self.filing_history(cik).await?;

        Ok(match opts {
            Some(opts) => filter_filings(history.filings, &opts),
            None => history.filings,
        })
    }
}
