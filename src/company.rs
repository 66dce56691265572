//! Filer profiles and registry lookups.
//!
//! This module covers the SEC data used to bootstrap most EDGAR requests:
//! - The filer profile embedded in each submissions document.
//! - The entity name to CIK registry (`cik-lookup-data.txt`), one `NAME:CIK:` per line.
//! - The exchange-listed company table (`company_tickers_exchange.json`).
//!
//! The lookups download the whole registry and filter it in memory; results keep
//! registry order and honor an optional limit.

use super::CompanyOperations;
use super::Edgar;
use super::error::{EdgarError, Result};
use super::options::{CompanySearchOptions, FilerSearchOptions};
use super::parsing::utils::normalize_cik;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// A registrant's profile from its submissions document.
///
/// The SEC often sends empty strings rather than omitting a descriptive field;
/// those are kept as `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Filer {
    pub cik: String,
    #[serde(rename = "entityType")]
    pub entity_type: String,
    #[serde(default)]
    pub sic: Option<String>,
    #[serde(rename = "sicDescription", default)]
    pub sic_description: Option<String>,
    pub name: String,
    pub tickers: Vec<String>,
    pub exchanges: Vec<String>,
    #[serde(default)]
    pub ein: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "fiscalYearEnd", default)]
    pub fiscal_year_end: Option<String>,
    #[serde(rename = "stateOfIncorporation", default)]
    pub state_of_incorporation: Option<String>,
    #[serde(rename = "phone", default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub flags: Option<String>,
}

/// An entity name to CIK mapping from the lookup registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilerMatch {
    pub name: String,
    /// Canonical 10-digit CIK
    pub cik: String,
}

/// An exchange-listed company from the ticker registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyMatch {
    /// Canonical 10-digit CIK
    pub cik: String,
    pub name: String,
    pub ticker: String,
    pub exchange_name: String,
}

#[derive(Debug)]
enum CompanyUrlType {
    Submission,
    CikLookup,
    CompanyTickersExchange,
}

impl Edgar {
    fn build_company_url(&self, url_type: CompanyUrlType, params: &[&str]) -> String {
        match url_type {
            CompanyUrlType::Submission => {
                format!("{}/submissions/CIK{}.json", self.edgar_data_url, params[0])
            }
            CompanyUrlType::CikLookup => {
                format!("{}/cik-lookup-data.txt", self.edgar_archives_url)
            }
            CompanyUrlType::CompanyTickersExchange => {
                format!("{}/company_tickers_exchange.json", self.edgar_files_url)
            }
        }
    }
}

/// Normalizes the CIK filter of a search so it compares against canonical CIKs.
///
/// Entries that are not valid CIKs can never match and are dropped.
fn normalize_cik_filter(ciks: Option<&[String]>) -> Option<Vec<String>> {
    ciks.map(|ciks| {
        ciks.iter()
            .filter_map(|cik| normalize_cik(cik).ok())
            .collect()
    })
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

fn in_filter(value: &str, filter: Option<&[String]>) -> bool {
    filter.is_none_or(|allowed| allowed.iter().any(|a| a == value))
}

/// Filters the lines of `cik-lookup-data.txt`.
///
/// Each line is `NAME:CIK:`. Blank lines, lines with fewer than three `:`-separated
/// pieces, and lines whose CIK is not numeric are skipped.
pub fn parse_cik_lookup(content: &str, opts: &FilerSearchOptions) -> Vec<FilerMatch> {
    let ciks = normalize_cik_filter(opts.ciks.as_deref());
    let limit = opts.limit.filter(|&limit| limit > 0);
    let mut matches = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() < 3 {
            continue;
        }

        let name = fields[0].trim();
        let cik = match normalize_cik(fields[1]) {
            Ok(cik) => cik,
            Err(e) => {
                tracing::debug!("Skipping CIK lookup line {:?}: {}", line, e);
                continue;
            }
        };

        if !in_filter(&cik, ciks.as_deref()) {
            continue;
        }
        if !contains_ignore_case(name, opts.contains.as_deref()) {
            continue;
        }

        matches.push(FilerMatch {
            name: name.to_string(),
            cik,
        });

        if limit.is_some_and(|limit| matches.len() >= limit) {
            break;
        }
    }

    matches
}

/// Filters the rows of `company_tickers_exchange.json`.
///
/// The document is `{ "fields": [...], "data": [[...], ...] }`; columns are located by
/// name. Rows without a usable CIK or name are skipped, and a null ticker or exchange
/// becomes an empty string.
pub fn parse_company_tickers_exchange(
    content: &str,
    opts: &CompanySearchOptions,
) -> Result<Vec<CompanyMatch>> {
    let json: serde_json::Value = serde_json::from_str(content)?;

    let fields = json["fields"]
        .as_array()
        .ok_or_else(|| EdgarError::InvalidResponse("Missing 'fields' array".to_string()))?;

    let data = json["data"]
        .as_array()
        .ok_or_else(|| EdgarError::InvalidResponse("Missing 'data' array".to_string()))?;

    let extractor = FieldExtractor::new(fields, &["cik", "name", "ticker", "exchange"])?;
    let ciks = normalize_cik_filter(opts.ciks.as_deref());
    let limit = opts.limit.filter(|&limit| limit > 0);
    let mut companies = Vec::new();

    for row in data.iter().filter_map(|row| row.as_array()) {
        let Some(company) = extractor.company(row) else {
            continue;
        };

        if !in_filter(&company.cik, ciks.as_deref())
            || !in_filter(&company.ticker, opts.tickers.as_deref())
            || !in_filter(&company.exchange_name, opts.exchanges.as_deref())
            || !contains_ignore_case(&company.name, opts.contains.as_deref())
        {
            continue;
        }

        companies.push(company);

        if limit.is_some_and(|limit| companies.len() >= limit) {
            break;
        }
    }

    Ok(companies)
}

/// Locates named columns in the positional rows of a `fields`/`data` document.
struct FieldExtractor {
    indices: HashMap<String, usize>,
}

impl FieldExtractor {
    /// Maps each required field name to its column index.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::InvalidResponse` if any required field is not listed.
    fn new(fields: &[serde_json::Value], required: &[&str]) -> Result<Self> {
        let mut indices = HashMap::new();

        for field_name in required {
            let idx = fields
                .iter()
                .position(|field| field.as_str() == Some(field_name))
                .ok_or_else(|| {
                    EdgarError::InvalidResponse(format!("Missing '{}' field", field_name))
                })?;
            indices.insert(field_name.to_string(), idx);
        }

        Ok(Self { indices })
    }

    fn extract_value<T, F>(&self, row: &[serde_json::Value], field: &str, converter: F) -> Option<T>
    where
        F: Fn(&serde_json::Value) -> Option<T>,
    {
        let idx = self.indices.get(field).copied()?;
        row.get(idx).and_then(converter)
    }

    fn company(&self, row: &[serde_json::Value]) -> Option<CompanyMatch> {
        let cik = self.extract_value(row, "cik", |v| match v {
            serde_json::Value::Number(n) => n.as_u64().map(|n| n.to_string()),
            serde_json::Value::String(s) => Some(s.clone()),
            _ => None,
        })?;

        Some(CompanyMatch {
            cik: normalize_cik(&cik).ok()?,
            name: self.extract_value(row, "name", |v| v.as_str().map(String::from))?,
            ticker: self
                .extract_value(row, "ticker", text_or_empty)
                .unwrap_or_default(),
            exchange_name: self
                .extract_value(row, "exchange", text_or_empty)
                .unwrap_or_default(),
        })
    }
}

fn text_or_empty(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => Some(String::new()),
        other => Some(other.to_string()),
    }
}

/// Filer profile and registry search operations for the Edgar client.
///
/// # Examples
///
/// ```ignore
/// # use edgar_client::{Edgar, CompanyOperations, CompanySearchOptions};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let edgar = Edgar::new("MyApp contact@example.com")?;
///
/// let apple = edgar.filer("320193").await?;
/// let nasdaq = edgar
///     .search_companies(CompanySearchOptions::new().with_exchange("Nasdaq").with_limit(10))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
impl CompanyOperations for Edgar {
    /// Retrieves a filer's profile.
    ///
    /// # Errors
    ///
    /// * `EdgarError::InvalidCik` - The identifier is not numeric; nothing is fetched.
    /// * `EdgarError::NotFound` - No submissions document exists for the CIK.
    /// * `EdgarError::DocumentDecode` - A required profile field is missing.
    async fn filer(&self, cik: &str) -> Result<Filer> {
        let cik = normalize_cik(cik)?;
        let url = self.build_company_url(CompanyUrlType::Submission, &[&cik]);
        self.get_json(&url).await
    }

    /// Searches the entity name to CIK registry.
    ///
    /// Every filer that ever filed with EDGAR is listed, including individuals and
    /// entities without tickers. The registry is large (tens of megabytes).
    async fn search_filers(&self, opts: FilerSearchOptions) -> Result<Vec<FilerMatch>> {
        let url = self.build_company_url(CompanyUrlType::CikLookup, &[]);
        let content = self.get(&url).await?;
        Ok(parse_cik_lookup(&content, &opts))
    }

    /// Searches the exchange-listed company registry by ticker, CIK, exchange and name.
    async fn search_companies(&self, opts: CompanySearchOptions) -> Result<Vec<CompanyMatch>> {
        let url = self.build_company_url(CompanyUrlType::CompanyTickersExchange, &[]);
        let content = self.get(&url).await?;
        parse_company_tickers_exchange(&content, &opts)
    }
}
