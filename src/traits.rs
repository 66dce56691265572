//! Trait definitions organizing EDGAR operations by feature area.
//!
//! The `Edgar` client implements one trait per feature: filing histories and
//! company/filer lookups. A third trait, [`Fetcher`], is the seam between those
//! operations and the transport: `Edgar` asks a fetcher for the body of a URL and
//! does everything else (URL building, decoding, normalization) itself.
//!
//! Users typically call the operations on `Edgar` directly. Implementing `Fetcher`
//! is useful for offline tests, recorded fixtures, or a transport with different
//! caching or retry policies.

#[cfg(feature = "company")]
use super::company::{CompanyMatch, Filer, FilerMatch};
use super::error::Result;
#[cfg(feature = "filings")]
use super::filings::{Filing, FilingHistory};
#[cfg(feature = "company")]
use super::options::{CompanySearchOptions, FilerSearchOptions};
#[cfg(feature = "filings")]
use super::options::FilingOptions;
use async_trait::async_trait;

/// Performs a GET request and returns the response body.
///
/// Implementations own everything about the transport: request headers (the client
/// identification string), timeouts, and rate limiting. A non-success status or a
/// network failure must be returned as an error; callers never retry.
#[async_trait]
pub trait Fetcher: Send + Sync + std::fmt::Debug {
    /// Fetches `url` and returns the raw body.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Operations for retrieving and filtering a filer's filing history.
///
/// The SEC publishes each filer's history as one primary submissions document,
/// holding the most recent filings, plus zero or more overflow documents for older
/// ones. These operations fetch and stitch those documents together.
#[cfg(feature = "filings")]
#[async_trait]
pub trait FilingOperations {
    /// Filings listed in the primary submissions document only.
    async fn recent_filings(&self, cik: &str) -> Result<Vec<Filing>>;
    /// Every filing across the primary and overflow documents, with skip diagnostics.
    async fn filing_history(&self, cik: &str) -> Result<FilingHistory>;
    /// The full history filtered by date range, form types and limit.
    async fn filings(&self, cik: &str, opts: Option<FilingOptions>) -> Result<Vec<Filing>>;
}

/// Operations for filer profiles and the registry lookups.
///
/// The lookups download the SEC's flat registries (`cik-lookup-data.txt` and
/// `company_tickers_exchange.json`) and filter them in memory.
#[cfg(feature = "company")]
#[async_trait]
pub trait CompanyOperations {
    /// Retrieves a filer's profile from its submissions document.
    async fn filer(&self, cik: &str) -> Result<Filer>;
    /// Searches the entity name to CIK registry.
    async fn search_filers(&self, opts: FilerSearchOptions) -> Result<Vec<FilerMatch>>;
    /// Searches the exchange-listed company registry.
    async fn search_companies(&self, opts: CompanySearchOptions) -> Result<Vec<CompanyMatch>>;
}
