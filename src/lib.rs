//! # edgar-client - A Rust client for SEC EDGAR filing histories
//!
//! edgar-client retrieves filer registries, company metadata and filing histories
//! from the SEC's EDGAR (Electronic Data Gathering, Analysis, and Retrieval) system
//! and turns them into typed records.
//!
//! ## Features
//!
//! - **Rate-limited HTTP client** - Complies with SEC.gov fair access rules
//! - **Filing histories** - Stitches the paginated submissions documents of a filer
//!   into one ordered list of filings, skipping malformed records instead of failing
//! - **Filters** - Date range, form types and a result cap
//! - **Filer lookups** - Filer profiles, name/CIK search, ticker/exchange search
//!
//! ## Requirements
//!
//! The client is async and requires an async runtime such as [tokio](https://tokio.rs).
//! Documents of one operation are always fetched one after another.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use edgar_client::{Edgar, FilingOperations, FilingOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Initialize with a proper user agent (required by SEC.gov)
//!     let edgar = Edgar::new("YourAppName contact@example.com")?;
//!
//!     // The five most recent 10-K filings of a company
//!     let options = FilingOptions::new()
//!         .with_form_type("10-K")
//!         .with_limit(5);
//!
//!     let filings = edgar.filings("320193", Some(options)).await?;
//!
//!     for filing in filings {
//!         println!("Filing: {} on {}", filing.form, filing.filing_date);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
pub mod parsing;

#[cfg(any(feature = "filings", feature = "company"))]
mod options;

mod traits;

#[cfg(feature = "company")]
mod company;
#[cfg(feature = "filings")]
mod filings;

// Core Edgar functionality (always available)
pub use config::{EdgarConfig, EdgarUrls};
pub use self::core::{Edgar, HttpFetcher};
pub use error::{EdgarError, Result};
pub use traits::Fetcher;

#[cfg(feature = "company")]
pub use options::{CompanySearchOptions, FilerSearchOptions};
#[cfg(feature = "filings")]
pub use options::FilingOptions;

#[cfg(feature = "company")]
pub use company::{
    CompanyMatch, Filer, FilerMatch, parse_cik_lookup, parse_company_tickers_exchange,
};
#[cfg(feature = "filings")]
pub use filings::{
    Filing, FilingFile, FilingHistory, FilingsSection, SkippedFiling, filter_filings,
};
#[cfg(feature = "filings")]
pub use parsing::columns::{FilingColumns, NormalizedFilings, SkipReason, SkippedRecord};

#[cfg(feature = "company")]
pub use traits::CompanyOperations;
#[cfg(feature = "filings")]
pub use traits::FilingOperations;

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
