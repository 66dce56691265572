//! Parsers for the payloads served by EDGAR.
//!
//! - [`columns`]: the parallel-array filing blocks of the submissions documents.
//! - [`utils`]: identifier normalization shared by every operation.

#[cfg(feature = "filings")]
pub mod columns;
pub mod utils;
