//! Filing history example
//!
//! This example demonstrates the filing history pipeline:
//! - Resolve a ticker to a CIK through the company registry
//! - Fetch the filer profile
//! - Fetch the full, paginated filing history and filter it
//!
//! Run with: `cargo run --example filing_history`

use chrono::NaiveDate;
use edgar_client::{
    CompanyOperations, CompanySearchOptions, Edgar, FilingOperations, FilingOptions,
};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // SEC.gov requires a user agent in the format: "AppName contact@example.com"
    let edgar = Edgar::new("edgar-client example user@example.com")?;

    println!("=== Filing History Example ===\n");

    let companies = edgar
        .search_companies(CompanySearchOptions::new().with_ticker("AAPL"))
        .await?;
    let company = companies.first().ok_or("ticker not found")?;
    println!("✓ {} ({}) has CIK {}", company.name, company.ticker, company.cik);

    let filer = edgar.filer(&company.cik).await?;
    println!(
        "✓ {} files as '{}' ({})",
        filer.name,
        filer.entity_type,
        filer.sic_description.as_deref().unwrap_or("no SIC")
    );

    let history = edgar.filing_history(&company.cik).await?;
    println!(
        "✓ {} filings in history, {} malformed records skipped\n",
        history.filings.len(),
        history.skipped.len()
    );

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).ok_or("invalid date")?;
    let opts = FilingOptions::new()
        .with_start_date(start)
        .with_form_types(vec!["10-K".to_string(), "10-Q".to_string()])
        .with_limit(8);

    println!("Periodic reports since {}:", start);
    for filing in edgar.filings(&company.cik, Some(opts)).await? {
        println!(
            "- {} {:<5} filed {} accepted {}",
            filing.accession_number, filing.form, filing.filing_date, filing.acceptance_time
        );
    }

    Ok(())
}
