mod common;

use chrono::NaiveDate;
use common::{BASE_URL, FixtureFetcher, apple_fetcher, offline_edgar, read_fixture};
use edgar_client::{
    EdgarError, FilingColumns, FilingOperations, FilingOptions, FilingsSection, SkipReason,
};
use std::sync::Arc;

const APPLE_ACCESSIONS: [&str; 7] = [
    "0000320193-24-000123",
    "0000320193-24-000120",
    "0000320193-24-000118",
    "0001628280-16-017809",
    "0001193125-16-559625",
    "0001193125-15-118890",
    "0001047469-02-001478",
];

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[derive(serde::Deserialize)]
struct Primary {
    filings: FilingsSection,
}

#[test]
fn parse_primary_filings_section() {
    let content = read_fixture("submissions/CIK0000320193.json");
    let primary: Primary = serde_json::from_str(&content).unwrap();

    assert_eq!(primary.filings.recent.len(), 4);
    let names: Vec<_> = primary.filings.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "CIK0000320193-submissions-001.json",
            "CIK0000320193-submissions-002.json"
        ]
    );
    assert_eq!(primary.filings.files[0].filing_count, Some(3));
}

#[test]
fn normalize_overflow_document() {
    let content = read_fixture("submissions/CIK0000320193-submissions-001.json");
    let columns: FilingColumns = serde_json::from_str(&content).unwrap();
    let normalized = columns.normalize();

    assert!(normalized.skipped.is_empty());
    assert_eq!(normalized.filings.len(), 3);

    let last = &normalized.filings[2];
    assert_eq!(last.form, "SC 13G/A");
    assert_eq!(last.report_date, None);
    assert_eq!(last.primary_document, "");
    assert!(!last.is_xbrl);
}

#[tokio::test]
async fn history_concatenates_documents_in_fetch_order() {
    let fetcher = Arc::new(apple_fetcher());
    let edgar = offline_edgar(fetcher.clone());

    let history = edgar.filing_history("320193").await.unwrap();

    assert_eq!(history.cik, "0000320193");
    let accessions: Vec<_> = history
        .filings
        .iter()
        .map(|f| f.accession_number.as_str())
        .collect();
    assert_eq!(accessions, APPLE_ACCESSIONS);

    assert_eq!(
        fetcher.requests(),
        vec![
            format!("{BASE_URL}/submissions/CIK0000320193.json"),
            format!("{BASE_URL}/submissions/CIK0000320193-submissions-001.json"),
            format!("{BASE_URL}/submissions/CIK0000320193-submissions-002.json"),
        ]
    );
}

#[tokio::test]
async fn history_reports_skipped_records_per_document() {
    let edgar = offline_edgar(Arc::new(apple_fetcher()));

    let history = edgar.filing_history("0000320193").await.unwrap();

    assert_eq!(history.skipped.len(), 2);

    let first = &history.skipped[0];
    assert_eq!(first.url, format!("{BASE_URL}/submissions/CIK0000320193.json"));
    assert_eq!(first.index, 3);
    assert!(matches!(
        first.reason,
        SkipReason::InvalidField { field: "size", .. }
    ));

    let second = &history.skipped[1];
    assert_eq!(
        second.url,
        format!("{BASE_URL}/submissions/CIK0000320193-submissions-002.json")
    );
    assert_eq!(second.index, 1);
    assert!(matches!(
        second.reason,
        SkipReason::InvalidField {
            field: "acceptanceDateTime",
            ..
        }
    ));
}

#[tokio::test]
async fn history_record_fields() {
    let edgar = offline_edgar(Arc::new(apple_fetcher()));

    let history = edgar.filing_history("320193").await.unwrap();

    let ten_k = &history.filings[0];
    assert_eq!(ten_k.form, "10-K");
    assert_eq!(ten_k.filing_date, date("2024-11-01"));
    assert_eq!(ten_k.report_date, Some(date("2024-09-28")));
    assert_eq!(ten_k.items, None);
    assert_eq!(ten_k.size, 9759141);
    assert_eq!(ten_k.acceptance_time.to_rfc3339(), "2024-11-01T06:01:36+00:00");

    let eight_k = &history.filings[1];
    assert_eq!(
        eight_k.items,
        Some(vec!["2.02".to_string(), "9.01".to_string()])
    );

    let form_4 = &history.filings[2];
    assert_eq!(form_4.report_date, None);
    assert_eq!(form_4.act, None);
    assert!(!form_4.is_xbrl);

    let oldest = &history.filings[6];
    assert_eq!(oldest.primary_document, "");
    assert!(!oldest.is_inline_xbrl);
}

#[tokio::test]
async fn recent_filings_fetches_primary_document_only() {
    let fetcher = Arc::new(apple_fetcher());
    let edgar = offline_edgar(fetcher.clone());

    let filings = edgar.recent_filings("320193").await.unwrap();

    assert_eq!(filings.len(), 3);
    assert_eq!(fetcher.requests().len(), 1);
}

#[tokio::test]
async fn filings_without_options_returns_full_history() {
    let edgar = offline_edgar(Arc::new(apple_fetcher()));

    let filings = edgar.filings("320193", None).await.unwrap();

    assert_eq!(filings.len(), APPLE_ACCESSIONS.len());
}

#[tokio::test]
async fn filings_form_filter_with_limit_keeps_first_matches() {
    let edgar = offline_edgar(Arc::new(apple_fetcher()));

    let opts = FilingOptions::new().with_form_type("10-Q").with_limit(2);
    let filings = edgar.filings("320193", Some(opts)).await.unwrap();

    let accessions: Vec<_> = filings.iter().map(|f| f.accession_number.as_str()).collect();
    assert_eq!(
        accessions,
        vec!["0001628280-16-017809", "0001193125-16-559625"]
    );
}

#[tokio::test]
async fn filings_date_range_spans_overflow_documents() {
    let edgar = offline_edgar(Arc::new(apple_fetcher()));

    let opts = FilingOptions::new().with_date_range(date("2002-01-01"), date("2016-04-26"));
    let filings = edgar.filings("320193", Some(opts)).await.unwrap();

    let accessions: Vec<_> = filings.iter().map(|f| f.accession_number.as_str()).collect();
    assert_eq!(
        accessions,
        vec![
            "0001193125-16-559625",
            "0001193125-15-118890",
            "0001047469-02-001478"
        ]
    );
}

#[tokio::test]
async fn history_without_overflow_files() {
    let fetcher = Arc::new(apple_fetcher());
    let edgar = offline_edgar(fetcher.clone());

    let history = edgar.filing_history("1000045").await.unwrap();

    assert_eq!(history.cik, "0001000045");
    assert_eq!(history.filings.len(), 2);
    assert!(history.skipped.is_empty());
    assert_eq!(fetcher.requests().len(), 1);
}

#[tokio::test]
async fn invalid_cik_fails_before_any_fetch() {
    let fetcher = Arc::new(apple_fetcher());
    let edgar = offline_edgar(fetcher.clone());

    let result = edgar.filing_history("AAPL").await;

    assert!(matches!(result, Err(EdgarError::InvalidCik(_))));
    assert!(fetcher.requests().is_empty());
}

#[tokio::test]
async fn missing_primary_document_is_fatal() {
    let edgar = offline_edgar(Arc::new(apple_fetcher()));

    let result = edgar.filings("789019", None).await;

    assert!(matches!(result, Err(EdgarError::NotFound(url)) if url.ends_with("CIK0000789019.json")));
}

#[tokio::test]
async fn missing_overflow_document_is_fatal() {
    let fetcher = Arc::new(
        FixtureFetcher::new()
            .with_fixture(
                "/submissions/CIK0000320193.json",
                "submissions/CIK0000320193.json",
            )
            .with_fixture(
                "/submissions/CIK0000320193-submissions-001.json",
                "submissions/CIK0000320193-submissions-001.json",
            ),
    );
    let edgar = offline_edgar(fetcher.clone());

    let result = edgar.filing_history("320193").await;

    assert!(matches!(
        result,
        Err(EdgarError::NotFound(url)) if url.ends_with("CIK0000320193-submissions-002.json")
    ));
    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn undecodable_document_is_fatal() {
    let fetcher = Arc::new(
        FixtureFetcher::new()
            .with_body("/submissions/CIK0000000042.json", r#"{"filings": {"files": []}}"#),
    );
    let edgar = offline_edgar(fetcher);

    let result = edgar.filing_history("42").await;

    assert!(matches!(result, Err(EdgarError::DocumentDecode { .. })));
}
