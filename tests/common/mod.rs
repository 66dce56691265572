use async_trait::async_trait;
use edgar_client::{Edgar, EdgarError, EdgarUrls, Fetcher};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

pub const BASE_URL: &str = "https://edgar.test";

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

/// Serves fixture files for known URLs and records every request in order.
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    responses: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `tests/fixtures/{relative}` for `{BASE_URL}{path}`.
    pub fn with_fixture(mut self, path: &str, relative: &str) -> Self {
        self.responses
            .insert(format!("{BASE_URL}{path}"), read_fixture(relative));
        self
    }

    pub fn with_body(mut self, path: &str, body: &str) -> Self {
        self.responses
            .insert(format!("{BASE_URL}{path}"), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> edgar_client::Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| EdgarError::NotFound(url.to_string()))
    }
}

/// Fixture server for Apple's paginated history and the two registries.
#[allow(dead_code)]
pub fn apple_fetcher() -> FixtureFetcher {
    FixtureFetcher::new()
        .with_fixture(
            "/submissions/CIK0000320193.json",
            "submissions/CIK0000320193.json",
        )
        .with_fixture(
            "/submissions/CIK0000320193-submissions-001.json",
            "submissions/CIK0000320193-submissions-001.json",
        )
        .with_fixture(
            "/submissions/CIK0000320193-submissions-002.json",
            "submissions/CIK0000320193-submissions-002.json",
        )
        .with_fixture(
            "/submissions/CIK0001000045.json",
            "submissions/CIK0001000045.json",
        )
        .with_fixture(
            "/Archives/edgar/cik-lookup-data.txt",
            "registry/cik-lookup-data.txt",
        )
        .with_fixture(
            "/files/company_tickers_exchange.json",
            "registry/company_tickers_exchange.json",
        )
}

#[allow(dead_code)]
pub fn offline_edgar(fetcher: Arc<FixtureFetcher>) -> Edgar {
    Edgar::with_fetcher(EdgarUrls::with_base(BASE_URL), fetcher)
}

#[allow(dead_code)]
pub fn edgar() -> Edgar {
    Edgar::new("test_agent example@example.com").unwrap()
}
