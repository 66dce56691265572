use async_trait::async_trait;
use governor::{
    Quota, RateLimiter, clock::DefaultClock, middleware::NoOpMiddleware, state::InMemoryState,
    state::NotKeyed,
};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::config::{EdgarConfig, EdgarUrls};
use super::error::{EdgarError, Result};
use super::traits::Fetcher;

const MAX_RETRIES: u32 = 5;
const INITIAL_BACKOFF_MS: u64 = 1000; // 1 second

type Governor = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Rate-limited HTTP transport used by [`Edgar`] unless another [`Fetcher`] is supplied.
///
/// Every request waits on a token bucket sized to the configured rate (10 requests per
/// second by default, the SEC fair access limit). Requests beyond the limit are delayed,
/// never rejected:
///
/// ```text
/// Token Bucket (capacity: 10 tokens)
/// ┌──────────────────────────┐
/// │ ████████████████████████ │  ← Tokens refill at 10/sec
/// └──────────────────────────┘
///      ↓ consume on request
/// ```
///
/// HTTP 429 responses and network failures are retried up to five times with exponential
/// backoff and jitter. Any other non-success status fails immediately.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    rate_limiter: Arc<Governor>,
}

impl HttpFetcher {
    /// Builds the HTTP client with the configured user agent, timeout and rate limit.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::ConfigError` if the user agent is not a valid header value,
    /// the rate limit is zero, or the HTTP client cannot be built.
    pub fn new(config: &EdgarConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| EdgarError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| EdgarError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(config.rate_limit).ok_or_else(|| {
                EdgarError::ConfigError("Rate limit must be greater than zero".to_string())
            })?,
        )));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Calculates the wait duration for retry attempts using exponential backoff with jitter.
    ///
    /// Each retry waits twice as long as the previous one: 1s, 2s, 4s, 8s, 16s, with ±20%
    /// random jitter. The formula is `(2^retry × 1000ms) ± 20%`.
    fn calculate_backoff(retry: u32) -> Duration {
        let backoff_ms = INITIAL_BACKOFF_MS * (2_u64.pow(retry));
        // Add some jitter (±20% of the calculated backoff)
        let jitter = (backoff_ms as f64 * 0.2 * (fastrand::f64() - 0.5)) as i64;
        Duration::from_millis((backoff_ms as i64 + jitter) as u64)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches text content from a URL with rate limiting, retries, and content-type validation.
    ///
    /// For URLs ending in `.json`, a `text/html` response is inspected: the SEC sometimes
    /// serves JSON with the wrong content type, so a body that looks like JSON is accepted,
    /// while a real HTML page (usually an error page) yields `UnexpectedContentType`.
    ///
    /// # Errors
    ///
    /// * `EdgarError::UnexpectedContentType` - JSON URL returned HTML content
    /// * `EdgarError::NotFound` - Resource doesn't exist (HTTP 404)
    /// * `EdgarError::RateLimitExceeded` - Max retries exhausted for rate limits
    /// * `EdgarError::RequestError` - Network errors after all retries
    /// * `EdgarError::InvalidResponse` - Unexpected status codes with content preview
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut retries = 0;

        loop {
            self.rate_limiter.until_ready().await;

            let response_result = self.client.get(url).send().await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    let headers = response.headers().clone();

                    if url.ends_with(".json") && status.is_success() {
                        if let Some(ct) = headers
                            .get(reqwest::header::CONTENT_TYPE)
                            .and_then(|val| val.to_str().ok())
                        {
                            if ct.to_lowercase().contains("text/html") {
                                let body_text = response
                                    .text()
                                    .await
                                    .unwrap_or_else(|_| "Failed to read response body".to_string());

                                if body_text.trim_start().starts_with('{')
                                    || body_text.trim_start().starts_with('[')
                                {
                                    tracing::warn!(
                                        "Received text/html content-type for .json URL, but content appears to be JSON: {}",
                                        url
                                    );
                                    return Ok(body_text);
                                }

                                let body_preview = body_text.chars().take(200).collect::<String>();
                                return Err(EdgarError::UnexpectedContentType {
                                    url: url.to_string(),
                                    expected_pattern: "application/json".to_string(),
                                    got_content_type: ct.to_string(),
                                    content_preview: body_preview,
                                });
                            }
                        }
                    }

                    match status {
                        reqwest::StatusCode::OK => {
                            tracing::debug!("Fetched {}", url);
                            return response.text().await.map_err(EdgarError::RequestError);
                        }
                        reqwest::StatusCode::NOT_FOUND => {
                            return Err(EdgarError::NotFound(url.to_string()));
                        }
                        reqwest::StatusCode::TOO_MANY_REQUESTS => {
                            if retries >= MAX_RETRIES {
                                return Err(EdgarError::RateLimitExceeded);
                            }

                            let retry_after_duration = headers
                                .get("retry-after")
                                .and_then(|h| h.to_str().ok())
                                .and_then(|s| s.parse::<u64>().ok())
                                .map(Duration::from_secs)
                                .unwrap_or_else(|| Self::calculate_backoff(retries));

                            tracing::warn!(
                                "Rate limit hit (429) for {}. Attempt {}/{}. Waiting for {:?} before retry.",
                                url,
                                retries + 1,
                                MAX_RETRIES + 1,
                                retry_after_duration
                            );
                            sleep(retry_after_duration).await;
                            retries += 1;
                            continue;
                        }
                        other_status => {
                            let error_body = response
                                .text()
                                .await
                                .unwrap_or_else(|_| "Failed to read error body".to_string());

                            return Err(EdgarError::InvalidResponse(format!(
                                "Unexpected status code: {} for URL: {}. Response preview: {}",
                                other_status,
                                url,
                                error_body.chars().take(200).collect::<String>()
                            )));
                        }
                    }
                }
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        return Err(EdgarError::RequestError(e));
                    }
                    let backoff_duration = Self::calculate_backoff(retries);
                    tracing::warn!(
                        "Request failed for {}: {:?}. Attempt {}/{}. Retrying in {:?}.",
                        url,
                        e,
                        retries + 1,
                        MAX_RETRIES + 1,
                        backoff_duration
                    );
                    sleep(backoff_duration).await;
                    retries += 1;
                    continue;
                }
            }
        }
    }
}

/// Client for the SEC EDGAR filer registries, submissions and filing histories.
///
/// `Edgar` is the entry point for every operation in this crate. It owns the base URLs of
/// the EDGAR services and a [`Fetcher`] that performs the actual GET requests. The default
/// fetcher is [`HttpFetcher`], which enforces the SEC's fair access policy (10 requests per
/// second, identifying user agent) and retries transient failures.
///
/// All fetches issued by one operation happen one after another on the calling task, so
/// results and diagnostics come back in a deterministic order.
///
/// # Examples
///
/// Basic client initialization:
///
/// ```rust
/// # use edgar_client::Edgar;
/// let edgar = Edgar::new("my_app/1.0 (my@email.com)")?;
/// # Ok::<(), edgar_client::EdgarError>(())
/// ```
///
/// With a custom transport, e.g. for offline tests:
///
/// ```ignore
/// use edgar_client::{Edgar, EdgarUrls};
/// use std::sync::Arc;
///
/// let edgar = Edgar::with_fetcher(EdgarUrls::default(), Arc::new(MyFetcher::default()));
/// ```
#[derive(Debug, Clone)]
pub struct Edgar {
    /// Transport used for every request
    pub(crate) fetcher: Arc<dyn Fetcher>,

    /// Base URL for EDGAR archives
    pub(crate) edgar_archives_url: String,

    /// Base URL for EDGAR data API
    pub(crate) edgar_data_url: String,

    /// Base URL for EDGAR files
    pub(crate) edgar_files_url: String,
}

impl Edgar {
    /// Creates a new Edgar client with sensible defaults for most use cases.
    ///
    /// The client is limited to 10 requests per second, uses a 30-second timeout and the
    /// standard SEC.gov base URLs. The user agent is sent with every request; the SEC asks
    /// for the format "AppName contact@email.com".
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::ConfigError` if the user agent is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(user_agent: &str) -> Result<Self> {
        let config = EdgarConfig {
            user_agent: user_agent.to_string(),
            ..EdgarConfig::default()
        };
        Self::with_config(config)
    }

    /// Creates an Edgar client with custom configuration settings.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::ConfigError` if the user agent is malformed, the rate limit
    /// is zero, or the HTTP client cannot be built with the provided configuration.
    pub fn with_config(config: EdgarConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config.base_urls, Arc::new(fetcher)))
    }

    /// Creates an Edgar client on top of an arbitrary transport.
    ///
    /// The fetcher takes over every concern of the HTTP layer (headers, timeouts, rate
    /// limiting); `Edgar` only builds URLs and decodes what comes back.
    pub fn with_fetcher(base_urls: EdgarUrls, fetcher: Arc<dyn Fetcher>) -> Self {
        Edgar {
            fetcher,
            edgar_archives_url: base_urls.archives,
            edgar_data_url: base_urls.data,
            edgar_files_url: base_urls.files,
        }
    }

    /// Fetches a URL through the configured transport and returns the body as text.
    pub async fn get(&self, url: &str) -> Result<String> {
        self.fetcher.fetch(url).await
    }

    /// Fetches a URL and decodes the body as JSON.
    ///
    /// Decode failures are reported as `EdgarError::DocumentDecode` with the offending URL.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get(url).await?;
        serde_json::from_str(&body).map_err(|source| EdgarError::DocumentDecode {
            url: url.to_string(),
            source,
        })
    }

    /// Returns the base URL for EDGAR archives.
    pub fn archives_url(&self) -> &str {
        &self.edgar_archives_url
    }

    /// Returns the base URL for EDGAR data.
    pub fn data_url(&self) -> &str {
        &self.edgar_data_url
    }

    /// Returns the base URL for EDGAR files.
    pub fn files_url(&self) -> &str {
        &self.edgar_files_url
    }
}
