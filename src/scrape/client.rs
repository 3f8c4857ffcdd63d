//! Blocking HTTP client with a configurable delay between requests and
//! retries for transient failures.

use std::time::{Duration, Instant};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; bookscrape/0.1; +https://github.com/bookscrape)";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// The target is a scraping-practice site; no delay by default.
const DEFAULT_DELAY_SECS: u64 = 0;
const MAX_REDIRECTS: usize = 10;

const DEFAULT_RETRY_COUNT: u32 = 3;
const DEFAULT_BACKOFF_SECS: [u64; 2] = [1, 2];

/// Blocking HTTP client that waits out the configured delay between requests.
#[derive(Debug)]
pub struct CatalogClient {
    inner: reqwest::blocking::Client,
    delay: Duration,
    last_request: Option<Instant>,
    retry_count: u32,
    backoff_secs: Vec<u64>,
}

impl CatalogClient {
    /// Build a client with the default User-Agent, timeout, and delay.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::default()
    }

    /// Perform a GET request, retrying transient failures.
    ///
    /// Retries on timeout, connection error, HTTP 5xx, and HTTP 429, sleeping
    /// the configured backoff between attempts. Other errors and statuses are
    /// returned immediately; status checking beyond retryability is left to
    /// the caller.
    pub fn get_with_retry(
        &mut self,
        url: &str,
    ) -> Result<reqwest::blocking::Response, reqwest::Error> {
        let mut attempt = 0u32;
        loop {
            self.wait_delay();
            attempt += 1;
            match self.inner.get(url).send() {
                Ok(response) => {
                    let status = response.status();
                    let retryable = status.is_server_error() || status.as_u16() == 429;
                    if retryable && attempt < self.retry_count {
                        self.sleep_backoff(attempt);
                        continue;
                    }
                    self.last_request = Some(Instant::now());
                    return Ok(response);
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < self.retry_count {
                        self.sleep_backoff(attempt);
                        continue;
                    }
                    return Err(e);
                }
            }
        }
    }

    fn sleep_backoff(&self, attempt: u32) {
        let secs = self
            .backoff_secs
            .get(attempt as usize - 1)
            .or_else(|| self.backoff_secs.last())
            .copied()
            .unwrap_or(1);
        std::thread::sleep(Duration::from_secs(secs));
    }

    fn wait_delay(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                std::thread::sleep(self.delay - elapsed);
            }
        }
    }
}

/// Builder for [CatalogClient]: User-Agent, delay, timeout, and retry settings.
#[derive(Debug)]
pub struct CatalogClientBuilder {
    user_agent: Option<String>,
    delay_secs: u64,
    timeout_secs: u64,
    retry_count: u32,
    retry_backoff_secs: Vec<u64>,
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            delay_secs: DEFAULT_DELAY_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_backoff_secs: DEFAULT_BACKOFF_SECS.to_vec(),
        }
    }
}

impl CatalogClientBuilder {
    /// Set a custom User-Agent. If not set, a browser-like default is used.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set delay between requests in seconds. Default 0.
    pub fn delay_secs(mut self, secs: u64) -> Self {
        self.delay_secs = secs;
        self
    }

    /// Set request timeout in seconds. Default 30.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set number of HTTP attempts for transient failures (default 3).
    pub fn retry_count(mut self, n: u32) -> Self {
        self.retry_count = n.max(1);
        self
    }

    /// Set backoff delays in seconds before each retry. If shorter than the
    /// attempt count, the last value is reused.
    pub fn retry_backoff_secs(mut self, secs: Vec<u64>) -> Self {
        self.retry_backoff_secs = secs;
        self
    }

    pub fn build(self) -> Result<CatalogClient, reqwest::Error> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let inner = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(CatalogClient {
            inner,
            delay: Duration::from_secs(self.delay_secs),
            last_request: None,
            retry_count: self.retry_count,
            backoff_secs: self.retry_backoff_secs,
        })
    }
}
