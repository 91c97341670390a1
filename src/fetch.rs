//! Page fetching over one shared connection pool.

use std::time::Duration;

use async_trait::async_trait;
use rand::{Rng, rng};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, HeaderMap, HeaderName, HeaderValue,
    PRAGMA, UPGRADE_INSECURE_REQUESTS,
};
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Anything that can turn a URL into a page body.
///
/// Implementations must be shareable across the concurrent detail fetches of
/// one listing page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(25),
            max_redirects: 8,
        }
    }
}

/// reqwest-backed fetcher. Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(random_desktop_ua())
            .default_headers(base_headers())
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .timeout(settings.timeout)
            // The job board serves a certificate chain we are not required to
            // trust. Verification is off intentionally for this client only.
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let rsp = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = rsp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = rsp.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!(%url, %status, len = text.len(), "fetched page");
        Ok(text)
    }
}

fn base_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    h.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("uk-UA,uk;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    h.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    h.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    h.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    h.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    h.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    h.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    h
}

fn random_desktop_ua() -> String {
    const UAS: &[&str] = &[
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    ];
    let i = rng().random_range(0..UAS.len());
    UAS[i].to_string()
}
