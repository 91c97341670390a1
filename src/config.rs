use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::detail::DetailMarkers;
use crate::fetch::FetchSettings;
use crate::orchestrator::ScrapeSettings;

pub const DEFAULT_BASE_URL: &str = "https://www.work.ua/";

/// Service configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub bind: String,
    pub timeout: Duration,
    pub max_redirects: usize,
    pub max_concurrency: usize,
    pub export_path: PathBuf,
    pub log_file: PathBuf,
    /// Level for this crate when `RUST_LOG` is unset.
    pub log_level: String,
    pub markers: DetailMarkers,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys take defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = DetailMarkers::default();
        let base_url = get("SCOUT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Config {
            base_url: Url::parse(&base_url)
                .with_context(|| format!("SCOUT_BASE_URL {base_url:?} is not a valid url"))?,
            bind: get("SCOUT_BIND").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            timeout: Duration::from_secs(parse_or(&get, "SCOUT_TIMEOUT_SECS", 25)?),
            max_redirects: parse_or(&get, "SCOUT_MAX_REDIRECTS", 8)?,
            max_concurrency: parse_or(&get, "SCOUT_MAX_CONCURRENCY", 0)?,
            export_path: get("SCOUT_EXPORT_PATH")
                .unwrap_or_else(|| "candidates.csv".to_string())
                .into(),
            log_file: get("SCOUT_LOG_FILE")
                .unwrap_or_else(|| "parser.log".to_string())
                .into(),
            log_level: get("SCOUT_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            markers: DetailMarkers {
                education: get("SCOUT_EDUCATION_MARKER").unwrap_or(defaults.education),
                additional_education: get("SCOUT_ADDITIONAL_EDUCATION_MARKER")
                    .unwrap_or(defaults.additional_education),
                english: get("SCOUT_ENGLISH_MARKER").unwrap_or(defaults.english),
            },
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: self.timeout,
            max_redirects: self.max_redirects,
        }
    }

    pub fn scrape_settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            base_url: self.base_url.clone(),
            max_concurrency: self.max_concurrency,
            markers: self.markers.clone(),
        }
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}
