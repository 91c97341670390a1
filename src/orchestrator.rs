//! Page-by-page scraping run.
//!
//! Listing pages are fetched strictly one after another. The detail pages of
//! one listing page are fetched and parsed concurrently on the calling task,
//! and the page's results are appended only after every one of them has
//! settled. Output order is page order, then link order within the page,
//! whatever order the fetches complete in.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};
use url::Url;

use crate::detail::{DetailMarkers, parse_detail};
use crate::error::{CandidateError, ScrapeError};
use crate::fetch::PageSource;
use crate::listing::{build_page_url, normalize_pager, parse_links, parse_listing};
use crate::model::Candidate;

#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Base used to resolve relative resume links.
    pub base_url: Url,
    /// Detail fetches in flight per listing page; 0 means all links at once.
    pub max_concurrency: usize,
    pub markers: DetailMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transport error or non-2xx status.
    Fetch,
    /// The page was fetched but is not a profile.
    Parse,
}

impl From<&CandidateError> for FailureKind {
    fn from(err: &CandidateError) -> Self {
        match err {
            CandidateError::Fetch(_) => FailureKind::Fetch,
            CandidateError::Detail(_) => FailureKind::Parse,
        }
    }
}

/// A candidate that was left out of the result, and why.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateFailure {
    pub page: usize,
    pub url: String,
    pub kind: FailureKind,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    /// Page order, then link order.
    pub candidates: Vec<Candidate>,
    pub pages: usize,
    pub failures: Vec<CandidateFailure>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrapeEvent {
    Started {
        total_pages: usize,
    },
    Page {
        page: usize,
        links: usize,
        parsed: usize,
        failed: usize,
    },
}

pub struct Scraper {
    source: Arc<dyn PageSource>,
    settings: ScrapeSettings,
}

impl Scraper {
    pub fn new(source: Arc<dyn PageSource>, settings: ScrapeSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &ScrapeSettings {
        &self.settings
    }

    /// All candidates reachable from `listing_url`, failed ones excluded.
    pub async fn scrape_all(&self, listing_url: &str) -> Result<Vec<Candidate>, ScrapeError> {
        Ok(self.scrape(listing_url).await?.candidates)
    }

    pub async fn scrape(&self, listing_url: &str) -> Result<ScrapeReport, ScrapeError> {
        self.scrape_with_progress(listing_url, None).await
    }

    /// Like [`Scraper::scrape`], reporting each settled page on `progress`.
    /// A closed progress channel does not stop the run.
    pub async fn scrape_with_progress(
        &self,
        listing_url: &str,
        progress: Option<&mpsc::Sender<ScrapeEvent>>,
    ) -> Result<ScrapeReport, ScrapeError> {
        let first_url = Url::parse(listing_url).map_err(|source| ScrapeError::InvalidUrl {
            url: listing_url.to_string(),
            source,
        })?;
        let pager = normalize_pager(&first_url);

        info!(url = %first_url, "start parsing candidates");
        let body = self.fetch_listing(&first_url, 1).await?;
        let first = parse_listing(&body, &self.settings.base_url)
            .map_err(|source| ScrapeError::ListingParse { page: 1, source })?;
        let total_pages = first.total_pages;
        notify(progress, ScrapeEvent::Started { total_pages }).await;

        let mut report = ScrapeReport {
            pages: total_pages,
            ..ScrapeReport::default()
        };
        self.collect_page(1, first.links, &mut report, progress).await;

        for page in 2..=total_pages {
            info!(page, total_pages, "start parsing page");
            let body = self.fetch_listing(&build_page_url(&pager, page), page).await?;
            let links = parse_links(&body, &self.settings.base_url);
            self.collect_page(page, links, &mut report, progress).await;
        }

        info!(
            pages = report.pages,
            candidates = report.candidates.len(),
            failed = report.failures.len(),
            "finished parsing candidates"
        );
        Ok(report)
    }

    async fn fetch_listing(&self, url: &Url, page: usize) -> Result<String, ScrapeError> {
        self.source
            .fetch(url)
            .await
            .map_err(|source| ScrapeError::ListingFetch { page, source })
    }

    async fn collect_page(
        &self,
        page: usize,
        links: Vec<Url>,
        report: &mut ScrapeReport,
        progress: Option<&mpsc::Sender<ScrapeEvent>>,
    ) {
        let link_count = links.len();
        let limit = match self.settings.max_concurrency {
            0 => link_count.max(1),
            n => n,
        };

        // `buffered` yields in input order regardless of completion order.
        let results: Vec<(Url, Result<Candidate, CandidateError>)> = stream::iter(links)
            .map(|url| async move {
                let outcome = self.fetch_candidate(&url).await;
                (url, outcome)
            })
            .buffered(limit)
            .collect()
            .await;

        let mut parsed = 0;
        let mut failed = 0;
        for (url, outcome) in results {
            match outcome {
                Ok(candidate) => {
                    parsed += 1;
                    report.candidates.push(candidate);
                }
                Err(err) => {
                    failed += 1;
                    let kind = FailureKind::from(&err);
                    warn!(page, %url, ?kind, error = %err, "skipping candidate");
                    report.failures.push(CandidateFailure {
                        page,
                        url: url.to_string(),
                        kind,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(page, links = link_count, parsed, failed, "page settled");
        notify(
            progress,
            ScrapeEvent::Page {
                page,
                links: link_count,
                parsed,
                failed,
            },
        )
        .await;
    }

    async fn fetch_candidate(&self, url: &Url) -> Result<Candidate, CandidateError> {
        let body = self.source.fetch(url).await?;
        Ok(parse_detail(&body, url, &self.settings.markers)?)
    }
}

async fn notify(progress: Option<&mpsc::Sender<ScrapeEvent>>, event: ScrapeEvent) {
    if let Some(tx) = progress {
        let _ = tx.send(event).await;
    }
}
