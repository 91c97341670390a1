//! Candidate scraping and ranking for a paginated job-board search.
//!
//! A filtered listing URL goes in; every candidate profile reachable from
//! its pages comes out as a [`Candidate`], ranked by [`ranking::score`].

pub mod config;
pub mod detail;
pub mod error;
pub mod export;
pub mod fetch;
pub mod listing;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod ranking;
pub mod server;

pub use config::Config;
pub use detail::{DetailMarkers, parse_detail};
pub use error::{CandidateError, DetailError, ExportError, FetchError, ListingError, ScrapeError};
pub use export::{export_csv, write_csv};
pub use fetch::{FetchSettings, HttpFetcher, PageSource};
pub use listing::{Listing, parse_links, parse_listing};
pub use model::Candidate;
pub use orchestrator::{
    CandidateFailure, FailureKind, ScrapeEvent, ScrapeReport, ScrapeSettings, Scraper,
};
pub use ranking::{RankedCandidate, rank, rank_with_scores, score};
