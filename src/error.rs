use thiserror::Error;

/// Transport failure while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
}

/// A listing page whose structure cannot tell us the page count or the links.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("listing page has neither a pagination control nor resume links")]
    Unrecognized,

    #[error("pagination control has no page-number link")]
    MissingPageCount,

    #[error("pagination label {0:?} is not a page number")]
    BadPageCount(String),
}

/// A detail page that is not a candidate profile at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetailError {
    #[error("no profile heading on {url}")]
    MissingProfile { url: String },
}

/// Why one candidate was left out of a run.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Detail(#[from] DetailError),
}

/// Errors that end a scraping run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid listing url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to fetch listing page {page}: {source}")]
    ListingFetch {
        page: usize,
        #[source]
        source: FetchError,
    },

    #[error("failed to parse listing page {page}: {source}")]
    ListingParse {
        page: usize,
        #[source]
        source: ListingError,
    },
}

/// Failure of the CSV sink.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
