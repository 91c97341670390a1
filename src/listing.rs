//! Listing (search result) pages: page count, resume links, page URLs.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::ListingError;

static PAGINATION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("nav > ul.pagination").unwrap());
static PAGE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li > a").unwrap());
static RESUME_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".resume-link").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Always at least 1.
    pub total_pages: usize,
    /// Detail-page links in document order, resolved against the site base.
    pub links: Vec<Url>,
}

/// First listing page: page count and links.
pub fn parse_listing(body: &str, base: &Url) -> Result<Listing, ListingError> {
    let doc = Html::parse_document(body);

    let pagination = doc.select(&PAGINATION).next();
    let links = collect_links(&doc, base);

    let total_pages = match pagination {
        None if links.is_empty() => return Err(ListingError::Unrecognized),
        None => 1,
        Some(nav) => page_count(&nav)?,
    };

    Ok(Listing { total_pages, links })
}

/// Pages after the first: only the links matter. The pager on these pages
/// may lack the "next" control, so it is not read.
pub fn parse_links(body: &str, base: &Url) -> Vec<Url> {
    collect_links(&Html::parse_document(body), base)
}

fn collect_links(doc: &Html, base: &Url) -> Vec<Url> {
    doc.select(&RESUME_LINK)
        .filter_map(|el| resolve_link(&el, base))
        .collect()
}

// The last link of the control is "next"; the one before it is the last page.
fn page_count(nav: &ElementRef) -> Result<usize, ListingError> {
    let labels: Vec<String> = nav
        .select(&PAGE_LINK)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .collect();
    if labels.len() < 2 {
        return Err(ListingError::MissingPageCount);
    }
    let label = &labels[labels.len() - 2];
    let n = label
        .parse::<usize>()
        .map_err(|_| ListingError::BadPageCount(label.clone()))?;
    Ok(n.max(1))
}

fn resolve_link(el: &ElementRef, base: &Url) -> Option<Url> {
    let href = el
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .or_else(|| match el.value().name() {
            "a" => el.value().attr("href"),
            _ => None,
        })?;
    match base.join(href.trim()) {
        Ok(u) => Some(u),
        Err(e) => {
            debug!(href, error = %e, "skipping unresolvable resume link");
            None
        }
    }
}

// -------------------------
// Pager helpers (page=N scheme)
// -------------------------

/// Drops any `page` parameter so the URL can be re-paged from scratch.
pub fn normalize_pager(url: &Url) -> Url {
    let mut base = url.clone();
    let qp: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| *k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if qp.is_empty() {
        base.set_query(None);
    } else {
        base.query_pairs_mut()
            .clear()
            .extend_pairs(qp.iter().map(|(k, v)| (&**k, &**v)));
    }
    base
}

pub fn build_page_url(base: &Url, page: usize) -> Url {
    let mut u = base.clone();
    u.query_pairs_mut().append_pair("page", &page.to_string());
    u
}
