//! Candidate profile pages.
//!
//! Every field is looked up independently; a missing element yields the
//! field's default. Only a page without the profile heading is rejected,
//! since that is not a profile page at all.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::error::DetailError;
use crate::model::Candidate;

pub const EDUCATION_MARKER: &str = "Освіта";
pub const ADDITIONAL_EDUCATION_MARKER: &str = "Додаткова освіта та сертифікати";
pub const ENGLISH_MARKER: &str = "Англійська — вище середнього";

/// Phrases whose presence flips the boolean profile fields.
///
/// They follow the site's current wording, so they are settings rather than
/// parser logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailMarkers {
    /// Looked for inside `h2` headings.
    pub education: String,
    /// Looked for inside `h2` headings.
    pub additional_education: String,
    /// Looked for inside `p` paragraphs.
    pub english: String,
}

impl Default for DetailMarkers {
    fn default() -> Self {
        Self {
            education: EDUCATION_MARKER.to_string(),
            additional_education: ADDITIONAL_EDUCATION_MARKER.to_string(),
            english: ENGLISH_MARKER.to_string(),
        }
    }
}

struct DetailSelectors {
    name: Selector,
    position: Selector,
    ready_to_work: Selector,
    heading: Selector,
    paragraph: Selector,
    skill: Selector,
}

static SELECTORS: LazyLock<DetailSelectors> = LazyLock::new(|| DetailSelectors {
    name: Selector::parse(".add-top > h1.cut-top").unwrap(),
    position: Selector::parse(".add-top > h2").unwrap(),
    ready_to_work: Selector::parse("dl.dl-horizontal > dd").unwrap(),
    heading: Selector::parse("h2").unwrap(),
    paragraph: Selector::parse("p").unwrap(),
    skill: Selector::parse(".label > .ellipsis").unwrap(),
});

pub fn parse_detail(body: &str, url: &Url, markers: &DetailMarkers) -> Result<Candidate, DetailError> {
    let doc = Html::parse_document(body);
    let sel = &*SELECTORS;

    let name = doc
        .select(&sel.name)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .ok_or_else(|| DetailError::MissingProfile {
            url: url.to_string(),
        })?;

    let position = doc
        .select(&sel.position)
        .next()
        .map(|e| {
            let title = e.text().collect::<String>();
            title.split(',').next().unwrap_or_default().trim().to_string()
        })
        .unwrap_or_default();

    let ready_to_work = doc
        .select(&sel.ready_to_work)
        .last()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let has_text = |selector: &Selector, marker: &str| {
        doc.select(selector)
            .any(|e| e.text().collect::<String>().contains(marker))
    };

    Ok(Candidate {
        name,
        position,
        ready_to_work,
        education: has_text(&sel.heading, markers.education.as_str()),
        additional_education: has_text(&sel.heading, markers.additional_education.as_str()),
        skills: u32::try_from(doc.select(&sel.skill).count()).unwrap_or(u32::MAX),
        english: has_text(&sel.paragraph, markers.english.as_str()),
        url: url.to_string(),
    })
}
