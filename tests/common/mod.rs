#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scout::{DetailMarkers, FetchError, PageSource, ScrapeSettings, Scraper};
use url::Url;

pub const LISTING: &str = "https://www.work.ua/resumes-kyiv-python/";

struct Route {
    delay: Duration,
    body: Option<String>,
}

/// In-memory site: URL -> body, with optional per-URL latency and failures.
#[derive(Default)]
pub struct FakeSite {
    routes: HashMap<String, Route>,
    completed: Mutex<Vec<String>>,
}

impl FakeSite {
    pub fn page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                delay: Duration::ZERO,
                body: Some(body.into()),
            },
        );
        self
    }

    pub fn slow_page(mut self, url: &str, delay: Duration, body: impl Into<String>) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                delay,
                body: Some(body.into()),
            },
        );
        self
    }

    /// Requests for `url` fail with HTTP 503.
    pub fn broken(mut self, url: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                delay: Duration::ZERO,
                body: None,
            },
        );
        self
    }

    /// URLs in the order their fetches finished.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FakeSite {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let route = self.routes.get(url.as_str());
        if let Some(r) = route {
            if !r.delay.is_zero() {
                tokio::time::sleep(r.delay).await;
            }
        }
        self.completed.lock().unwrap().push(url.to_string());
        match route.and_then(|r| r.body.clone()) {
            Some(body) => Ok(body),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: if route.is_some() { 503 } else { 404 },
            }),
        }
    }
}

pub fn scraper(site: Arc<FakeSite>, max_concurrency: usize) -> Scraper {
    Scraper::new(
        site,
        ScrapeSettings {
            base_url: Url::parse("https://www.work.ua/").unwrap(),
            max_concurrency,
            markers: DetailMarkers::default(),
        },
    )
}

pub fn listing_page(ids: &[u32], total_pages: Option<usize>) -> String {
    let mut html = String::from("<html><body>");
    for id in ids {
        html.push_str(&format!(
            r#"<div class="card resume-link"><h2><a href="/resumes/{id}/">cv</a></h2></div>"#
        ));
    }
    if let Some(total) = total_pages {
        html.push_str(r#"<nav><ul class="pagination">"#);
        for n in 1..=total {
            html.push_str(&format!(r#"<li><a href="?page={n}">{n}</a></li>"#));
        }
        html.push_str(r#"<li><a href="?page=2">Наступна</a></li></ul></nav>"#);
    }
    html.push_str("</body></html>");
    html
}

/// The final page of a search: the current page is a plain span and there
/// is no "next" link.
pub fn last_listing_page(ids: &[u32], total_pages: usize) -> String {
    let mut html = String::from("<html><body>");
    for id in ids {
        html.push_str(&format!(
            r#"<div class="card resume-link"><h2><a href="/resumes/{id}/">cv</a></h2></div>"#
        ));
    }
    html.push_str(r#"<nav><ul class="pagination"><li><a href="?page=1">←</a></li>"#);
    for n in 1..total_pages {
        html.push_str(&format!(r#"<li><a href="?page={n}">{n}</a></li>"#));
    }
    html.push_str(&format!(
        r#"<li class="active"><span>{total_pages}</span></li></ul></nav>"#
    ));
    html.push_str("</body></html>");
    html
}

pub struct Profile<'a> {
    pub name: &'a str,
    pub education: bool,
    pub additional_education: bool,
    pub skills: usize,
    pub english: bool,
}

impl Profile<'_> {
    pub fn html(&self) -> String {
        let mut html = format!(
            r#"<html><body><div class="add-top"><h1 class="cut-top">{}</h1><h2>Python developer, 30 000 грн</h2></div>
               <dl class="dl-horizontal"><dt>Місто:</dt><dd>Київ</dd><dt>Готовий працювати:</dt><dd>Дистанційно</dd></dl>"#,
            self.name
        );
        if self.education {
            html.push_str("<h2>Освіта</h2>");
        }
        if self.additional_education {
            html.push_str("<h2>Додаткова освіта та сертифікати</h2>");
        }
        if self.english {
            html.push_str("<p>Англійська — вище середнього</p>");
        }
        for i in 0..self.skills {
            html.push_str(&format!(r#"<span class="label"><span class="ellipsis">skill {i}</span></span>"#));
        }
        html.push_str("</body></html>");
        html
    }
}

pub fn profile(name: &str) -> String {
    Profile {
        name,
        education: false,
        additional_education: false,
        skills: 0,
        english: false,
    }
    .html()
}

pub fn resume_url(id: u32) -> String {
    format!("https://www.work.ua/resumes/{id}/")
}
