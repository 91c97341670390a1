//! HTTP surface: JSON, CSV and SSE views over one scraping run.

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, post, web};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::export::write_csv;
use crate::orchestrator::{CandidateFailure, ScrapeEvent, ScrapeReport, Scraper};
use crate::ranking::{RankedCandidate, rank_with_scores};

/// Shared by every worker; the scraper holds the one connection pool.
pub struct AppState {
    pub scraper: Scraper,
}

// -------------------------
// Request / Response Types
// -------------------------

#[derive(Deserialize)]
struct ScrapeReq {
    /// Filtered listing URL, as produced by the search form.
    url: String,
}

#[derive(Serialize)]
struct Meta {
    page_count: usize,
    total_candidates: usize,
    failed: Vec<CandidateFailure>,
}

#[derive(Serialize)]
struct ApiResponse {
    candidates: Vec<RankedCandidate>,
    meta: Meta,
}

impl From<ScrapeReport> for ApiResponse {
    fn from(report: ScrapeReport) -> Self {
        let candidates = rank_with_scores(report.candidates);
        ApiResponse {
            meta: Meta {
                page_count: report.pages,
                total_candidates: candidates.len(),
                failed: report.failures,
            },
            candidates,
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(healthz)
        .service(scrape_endpoint)
        .service(scrape_get)
        .service(scrape_csv)
        .service(scrape_stream);
}

// -------------------------
// HTTP Handlers
// -------------------------

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body(
        "Scout online.\n\
         JSON:\n  POST /scrape {\"url\":\"https://www.work.ua/resumes-kyiv-python/\"}\n  GET  /scrape?url=...\n\
         CSV:\n  GET  /scrape/csv?url=...\n\
         Stream:\n  GET  /scrape/stream?url=... (SSE)",
    )
}

#[get("/healthz")]
async fn healthz() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[post("/scrape")]
async fn scrape_endpoint(state: web::Data<AppState>, body: web::Json<ScrapeReq>) -> impl Responder {
    json_response(&state, &body.url).await
}

#[get("/scrape")]
async fn scrape_get(state: web::Data<AppState>, q: web::Query<ScrapeReq>) -> impl Responder {
    json_response(&state, &q.url).await
}

async fn json_response(state: &AppState, url: &str) -> HttpResponse {
    match state.scraper.scrape(url).await {
        Ok(report) => HttpResponse::Ok().json(ApiResponse::from(report)),
        Err(e) => bad_request(e.to_string()),
    }
}

#[get("/scrape/csv")]
async fn scrape_csv(state: web::Data<AppState>, q: web::Query<ScrapeReq>) -> impl Responder {
    let report = match state.scraper.scrape(&q.url).await {
        Ok(r) => r,
        Err(e) => return bad_request(e.to_string()),
    };
    let ranked: Vec<_> = rank_with_scores(report.candidates)
        .into_iter()
        .map(|r| r.candidate)
        .collect();

    let mut out = Vec::new();
    if let Err(e) = write_csv(&mut out, &ranked) {
        return internal_error(format!("csv export failed: {e}"));
    }
    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/csv; charset=utf-8"))
        .insert_header(("Content-Disposition", "attachment; filename=\"candidates.csv\""))
        .body(out)
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

fn internal_error(message: String) -> HttpResponse {
    tracing::error!(%message, "request failed");
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": message }))
}

// --------------
// SSE streaming
// --------------

fn sse_event(event: &str, data_json: &str) -> Bytes {
    let payload = format!("event: {}\ndata: {}\n\n", event, data_json);
    Bytes::from(payload)
}

#[get("/scrape/stream")]
async fn scrape_stream(state: web::Data<AppState>, q: web::Query<ScrapeReq>) -> impl Responder {
    let (tx, mut rx) = mpsc::channel::<Bytes>(32);
    let url = q.into_inner().url;
    let state: Arc<AppState> = state.into_inner();

    actix_web::rt::spawn(async move {
        let (progress_tx, mut progress_rx) = mpsc::channel::<ScrapeEvent>(32);

        let forward_tx = tx.clone();
        let forward = async move {
            while let Some(ev) = progress_rx.recv().await {
                let name = match ev {
                    ScrapeEvent::Started { .. } => "start",
                    ScrapeEvent::Page { .. } => "page",
                };
                let data = serde_json::to_string(&ev).unwrap_or_default();
                let _ = forward_tx.send(sse_event(name, &data)).await;
            }
        };
        let run = async move {
            let result = state.scraper.scrape_with_progress(&url, Some(&progress_tx)).await;
            drop(progress_tx);
            result
        };

        let (result, ()) = tokio::join!(run, forward);
        let event = match result {
            Ok(report) => {
                let payload = serde_json::to_string(&ApiResponse::from(report)).unwrap_or_default();
                sse_event("done", &payload)
            }
            Err(e) => {
                let payload = serde_json::json!({ "error": e.to_string() });
                sse_event("error", &payload.to_string())
            }
        };
        let _ = tx.send(event).await;
    });

    let stream = async_stream::stream! {
        while let Some(chunk) = rx.recv().await {
            yield Ok::<Bytes, actix_web::Error>(chunk);
        }
    };

    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/event-stream"))
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("Connection", "keep-alive"))
        .streaming(stream)
}
