//! HTTP front end: team search, head-to-head comparison and per-team stats.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::FootballError;
use crate::football_data::DataSource;
use crate::model::H2HResult;
use crate::pipeline::{self, CompareRequest, ReportRequest, UnknownId};
use crate::resolver::TeamResolver;

pub const SEARCH_NOT_FOUND: &str = "Team not found. Try a different spelling.";
pub const COMPARE_NOT_FOUND: &str = "One or both teams not found.";
pub const STATS_NOT_FOUND: &str = "Team not found.";

pub type SharedSource = Arc<dyn DataSource + Send + Sync>;

pub struct ServiceState {
    source: SharedSource,
    resolver: TeamResolver,
}

impl ServiceState {
    pub fn new(source: SharedSource, resolver: TeamResolver) -> Self {
        Self { source, resolver }
    }
}

pub fn router(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/search", get(search_team))
        .route("/compare", get(head_to_head))
        .route("/teams/{id}/stats", get(team_stats))
        .with_state(state)
}

pub async fn serve(addr: &str, state: Arc<ServiceState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("football analytics service listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    name: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    team1: String,
    team2: String,
    #[serde(rename = "dateFrom")]
    date_from: Option<String>,
    #[serde(rename = "dateTo")]
    date_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    #[serde(rename = "dateFrom")]
    date_from: Option<String>,
    #[serde(rename = "dateTo")]
    date_to: Option<String>,
}

#[derive(Debug, Serialize)]
struct TeamHit {
    id: u32,
    name: String,
}

/// GET / - welcome message
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Football Analytics API. Use /search, /compare or /teams/{id}/stats."
    }))
}

/// GET /search?name= - fuzzy team lookup
async fn search_team(
    State(state): State<Arc<ServiceState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let result = run_blocking(move || {
        pipeline::search(state.source.as_ref(), &state.resolver, &params.name)
    })
    .await;
    match result {
        Ok((team, _)) => Json(TeamHit {
            id: team.id,
            name: team.name,
        })
        .into_response(),
        Err(err) => error_response(err, SEARCH_NOT_FOUND),
    }
}

/// GET /compare?team1=&team2= - head-to-head record
async fn head_to_head(
    State(state): State<Arc<ServiceState>>,
    Query(params): Query<CompareParams>,
) -> Response {
    let result = run_blocking(move || {
        let req = CompareRequest {
            team1: &params.team1,
            team2: &params.team2,
            date_from: params.date_from.as_deref(),
            date_to: params.date_to.as_deref(),
        };
        pipeline::compare(state.source.as_ref(), &state.resolver, &req)
    })
    .await;
    match result {
        Ok(h2h) => Json(h2h_body(&h2h)).into_response(),
        Err(err) => error_response(err, COMPARE_NOT_FOUND),
    }
}

/// GET /teams/{id}/stats - win/draw/loss totals for one team
async fn team_stats(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u32>,
    Query(params): Query<RangeParams>,
) -> Response {
    let result = run_blocking(move || {
        let team = id.to_string();
        let req = ReportRequest {
            team: &team,
            date_from: params.date_from.as_deref(),
            date_to: params.date_to.as_deref(),
            unknown_id: UnknownId::Reject,
        };
        pipeline::team_report(state.source.as_ref(), &state.resolver, &req)
    })
    .await;
    match result {
        Ok(report) => Json(report.stats_row()).into_response(),
        Err(err) => error_response(err, STATS_NOT_FOUND),
    }
}

/// Response shape of `/compare`: per-team win keys are named after the teams.
pub fn h2h_body(h2h: &H2HResult) -> Value {
    let mut stats = Map::new();
    stats.insert(format!("{}_wins", h2h.team_a.name), json!(h2h.team_a_wins));
    stats.insert(format!("{}_wins", h2h.team_b.name), json!(h2h.team_b_wins));
    stats.insert("draws".to_string(), json!(h2h.draws));
    stats.insert("total_matches".to_string(), json!(h2h.total_matches));
    json!({
        "comparison": h2h.label(),
        "stats": stats,
        "history": h2h.history,
    })
}

async fn run_blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| anyhow::anyhow!("worker task failed: {err}"))?
}

fn error_response(err: anyhow::Error, not_found_detail: &str) -> Response {
    let (status, detail) = match err.downcast_ref::<FootballError>() {
        Some(FootballError::NotFound(_)) => (StatusCode::NOT_FOUND, not_found_detail.to_string()),
        Some(FootballError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
        None => {
            error!("upstream failure: {err:#}");
            (StatusCode::BAD_GATEWAY, format!("upstream error: {err}"))
        }
    };
    if status != StatusCode::BAD_GATEWAY {
        debug!("request rejected ({status}): {err:#}");
    }
    (status, Json(json!({ "detail": detail }))).into_response()
}
