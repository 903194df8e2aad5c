//! REST API endpoint handlers.
//!
//! Every handler reads exactly one snapshot from the [`SnapshotStore`]
//! and answers from it.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Service info (JSON, HTML or plain text) |
//! | `GET` | `/health` | Status and loaded entity counts |
//! | `GET` | `/fighters` | Filter fighters |
//! | `GET` | `/abilities` | Filter abilities and battle traits |
//! | `GET` | `/warbands` | All derived warbands |
//! | `GET` | `/warbands/{name}` | One warband by faction runemark |
//!
//! [`SnapshotStore`]: warscry_core::store::SnapshotStore

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::http::header::ACCEPT;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use warscry_query::{AbilityQuery, Criteria, FighterQuery, filter_abilities, filter_fighters};
use warscry_types::{Ability, Fighter, Warband};

use crate::error::ApiError;
use crate::state::AppState;

/// Paths listed on the index page.
pub const ENDPOINTS: [&str; 6] = [
    "/",
    "/fighters",
    "/abilities",
    "/warbands",
    "/warbands/{name}",
    "/health",
];

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// JSON body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    /// Service name.
    pub name: &'static str,
    /// Service version.
    pub version: String,
    /// Available endpoints.
    pub endpoints: Vec<&'static str>,
    /// Fighters in the current snapshot.
    pub fighter_count: usize,
    /// Abilities in the current snapshot.
    pub ability_count: usize,
    /// Link to the API documentation.
    pub documentation_url: String,
}

/// JSON body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves.
    pub status: &'static str,
    /// Fighters in the current snapshot.
    pub fighters_loaded: usize,
    /// Abilities in the current snapshot.
    pub abilities_loaded: usize,
    /// Warbands in the current snapshot.
    pub warbands_loaded: usize,
    /// When the current snapshot was assembled.
    pub loaded_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Representation chosen for the index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// `application/json`
    Json,
    /// `text/html`
    Html,
    /// `text/plain`
    Text,
}

impl Representation {
    /// Choose from an `Accept` header value. HTML wins when both HTML
    /// and JSON are acceptable.
    pub fn negotiate(accept: &str) -> Self {
        if accept.contains("text/html") {
            Self::Html
        } else if accept.contains("application/json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Serve service info in the representation the client asked for.
pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (fighter_count, ability_count) = state.store.counts();
    let info = ApiInfo {
        name: "Warscry API",
        version: state.info.version.clone(),
        endpoints: ENDPOINTS.to_vec(),
        fighter_count,
        ability_count,
        documentation_url: state.info.docs_url.clone(),
    };

    let accept = headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match Representation::negotiate(accept) {
        Representation::Json => Json(info).into_response(),
        Representation::Html => Html(render_html(&info)).into_response(),
        Representation::Text => render_text(&info).into_response(),
    }
}

fn render_html(info: &ApiInfo) -> String {
    let ApiInfo {
        name,
        version,
        fighter_count,
        ability_count,
        documentation_url,
        ..
    } = info;
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{name}</title>
    <style>
        body {{ font-family: sans-serif; max-width: 800px; margin: 40px auto; padding: 0 20px; line-height: 1.6; }}
        code, pre {{ background: #f4f4f4; border-radius: 4px; }}
        code {{ padding: 2px 6px; }}
        pre {{ padding: 10px; overflow-x: auto; }}
        .stats {{ background: #e8f5e9; padding: 15px; border-radius: 5px; margin: 20px 0; }}
    </style>
</head>
<body>
    <h1>{name} {version}</h1>
    <div class="stats"><strong>Data loaded:</strong> {fighter_count} fighters, {ability_count} abilities</div>

    <h2>GET /fighters</h2>
    <p>Filter fighters by characteristic. Numeric fields accept
    <code>__gt</code>, <code>__gte</code>, <code>__lt</code> and <code>__lte</code>.</p>
    <pre>GET /fighters?attacks__gte=4
GET /fighters?wounds__gt=20&amp;toughness__gte=5
GET /fighters?warband=stormcast-eternals&amp;runemarks=hero</pre>

    <h2>GET /abilities</h2>
    <p>Filter abilities and battle traits. <code>description</code> matches by substring.</p>
    <pre>GET /abilities?warband=stormcast-eternals
GET /abilities?description=wounds</pre>

    <h2>GET /warbands</h2>
    <p>Every warband, or one by name with <code>/warbands/{{name}}</code>.</p>

    <h2>GET /health</h2>
    <p>Service status and loaded counts.</p>

    <h2>Documentation</h2>
    <p><a href="{documentation_url}">{documentation_url}</a></p>
</body>
</html>"#
    )
}

fn render_text(info: &ApiInfo) -> String {
    let ApiInfo {
        name,
        version,
        fighter_count,
        ability_count,
        documentation_url,
        ..
    } = info;
    format!(
        "{name} {version}
Data loaded: {fighter_count} fighters, {ability_count} abilities

Endpoints:
- GET /fighters - Filter fighters by characteristic
- GET /abilities - Filter abilities and battle traits
- GET /warbands - List warbands
- GET /warbands/{{name}} - One warband
- GET /health - Health check

Fighter characteristics are queried with ?characteristic=value
Example: /fighters?attacks=4
Append __gt, __gte, __lt or __lte for comparisons
Example: /fighters?attacks__gte=4
Use description=word to search ability descriptions
Example: /abilities?description=wounds

Documentation: {documentation_url}
"
    )
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report status and the size of the current snapshot.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.store.read();
    Json(HealthResponse {
        status: "ok",
        fighters_loaded: snapshot.fighters.len(),
        abilities_loaded: snapshot.abilities.len(),
        warbands_loaded: snapshot.warbands.len(),
        loaded_at: snapshot.loaded_at,
    })
}

// ---------------------------------------------------------------------------
// GET /fighters, GET /abilities
// ---------------------------------------------------------------------------

/// Filter fighters by the request's query string.
///
/// Result order is not meaningful.
pub async fn list_fighters(
    State(state): State<Arc<AppState>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Fighter>>, ApiError> {
    let Query(params) = params.inspect_err(|e| warn!(error = %e, "malformed fighter query"))?;
    let criteria: Criteria = params.into_iter().collect();
    let query = FighterQuery::parse(&criteria)
        .inspect_err(|e| warn!(error = %e, "rejected fighter query"))?;

    let fighters = filter_fighters(state.store.read(), Arc::new(query)).await?;
    debug!(results = fighters.len(), "returning fighters");
    Ok(Json(fighters))
}

/// Filter abilities and battle traits by the request's query string.
pub async fn list_abilities(
    State(state): State<Arc<AppState>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Ability>>, ApiError> {
    let Query(params) = params.inspect_err(|e| warn!(error = %e, "malformed ability query"))?;
    let criteria: Criteria = params.into_iter().collect();
    let query = AbilityQuery::parse(&criteria)
        .inspect_err(|e| warn!(error = %e, "rejected ability query"))?;

    let abilities = filter_abilities(&state.store.read(), &query);
    debug!(results = abilities.len(), "returning abilities");
    Ok(Json(abilities))
}

// ---------------------------------------------------------------------------
// GET /warbands, GET /warbands/{name}
// ---------------------------------------------------------------------------

/// List every derived warband.
pub async fn list_warbands(State(state): State<Arc<AppState>>) -> Json<Vec<Warband>> {
    Json(state.store.read().warbands.clone())
}

/// Get one warband by faction runemark, ignoring case.
pub async fn get_warband(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Warband>, ApiError> {
    state
        .store
        .read()
        .warband(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("warband {name}")))
}
