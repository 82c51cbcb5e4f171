//! API route handlers for the gateway.

use axum::body::Bytes;
use axum::response::Html;
use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;
use trickle_core::types::{QueryResponse, Stats};

use super::errors::ApiError;
use super::server::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

/// Minimal home page: one form, no assets.
pub async fn home_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let max = state.assistant.settings().max_response_size_bytes;
    Html(format!(
        r#"<!doctype html>
<html><head><meta charset="utf-8"><meta name="viewport" content="width=device-width">
<title>Trickle</title></head>
<body>
<h1>Trickle</h1>
<p>Answers are capped at {max} bytes.</p>
<form id="f"><input id="q" name="query" autofocus><button>Ask</button></form>
<pre id="a"></pre>
<script>
document.getElementById('f').onsubmit=async e=>{{e.preventDefault();
const r=await fetch('/api/query',{{method:'POST',headers:{{'Content-Type':'application/json'}},
body:JSON.stringify({{query:document.getElementById('q').value}})}});
const j=await r.json();document.getElementById('a').textContent=j.answer||j.error;}};
</script>
</body></html>"#
    ))
}

/// Answer a query. The body is parsed as JSON regardless of content type.
pub async fn api_query(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<QueryResponse>, ApiError> {
    let request: QueryRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::BadRequest("Invalid JSON".into()))?;

    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Query is required".into()));
    }

    let response = state.assistant.answer(query).await?;
    tracing::info!(
        "Query answered: source={:?} confidence={:?} bytes={}",
        response.source,
        response.confidence,
        response.bytes
    );
    Ok(Json(response))
}

/// Store size and the settings clients care about.
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<Stats> {
    Json(state.assistant.stats())
}

/// Re-read the knowledge file and publish the new snapshot.
pub async fn reload_knowledge(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let knowledge = state.assistant.knowledge().clone();
    let entries = tokio::task::spawn_blocking(move || knowledge.reload())
        .await
        .map_err(|e| ApiError::Internal(format!("Reload task failed: {e}")))?;
    tracing::info!("🔄 Knowledge base reloaded: {} entries", entries);
    Ok(Json(serde_json::json!({"ok": true, "entries": entries})))
}

/// Liveness probe.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "listen": format!("{}:{}", state.gateway_config.host, state.gateway_config.port),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}
