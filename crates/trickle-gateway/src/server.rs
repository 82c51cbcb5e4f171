//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use trickle_assistant::Assistant;
use trickle_core::config::{GatewayConfig, TrickleConfig};

/// Shared state for the gateway server.
pub struct AppState {
    pub gateway_config: GatewayConfig,
    /// Holds the knowledge snapshot handle and the fallback provider.
    pub assistant: Arc<Assistant>,
    pub start_time: std::time::Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(super::routes::home_page))
        .route("/health", get(super::routes::health_check))
        .route("/api/query", post(super::routes::api_query))
        .route("/api/query/", post(super::routes::api_query))
        .route("/api/stats", get(super::routes::stats))
        .route(
            "/api/knowledge/reload",
            post(super::routes::reload_knowledge),
        )
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
                .max_age(std::time::Duration::from_secs(3600));

            // Example: TRICKLE_CORS_ORIGINS=https://kb.example.org,https://help.example.org
            if let Ok(origins_str) = std::env::var("TRICKLE_CORS_ORIGINS") {
                let origins: Vec<_> = origins_str
                    .split(',')
                    .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins)
            } else {
                cors.allow_origin(Any)
            }
        })
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: &TrickleConfig) -> anyhow::Result<()> {
    let assistant = Assistant::from_config(config)?;
    let stats = assistant.stats();
    tracing::info!(
        "📚 Knowledge base: {} entries (web fallback: {})",
        stats.knowledge_base_entries,
        if stats.web_fallback_enabled { "on" } else { "off" }
    );

    let state = AppState {
        gateway_config: config.gateway.clone(),
        assistant: Arc::new(assistant),
        start_time: std::time::Instant::now(),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🌐 Gateway server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;
    use trickle_core::config::AssistantConfig;
    use trickle_knowledge::{EntryStore, KnowledgeBase};

    fn app() -> Router {
        let settings = AssistantConfig {
            enable_web_fallback: false,
            ..AssistantConfig::default()
        };
        let knowledge = Arc::new(KnowledgeBase::new(EntryStore::empty()));
        build_router(AppState {
            gateway_config: GatewayConfig::default(),
            assistant: Arc::new(Assistant::new(knowledge, None, settings)),
            start_time: std::time::Instant::now(),
        })
    }

    #[tokio::test]
    async fn test_query_route_with_trailing_slash() {
        let req = Request::post("/api/query/")
            .body(Body::from(r#"{"query":"hello"}"#))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_on_query_is_method_not_allowed() {
        let req = Request::get("/api/query").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let req = Request::post("/api/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("nope"))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats_route() {
        let req = Request::get("/api/stats").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
