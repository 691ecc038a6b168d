//! Axum router configuration with middleware.
//!
//! REST routes are under `/api/v1/`, the socket lives at `/ws`.
//! Middleware: CORS, tracing.
//!
//! The built front-end is served from `web/dist/` (configurable via
//! `server.web_dir` or `CHATBOARD_WEB_DIR`). API routes take priority;
//! unknown paths fall through to `index.html`. If the directory does not
//! exist, only the API is served.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Environment variable overriding `server.web_dir`.
const WEB_DIR_ENV: &str = "CHATBOARD_WEB_DIR";

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Comments
        .route("/tabs", get(handlers::comment::list_tabs))
        .route(
            "/tabs/{tab}/comments",
            get(handlers::comment::list_comments).post(handlers::comment::post_comment),
        )
        // News
        .route("/news", get(handlers::news::get_news));

    let web_dir = std::env::var(WEB_DIR_ENV).unwrap_or_else(|_| state.config.server.web_dir.clone());

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/ws", get(handlers::ws::ws_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{}/index.html", web_dir);
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "Static file serving enabled");
    }

    router
}

/// GET /health - Liveness plus the number of users online.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "online": state.hub.presence().online_count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chatboard_infra::sqlite::pool::{DatabasePool, database_url};
    use chatboard_types::config::GlobalConfig;
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_path_buf();
        std::mem::forget(dir);
        let pool = DatabasePool::new(&database_url(&data_dir)).await.unwrap();
        AppState::from_parts(GlobalConfig::default(), data_dir, pool).unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_online_count() {
        let router = build_router(test_state().await);
        let resp = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["online"], 0);
    }

    #[tokio::test]
    async fn posted_comment_is_listed_under_its_tab() {
        let state = test_state().await;

        let resp = build_router(state.clone())
            .oneshot(
                Request::post("/api/v1/tabs/Home/comments")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text":"Hello","name":"Joe"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = build_router(state)
            .oneshot(
                Request::get("/api/v1/tabs/Home/comments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"][0]["text"], "Hello");
        assert_eq!(body["data"][0]["name"], "Joe");
        assert_eq!(body["data"][0]["tab"], "Home");
    }

    #[tokio::test]
    async fn invalid_comment_body_is_bad_request() {
        let resp = build_router(test_state().await)
            .oneshot(
                Request::post("/api/v1/tabs/Home/comments")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text":42}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unparseable_comment_body_gets_error_envelope() {
        let resp = build_router(test_state().await)
            .oneshot(
                Request::post("/api/v1/tabs/Home/comments")
                    .header("content-type", "application/json")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
        assert!(body.get("data").is_none());
    }
}
