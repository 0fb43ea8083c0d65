//! HTTP 인터페이스.
//! 라우터 구성과 서버 실행(graceful shutdown 포함)을 담당한다.

mod dto;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method, Request, header};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::interface::composition::AppComposition;

pub use error::ApiError;

/// 전체 라우트를 묶은 라우터를 만든다.
pub fn router(app: Arc<AppComposition>) -> Router {
    let cors = cors_layer(&app.config().cors_origins());

    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route("/analyze_review", post(handlers::analyze_review))
        .route("/upload-reviews", post(handlers::upload_reviews))
        .route("/upload_reviews", post(handlers::upload_reviews))
        .route("/correct_analysis", post(handlers::correct_analysis))
        .route("/fetch_reviews", get(handlers::fetch_reviews))
        .route("/summarize", post(handlers::summarize))
        .route("/summarize_text", post(handlers::summarize_text))
        .route("/correction_options", get(handlers::correction_options))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(cors)
        .with_state(app)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.iter().any(|origin| origin == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}

/// 주소에 바인딩하고 Ctrl-C를 받을 때까지 요청을 처리한다.
pub async fn serve(app: Arc<AppComposition>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
