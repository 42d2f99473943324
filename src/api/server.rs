// HTTP server (axum): routing, middleware and store bootstrap.

use crate::adapters::{InMemoryStore, JsonFileStore};
use crate::api::error::ErrorBody;
use crate::api::handlers::{self, AppState};
use crate::domain::ports::{ConfigProvider, ParameterStore};
use crate::utils::error::{Result, SigmoidError};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .fallback(|| async {
            tracing::warn!("⚠️ Unmatched request - 404 Not Found");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "Not found".to_string(),
                }),
            )
        })
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::debug_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate/", post(handlers::calculate_sigmoid))
        .route("/data/:param_id/", get(handlers::get_sigmoid_data))
        .route(
            "/demo/nonlinear-separability/",
            get(handlers::demonstrate_nonlinear_separability),
        )
        .route(
            "/parameters/",
            get(handlers::list_parameters).post(handlers::create_parameters),
        )
        .route(
            "/parameters/:id/",
            get(handlers::get_parameters)
                .put(handlers::update_parameters)
                .patch(handlers::update_parameters)
                .delete(handlers::delete_parameters),
        )
}

/// 依設定選擇儲存後端：有路徑就用 JSON 檔，否則放記憶體
pub async fn open_store<C: ConfigProvider>(config: &C) -> Result<Arc<dyn ParameterStore>> {
    match config.storage_path() {
        Some(path) => {
            tracing::info!("💾 Using JSON file store at {}", path);
            Ok(Arc::new(JsonFileStore::open(path).await?))
        }
        None => {
            tracing::info!("💾 Using in-memory store (records are not persisted)");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve<C: ConfigProvider>(config: &C, state: AppState) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SigmoidError::ConfigError {
            message: format!("cannot bind {}: {}", addr, e),
        })?;

    tracing::info!("🚀 Sigmoid API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
