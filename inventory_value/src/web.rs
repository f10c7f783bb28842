//! HTTP front end
//!
//! `POST /check` with `{ "link": "<profile url>" }` answers
//! `{ "total_value": <number> }` or `{ "error": "<message>" }`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::valuation::{InventoryValuator, ValuationOverrides};

/// Shared application state
#[derive(Clone)]
struct AppState {
    valuator: Arc<InventoryValuator>,
}

#[derive(Serialize)]
struct CheckResponse {
    total_value: f64,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Non-blank `link` of a `POST /check` body
fn read_link(body: &Value) -> Option<&str> {
    body.get("link")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|link| !link.is_empty())
}

/// POST /check
async fn check_handler(State(state): State<AppState>, body: Bytes) -> Response {
    // A body that is not a JSON object carries no link either
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            log::debug!("Unreadable /check body: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "No link");
        }
    };

    let Some(link) = read_link(&body) else {
        return error_response(StatusCode::BAD_REQUEST, "No link");
    };

    let overrides = match ValuationOverrides::deserialize(&body) {
        Ok(overrides) => overrides,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid request: {}", e));
        }
    };

    match state.valuator.value(link, &overrides).await {
        Ok(result) => Json(CheckResponse {
            total_value: result.rounded_total(),
        })
        .into_response(),
        Err(e) => {
            log::error!("Valuation of {} failed: {}", link, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Build the web server router
pub fn create_router(valuator: Arc<InventoryValuator>) -> Router {
    let state = AppState { valuator };

    Router::new()
        .route("/check", post(check_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server and run until Ctrl-C
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
pub async fn serve(
    valuator: Arc<InventoryValuator>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(valuator);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
