use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use cep_weather_core::{TemperatureError, TemperatureReading, TemperatureService};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn router(service: TemperatureService) -> Router {
    Router::new()
        .route("/cep/{code}", get(temperature_by_cep))
        .route("/health", get(health))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(addr: SocketAddr, service: TemperatureService) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn health() -> &'static str {
    "ok"
}

async fn temperature_by_cep(
    State(service): State<TemperatureService>,
    uri: Uri,
    code: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureReading>, ApiError> {
    // A segment that does not decode to UTF-8 cannot be a postal code either.
    let Path(code) = code.map_err(|_| {
        let raw = uri.path().trim_start_matches("/cep/").to_string();
        TemperatureError::InvalidPostalCode(raw)
    })?;

    let reading = service.temperature_for(&code).await?;
    Ok(Json(reading))
}

/// Maps a failed lookup to its status and a body that names no collaborator.
#[derive(Debug)]
struct ApiError(TemperatureError);

impl From<TemperatureError> for ApiError {
    fn from(err: TemperatureError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TemperatureError::InvalidPostalCode(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid zipcode")
            }
            TemperatureError::Address(_) => (StatusCode::NOT_FOUND, "can not find zipcode"),
            TemperatureError::Weather(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch temperature")
            }
        };

        if status.is_server_error() {
            warn!(error = %self.0, "lookup failed");
        } else {
            info!(error = %self.0, %status, "lookup rejected");
        }

        (status, message).into_response()
    }
}
