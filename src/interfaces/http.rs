use crate::application::converter::BoletoConverter;
use crate::error::{PixError, Result};
use crate::interfaces::dto::{ConvertBoletoRequest, ConvertBoletoResponse, run_conversion};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub bind: SocketAddr,
    /// Used when a request carries no message.
    pub default_message: Option<String>,
}

pub struct AppState {
    pub converter: BoletoConverter,
    pub default_message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for PixError {
    fn into_response(self) -> Response {
        let status = match &self {
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            PixError::Encoding(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/pix/convert", post(convert_boleto))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: ServeConfig, converter: BoletoConverter) -> Result<()> {
    let state = Arc::new(AppState {
        converter,
        default_message: config.default_message,
    });

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn healthz() -> &'static str {
    "ok"
}

async fn convert_boleto(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ConvertBoletoRequest>, JsonRejection>,
) -> std::result::Result<Json<ConvertBoletoResponse>, PixError> {
    let result = match body {
        Ok(Json(body)) => {
            run_conversion(&state.converter, body, state.default_message.as_deref()).await
        }
        Err(rejection) => Err(PixError::Validation(vec![rejection.body_text()])),
    };
    match result {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            tracing::warn!(error = %err, kind = err.kind(), "conversion rejected");
            Err(err)
        }
    }
}
