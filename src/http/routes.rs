use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::core::pipeline::ExplainPipeline;
use crate::domain::model::Explanation;
use crate::domain::ports::ChatCompleter;
use crate::utils::error::GatewayError;

/// Fixed message for provider/internal failures; error detail never reaches
/// the caller.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate explanation";

/// Envelope message for request bodies the framework could not parse.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Shared per-process state. Immutable after startup; requests never touch
/// shared mutable state.
pub struct AppState<C: ChatCompleter> {
    pub pipeline: ExplainPipeline<C>,
    pub started_at: Instant,
}

impl<C: ChatCompleter> AppState<C> {
    pub fn new(pipeline: ExplainPipeline<C>) -> Self {
        Self {
            pipeline,
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExplainBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FeedbackBody {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub helpful: Option<bool>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FinancialResponse {
    pub success: bool,
    #[serde(rename = "isFinancial")]
    pub is_financial: bool,
    pub term: String,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct NotFinancialResponse {
    pub success: bool,
    #[serde(rename = "isFinancial")]
    pub is_financial: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
}

/// Bodies axum could not parse (bad JSON, wrong Content-Type) still get the
/// uniform envelope; the parser detail goes to the log only.
fn rejected_body_response(rejection: &JsonRejection) -> Response {
    tracing::warn!("Rejected request body: {}", rejection);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub async fn explain_handler<C: ChatCompleter>(
    State(state): State<Arc<AppState<C>>>,
    body: Result<Json<ExplainBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body_response(&rejection),
    };

    let text = body.text.unwrap_or_default();

    match state.pipeline.explain(&text, body.context.as_deref()).await {
        Ok(Explanation::Financial { term, explanation }) => (
            StatusCode::OK,
            Json(FinancialResponse {
                success: true,
                is_financial: true,
                term,
                explanation,
            }),
        )
            .into_response(),
        Ok(Explanation::NotFinancial { message }) => (
            StatusCode::OK,
            Json(NotFinancialResponse {
                success: true,
                is_financial: false,
                message,
            }),
        )
            .into_response(),
        Err(GatewayError::ValidationError { message }) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(e) => {
            tracing::error!("Explanation request failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE)
        }
    }
}

/// Feedback is acknowledged and logged only; nothing is persisted.
pub async fn feedback_handler(body: Result<Json<FeedbackBody>, JsonRejection>) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body_response(&rejection),
    };

    tracing::info!(
        "Feedback received: term={:?} helpful={:?} timestamp={:?}",
        body.term,
        body.helpful,
        body.timestamp
    );

    (
        StatusCode::OK,
        Json(FeedbackResponse {
            success: true,
            message: "Feedback recorded".to_string(),
        }),
    )
        .into_response()
}

pub async fn health_handler<C: ChatCompleter>(
    State(state): State<Arc<AppState<C>>>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime: state.started_at.elapsed().as_secs_f64(),
        }),
    )
}

pub async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Endpoint not found")
}
