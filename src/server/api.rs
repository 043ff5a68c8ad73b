use crate::analyzer::Analyzer;
use crate::hook::HighlightHook;
use crate::logs::{ LogEntry, LogRing };
use crate::models::analysis::AnalysisResult;
use crate::models::chat::AnalyzeRequest;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, Query, rejection::JsonRejection },
    response::{ Html, IntoResponse, Response },
    http::{ header::ACCEPT, HeaderMap, StatusCode },
};
use serde::{ Deserialize, Serialize };
use serde_json::json;
use tower_http::cors::{ Any, CorsLayer };
use log::warn;

const SERVICE_NAME: &str = "Newtype Detection Server";
const LOG_SOURCE: &str = "Newtype";
const LOGS_PAGE: &str = include_str!("logs_page.html");

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub hook: Arc<dyn HighlightHook>,
    pub log_ring: Arc<LogRing>,
    pub highlight_threshold: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("messages must contain at least one chat line")]
    EmptyMessages,
    #[error("{detail}")]
    InvalidBody { status: StatusCode, detail: String },
    #[error("api_key query parameter is required")]
    MissingApiKey,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::EmptyMessages | ApiError::MissingApiKey => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidBody { status, .. } => *status,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
    pub backend: String,
    pub backend_target: String,
    pub model: String,
    pub configured: bool,
    pub downstream_hook_configured: bool,
}

#[derive(Deserialize)]
pub struct ConfigureRequest {
    pub api_key: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ConfigureResponse {
    pub success: bool,
    pub configured: bool,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/status", get(status_handler))
        .route("/api/newtype/status", get(status_handler))
        .route("/analyze", post(analyze_handler))
        .route("/api/newtype/analyze", post(analyze_handler))
        .route("/configure", post(configure_handler))
        .route("/api/newtype/configure", post(configure_handler))
        .route("/api/logs", get(logs_json_handler))
        .route("/logs", get(logs_handler))
        .layer(cors)
        .with_state(state)
}

async fn root_handler() -> impl IntoResponse {
    Json(json!({ "service": SERVICE_NAME, "status": "running" }))
}

async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let client = state.analyzer.chat_client();
    Json(StatusResponse {
        status: "running".into(),
        backend: client.get_llm_backend().to_string(),
        backend_target: client.get_base_url().unwrap_or_default(),
        model: client.get_model(),
        configured: client.is_configured(),
        downstream_hook_configured: state.hook.is_configured(),
    })
}

async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected analyze request: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;
    if request.messages.is_empty() {
        warn!("Rejected analyze request: empty message list");
        return Err(ApiError::EmptyMessages);
    }

    let result = state.analyzer.analyze(&request.messages).await;

    state.log_ring.append(
        LOG_SOURCE,
        format!(
            "Mood detected ({}, intensity: {}%, highlight: {})",
            result.mood,
            result.intensity,
            result.is_highlight
        ),
    );
    state.log_ring.append(LOG_SOURCE, format!("Scene summary: {}", result.scene_summary));

    if result.is_highlight && result.intensity >= state.highlight_threshold && state.hook.is_configured() {
        state.log_ring.append(LOG_SOURCE, "Highlight detected, notifying downstream hook");
        if let Err(e) = state.hook.notify(&result).await {
            state.log_ring.append(LOG_SOURCE, format!("Highlight hook failed: {}", e));
        }
    }

    Ok(Json(result))
}

async fn configure_handler(
    State(state): State<AppState>,
    Query(req): Query<ConfigureRequest>,
) -> Result<Json<ConfigureResponse>, ApiError> {
    let api_key = req.api_key.ok_or(ApiError::MissingApiKey)?;
    let client = state.analyzer.chat_client();
    if !client.accepts_api_key() {
        state.log_ring.append(
            "System",
            format!("Backend {} takes no credential, key ignored", client.get_llm_backend())
        );
        return Ok(Json(ConfigureResponse { success: false, configured: client.is_configured() }));
    }

    let configured = client.set_api_key(api_key);
    state.log_ring.append("System", format!("Backend credential updated (configured: {})", configured));
    Ok(Json(ConfigureResponse { success: true, configured }))
}

async fn logs_json_handler(State(state): State<AppState>) -> Json<Vec<LogEntry>> {
    Json(state.log_ring.snapshot())
}

async fn logs_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if prefers_json(&headers) {
        return Json(state.log_ring.snapshot()).into_response();
    }
    Html(LOGS_PAGE).into_response()
}

fn prefers_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json") && !accept.contains("text/html"))
        .unwrap_or(false)
}
