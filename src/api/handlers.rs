//! HTTP request handlers

use super::types::{
    ChatRequest, CreateSessionResponse, ErrorResponse, HealthResponse, SuccessResponse,
};
use super::AppState;
use crate::catalog::{self, DistractionGame, GroundingTechnique};
use crate::runtime::{SessionError, SessionSnapshot};
use crate::state_machine::Response as PippyResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        // Conversations
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", delete(delete_session))
        .route("/api/sessions/:id/reset", post(reset_session))
        .route("/api/sessions/:id/state", get(session_state))
        .route("/api/chat", post(chat))
        // Catalog
        .route("/api/grounding-techniques", get(list_grounding_techniques))
        .route("/api/grounding-techniques/random", get(random_grounding_technique))
        .route("/api/grounding-techniques/:id", get(get_grounding_technique))
        .route("/api/distraction-games", get(list_distraction_games))
        .route("/api/distraction-games/random", get(random_distraction_game))
        .route("/api/distraction-games/:id", get(get_distraction_game))
        .fallback(not_found)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: "Pippy Chatbot API",
    })
}

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let (session_id, greeting) = state.sessions.create().await;
    Json(CreateSessionResponse {
        session_id,
        greeting,
    })
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<PippyResponse>, AppError> {
    let message = req
        .message
        .ok_or_else(|| AppError::BadRequest("Message is required".to_string()))?;

    tracing::debug!(
        session_id = ?req.session_id,
        chars = message.chars().count(),
        is_episode = ?req.is_episode,
        "Chat turn"
    );

    let response = state
        .sessions
        .chat(req.session_id.as_deref(), message, req.is_episode)
        .await?;
    Ok(Json(response))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.sessions.reset(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    if state.sessions.remove(&id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(SessionError::NotFound(id).into())
    }
}

async fn session_state(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.snapshot(&id).await?))
}

// ============================================================
// Catalog
// ============================================================

async fn list_grounding_techniques() -> Json<&'static [GroundingTechnique]> {
    Json(catalog::GROUNDING_TECHNIQUES)
}

async fn random_grounding_technique() -> Json<&'static GroundingTechnique> {
    Json(catalog::random_grounding_technique(&mut rand::thread_rng()))
}

async fn get_grounding_technique(
    Path(id): Path<String>,
) -> Result<Json<&'static GroundingTechnique>, AppError> {
    catalog::grounding_technique(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Grounding technique not found: {id}")))
}

async fn list_distraction_games() -> Json<&'static [DistractionGame]> {
    Json(catalog::DISTRACTION_GAMES)
}

async fn random_distraction_game() -> Json<&'static DistractionGame> {
    Json(catalog::random_distraction_game(&mut rand::thread_rng()))
}

async fn get_distraction_game(
    Path(id): Path<String>,
) -> Result<Json<&'static DistractionGame>, AppError> {
    catalog::distraction_game(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Distraction game not found: {id}")))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::NotFound(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
