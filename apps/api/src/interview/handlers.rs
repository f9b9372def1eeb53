//! Axum route handlers for conversations and the CV interview.
//!
//! These handlers are the driver: they own the mode guard (via `SessionStore`),
//! run the enhancement step once an interview completes, and render on demand.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::enhancement::enhance_or_fallback;
use crate::errors::AppError;
use crate::interview::engine::{Prompt, StepResult};
use crate::interview::store::Turn;
use crate::models::cv::CvDocument;
use crate::render::handlers::render_document;
use crate::state::AppState;

const COMPLETE_MESSAGE: &str =
    "✅ CV data collected and enhanced! Your CV is ready to download.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// The outcome of one user turn.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnResponse {
    Prompt {
        text: String,
        step: usize,
        total: usize,
    },
    Complete {
        text: String,
        document: CvDocument,
    },
    Reply {
        text: String,
    },
}

impl From<Prompt> for TurnResponse {
    fn from(prompt: Prompt) -> Self {
        TurnResponse::Prompt {
            text: prompt.text,
            step: prompt.step,
            total: prompt.total,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create();
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// DELETE /api/v1/sessions/:id
///
/// Abandons the conversation, including any interview in progress.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// POST /api/v1/sessions/:id/messages
///
/// Answers the current interview step while one is in progress; otherwise the
/// message goes to the career chat with the conversation's recent utterances.
pub async fn handle_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("No message provided".to_string()));
    }

    match state.sessions.handle_message(&id, message)? {
        Turn::Interview { result, generation } => {
            Ok(Json(drive(&state, &id, result, generation).await))
        }
        Turn::Chat { context } => {
            let text = state.chat.reply(message, &context).await?;
            Ok(Json(TurnResponse::Reply { text }))
        }
    }
}

/// POST /api/v1/sessions/:id/cv/start
pub async fn handle_start(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TurnResponse>, AppError> {
    let prompt = state.sessions.start_interview(&id)?;
    Ok(Json(prompt.into()))
}

/// POST /api/v1/sessions/:id/cv/answer
///
/// Interview-only variant of `/messages`: answers while idle are a 409.
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let (result, generation) = state.sessions.submit_answer(&id, &request.message)?;
    Ok(Json(drive(&state, &id, result, generation).await))
}

/// GET /api/v1/sessions/:id/cv
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CvDocument>, AppError> {
    state
        .sessions
        .completed_document(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No completed CV for session {id}")))
}

/// GET /api/v1/sessions/:id/cv/pdf
///
/// A render failure leaves the stored document untouched; the client may retry.
pub async fn handle_get_cv_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let document = state
        .sessions
        .completed_document(&id)?
        .ok_or_else(|| AppError::NotFound(format!("No completed CV for session {id}")))?;
    render_document(&state, &document).await
}

// ────────────────────────────────────────────────────────────────────────────
// Completion pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Converts a step result into a response, running enhancement on completion.
async fn drive(state: &AppState, id: &str, result: StepResult, generation: u64) -> TurnResponse {
    match result {
        StepResult::NextPrompt(prompt) => prompt.into(),
        StepResult::Complete { document } => {
            let enhanced = enhance_or_fallback(state.enhancer.as_ref(), &document).await;
            if !state.sessions.store_completed(id, generation, enhanced.clone()) {
                warn!("Session {id} moved on before its CV finished enhancing; result discarded");
            }
            TurnResponse::Complete {
                text: COMPLETE_MESSAGE.to_string(),
                document: enhanced,
            }
        }
    }
}
