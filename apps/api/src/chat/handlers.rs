//! Axum route handlers for the stateless chat API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::history::bounded_context;
use crate::chat::prompts::INTRO;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_message: String,
    /// Prior user utterances supplied by the client; only the last 10 are used.
    #[serde(default)]
    pub user_context: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct IntroResponse {
    pub intro: &'static str,
}

/// GET /intro
pub async fn handle_intro() -> Json<IntroResponse> {
    Json(IntroResponse { intro: INTRO })
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.user_message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("No message provided".to_string()));
    }

    let reply = state
        .chat
        .reply(message, bounded_context(&request.user_context))
        .await?;

    Ok(Json(ChatResponse { reply }))
}
