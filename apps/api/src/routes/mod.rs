pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::enhancement::handlers as enhancement;
use crate::interview::handlers as interview;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless API
        .route("/intro", get(chat::handle_intro))
        .route("/chat", post(chat::handle_chat))
        .route("/enhance-cv", post(enhancement::handle_enhance))
        .route("/generate-cv", post(render::handle_generate))
        // Conversation API
        .route("/api/v1/sessions", post(interview::handle_create_session))
        .route("/api/v1/sessions/:id", delete(interview::handle_delete_session))
        .route("/api/v1/sessions/:id/messages", post(interview::handle_message))
        .route("/api/v1/sessions/:id/cv", get(interview::handle_get_cv))
        .route("/api/v1/sessions/:id/cv/start", post(interview::handle_start))
        .route("/api/v1/sessions/:id/cv/answer", post(interview::handle_answer))
        .route("/api/v1/sessions/:id/cv/pdf", get(interview::handle_get_cv_pdf))
        .with_state(state)
}
