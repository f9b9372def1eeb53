use std::sync::Arc;

use crate::chat::ChatGateway;
use crate::enhancement::EnhancementGateway;
use crate::interview::store::SessionStore;
use crate::projection::Escaping;
use crate::render::RenderGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Per-conversation interview and chat state.
    pub sessions: SessionStore,
    pub chat: Arc<dyn ChatGateway>,
    /// Best-effort CV rewrite. Failures fall back to the original document.
    pub enhancer: Arc<dyn EnhancementGateway>,
    pub renderer: Arc<dyn RenderGateway>,
    /// CV template, read once at startup.
    pub template: Arc<str>,
    pub escaping: Escaping,
}
