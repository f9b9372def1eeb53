//! Axum route handler for PDF generation.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::cv::CvDocument;
use crate::projection::project;
use crate::state::AppState;

/// Projects `document` into the configured template and renders it as a PDF
/// attachment. Neither step touches session state.
pub async fn render_document(state: &AppState, document: &CvDocument) -> Result<Response, AppError> {
    let html = project(document, &state.template, state.escaping)?;
    let pdf = state.renderer.render(&html).await?;
    info!("Serving rendered CV ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"cv.pdf\""),
        ],
        pdf,
    )
        .into_response())
}

/// POST /generate-cv
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(document): Json<CvDocument>,
) -> Result<Response, AppError> {
    render_document(&state, &document).await
}
