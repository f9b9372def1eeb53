//! Axum route handler for one-shot CV enhancement.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::enhancement::enhance_or_fallback;
use crate::models::cv::CvDocument;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub enhanced_cv: CvDocument,
}

/// POST /enhance-cv
///
/// Never fails on enhancement errors: the input document is returned unchanged.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(document): Json<CvDocument>,
) -> Json<EnhanceResponse> {
    let enhanced_cv = enhance_or_fallback(state.enhancer.as_ref(), &document).await;
    Json(EnhanceResponse { enhanced_cv })
}
