use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::resume::generator::{generate_resume, ResumeArtifact, ResumeRequest, TailoredResume};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub status: &'static str,
    pub data: ResumeArtifact,
    pub preview: TailoredResume,
}

/// POST /api/generate-resume
///
/// Writes a resume tailored to the posted job description, renders it to PDF
/// and stores it in the `resume_generated` collection.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let generated = generate_resume(
        state.llm.as_ref(),
        &state.store,
        &state.renderer,
        &state.reports_dir(),
        &request,
    )
    .await?;

    Ok(Json(ResumeResponse {
        status: "success",
        data: generated.artifact,
        preview: generated.preview,
    }))
}
