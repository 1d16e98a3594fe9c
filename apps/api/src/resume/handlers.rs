//! Axum route handlers for resume analysis and text enhancement.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{extract, DocumentKind};
use crate::llm_client::complete_or_sentinel;
use crate::resume::models::ResumeRecord;
use crate::resume::parser::parse_resume;
use crate::resume::prompts::{enhance_prompt, CAREER_ANALYSIS_PROMPT};
use crate::routes::form::FormFields;
use crate::state::AppState;

const SNIPPET_CHARS: usize = 300;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub extracted_text_snippet: String,
    #[serde(flatten)]
    pub record: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub original: String,
    pub improved: String,
}

#[derive(Debug, Serialize)]
pub struct CareerAnalysisResponse {
    pub analysis: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Parses an uploaded resume (preferred when non-empty) or raw `text` into a ResumeRecord.
/// AI failures degrade to the fallback record; only missing input is an error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = form.file("file").filter(|f| !f.bytes.is_empty());
    let extracted_text = if let Some(upload) = upload {
        let kind = DocumentKind::from_file_name(upload.file_name.as_deref());
        info!(
            "Analyzing uploaded {kind:?} resume ({} bytes)",
            upload.bytes.len()
        );
        extract(upload.bytes.clone(), kind).await
    } else if let Some(text) = form.text("text").filter(|t| !t.is_empty()) {
        text.to_string()
    } else {
        return Err(AppError::Validation("No text or file provided.".to_string()));
    };

    let parsed = parse_resume(&extracted_text, state.gateway.as_ref()).await;
    info!("Resume analysis source: {:?}", parsed.source);

    Ok(Json(AnalyzeResponse {
        extracted_text_snippet: extracted_text.chars().take(SNIPPET_CHARS).collect(),
        record: parsed.record,
    }))
}

/// POST /enhance
///
/// Rewrites `text` with the model. `purpose` defaults to "resume".
pub async fn handle_enhance(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<EnhanceResponse>, AppError> {
    let text = form.require("text")?;
    let purpose = form.text("purpose").unwrap_or("resume");

    let improved =
        complete_or_sentinel(state.gateway.as_ref(), &enhance_prompt(purpose, text)).await;

    Ok(Json(EnhanceResponse {
        original: text.to_string(),
        improved,
    }))
}

/// POST /analyze_resume
///
/// Free-form career advice for an uploaded PDF resume.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<CareerAnalysisResponse>, AppError> {
    let upload = form
        .file("file")
        .ok_or_else(|| AppError::Validation("Missing required file: file".to_string()))?;

    let text = extract(upload.bytes.clone(), DocumentKind::Pdf).await;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text found in resume.".to_string(),
        ));
    }

    let prompt = CAREER_ANALYSIS_PROMPT.replace("{resume_text}", &text);
    let analysis = complete_or_sentinel(state.gateway.as_ref(), &prompt).await;

    Ok(Json(CareerAnalysisResponse { analysis }))
}
