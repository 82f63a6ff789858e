//! Axum route handlers for the analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::extractor::{extract, DocumentType};
use crate::analysis::report::{has_sufficient_text, AnalysisReport};
use crate::analysis::upload::StagedUpload;
use crate::analysis::vocabulary::CompanySelection;
use crate::errors::AppError;
use crate::state::AppState;

pub const NO_FILE_PROVIDED: &str = "No file provided";
pub const NO_FILE_SELECTED: &str = "No file selected";
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload PDF, DOCX, or TXT";
pub const INSUFFICIENT_TEXT: &str = "Could not extract sufficient text from resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct UploadedFile {
    filename: String,
    data: Bytes,
}

/// The multipart fields we care about. Other fields are skipped.
#[derive(Debug, Default)]
struct AnalyzeForm {
    file: Option<UploadedFile>,
    company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Multipart upload with `file` (pdf, docx or txt) and optional `company`
/// (`meta`, `amazon`, `netflix`, `google`, `all`; default `all`).
/// Validation failures return 400 before any scoring runs.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_form(multipart).await?;

    let upload = form
        .file
        .ok_or_else(|| AppError::Validation(NO_FILE_PROVIDED.to_string()))?;
    if upload.filename.is_empty() {
        return Err(AppError::Validation(NO_FILE_SELECTED.to_string()));
    }
    let doc_type = DocumentType::from_filename(&upload.filename)
        .ok_or_else(|| AppError::Validation(INVALID_FILE_TYPE.to_string()))?;

    let staged =
        StagedUpload::write(&state.config.upload_dir, doc_type.extension(), &upload.data).await?;
    let text = extract(staged.read().await?, doc_type).await?.into_text();

    if !has_sufficient_text(&text) {
        return Err(AppError::Validation(INSUFFICIENT_TEXT.to_string()));
    }

    let selection = form
        .company
        .as_deref()
        .map(CompanySelection::parse)
        .unwrap_or_default();
    let report = state.analyzer.analyze(&text, selection);

    info!(
        "Analyzed {doc_type} upload ({} bytes): ats={} overall={} companies={} suggestions={}",
        upload.data.len(),
        report.stats.ats_score,
        report.stats.overall_score,
        report.skills_gaps.len(),
        report.suggestions.len()
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        report,
    }))
}

/// Collects the first `file` upload and the first `company` part.
/// A `file` part with no `filename` parameter is a plain form value, not an
/// upload, and is skipped.
async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        match (name.as_deref(), filename) {
            (Some("file"), Some(filename)) if form.file.is_none() => {
                let data = field.bytes().await?;
                form.file = Some(UploadedFile { filename, data });
            }
            (Some("company"), _) if form.company.is_none() => {
                form.company = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(form)
}
