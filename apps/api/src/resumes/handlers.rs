use axum::{
    extract::{Multipart, State},
    http::header::{self, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::analyze::{analyze_resume, AnalysisReport};
use crate::errors::AppError;
use crate::extract::{self, resolve_media_type};
use crate::models::resume::ParsedResume;
use crate::parser;
use crate::render::render_with_retry;
use crate::sanitize::{reduce::ReductionPolicy, sanitize};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseUploadResponse {
    pub resume: ParsedResume,
    pub media_type: &'static str,
    pub text_chars: usize,
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseUploadResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read the upload: {e}")))?;
            upload = Some((filename, content_type, data));
            break;
        }
    }

    let (filename, content_type, data) = upload.ok_or_else(|| {
        AppError::Validation(format!("Missing multipart field '{UPLOAD_FIELD}'"))
    })?;

    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let media_type = resolve_media_type(content_type.as_deref(), filename.as_deref())
        .ok_or_else(|| {
            let declared = content_type
                .or(filename)
                .unwrap_or_else(|| "unknown".to_string());
            AppError::UnsupportedMediaType(format!("Cannot handle '{declared}'"))
        })?;

    // Extraction is CPU-bound; run it off the async executor.
    let text = tokio::task::spawn_blocking(move || extract::extract(&data, media_type))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed: {e}")))??;

    let resume = parser::parse(&text, state.ids.as_ref());

    Ok(Json(ParseUploadResponse {
        resume,
        media_type: media_type.as_str(),
        text_chars: text.chars().count(),
    }))
}

/// POST /api/v1/resumes/render
pub async fn handle_render(
    State(state): State<AppState>,
    Json(untrusted): Json<Value>,
) -> Result<Response, AppError> {
    let resume = sanitize(&untrusted).map_err(|e| AppError::Validation(e.to_string()))?;

    let policy = ReductionPolicy::default();
    let document = render_with_retry(
        state.renderer.as_ref(),
        &policy,
        &resume,
        state.config.render_timeout_secs,
    )
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume.pdf\"",
            ),
            (
                HeaderName::from_static("x-render-tier"),
                document.tier.as_str(),
            ),
        ],
        document.bytes,
    )
        .into_response())
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(untrusted): Json<Value>,
) -> Result<Json<AnalysisReport>, AppError> {
    let resume = sanitize(&untrusted).map_err(|e| AppError::Validation(e.to_string()))?;
    let report = analyze_resume(&resume, state.llm.as_ref()).await;
    Ok(Json(report))
}
