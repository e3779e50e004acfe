//! Axum route handlers for the Scoring API.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{
        multipart::{Multipart, MultipartError},
        rejection::BytesRejection,
        State,
    },
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::scoring::models::ResumeScore;
use crate::state::AppState;

/// Shortest resume text accepted for scoring, in characters.
pub const MIN_RESUME_CHARS: usize = 50;

const MULTIPART_FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/score`. Either `resumeText`, or the upload-flow fields.
///
/// `resumeText` is kept as a raw `Value` so a wrong type is reported as
/// "required" rather than as a malformed body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub resume_text: Option<Value>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    /// Base64 file contents, optionally as a `data:` URL.
    pub file_data: Option<String>,
}

/// What the caller actually sent, after the presence checks.
enum ResumeInput {
    Text(String),
    Document(UploadedDocument),
}

impl ScoreRequest {
    fn into_input(self) -> Result<ResumeInput, AppError> {
        if let Some(Value::String(text)) = self.resume_text {
            if !text.is_empty() {
                return Ok(ResumeInput::Text(text));
            }
        }

        match self.file_data.filter(|d| !d.is_empty()) {
            Some(data) => {
                let (media_type, payload) = split_data_url(&data);
                let bytes = STANDARD.decode(payload.trim()).map_err(|_| {
                    AppError::Validation("File data is not valid base64".to_string())
                })?;
                Ok(ResumeInput::Document(UploadedDocument {
                    file_name: self.file_name,
                    content_type: self.file_type.or(media_type),
                    bytes: Bytes::from(bytes),
                }))
            }
            None => Err(required()),
        }
    }
}

/// Splits `data:<type>;base64,<payload>` into its media type and payload.
/// Plain base64 is returned unchanged.
fn split_data_url(data: &str) -> (Option<String>, &str) {
    let Some(rest) = data.strip_prefix("data:") else {
        return (None, data);
    };
    match rest.split_once(',') {
        Some((header, payload)) => {
            let media_type = header.trim_end_matches(";base64");
            let media_type = (!media_type.is_empty()).then(|| media_type.to_string());
            (media_type, payload)
        }
        None => (None, data),
    }
}

fn required() -> AppError {
    AppError::Validation("Resume text is required".to_string())
}

/// Enforces the minimum length. Counted in characters, not bytes.
pub fn validate_resume_text(text: &str) -> Result<(), AppError> {
    if text.is_empty() {
        return Err(required());
    }
    if text.chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation("Resume text is too short".to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/score
///
/// Scores `resumeText`, or the text extracted from a base64 upload.
///
/// The body is parsed as JSON whatever `Content-Type` says.
pub async fn handle_score(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ResumeScore>, AppError> {
    let body = body.map_err(|rejection| {
        debug!("Failed to read score request body: {rejection}");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation("Invalid request body".to_string())
        }
    })?;
    let request: ScoreRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejected score request body: {e}");
        AppError::Validation("Invalid request body".to_string())
    })?;

    let text = match request.into_input()? {
        ResumeInput::Text(text) => text,
        ResumeInput::Document(document) => extract_text(&state, document).await?,
    };

    score_text(&state, &text).await
}

/// POST /api/score/upload
///
/// Multipart variant of the upload flow. Expects the document in a `file` field.
pub async fn handle_score_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeScore>, AppError> {
    let mut document = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(MULTIPART_FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        document = Some(UploadedDocument {
            file_name,
            content_type,
            bytes,
        });
        break;
    }

    let document = document.ok_or_else(|| {
        AppError::Validation(format!("A '{MULTIPART_FILE_FIELD}' field is required"))
    })?;
    let text = extract_text(&state, document).await?;

    score_text(&state, &text).await
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(e.body_text())
    }
}

/// Runs extraction off the async runtime; PDF parsing is CPU-bound.
async fn extract_text(state: &AppState, document: UploadedDocument) -> Result<String, AppError> {
    let extractor = Arc::clone(&state.extractor);
    let file_name = document.file_name.clone();
    let size = document.bytes.len();

    let text = tokio::task::spawn_blocking(move || extractor.extract(&document))
        .await
        .context("text extraction task failed")??;

    debug!(
        "Extracted {} chars from {} ({size} bytes)",
        text.chars().count(),
        file_name.as_deref().unwrap_or("unnamed upload")
    );
    Ok(text)
}

async fn score_text(state: &AppState, text: &str) -> Result<Json<ResumeScore>, AppError> {
    validate_resume_text(text)?;
    Ok(Json(state.scoring.score(text).await))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
