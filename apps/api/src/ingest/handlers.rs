use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{session_not_found, AppError};
use crate::ingest::parser::UploadedFile;
use crate::ingest::{check_batch_size, into_candidates, normalize_job_description, validate_uploads};
use crate::models::candidate::{Candidate, ParsedResume};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestParsedRequest {
    pub resumes: Vec<ParsedResume>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub session_id: Uuid,
    pub candidates: Vec<Candidate>,
    pub matched_to_job_description: bool,
    pub parser_backend: &'static str,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Malformed upload: {}", e.body_text()))
    }
}

/// POST /api/v1/sessions/:id/resumes
///
/// Multipart form: one or more `file` parts, optional `jobDescription` text.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>, AppError> {
    let role = state
        .sessions
        .read(id, |s| s.role())
        .await
        .ok_or_else(|| session_not_found(id))?;

    let mut files = Vec::new();
    let mut job_description = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                files.push(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some("jobDescription") => {
                job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    validate_uploads(&files, role)?;
    let job_description = normalize_job_description(job_description);

    let records = state
        .parser
        .parse(&files, job_description.as_deref())
        .await?;
    let candidates = into_candidates(records)?;

    info!(
        session_id = %id,
        files = files.len(),
        candidates = candidates.len(),
        backend = state.parser.backend(),
        "resumes analyzed"
    );

    let backend = state.parser.backend();
    store_batch(&state, id, candidates, job_description, backend).await
}

/// POST /api/v1/sessions/:id/candidates
///
/// Ingests records that were already parsed elsewhere.
pub async fn handle_ingest_parsed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<IngestParsedRequest>,
) -> Result<Json<IngestResponse>, AppError> {
    let role = state
        .sessions
        .read(id, |s| s.role())
        .await
        .ok_or_else(|| session_not_found(id))?;
    check_batch_size(req.resumes.len(), role)?;

    let candidates = into_candidates(req.resumes)?;
    info!(session_id = %id, candidates = candidates.len(), "parsed resumes ingested");

    let job_description = normalize_job_description(req.job_description);
    store_batch(&state, id, candidates, job_description, "client").await
}

async fn store_batch(
    state: &AppState,
    id: Uuid,
    candidates: Vec<Candidate>,
    job_description: Option<String>,
    parser_backend: &'static str,
) -> Result<Json<IngestResponse>, AppError> {
    for c in &candidates {
        debug!(
            session_id = %id,
            candidate_id = %c.id(),
            file = c.file_name(),
            "candidate ingested"
        );
    }
    let matched_to_job_description = job_description.is_some();
    let stored = candidates.clone();
    state
        .sessions
        .write(id, move |s| s.load(candidates, job_description))
        .await
        .ok_or_else(|| session_not_found(id))?;

    Ok(Json(IngestResponse {
        session_id: id,
        candidates: stored,
        matched_to_job_description,
        parser_backend,
    }))
}
