use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{session_not_found, AppError};
use crate::export::encode::{encode, ExportFormat};
use crate::ranking::{ExportScope, FieldFlags};
use crate::state::AppState;

/// Scope and format arrive as strings so unknown values are reported as
/// invalid arguments instead of body rejections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRequest {
    pub scope: Option<String>,
    pub format: Option<String>,
    pub fields: FieldFlags,
}

/// POST /api/v1/sessions/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let scope = req
        .scope
        .as_deref()
        .map(str::parse::<ExportScope>)
        .transpose()?
        .unwrap_or_default();
    let format = req
        .format
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?
        .unwrap_or_default();

    let records = state
        .sessions
        .read(id, |s| s.export(scope, &req.fields))
        .await
        .ok_or_else(|| session_not_found(id))?;

    let body = encode(&records, &req.fields, format).map_err(|e| AppError::Internal(e.into()))?;
    let file_name = format.file_name(Utc::now());
    info!(session_id = %id, records = records.len(), %format, "export generated");

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response())
}
