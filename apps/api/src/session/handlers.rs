use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{session_not_found, AppError};
use crate::ranking::{
    ComparisonView, SelectionSet, SortDirection, SortField, ToggleOutcome, MAX_SELECTION,
};
use crate::session::{DashboardView, Role, SessionSummary, ViewConfig};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RoleRequest {
    pub role: Option<String>,
}

impl RoleRequest {
    fn role(&self) -> Result<Role, AppError> {
        Ok(self
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()?
            .unwrap_or_default())
    }
}

/// Enum values arrive as strings and are parsed explicitly, so a bad value is
/// an invalid-argument error rather than a silent default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUpdate {
    pub query: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SortPress {
    pub field: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub outcome: ToggleOutcome,
    pub selected: SelectionSet,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<RoleRequest>>,
) -> Result<(StatusCode, Json<SessionSummary>), AppError> {
    let role = body.map(|Json(b)| b).unwrap_or_default().role()?;
    let session = state.sessions.create(role).await;
    Ok((StatusCode::CREATED, Json(session.summary())))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    state
        .sessions
        .read(id, |s| s.summary())
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// PUT /api/v1/sessions/:id/role
///
/// Switching role starts over: candidates, selection and view are cleared.
pub async fn handle_switch_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RoleRequest>,
) -> Result<Json<SessionSummary>, AppError> {
    let role = req.role()?;
    state
        .sessions
        .write(id, |s| {
            s.reset(role);
            s.summary()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// PATCH /api/v1/sessions/:id/view
pub async fn handle_update_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ViewUpdate>,
) -> Result<Json<ViewConfig>, AppError> {
    let sort_field = req
        .sort_field
        .as_deref()
        .map(str::parse::<SortField>)
        .transpose()?;
    let sort_direction = req
        .sort_direction
        .as_deref()
        .map(str::parse::<SortDirection>)
        .transpose()?;

    state
        .sessions
        .write(id, move |s| {
            let view = s.view_mut();
            if let Some(query) = req.query {
                view.query = query;
            }
            if let Some(field) = sort_field {
                view.sort_field = field;
            }
            if let Some(direction) = sort_direction {
                view.sort_direction = direction;
            }
            view.clone()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// POST /api/v1/sessions/:id/view/sort
pub async fn handle_press_sort(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SortPress>,
) -> Result<Json<ViewConfig>, AppError> {
    let field: SortField = req.field.parse()?;
    state
        .sessions
        .write(id, |s| {
            s.view_mut().press_sort(field);
            s.view().clone()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// GET /api/v1/sessions/:id/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, AppError> {
    state
        .sessions
        .read(id, |s| s.dashboard())
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// POST /api/v1/sessions/:id/selection/:candidate_id
pub async fn handle_toggle_selection(
    State(state): State<AppState>,
    Path((id, candidate_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SelectionResponse>, AppError> {
    let result = state
        .sessions
        .write(id, |s| {
            s.toggle_selection(candidate_id)
                .map(|outcome| (outcome, s.selection().clone()))
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    let (outcome, selected) = result
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    if outcome == ToggleOutcome::Ignored {
        tracing::debug!(
            session_id = %id,
            %candidate_id,
            limit = MAX_SELECTION,
            "selection full, toggle ignored"
        );
    } else if selected.is_full() {
        tracing::debug!(session_id = %id, "selection reached its limit");
    }
    Ok(Json(SelectionResponse { outcome, selected }))
}

/// GET /api/v1/sessions/:id/comparison
pub async fn handle_comparison(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ComparisonView>, AppError> {
    let view = state
        .sessions
        .read(id, |s| s.comparison())
        .await
        .ok_or_else(|| session_not_found(id))?;
    if view.is_empty() {
        tracing::debug!(session_id = %id, "comparison requested with nothing selected");
    }
    Ok(Json(view))
}
