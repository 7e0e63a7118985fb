//! Handlers for the two-step gift submission wizard.
//!
//! Each open wizard is addressed by a session id handed out on creation.
//! Blocked transitions are not HTTP errors: the response carries the wizard
//! with its step unchanged and the per-field messages filled in.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use giftreco_core::submission::{
    DraftEntry, DraftField, FieldEdit, FieldErrors, FieldValue, SubmissionWizard,
};
use giftreco_core::types::GiftId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `PUT /submissions/{id}/fields`.
#[derive(Debug, Deserialize)]
pub struct EditFieldRequest {
    pub field: String,
    pub value: FieldValue,
}

/// Body for `POST /submissions/{id}/tags`.
#[derive(Debug, Deserialize)]
pub struct AddTagRequest {
    pub tag: String,
}

/// Body for `POST /submissions/{id}/toggle`.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub field: String,
    pub id: String,
}

/// A wizard as rendered to the client.
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub id: String,
    pub step: u8,
    pub step_label: &'static str,
    pub draft: DraftEntry,
    pub errors: FieldErrors,
}

impl WizardView {
    fn new(id: String, wizard: &SubmissionWizard) -> Self {
        Self {
            id,
            step: wizard.step().to_number(),
            step_label: wizard.step().label(),
            draft: wizard.draft().clone(),
            errors: wizard.errors().clone(),
        }
    }
}

/// Result of `POST /submissions/{id}/commit`.
#[derive(Debug, Serialize)]
pub struct CommitResponse {
    pub committed: bool,
    pub gift_id: Option<GiftId>,
    pub submission: WizardView,
}

// ---------------------------------------------------------------------------
// POST /submissions
// ---------------------------------------------------------------------------

/// Open a new wizard on step 1 with an empty draft.
pub async fn create_submission(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (id, wizard) = state.catalog.open_wizard().await;

    tracing::info!(submission_id = %id, "Submission wizard opened");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: WizardView::new(id, &wizard),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /submissions/{id}
// ---------------------------------------------------------------------------

pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let wizard = state.catalog.wizard(&id).await?;
    Ok(Json(DataResponse {
        data: WizardView::new(id, &wizard),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /submissions/{id}
// ---------------------------------------------------------------------------

/// Cancel a wizard. The draft is discarded and the store is untouched.
pub async fn cancel_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.close_wizard(&id).await?;
    tracing::info!(submission_id = %id, "Submission wizard cancelled");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// PUT /submissions/{id}/fields
// ---------------------------------------------------------------------------

/// Replace one draft field. Clears that field's recorded error.
pub async fn edit_field(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<EditFieldRequest>,
) -> AppResult<impl IntoResponse> {
    let field = DraftField::parse(&body.field)?;
    let edit = FieldEdit {
        field,
        value: body.value,
    };

    let ((), wizard) = state
        .catalog
        .update_wizard(&id, |wizard| wizard.edit(edit))
        .await?;

    tracing::debug!(submission_id = %id, field = field.as_str(), "Draft field edited");

    Ok(Json(DataResponse {
        data: WizardView::new(id, &wizard),
    }))
}

// ---------------------------------------------------------------------------
// POST /submissions/{id}/tags
// ---------------------------------------------------------------------------

pub async fn add_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AddTagRequest>,
) -> AppResult<impl IntoResponse> {
    let (added, wizard) = state
        .catalog
        .update_wizard(&id, |wizard| Ok(wizard.add_tag(&body.tag)))
        .await?;

    tracing::debug!(submission_id = %id, tag = %body.tag, added, "Tag add requested");

    Ok(Json(DataResponse {
        data: WizardView::new(id, &wizard),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /submissions/{id}/tags/{tag}
// ---------------------------------------------------------------------------

pub async fn remove_tag(
    State(state): State<AppState>,
    Path((id, tag)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let ((), wizard) = state
        .catalog
        .update_wizard(&id, |wizard| {
            wizard.remove_tag(&tag);
            Ok(())
        })
        .await?;

    Ok(Json(DataResponse {
        data: WizardView::new(id, &wizard),
    }))
}

// ---------------------------------------------------------------------------
// POST /submissions/{id}/toggle
// ---------------------------------------------------------------------------

/// Select or deselect one facet id on the draft.
pub async fn toggle_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ToggleRequest>,
) -> AppResult<impl IntoResponse> {
    let field = DraftField::parse(&body.field)?;
    let ((), wizard) = state
        .catalog
        .update_wizard(&id, |wizard| wizard.toggle_selection(field, &body.id))
        .await?;

    Ok(Json(DataResponse {
        data: WizardView::new(id, &wizard),
    }))
}

// ---------------------------------------------------------------------------
// POST /submissions/{id}/advance
// ---------------------------------------------------------------------------

/// Validate the details step and move to the facets step if it passes.
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (moved, wizard) = state
        .catalog
        .update_wizard(&id, |wizard| Ok(wizard.advance()))
        .await?;

    tracing::info!(
        submission_id = %id,
        moved,
        error_count = wizard.errors().len(),
        "Submission advance requested"
    );

    Ok(Json(DataResponse {
        data: WizardView::new(id, &wizard),
    }))
}

// ---------------------------------------------------------------------------
// POST /submissions/{id}/go-back
// ---------------------------------------------------------------------------

pub async fn go_back(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let ((), wizard) = state
        .catalog
        .update_wizard(&id, |wizard| {
            wizard.retreat();
            Ok(())
        })
        .await?;

    Ok(Json(DataResponse {
        data: WizardView::new(id, &wizard),
    }))
}

// ---------------------------------------------------------------------------
// POST /submissions/{id}/commit
// ---------------------------------------------------------------------------

/// Create the gift from the draft. Responds 201 when a gift was created and
/// 200 with the blocking errors otherwise.
///
/// A created gift closes the session; the response still carries the reset
/// wizard under the old id.
pub async fn commit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let result = state
        .catalog
        .commit_wizard(&id, &state.config.acting_user_id, Utc::now())
        .await?;

    let status = match &result.gift_id {
        Some(gift_id) => {
            tracing::info!(
                submission_id = %id,
                gift_id = %gift_id,
                submitted_by = %state.config.acting_user_id,
                "Gift submitted"
            );
            StatusCode::CREATED
        }
        None => {
            tracing::info!(
                submission_id = %id,
                error_count = result.wizard.errors().len(),
                "Submission commit blocked"
            );
            StatusCode::OK
        }
    };

    Ok((
        status,
        Json(DataResponse {
            data: CommitResponse {
                committed: result.gift_id.is_some(),
                gift_id: result.gift_id,
                submission: WizardView::new(id, &result.wizard),
            },
        }),
    ))
}
