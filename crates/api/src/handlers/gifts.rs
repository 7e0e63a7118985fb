//! Handlers for browsing, inspecting, and voting on gifts.
//!
//! Listing re-derives the visible sequence from the current store on every
//! request; nothing derived is cached between requests.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use giftreco_core::catalog::{Badge, Category, Interest, Occasion, Recipient};
use giftreco_core::error::CoreError;
use giftreco_core::price::PRICE_PRESETS;
use giftreco_core::ranking::{derive_visible, SortStrategy};
use giftreco_core::voting::{VoteDirection, VoteOutcome};

use crate::error::{AppError, AppResult};
use crate::query::GiftListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `POST /gifts/{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub direction: String,
}

/// Result of a vote. `applied` is false when the gift id is unknown.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub applied: bool,
    #[serde(flatten)]
    pub outcome: VoteOutcome,
}

/// One quick-select price bracket.
#[derive(Debug, Serialize)]
pub struct PricePresetView {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Everything the filter panel and submission form need to render choices.
#[derive(Debug, Serialize)]
pub struct ReferencesResponse<'a> {
    pub categories: &'a [Category],
    pub occasions: &'a [Occasion],
    pub recipients: &'a [Recipient],
    pub interests: &'a [Interest],
    pub badges: &'a [Badge],
    pub price_presets: Vec<PricePresetView>,
    pub sort_options: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject price bounds that are not finite, are negative, or are inverted.
fn validate_price_window(params: &GiftListParams) -> AppResult<()> {
    for (name, bound) in [("min_price", params.min_price), ("max_price", params.max_price)] {
        if let Some(value) = bound {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::BadRequest(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
    }
    if let (Some(min), Some(max)) = (params.min_price, params.max_price) {
        if min > max {
            return Err(AppError::BadRequest(format!(
                "min_price ({min}) must not exceed max_price ({max})"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /references
// ---------------------------------------------------------------------------

/// Facet and badge reference tables, price presets, and the accepted sort
/// keys.
pub async fn list_references(State(state): State<AppState>) -> AppResult<Response> {
    let store = state.catalog.store().await;
    let refs = store.references();

    let data = ReferencesResponse {
        categories: &refs.categories,
        occasions: &refs.occasions,
        recipients: &refs.recipients,
        interests: &refs.interests,
        badges: &refs.badges,
        price_presets: PRICE_PRESETS
            .iter()
            .map(|p| PricePresetView {
                label: p.label,
                min: p.min,
                max: p.max,
            })
            .collect(),
        sort_options: SortStrategy::ALL.iter().map(|s| s.as_str()).collect(),
    };

    let response = Json(DataResponse { data }).into_response();
    Ok(response)
}

// ---------------------------------------------------------------------------
// GET /gifts
// ---------------------------------------------------------------------------

/// Filter the store by the query's facets and price window, then sort.
pub async fn list_gifts(
    State(state): State<AppState>,
    Query(params): Query<GiftListParams>,
) -> AppResult<Response> {
    let strategy = params.sort_strategy()?;
    validate_price_window(&params)?;
    let selection = params.selection();

    let store = state.catalog.store().await;
    let visible = derive_visible(&store, &selection, strategy);

    tracing::debug!(
        sort = strategy.as_str(),
        active_filters = selection.active_filter_count(),
        visible = visible.len(),
        total = store.len(),
        "Derived gift list"
    );

    let data: Vec<_> = visible
        .into_iter()
        .map(|entry| store.references().resolve(entry))
        .collect();

    let response = Json(DataResponse { data }).into_response();
    Ok(response)
}

// ---------------------------------------------------------------------------
// GET /gifts/{id}
// ---------------------------------------------------------------------------

/// A single gift with its facet descriptors resolved.
pub async fn get_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let store = state.catalog.store().await;
    let entry = store.get(&id).ok_or_else(|| CoreError::NotFound {
        entity: "Gift",
        id: id.clone(),
    })?;

    let data = store.references().resolve(entry);
    let response = Json(DataResponse { data }).into_response();
    Ok(response)
}

// ---------------------------------------------------------------------------
// POST /gifts/{id}/vote
// ---------------------------------------------------------------------------

/// Count one upvote or downvote. Unknown ids are a no-op, not an error.
pub async fn vote_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    let direction = VoteDirection::parse(&body.direction)?;
    let outcome = state.catalog.vote(&id, direction).await;

    match &outcome {
        VoteOutcome::Applied {
            upvotes, downvotes, ..
        } => tracing::info!(
            gift_id = %id,
            direction = direction.as_str(),
            upvotes,
            downvotes,
            "Vote applied"
        ),
        VoteOutcome::UnknownGift { .. } => tracing::warn!(
            gift_id = %id,
            direction = direction.as_str(),
            "Vote for unknown gift ignored"
        ),
    }

    Ok(Json(DataResponse {
        data: VoteResponse {
            applied: outcome.is_applied(),
            outcome,
        },
    }))
}
