//! Route definitions for browsing and voting on gifts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::gifts;
use crate::state::AppState;

/// Gift routes mounted at `/gifts`.
///
/// ```text
/// GET    /               -> list_gifts
/// GET    /{id}           -> get_gift
/// POST   /{id}/vote      -> vote_gift
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gifts::list_gifts))
        .route("/{id}", get(gifts::get_gift))
        .route("/{id}/vote", post(gifts::vote_gift))
}
