//! Route definitions for the gift submission wizard.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

/// Submission wizard routes mounted at `/submissions`.
///
/// ```text
/// POST   /                   -> create_submission
/// GET    /{id}               -> get_submission
/// DELETE /{id}               -> cancel_submission
/// PUT    /{id}/fields        -> edit_field
/// POST   /{id}/tags          -> add_tag
/// DELETE /{id}/tags/{tag}    -> remove_tag
/// POST   /{id}/toggle        -> toggle_selection
/// POST   /{id}/advance       -> advance
/// POST   /{id}/go-back       -> go_back
/// POST   /{id}/commit        -> commit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submissions::create_submission))
        .route(
            "/{id}",
            get(submissions::get_submission).delete(submissions::cancel_submission),
        )
        .route("/{id}/fields", put(submissions::edit_field))
        .route("/{id}/tags", post(submissions::add_tag))
        .route("/{id}/tags/{tag}", delete(submissions::remove_tag))
        .route("/{id}/toggle", post(submissions::toggle_selection))
        .route("/{id}/advance", post(submissions::advance))
        .route("/{id}/go-back", post(submissions::go_back))
        .route("/{id}/commit", post(submissions::commit))
}
