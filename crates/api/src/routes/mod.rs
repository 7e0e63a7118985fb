pub mod gifts;
pub mod health;
pub mod submissions;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /references                          facet tables, price presets, sort keys
///
/// /gifts                               derived list (filter + sort)
/// /gifts/{id}                          single gift
/// /gifts/{id}/vote                     upvote / downvote (POST)
///
/// /submissions                         open a wizard (POST)
/// /submissions/{id}                    wizard state, cancel (DELETE)
/// /submissions/{id}/fields             edit one field (PUT)
/// /submissions/{id}/tags               add a tag (POST)
/// /submissions/{id}/tags/{tag}         remove a tag (DELETE)
/// /submissions/{id}/toggle             toggle a facet id (POST)
/// /submissions/{id}/advance            step 1 -> 2 (POST)
/// /submissions/{id}/go-back            step 2 -> 1 (POST)
/// /submissions/{id}/commit             create the gift (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/references", get(handlers::gifts::list_references))
        .nest("/gifts", gifts::router())
        .nest("/submissions", submissions::router())
}
