//! Route definitions for the `/trees` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tree;
use crate::state::AppState;

/// Tree routes.
///
/// ```text
/// GET    /trees        -> list
/// POST   /trees        -> create
/// GET    /trees/{id}   -> get_by_id
/// PATCH  /trees/{id}   -> update
/// DELETE /trees/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trees", get(tree::list).post(tree::create))
        .route(
            "/trees/{id}",
            get(tree::get_by_id)
                .patch(tree::update)
                .delete(tree::delete),
        )
}
