pub mod health;
pub mod tree;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /trees              list, create
/// /trees/{id}         get, patch, delete
/// ```
///
/// Every resource route requires the `user_id` header.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(tree::router())
}
