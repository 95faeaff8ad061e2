//! Handlers for the `/trees` resource.
//!
//! Every handler takes a [`Caller`] first, so a missing `user_id` header
//! is rejected before the body is read or the store is touched. For
//! single-record operations existence is checked before ownership: a
//! missing id is 404 for every caller, and 403 only means "exists, not
//! yours".

use arbor_core::error::CoreError;
use arbor_core::tree::{validate_new_tree, validate_tree_patch};
use arbor_core::types::DbId;
use arbor_db::models::tree::Tree;
use arbor_db::repositories::TreeRepo;
use arbor_db::DbPool;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{Caller, JsonObject};
use crate::state::AppState;

const ENTITY: &str = "Tree";

fn not_found(raw_id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY,
        id: raw_id.to_string(),
    })
}

/// Resolve a path id to a tree owned by `caller`.
///
/// An id that is not an integer cannot name a row and is reported as 404.
async fn find_owned(pool: &DbPool, raw_id: &str, caller: &Caller) -> AppResult<Tree> {
    let id: DbId = raw_id.parse().map_err(|_| not_found(raw_id))?;

    let tree = TreeRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(raw_id))?;

    if tree.owner_id != caller.as_str() {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{ENTITY} {id} is not owned by the caller"
        ))));
    }
    Ok(tree)
}

/// GET /trees
///
/// An owner with no trees gets 404 rather than an empty array.
pub async fn list(State(state): State<AppState>, caller: Caller) -> AppResult<Json<Vec<Tree>>> {
    let trees = TreeRepo::list_by_owner(&state.pool, caller.as_str()).await?;
    tracing::debug!(count = trees.len(), owner_id = %caller.as_str(), "Listed trees");

    if trees.is_empty() {
        return Err(not_found("*"));
    }
    Ok(Json(trees))
}

/// GET /trees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Tree>> {
    let tree = find_owned(&state.pool, &raw_id, &caller).await?;
    Ok(Json(tree))
}

/// POST /trees
///
/// `id`, `owner_id` and `created_at` in the body are ignored; the server
/// assigns them.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<Tree>)> {
    let input = validate_new_tree(&body).map_err(CoreError::Validation)?;

    let tree = TreeRepo::create(&state.pool, caller.as_str(), &input).await?;
    tracing::info!(id = tree.id, owner_id = %tree.owner_id, name = %tree.name, "Tree created");

    Ok((StatusCode::CREATED, Json(tree)))
}

/// PATCH /trees/{id}
///
/// The request is taken unread and its body is buffered only after the
/// target is known to exist and belong to the caller, so a missing or
/// foreign id is 404/403 whatever the body holds. The whole patch is
/// validated before anything is written; one bad key rejects all of it.
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
    request: Request,
) -> AppResult<Json<Tree>> {
    let existing = find_owned(&state.pool, &raw_id, &caller).await?;

    let JsonObject(body) = JsonObject::from_request(request, &state).await?;
    let patch = validate_tree_patch(&body).map_err(CoreError::Validation)?;

    // A concurrent delete between lookup and write surfaces as 404.
    let tree = TreeRepo::update(&state.pool, existing.id, caller.as_str(), &patch)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    tracing::info!(id = tree.id, fields = body.len(), "Tree updated");

    Ok(Json(tree))
}

/// DELETE /trees/{id}
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let existing = find_owned(&state.pool, &raw_id, &caller).await?;

    if TreeRepo::delete(&state.pool, existing.id, caller.as_str()).await? {
        tracing::info!(id = existing.id, "Tree deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&raw_id))
    }
}
