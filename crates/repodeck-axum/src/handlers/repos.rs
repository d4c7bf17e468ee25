//! Tracked repository handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::auth::AuthUser;
use crate::error::HttpError;
use crate::state::AppState;
use repodeck_core::{NewTrackedRepo, StoreError, TrackedRepo, parse_source_path};

/// Request body for tracking a repository.
#[derive(Deserialize)]
pub struct AddRepoRequest {
    /// Source path in `owner/name` form.
    pub path: String,
}

/// List the user's tracked repositories.
///
/// Kicks off a background sweep and returns the current snapshot without
/// waiting for it; clients see refreshed counters on a later call.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<TrackedRepo>>, HttpError> {
    let launched = state.coordinator.trigger_sweep(user_id);
    debug!(user_id, launched, "List triggered refresh sweep");

    let repos = state.stores.repos.list_for_user(user_id).await?;
    Ok(Json(repos))
}

/// Track a new repository.
///
/// The record is created immediately with placeholder counters; a
/// background refresh fills in real metadata shortly after.
pub async fn add(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<AddRepoRequest>,
) -> Result<(StatusCode, Json<TrackedRepo>), HttpError> {
    let path = parse_source_path(req.path.trim())?;

    let new_repo = NewTrackedRepo::placeholder(user_id, &path);
    let repo = match state.stores.repos.insert(&new_repo).await {
        Ok(repo) => repo,
        Err(StoreError::AlreadyExists(_)) => {
            return Err(HttpError::BadRequest(format!(
                "Repository '{path}' is already tracked"
            )));
        }
        Err(e) => return Err(e.into()),
    };

    // Fill in real metadata without blocking the response
    let coordinator = state.coordinator.clone();
    let repo_id = repo.id;
    tokio::spawn(async move {
        if let Err(e) = coordinator.refresh_single(user_id, repo_id).await {
            debug!(user_id, repo_id, error = %e, "Initial refresh failed");
        }
    });

    Ok((StatusCode::CREATED, Json(repo)))
}

/// Refresh one repository on demand.
///
/// The fetch is awaited but its outcome is absorbed; a 200 means the
/// refresh was attempted for a record the user owns, not that it
/// succeeded.
pub async fn refresh(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, HttpError> {
    state.coordinator.refresh_single(user_id, id).await?;
    Ok(Json(serde_json::json!({ "message": "Refresh completed" })))
}

/// Stop tracking a repository.
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, HttpError> {
    state.stores.repos.delete_for_user(id, user_id).await?;
    Ok(Json(serde_json::json!({ "message": "Repository removed" })))
}
