//! Handlers for scene generation and generation records.
//!
//! Routes:
//! - `POST /generations`      -- run a generation batch
//! - `GET  /generations`      -- list the caller's records
//! - `GET  /generations/{id}` -- fetch one record

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use sceneshot_core::error::CoreError;
use sceneshot_db::models::generation::GenerateScenesRequest;
use sceneshot_db::repositories::GenerationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/generations
///
/// Runs one generation batch for the authenticated caller: validates
/// the request, generates every resolved scene, stores the results,
/// and returns the batch summary.
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GenerateScenesRequest>,
) -> AppResult<impl IntoResponse> {
    let response = state
        .orchestrator
        .generate(&input, &user.identity)
        .await
        .map_err(AppError::Core)?;

    Ok(Json(DataResponse { data: response }))
}

/// GET /api/v1/generations
///
/// Lists the caller's generation records, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let records = GenerationRepo::list_for_user(&state.pool, &user.identity).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/generations/{id}
///
/// Fetches one of the caller's generation records. Records owned by
/// other callers are indistinguishable from missing ones.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let record = GenerationRepo::find_by_id_for_user(&state.pool, &id, &user.identity)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Generation",
            id,
        }))?;

    Ok(Json(DataResponse { data: record }))
}
