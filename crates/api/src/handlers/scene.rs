//! Handler for the scene catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One selectable scene, as shown in client scene pickers. Prompt
/// fragments stay server-side.
#[derive(Debug, Serialize)]
pub struct SceneInfo {
    pub id: &'static str,
    pub label: &'static str,
}

/// GET /api/v1/scenes
///
/// Lists the static scene catalog in catalog order.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let scenes: Vec<SceneInfo> = state
        .orchestrator
        .catalog()
        .all()
        .iter()
        .map(|s| SceneInfo {
            id: s.id,
            label: s.label,
        })
        .collect();

    Ok(Json(DataResponse { data: scenes }))
}
