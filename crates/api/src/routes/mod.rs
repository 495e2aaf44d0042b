pub mod generation;
pub mod health;
pub mod scene;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /generations           run batch (POST, auth), list records (GET, auth)
/// /generations/{id}      fetch one record (GET, auth)
/// /scenes                list the scene catalog (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/generations", generation::router())
        .nest("/scenes", scene::router())
}
