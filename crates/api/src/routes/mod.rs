pub mod actions;
pub mod health;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /formulario                      submit (POST), method_not_allowed (GET)
/// /formulario/check/{variant}      dry-run validation (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/formulario", registration::router())
}

/// Build the `/actions` route tree.
///
/// ```text
/// /submit-form                     server action (POST, urlencoded)
/// ```
pub fn action_routes() -> Router<AppState> {
    actions::router()
}
