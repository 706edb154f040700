//! Route definitions for server actions.

use axum::routing::post;
use axum::Router;

use crate::handlers::actions;
use crate::state::AppState;

/// Routes mounted at `/actions`.
///
/// ```text
/// POST   /submit-form   -> submit_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/submit-form", post(actions::submit_form))
}
