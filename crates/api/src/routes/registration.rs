//! Route definitions for the `/formulario` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::{check, registration};
use crate::state::AppState;

/// Routes mounted at `/formulario`.
///
/// ```text
/// POST   /                  -> submit
/// GET    /                  -> method_not_allowed
/// POST   /check/{variant}   -> check (dry-run)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(registration::submit).get(registration::method_not_allowed),
        )
        .route("/check/{variant}", post(check::check))
}
