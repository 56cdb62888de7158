//! Route definitions for occupancy endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::occupancy;
use crate::state::AppState;

/// Occupancy routes mounted at `/api`.
///
/// ```text
/// GET       /live       -> get_live
/// GET       /areas      -> list_areas
/// GET, POST /log        -> log_snapshot
/// GET       /history    -> get_history
/// GET       /samples    -> list_samples
/// GET       /latest     -> get_latest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Upstream passthrough.
        .route("/live", get(occupancy::get_live))
        .route("/areas", get(occupancy::list_areas))
        // Snapshot logging (cron-friendly: accepts GET as well as POST).
        .route(
            "/log",
            get(occupancy::log_snapshot).post(occupancy::log_snapshot),
        )
        // Stored history.
        .route("/history", get(occupancy::get_history))
        .route("/samples", get(occupancy::list_samples))
        .route("/latest", get(occupancy::get_latest))
}
