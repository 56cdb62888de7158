pub mod health;
pub mod occupancy;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /live                                   live upstream counts (GET)
/// /areas                                  area table (GET)
/// /log                                    record a snapshot (GET, POST)
/// /history?area=&days=&limit=             trend views for one area (GET)
/// /samples?area=&hours=                   raw samples for one area (GET)
/// /latest                                 newest sample per area (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(occupancy::router())
}
