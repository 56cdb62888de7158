use std::sync::Arc;

use recwatch_core::areas::AreaTable;
use recwatch_core::error::CoreError;
use recwatch_db::DbPool;
use recwatch_upstream::FacilityCountClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, absent when `DATABASE_URL` is unset.
    pub pool: Option<DbPool>,
    /// Client for the facility-count API.
    pub upstream: Arc<FacilityCountClient>,
    /// Raw location name to area mapping.
    pub areas: Arc<AreaTable>,
}

impl AppState {
    /// The database pool, or a configuration error if none was configured.
    ///
    /// Storage-backed handlers call this before doing any other work.
    pub fn pool(&self) -> Result<&DbPool, CoreError> {
        self.pool
            .as_ref()
            .ok_or(CoreError::ConfigurationMissing("DATABASE_URL"))
    }
}
