use crate::grid::{compute_grid, ZoneStatus};
use crate::store::ZooStore;
use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Shared state for the grid API
pub struct GridAppState {
    pub store: Arc<ZooStore>,
}

/// One grid cell on the wire
#[derive(Serialize)]
pub struct ZoneStatusResponse {
    /// Cell code, e.g. "B4"
    pub id: String,
    #[serde(rename = "isSafe")]
    pub is_safe: bool,
    #[serde(rename = "maintenanceRequired")]
    pub maintenance_required: bool,
    /// Occupant names
    pub animals: Vec<String>,
}

impl From<ZoneStatus> for ZoneStatusResponse {
    fn from(status: ZoneStatus) -> Self {
        Self {
            id: status.zone.code(),
            is_safe: status.is_safe,
            maintenance_required: status.maintenance_required,
            animals: status.animals,
        }
    }
}

/// Create grid API router
pub fn create_grid_router(state: Arc<GridAppState>) -> Router {
    Router::new()
        .route("/api/grid", get(get_grid))
        .with_state(state)
}

/// GET /api/grid - The full 16x26 safety grid, row-major
///
/// Always answers from the last merged state; feed problems never surface
/// here.
async fn get_grid(State(state): State<Arc<GridAppState>>) -> Json<Vec<Vec<ZoneStatusResponse>>> {
    let grid = compute_grid(&state.store, Utc::now());

    Json(
        grid.into_iter()
            .map(|row| row.into_iter().map(ZoneStatusResponse::from).collect())
            .collect(),
    )
}
