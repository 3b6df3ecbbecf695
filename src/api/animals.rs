use crate::store::{Animal, ZooStore};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for the animal query API
pub struct AnimalAppState {
    pub store: Arc<ZooStore>,
}

/// Query parameters for animal listing
#[derive(Deserialize)]
pub struct AnimalQueryParams {
    /// Filter by species (exact match)
    pub species: Option<String>,
    /// Filter by location code (exact match)
    pub location: Option<String>,
}

/// Animal record on the wire
#[derive(Serialize)]
pub struct AnimalResponse {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub sex: String,
    #[serde(rename = "digestionPeriodInHours")]
    pub digestion_period_in_hours: f64,
    pub herbivore: bool,
    pub location: Option<String>,
    #[serde(rename = "lastFedTime")]
    pub last_fed_time: Option<String>,
}

impl From<Animal> for AnimalResponse {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id,
            name: animal.name,
            species: animal.species,
            sex: animal.sex,
            digestion_period_in_hours: animal.digestion_period_in_hours,
            herbivore: animal.herbivore,
            location: animal.location,
            last_fed_time: animal.last_fed_time.map(|t| t.to_rfc3339()),
        }
    }
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create animal query API router
pub fn create_animal_router(state: Arc<AnimalAppState>) -> Router {
    Router::new()
        .route("/api/animals", get(list_animals))
        .route("/api/animals/:id", get(get_animal))
        .with_state(state)
}

/// GET /api/animals - List all animals
///
/// Query parameters:
/// - `species`: Filter by species (exact match, e.g. ?species=Sumatran%20tiger)
/// - `location`: Filter by location code (exact match, e.g. ?location=B4)
///
/// Both filters can be combined (AND logic).
async fn list_animals(
    State(state): State<Arc<AnimalAppState>>,
    Query(params): Query<AnimalQueryParams>,
) -> Json<Vec<AnimalResponse>> {
    let animals: Vec<AnimalResponse> = state
        .store
        .animals()
        .into_iter()
        .filter(|animal| {
            if let Some(ref species) = params.species {
                if &animal.species != species {
                    return false;
                }
            }

            if let Some(ref location) = params.location {
                if animal.location.as_deref() != Some(location.as_str()) {
                    return false;
                }
            }

            true
        })
        .map(AnimalResponse::from)
        .collect();

    Json(animals)
}

/// GET /api/animals/:id - Get one animal
async fn get_animal(
    State(state): State<Arc<AnimalAppState>>,
    Path(id): Path<i64>,
) -> Result<Json<AnimalResponse>, AnimalError> {
    let animal = state.store.animal(id).ok_or(AnimalError::NotFound)?;
    Ok(Json(AnimalResponse::from(animal)))
}

/// Animal query error types
#[derive(Debug)]
enum AnimalError {
    NotFound,
}

impl IntoResponse for AnimalError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AnimalError::NotFound => (StatusCode::NOT_FOUND, "Animal not found"),
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
        });

        (status, body).into_response()
    }
}
