// HTTP read API

pub mod animals;
pub mod grid;

pub use animals::{create_animal_router, AnimalAppState};
pub use grid::{create_grid_router, GridAppState};
