// src/serve/population.rs

use super::{error::ApiError, AppState};
use crate::population::{self, GrowthRecord, PopulationRecord};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

const POPULATION_FILE: &str = "Nufus/ANKARA_ILCE_NUFUSLARI.csv";
const GROWTH_FILE: &str = "Nufus/YILLIK_NUFUS_ARTIS_HIZI.csv";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(population_all))
        .route("/{district}", get(population_by_district))
}

pub fn growth_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(growth_all))
        .route("/{district}", get(growth_by_district))
}

async fn population_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<PopulationRecord>>, ApiError> {
    let records = population::read_population(state.cfg.data_dir.join(POPULATION_FILE))?;
    Ok(Json(records))
}

async fn population_by_district(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Result<Json<Vec<PopulationRecord>>, ApiError> {
    let records = population::read_population(state.cfg.data_dir.join(POPULATION_FILE))?;
    let hits = population::filter_by_district(records, &district, |r| &r.district);
    if hits.is_empty() {
        return Err(ApiError::NotFound(format!("no data for district: {district}")));
    }
    Ok(Json(hits))
}

async fn growth_all(State(state): State<AppState>) -> Result<Json<Vec<GrowthRecord>>, ApiError> {
    let records = population::read_growth(state.cfg.data_dir.join(GROWTH_FILE))?;
    Ok(Json(records))
}

async fn growth_by_district(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Result<Json<Vec<GrowthRecord>>, ApiError> {
    let records = population::read_growth(state.cfg.data_dir.join(GROWTH_FILE))?;
    let hits = population::filter_by_district(records, &district, |r| &r.district);
    if hits.is_empty() {
        return Err(ApiError::NotFound(format!("no data for district: {district}")));
    }
    Ok(Json(hits))
}
