// src/serve/preview.rs
//
// Smoke-test endpoints: the first handful of records from a couple of known
// tables, handy for checking a deployment without pulling a full dataset.

use super::{error::ApiError, tables, AppState};
use crate::table::StatRecord;
use axum::{extract::State, routing::get, Json, Router};

const PREVIEW_LIMIT: usize = 10;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/livestock", get(livestock))
        .route("/beekeeping", get(beekeeping))
}

fn truncate(Json(records): Json<Vec<StatRecord>>) -> Json<Vec<StatRecord>> {
    Json(records.into_iter().take(PREVIEW_LIMIT).collect())
}

async fn livestock(State(state): State<AppState>) -> Result<Json<Vec<StatRecord>>, ApiError> {
    tables::read(&state, "TarımHayvancilik/CanliHayvanSayisi.csv").map(truncate)
}

async fn beekeeping(State(state): State<AppState>) -> Result<Json<Vec<StatRecord>>, ApiError> {
    tables::read(&state, "TarımHayvancilik/AricilikIsletmeSayisi.csv").map(truncate)
}
