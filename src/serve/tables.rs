// src/serve/tables.rs
//
// Every category-table endpoint is the same thin shape: resolve one relative
// file under the data root, parse it, return the records. A missing file is a
// deployment state, not a client error, so it serves 200 with an empty list.

use super::{error::ApiError, AppState};
use crate::table::{self, StatRecord};
use axum::{extract::State, routing::get, routing::MethodRouter, Json};

pub fn read(state: &AppState, rel: &str) -> Result<Json<Vec<StatRecord>>, ApiError> {
    let path = state.cfg.data_dir.join(rel);
    let records = table::read_table(path, &state.cfg.province_wide())?;
    Ok(Json(records))
}

pub fn read_with_category(
    state: &AppState,
    rel: &str,
    category: &str,
) -> Result<Json<Vec<StatRecord>>, ApiError> {
    let path = state.cfg.data_dir.join(rel);
    let records = table::read_table_with_category(path, &state.cfg.province_wide(), category)?;
    Ok(Json(records))
}

/// GET route serving one table file.
pub fn table_route(rel: impl Into<String>) -> MethodRouter<AppState> {
    let rel = rel.into();
    get(move |State(state): State<AppState>| {
        let rel = rel.clone();
        async move { read(&state, &rel) }
    })
}

/// GET route for files whose category column is semantically a sub-category;
/// every record gets the fixed `category` label.
pub fn table_route_with_category(
    rel: impl Into<String>,
    category: impl Into<String>,
) -> MethodRouter<AppState> {
    let rel = rel.into();
    let category = category.into();
    get(move |State(state): State<AppState>| {
        let rel = rel.clone();
        let category = category.clone();
        async move { read_with_category(&state, &rel, &category) }
    })
}
