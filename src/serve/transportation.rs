// src/serve/transportation.rs

use super::employment::FileListing;
use super::tables::table_route;
use super::{error::ApiError, AppState};
use crate::corpus;
use axum::{extract::State, routing::get, Json, Router};

const FOLDER: &str = "Ulasım";

pub fn routes() -> Router<AppState> {
    let file = |name: &str| format!("{FOLDER}/{name}");
    Router::new()
        .route("/vehicle-count", table_route(file("otomobil_sayisi.csv")))
        .route("/vehicle-average-age", table_route(file("tasit_yaslari.csv")))
        .route("/files", get(list_files))
}

async fn list_files(State(state): State<AppState>) -> Result<Json<FileListing>, ApiError> {
    let dir = state.cfg.data_dir.join(FOLDER);
    let files = corpus::list_csv_files(&dir)?;
    Ok(Json(FileListing {
        base_path: dir.display().to_string(),
        total_files: files.len(),
        files,
    }))
}
