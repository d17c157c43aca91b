// src/serve/employment.rs

use super::tables::table_route;
use super::{error::ApiError, AppState};
use crate::corpus::{self, CsvFile};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

const FOLDER: &str = "İSTİHDAM VE İŞSİZLİK 2/İL BAZINDA";

pub fn routes() -> Router<AppState> {
    let file = |name: &str| format!("{FOLDER}/{name}");
    Router::new()
        .route(
            "/labor-participation-rate",
            table_route(file("ISGUCU_KATILMA_ORANI.csv")),
        )
        .route("/unemployment-rate", table_route(file("ISSIZLIK_ORANI.csv")))
        .route("/employment-rate", table_route(file("ISTIHDAM_ORANI.csv")))
        .route("/files", get(list_files))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListing {
    pub base_path: String,
    pub total_files: usize,
    pub files: Vec<CsvFile>,
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
