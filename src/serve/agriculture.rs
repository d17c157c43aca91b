// src/serve/agriculture.rs

use super::tables::{table_route, table_route_with_category};
use super::AppState;
use axum::Router;

const FOLDER: &str = "TarımHayvancilik";

pub fn routes() -> Router<AppState> {
    let file = |name: &str| format!("{FOLDER}/{name}");
    Router::new()
        .route("/beekeeping", table_route(file("AricilikIsletmeSayisi.csv")))
        .route("/poultry", table_route(file("DigerKumesHayvanlari.csv")))
        .route("/chicken", table_route(file("EtTavuguSayisi.csv")))
        .route("/fallow-land", table_route(file("NadasAlani.csv")))
        .route("/greenhouse", table_route(file("OrtuluTarimAlani.csv")))
        .route("/tractors", table_route(file("TraktorSayisi.csv")))
        .route("/wheat", table_route(file("UretimMiktariDurumBugdayi.csv")))
        .route(
            "/livestock",
            table_route_with_category(file("CanliHayvanSayisi.csv"), "Hayvancılık"),
        )
}
