// src/serve/education.rs

use super::tables::{table_route, table_route_with_category};
use super::AppState;
use axum::Router;

const FOLDER: &str = "Eğitim ve Kültür/İL BAZINDA";

pub fn routes() -> Router<AppState> {
    let file = |name: &str| format!("{FOLDER}/{name}");
    Router::new()
        .route("/students-per-school", table_route(file("okul_basina_ogrenci.csv")))
        .route("/students-per-teacher", table_route(file("ogretmen_basina_ogrenci.csv")))
        .route("/schooling-rate", table_route(file("net_okullasma.csv")))
        .route("/theatre-performance", table_route(file("tiyatro_gosteri.csv")))
        .route("/libraries", table_route(file("halk_kutuphane.csv")))
        .route(
            "/literacy-rate",
            table_route_with_category(file("okuma_yazma.csv"), "Okuma Yazma"),
        )
}
