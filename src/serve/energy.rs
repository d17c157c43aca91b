// src/serve/energy.rs

use super::tables::table_route;
use super::AppState;
use axum::Router;

const FOLDER: &str = "ENERJİ VE ÇEVRE/İL BAZINDA";

pub fn routes() -> Router<AppState> {
    let file = |name: &str| format!("{FOLDER}/{name}");
    Router::new()
        .route(
            "/wastewater-treatment-capacity",
            table_route(file("atik_su_aritma_tesisi_kapasitesi.csv")),
        )
        .route(
            "/wastewater-treatment-count",
            table_route(file("atik_su_aritma_tesisi_sayisi.csv")),
        )
        .route("/electricity-consumption", table_route(file("elektrik_tuketimi.csv")))
        .route(
            "/drinking-water-treatment-count",
            table_route(file("icme_ve_kullanma_suyu_aritma_tesisi_sayisi.csv")),
        )
        .route(
            "/drinking-water-treated-volume",
            table_route(file(
                "icme_ve_kullanma_suyu_aritma_tesislerinde_aritilan_su_miktari.csv",
            )),
        )
        .route(
            "/per-capita-waste",
            table_route(file("kisi_basina_ortalama_belediye_atik_miktari.csv")),
        )
        .route(
            "/per-capita-electricity",
            table_route(file("kisi_basina_toplam_elektrik_tuketimi.csv")),
        )
}
