use anyhow::Result;
use provstat::{config::AppConfig, serve};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) resolve configuration ────────────────────────────────────
    let cfg = AppConfig::load()?;
    info!(
        data_dir = %cfg.data_dir.display(),
        bind = %cfg.bind,
        province = %cfg.province,
        "configuration resolved"
    );
    if !cfg.data_dir.is_dir() {
        warn!(data_dir = %cfg.data_dir.display(), "data directory missing; endpoints will serve empty sets");
    }
    if cfg.advisor.api_key.as_deref().unwrap_or("").is_empty() {
        warn!("OPENAI_API_KEY not set; /api/ask will refuse requests");
    }

    // ─── 3) serve ────────────────────────────────────────────────────
    serve::run(cfg).await
}
