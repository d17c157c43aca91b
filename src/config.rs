// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};
use tracing::info;

/// Environment variable naming an explicit config file path.
pub const CONFIG_ENV: &str = "PROVSTAT_CONFIG";
/// Environment override for the data corpus root.
pub const DATA_DIR_ENV: &str = "PROVSTAT_DATA_DIR";
/// Environment override for the listen address.
pub const BIND_ENV: &str = "PROVSTAT_BIND";
/// Completion service credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const DEFAULT_CONFIG_FILE: &str = "provstat.yaml";

/// Process-wide configuration, resolved once at startup and passed explicitly to
/// everything that touches the filesystem or the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listen address for the HTTP server.
    pub bind: String,
    /// Root of the statistical data corpus.
    pub data_dir: PathBuf,
    /// Province label; blank header columns resolve to "<province> (Genel)".
    pub province: String,
    pub advisor: AdvisorSettings,
    pub sampling: SamplingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: "0.0.0.0:8080".to_string(),
            data_dir: PathBuf::from("Data"),
            province: "Ankara".to_string(),
            advisor: AdvisorSettings::default(),
            sampling: SamplingSettings::default(),
        }
    }
}

/// Knobs for the advisory chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Credential for the completion service. Usually injected via OPENAI_API_KEY;
    /// its absence fails the ask request, never the data endpoints.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Domain folders under `data_dir` scanned when grounding an answer.
    pub folders: Vec<String>,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        AdvisorSettings {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            timeout_secs: 30,
            folders: vec![
                "Eğitim ve Kültür/İL BAZINDA".to_string(),
                "ENERJİ VE ÇEVRE/İL BAZINDA".to_string(),
                "İSTİHDAM VE İŞSİZLİK 2/İL BAZINDA".to_string(),
                "Nufus".to_string(),
                "TarımHayvancilik".to_string(),
                "Ulasım".to_string(),
            ],
        }
    }
}

/// Caps for the sampling/aggregation engine. The two observed deployments of the
/// original pipeline disagreed on several of these, so all of them are tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Records kept per contributing folder when grounding an answer.
    pub per_folder: usize,
    /// How many of the most frequent categories feed the prompt sample.
    pub top_categories: usize,
    /// Records taken per category, in corpus order.
    pub per_category: usize,
    /// Distinct category names reported per folder summary.
    pub summary_categories: usize,
    /// Category rows echoed back in `dataStats.categoriesUsed`.
    pub stats_display: usize,
    /// Sampled records echoed back in `dataStats.actualDataSample`.
    pub sample_display: usize,
    /// Category names embedded in the system prompt header.
    pub prompt_categories: usize,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        SamplingSettings {
            per_folder: 50,
            top_categories: 30,
            per_category: 20,
            summary_categories: 30,
            stats_display: 8,
            sample_display: 20,
            prompt_categories: 100,
        }
    }
}

impl AppConfig {
    /// Resolve configuration: environment overrides > YAML config file > defaults.
    pub fn load() -> Result<AppConfig> {
        let file = env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut cfg = Self::load_from(&file)?;

        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Ok(bind) = env::var(BIND_ENV) {
            cfg.bind = bind;
        }
        if let Ok(key) = env::var(API_KEY_ENV) {
            if !key.is_empty() {
                cfg.advisor.api_key = Some(key);
            }
        }

        Ok(cfg)
    }

    /// Read a config file without consulting the environment. Missing file is not
    /// an error; the defaults apply.
    pub fn load_from(file: &Path) -> Result<AppConfig> {
        let cfg = if file.is_file() {
            let raw = fs::read_to_string(file)
                .with_context(|| format!("reading config file `{}`", file.display()))?;
            let cfg: AppConfig = serde_yaml::from_str(&raw)
                .with_context(|| format!("parsing config file `{}`", file.display()))?;
            info!(config = %file.display(), "loaded config file");
            cfg
        } else {
            AppConfig::default()
        };

        Ok(cfg)
    }

    /// Province-wide sentinel used when a header column is blank.
    pub fn province_wide(&self) -> String {
        format!("{} (Genel)", self.province)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_when_no_file() -> Result<()> {
        let cfg = AppConfig::load_from(Path::new("/definitely/not/here.yaml"))?;
        assert_eq!(cfg.data_dir, PathBuf::from("Data"));
        assert_eq!(cfg.sampling.per_folder, 50);
        assert_eq!(cfg.sampling.top_categories, 30);
        assert_eq!(cfg.advisor.folders.len(), 6);
        Ok(())
    }

    #[test]
    fn file_overrides_defaults() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(
            f,
            "data_dir: /srv/stats\nprovince: Izmir\nsampling:\n  per_folder: 5\n  top_categories: 8"
        )?;
        let cfg = AppConfig::load_from(f.path())?;
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/stats"));
        assert_eq!(cfg.province, "Izmir");
        assert_eq!(cfg.province_wide(), "Izmir (Genel)");
        assert_eq!(cfg.sampling.per_folder, 5);
        assert_eq!(cfg.sampling.top_categories, 8);
        // untouched knobs keep their defaults
        assert_eq!(cfg.sampling.per_category, 20);
        assert_eq!(cfg.advisor.model, "gpt-4o-mini");
        Ok(())
    }
}
