// src/advisor/mod.rs
//
// The advisory endpoint grounds an LLM answer in the statistical corpus. The
// corpus is re-read from disk per request, capped per folder, then reduced to
// a category-diverse sample that fits the prompt budget. Whatever was sent to
// the model is echoed back in `dataStats` so callers can audit the grounding.

pub mod client;

use crate::config::AppConfig;
use crate::sample::{self, CategoryCount, FolderSummary};
use crate::table::StatRecord;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

pub use client::{AdvisorError, CompletionClient, PLACEHOLDER_REPLY};

/// Reply used when the corpus yields nothing at all. Distinct from a
/// zero-value answer: there was no data to reason over.
pub const NO_DATA_REPLY: &str = "No statistical data is available to ground an answer.";

#[derive(Debug, Error)]
pub enum AskError {
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Diagnostics returned alongside every grounded answer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStats {
    pub total_records: usize,
    pub used_records: usize,
    pub reading_summary: Vec<FolderSummary>,
    pub categories_used: Vec<CategoryCount>,
    pub actual_data_sample: Vec<StatRecord>,
}

pub enum AskOutcome {
    /// The corpus was empty; no request was sent to the completion service.
    NoData,
    Answered { reply: String, stats: DataStats },
}

/// One record, one line. This is the literal rendering injected into the
/// system prompt.
pub fn render_context(records: &[StatRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "category: {}, subCategory: {}, year: {}, district: {}, value: {}",
                r.category, r.sub_category, r.year, r.district, r.value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The system instruction: who the assistant is, which categories exist, and
/// the sampled data it may cite.
pub fn render_system_prompt(
    stats: &[CategoryCount],
    context: &str,
    prompt_categories: usize,
) -> String {
    let categories = stats
        .iter()
        .take(prompt_categories)
        .map(|c| c.category.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an investment advisor. Analyze the following district-level \
         statistics for the province and answer with concrete investment advice.\n\n\
         Data categories: {categories}\n\n\
         Data details:\n{context}\n\n\
         Ground every answer in this data."
    )
}

/// Run the full advisory flow for one user message.
#[instrument(level = "info", skip_all)]
pub async fn ask(
    cfg: &AppConfig,
    client: &CompletionClient,
    message: &str,
) -> Result<AskOutcome, AskError> {
    if !client.has_credential() {
        return Err(AdvisorError::MissingCredential.into());
    }

    let sentinel = cfg.province_wide();
    let (records, reading_summary) = sample::scan_folders(
        &cfg.data_dir,
        &cfg.advisor.folders,
        &sentinel,
        &cfg.sampling,
    )?;

    if records.is_empty() {
        info!("advisory corpus empty, skipping completion call");
        return Ok(AskOutcome::NoData);
    }

    let stats = sample::category_stats(&records);
    let sampled = sample::build_sample(
        &records,
        &stats,
        cfg.sampling.top_categories,
        cfg.sampling.per_category,
    );

    let context = render_context(&sampled);
    let system = render_system_prompt(&stats, &context, cfg.sampling.prompt_categories);

    info!(
        total = records.len(),
        sampled = sampled.len(),
        categories = stats.len(),
        "submitting advisory completion"
    );
    let reply = client.complete(&system, message).await?;

    let stats = DataStats {
        total_records: records.len(),
        used_records: sampled.len(),
        reading_summary,
        categories_used: stats
            .into_iter()
            .take(cfg.sampling.stats_display)
            .collect(),
        actual_data_sample: sampled
            .into_iter()
            .take(cfg.sampling.sample_display)
            .collect(),
    };

    Ok(AskOutcome::Answered { reply, stats })
}

/// Debug breakdown: the uncapped per-category view of everything the advisory
/// folders contain. No completion call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: usize,
    pub sub_categories: usize,
    pub source_files: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub total_records: usize,
    pub total_categories: usize,
    pub category_breakdown: Vec<CategoryBreakdown>,
}

pub fn debug_report(cfg: &AppConfig) -> anyhow::Result<DebugReport> {
    let sentinel = cfg.province_wide();
    let mut records = Vec::new();
    for folder in &cfg.advisor.folders {
        let folder_path = cfg.data_dir.join(folder);
        if !folder_path.is_dir() {
            continue;
        }
        records.extend(crate::corpus::read_dir_tree(&folder_path, &sentinel)?);
    }

    let stats = sample::category_stats(&records);
    let breakdown: Vec<CategoryBreakdown> = stats
        .into_iter()
        .map(|stat| {
            let mut sub_categories = Vec::new();
            let mut source_files = Vec::new();
            for r in records.iter().filter(|r| r.category == stat.category) {
                if !sub_categories.contains(&r.sub_category) {
                    sub_categories.push(r.sub_category.clone());
                }
                if let Some(src) = &r.source_file {
                    if !source_files.contains(src) {
                        source_files.push(src.clone());
                    }
                }
            }
            CategoryBreakdown {
                category: stat.category,
                count: stat.count,
                sub_categories: sub_categories.len(),
                source_files,
            }
        })
        .collect();

    Ok(DebugReport {
        total_records: records.len(),
        total_categories: breakdown.len(),
        category_breakdown: breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, district: &str, value: f64) -> StatRecord {
        StatRecord {
            category: category.to_string(),
            sub_category: "Sub".to_string(),
            year: "2020".to_string(),
            district: district.to_string(),
            value,
            source_file: None,
        }
    }

    #[test]
    fn context_renders_one_line_per_record() {
        let records = vec![record("Bees", "Akyurt", 134.0), record("Cattle", "Çankaya", 2.5)];
        let context = render_context(&records);
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "category: Bees, subCategory: Sub, year: 2020, district: Akyurt, value: 134"
        );
        assert_eq!(
            lines[1],
            "category: Cattle, subCategory: Sub, year: 2020, district: Çankaya, value: 2.5"
        );
    }

    #[test]
    fn system_prompt_embeds_capped_category_list() {
        let stats = vec![
            CategoryCount { category: "A".into(), count: 3 },
            CategoryCount { category: "B".into(), count: 2 },
            CategoryCount { category: "C".into(), count: 1 },
        ];
        let prompt = render_system_prompt(&stats, "ctx", 2);
        assert!(prompt.contains("Data categories: A, B\n"));
        assert!(!prompt.contains(", C"));
        assert!(prompt.contains("Data details:\nctx"));
    }
}
