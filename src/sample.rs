// src/sample.rs
//
// A full corpus scan can run to thousands of records while the completion
// prompt has a hard size budget, so the advisory path works from a bounded,
// category-diverse subset. Prefix sampling would bias toward whichever folder
// happens to be scanned first; taking the top categories by frequency keeps
// rare-but-present domains visible.

use crate::config::SamplingSettings;
use crate::corpus;
use crate::table::StatRecord;
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// One row of the category frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Group records by category and sort descending by count. The sort is stable,
/// so categories with equal counts keep their first-encountered order.
pub fn category_stats(records: &[StatRecord]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for r in records {
        let slot = counts.entry(r.category.as_str()).or_insert(0);
        if *slot == 0 {
            order.push(r.category.as_str());
        }
        *slot += 1;
    }

    let mut stats: Vec<CategoryCount> = order
        .into_iter()
        .map(|category| CategoryCount {
            category: category.to_string(),
            count: counts[category],
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Build the prompt sample: for each of the top `top_categories` categories,
/// take up to `per_category` matching records in corpus order, concatenated in
/// frequency order. Categories with fewer records contribute all of them.
pub fn build_sample(
    records: &[StatRecord],
    stats: &[CategoryCount],
    top_categories: usize,
    per_category: usize,
) -> Vec<StatRecord> {
    let mut sample = Vec::new();
    for stat in stats.iter().take(top_categories) {
        sample.extend(
            records
                .iter()
                .filter(|r| r.category == stat.category)
                .take(per_category)
                .cloned(),
        );
    }
    sample
}

/// Per-folder diagnostics returned to the caller so it can audit what grounded
/// an answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSummary {
    pub folder: String,
    pub total_records: usize,
    pub used_records: usize,
    pub categories: Vec<String>,
}

/// Scan the configured domain folders under `root`, keeping the first
/// `per_folder` records from each. Folders that do not exist are skipped
/// without a summary entry.
pub fn scan_folders(
    root: &Path,
    folders: &[String],
    province_wide: &str,
    settings: &SamplingSettings,
) -> Result<(Vec<StatRecord>, Vec<FolderSummary>)> {
    let mut records = Vec::new();
    let mut summaries = Vec::new();

    for folder in folders {
        let folder_path = root.join(folder);
        if !folder_path.is_dir() {
            continue;
        }

        let folder_data = corpus::read_dir_tree(&folder_path, province_wide)?;
        let total = folder_data.len();
        let used = total.min(settings.per_folder);

        let mut categories = Vec::new();
        for r in &folder_data {
            if categories.len() >= settings.summary_categories {
                break;
            }
            if !categories.contains(&r.category) {
                categories.push(r.category.clone());
            }
        }

        debug!(folder = %folder, total, used, "scanned advisory folder");
        summaries.push(FolderSummary {
            folder: folder.clone(),
            total_records: total,
            used_records: used,
            categories,
        });
        records.extend(folder_data.into_iter().take(settings.per_folder));
    }

    Ok((records, summaries))
}
