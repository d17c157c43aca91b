// src/corpus.rs

use crate::table::{self, StatRecord};
use anyhow::{Context, Result};
use glob::glob;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Recursively parse every `*.csv` under `root`, tagging each record with the
/// name of the file it came from. One unreadable file must not abort the scan:
/// per-file failures are logged and excluded. A missing root yields an empty
/// corpus.
pub fn read_dir_tree(root: impl AsRef<Path>, province_wide: &str) -> Result<Vec<StatRecord>> {
    let root = root.as_ref();
    if !root.is_dir() {
        debug!(root = %root.display(), "corpus root missing, returning empty corpus");
        return Ok(Vec::new());
    }

    let pattern = format!("{}/**/*.csv", root.display());
    let mut corpus = Vec::new();

    for entry in glob(&pattern).context("invalid glob pattern for corpus scan")? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "cannot read glob entry, skipping");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();

        match table::read_table(&path, province_wide) {
            Ok(records) => {
                corpus.extend(records.into_iter().map(|mut r| {
                    r.source_file = Some(file_name.clone());
                    r
                }));
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "table unreadable, excluded from corpus");
            }
        }
    }

    debug!(root = %root.display(), records = corpus.len(), "scanned corpus");
    Ok(corpus)
}

/// Diagnostic entry for the `files` listing endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Non-recursive listing of the CSV files directly under `dir`. Missing
/// directory yields an empty list.
pub fn list_csv_files(dir: impl AsRef<Path>) -> Result<Vec<CsvFile>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = format!("{}/*.csv", dir.display());
    let mut files = Vec::new();

    for entry in glob(&pattern).context("invalid glob pattern for file listing")? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "cannot read glob entry, skipping");
                continue;
            }
        };
        let Ok(meta) = path.metadata() else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        files.push(CsvFile {
            name: path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_default(),
            size: meta.len(),
            path,
        });
    }

    Ok(files)
}
