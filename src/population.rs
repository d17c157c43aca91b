// src/population.rs
//
// The population exports use a different layout from the category tables: a
// year appears once in column 0 and applies to every following row until the
// next year, and district names arrive wrapped in provincial noise
// ("Ankara(Akyurt)"). Two close variants exist, one per file.

use crate::table::{district_eq, normalize_district};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationRecord {
    pub year: String,
    pub district: String,
    pub population: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecord {
    pub year: String,
    pub district: String,
    pub growth_rate: f64,
}

fn read_lines(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "file missing, returning empty set");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("reading `{}`", path.display())),
    }
}

/// Population file: rows are either `year|district-part|value|...` (year rows
/// also carry data) or `|district-part|value|...` continuation rows under the
/// last seen year. Values are rounded to whole persons.
pub fn read_population(path: impl AsRef<Path>) -> Result<Vec<PopulationRecord>> {
    let Some(content) = read_lines(path.as_ref())? else {
        return Ok(Vec::new());
    };

    let mut result = Vec::new();
    let mut current_year = String::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();

        if !parts[0].is_empty() && parts[0].parse::<i32>().is_ok() {
            current_year = parts[0].to_string();
        } else if !parts[0].is_empty() {
            // Header or annotation row.
            continue;
        }
        if parts.len() < 3 || current_year.is_empty() {
            continue;
        }

        push_population(parts[1], parts[2], &current_year, &mut result);
    }

    Ok(result)
}

fn push_population(district_part: &str, value: &str, year: &str, out: &mut Vec<PopulationRecord>) {
    if district_part.is_empty() || value.is_empty() {
        return;
    }
    let Ok(population) = value.parse::<f64>() else {
        return;
    };
    if !population.is_finite() {
        return;
    }
    out.push(PopulationRecord {
        year: year.to_string(),
        district: normalize_district(district_part),
        population: population.round() as i64,
    });
}

/// Growth-rate file: a bare year on its own row opens a block; the rows that
/// follow are `district-part|rate` pairs. Year rows carry no data themselves.
pub fn read_growth(path: impl AsRef<Path>) -> Result<Vec<GrowthRecord>> {
    let Some(content) = read_lines(path.as_ref())? else {
        return Ok(Vec::new());
    };

    let mut result = Vec::new();
    let mut current_year = String::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split('|').filter(|p| !p.trim().is_empty()).collect();
        if parts.is_empty() {
            continue;
        }

        if parts[0].trim().parse::<i32>().is_ok() {
            current_year = parts[0].trim().to_string();
            continue;
        }

        if parts.len() >= 2 && !current_year.is_empty() {
            let district_part = parts[0].trim();
            let Ok(rate) = parts[1].trim().parse::<f64>() else {
                continue;
            };
            if !rate.is_finite() {
                continue;
            }
            result.push(GrowthRecord {
                year: current_year.clone(),
                district: normalize_district(district_part),
                growth_rate: rate,
            });
        }
    }

    Ok(result)
}

/// Case-insensitive exact district filter shared by both endpoint families.
pub fn filter_by_district<T, F>(records: Vec<T>, district: &str, name: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    records
        .into_iter()
        .filter(|r| district_eq(name(r), district))
        .collect()
}
