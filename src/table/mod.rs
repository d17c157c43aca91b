// src/table/mod.rs
//
// Parser for the pipe-delimited statistical tables. The files are irregular:
// categories are written once per block and apply to every following row,
// header rows and footnotes are interleaved with data, and cells for missing
// district/year combinations are simply non-numeric. All of that is tolerated
// by skipping, never by erroring — the upstream exports are known to be messy.

pub mod district;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path};
use tracing::debug;

pub use district::{district_eq, normalize_district, resolve_header};

/// One district/year observation, flattened out of the hierarchical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    pub year: String,
    pub district: String,
    pub value: f64,
    /// Provenance tag, attached only when records come out of a directory scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// Where the `category` field of emitted records comes from.
#[derive(Clone, Copy)]
enum CategorySource<'a> {
    /// Column 0, with carry-forward across rows.
    Column,
    /// A caller-supplied label; used for files whose first column is
    /// semantically a sub-category only.
    Fixed(&'a str),
}

/// Running carry-forward state for one file's parse pass.
#[derive(Default)]
struct Carry {
    category: String,
    sub_category: String,
}

/// Read one table file. Layout: line 0 title (ignored), line 1 pipe-delimited
/// header whose first two columns are placeholders and the rest are district
/// names in positional order, line 2 separator/units (ignored), lines 3.. data.
///
/// A missing file is an empty result, not an error.
pub fn read_table(path: impl AsRef<Path>, province_wide: &str) -> Result<Vec<StatRecord>> {
    read_with(path.as_ref(), province_wide, CategorySource::Column)
}

/// Variant for files whose category column only carries sub-categories: every
/// record gets `main_category`, the rest of the row/cell rules are unchanged.
pub fn read_table_with_category(
    path: impl AsRef<Path>,
    province_wide: &str,
    main_category: &str,
) -> Result<Vec<StatRecord>> {
    read_with(path.as_ref(), province_wide, CategorySource::Fixed(main_category))
}

fn read_with(
    path: &Path,
    province_wide: &str,
    source: CategorySource<'_>,
) -> Result<Vec<StatRecord>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "table file missing, returning empty set");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading table file `{}`", path.display()))
        }
    };

    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 4 {
        return Ok(Vec::new());
    }

    // Line 1 carries the district columns; the first two cells are the
    // category/sub-category column labels. A leading delimiter produces a
    // phantom empty field that would shift every district one column left.
    let mut header_fields: Vec<&str> = lines[1].split('|').collect();
    if matches!(header_fields.first(), Some(h) if h.is_empty()) {
        header_fields.remove(0);
    }
    let headers: Vec<&str> = header_fields.into_iter().skip(2).collect();

    let mut records = Vec::new();
    let mut carry = Carry::default();

    for line in &lines[3..] {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() < 3 {
            continue;
        }

        if !parts[0].trim().is_empty() {
            carry.category = parts[0].trim().to_string();
        }
        if !parts[1].trim().is_empty() {
            carry.sub_category = parts[1].trim().to_string();
        }

        let year = parts[2].trim();
        if year.parse::<i32>().is_err() {
            // Stray header, footer or annotation row.
            continue;
        }

        let category = match source {
            CategorySource::Column => carry.category.as_str(),
            CategorySource::Fixed(label) => label,
        };

        let values = &parts[3..];
        for (header, cell) in headers.iter().zip(values.iter()) {
            let Ok(value) = cell.trim().parse::<f64>() else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }
            records.push(StatRecord {
                category: category.to_string(),
                sub_category: carry.sub_category.clone(),
                year: year.to_string(),
                district: resolve_header(header, province_wide),
                value,
                source_file: None,
            });
        }
    }

    debug!(path = %path.display(), records = records.len(), "parsed table");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SENTINEL: &str = "Ankara (Genel)";

    fn write_table(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn well_formed_round_trip() -> Result<()> {
        let f = write_table(
            "Some Title\n|cat|sub|DistrictA|DistrictB\n||||\nCat1||2020|10|20\n|Sub1|2021|30|40\n",
        );
        let records = read_table(f.path(), SENTINEL)?;

        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0],
            StatRecord {
                category: "Cat1".into(),
                sub_category: "".into(),
                year: "2020".into(),
                district: "DistrictA".into(),
                value: 10.0,
                source_file: None,
            }
        );
        assert_eq!(records[1].district, "DistrictB");
        assert_eq!(records[1].value, 20.0);
        assert_eq!(records[2].category, "Cat1");
        assert_eq!(records[2].sub_category, "Sub1");
        assert_eq!(records[3].year, "2021");
        assert_eq!(records[3].value, 40.0);
        Ok(())
    }

    #[test]
    fn category_carries_forward_until_overwritten() -> Result<()> {
        let f = write_table(
            "t\n|c|s|A\n||||\nLivestock||2019|1\n||2020|2\nPoultry||2021|3\n||2022|4\n",
        );
        let records = read_table(f.path(), SENTINEL)?;
        let cats: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(cats, vec!["Livestock", "Livestock", "Poultry", "Poultry"]);
        Ok(())
    }

    #[test]
    fn non_integer_year_rows_are_skipped() -> Result<()> {
        let f = write_table("t\n|c|s|A\n||||\nCat||not-a-year|5\nCat||Toplam|6\nCat||2020|7\n");
        let records = read_table(f.path(), SENTINEL)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, "2020");
        Ok(())
    }

    #[test]
    fn unparseable_cells_are_skipped_not_zeroed() -> Result<()> {
        let f = write_table("t\n|c|s|A|B|C\n||||\nCat||2020|10|-|30\n");
        let records = read_table(f.path(), SENTINEL)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].district, "A");
        assert_eq!(records[0].value, 10.0);
        assert_eq!(records[1].district, "C");
        assert_eq!(records[1].value, 30.0);
        Ok(())
    }

    #[test]
    fn blank_header_column_becomes_province_wide() -> Result<()> {
        let f = write_table("t\n|c|s||B\n||||\nCat||2020|100|200\n");
        let records = read_table(f.path(), SENTINEL)?;
        assert_eq!(records[0].district, SENTINEL);
        assert_eq!(records[1].district, "B");
        Ok(())
    }

    #[test]
    fn ragged_rows_pair_only_the_overlap() -> Result<()> {
        // Two headers, four values: trailing values dropped.
        let f = write_table("t\n|c|s|A|B\n||||\nCat||2020|1|2|3|4\n");
        let records = read_table(f.path(), SENTINEL)?;
        assert_eq!(records.len(), 2);

        // Four headers, one value: missing columns simply absent.
        let f = write_table("t\n|c|s|A|B|C|D\n||||\nCat||2020|1\n");
        let records = read_table(f.path(), SENTINEL)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].district, "A");
        Ok(())
    }

    #[test]
    fn short_rows_are_skipped() -> Result<()> {
        let f = write_table("t\n|c|s|A\n||||\njust-one-field\ntwo|fields\nCat||2020|1\n");
        let records = read_table(f.path(), SENTINEL)?;
        assert_eq!(records.len(), 1);
        Ok(())
    }

    #[test]
    fn short_file_yields_empty() -> Result<()> {
        let f = write_table("title\n|c|s|A\n||||\n");
        assert!(read_table(f.path(), SENTINEL)?.is_empty());

        let f = write_table("");
        assert!(read_table(f.path(), SENTINEL)?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_file_yields_empty_without_error() -> Result<()> {
        let records = read_table("/no/such/path/table.csv", SENTINEL)?;
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn fixed_category_variant_overrides_column() -> Result<()> {
        let f = write_table("t\n|c|s|A\n||||\nIgnored|Cattle|2020|5\n|Sheep|2021|6\n");
        let records = read_table_with_category(f.path(), SENTINEL, "Hayvancılık")?;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.category == "Hayvancılık"));
        assert_eq!(records[0].sub_category, "Cattle");
        // Sub-category still carries forward in the variant.
        assert_eq!(records[1].sub_category, "Sheep");
        Ok(())
    }

    #[test]
    fn negative_and_decimal_values_parse() -> Result<()> {
        let f = write_table("t\n|c|s|A|B\n||||\nCat||2020|-3.25|0.001\n");
        let records = read_table(f.path(), SENTINEL)?;
        assert_eq!(records[0].value, -3.25);
        assert_eq!(records[1].value, 0.001);
        Ok(())
    }
}
