use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::dataset::Dataset;

pub fn export_file_name(date: NaiveDate) -> String {
    format!("snowflake_permissions_{}.json", date.format("%Y-%m-%d"))
}

/// Writes the full dataset, pretty-printed, into `dir` under today's UTC date.
pub fn export_dataset(dataset: &Dataset, dir: &Path) -> Result<PathBuf> {
    export_dataset_on(dataset, dir, chrono::Utc::now().date_naive())
}

pub fn export_dataset_on(dataset: &Dataset, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(export_file_name(date));
    let json = serde_json::to_string_pretty(dataset).context("failed to serialize dataset")?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported permissions dataset");
    Ok(path)
}
