use anyhow::{Context, Result};
use chrono::Local;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::statistics::ReportRow;

/// Writes report rows to a timestamped CSV file in `dir` and returns its path.
pub fn export_csv(rows: &[ReportRow], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Could not create statistics directory {:?}", dir))?;
    let path = dir.join(format!(
        "stats_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ));

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Could not create statistics file {:?}", path))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Exported {} statistics rows to {:?}", rows.len(), path);
    Ok(path)
}
