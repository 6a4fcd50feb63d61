use std::fs;
use std::path::{Path, PathBuf};

use super::StorageError;
use crate::report::AnalysisSummary;

pub fn write_analysis_text(summary: &AnalysisSummary, path: &Path) -> Result<PathBuf, StorageError> {
    fs::write(path, summary.render_text()).map_err(|e| StorageError::io(path, e))?;
    Ok(path.to_path_buf())
}

pub fn write_analysis_json(summary: &AnalysisSummary, path: &Path) -> Result<PathBuf, StorageError> {
    let content = serde_json::to_string_pretty(summary).map_err(|e| StorageError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, content).map_err(|e| StorageError::io(path, e))?;
    Ok(path.to_path_buf())
}
