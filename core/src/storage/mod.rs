//! Output adapters for the exported record tree.
//!
//! Every format sits behind [`RecordSink`] so the run only needs to know it is
//! emitting a [`GamesReport`], not how it is laid out on disk.

mod columnar;
mod json;
mod summary;

use std::path::{Path, PathBuf};

use fraglog_types::OutputFormats;
use thiserror::Error;

use crate::report::{AnalysisSummary, GamesReport};

pub use columnar::{ParquetSink, games_schema};
pub use json::JsonSink;
pub use summary::{write_analysis_json, write_analysis_text};

pub const GAMES_JSON: &str = "games.json";
pub const GAMES_PARQUET: &str = "games.parquet";
pub const ANALYSIS_TEXT: &str = "analyses.txt";
pub const ANALYSIS_JSON: &str = "analyses.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error writing {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error writing {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build record batch for {path:?}")]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },
    #[error("parquet error writing {path:?}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Something that can persist the exported record tree.
pub trait RecordSink {
    /// Short format name for logs ("json", "parquet")
    fn format(&self) -> &'static str;

    /// Write the report, returning the file written.
    fn emit(&mut self, report: &GamesReport) -> Result<PathBuf, StorageError>;
}

/// Sinks enabled by `formats`, all writing into `out_dir`.
pub fn sinks_for(formats: &OutputFormats, out_dir: &Path) -> Vec<Box<dyn RecordSink>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();
    if formats.json {
        sinks.push(Box::new(JsonSink::new(out_dir.join(GAMES_JSON))));
    }
    if formats.parquet {
        sinks.push(Box::new(ParquetSink::new(out_dir.join(GAMES_PARQUET))));
    }
    sinks
}

/// Write the report through every enabled sink, then both analysis files.
/// Returns every path written, in write order.
pub fn export_all(
    report: &GamesReport,
    analysis: &AnalysisSummary,
    formats: &OutputFormats,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, StorageError> {
    std::fs::create_dir_all(out_dir).map_err(|e| StorageError::io(out_dir, e))?;

    let mut written = Vec::new();
    for mut sink in sinks_for(formats, out_dir) {
        let path = sink.emit(report)?;
        tracing::info!(format = sink.format(), path = %path.display(), "Wrote games");
        written.push(path);
    }

    written.push(write_analysis_text(analysis, &out_dir.join(ANALYSIS_TEXT))?);
    written.push(write_analysis_json(analysis, &out_dir.join(ANALYSIS_JSON))?);
    Ok(written)
}
