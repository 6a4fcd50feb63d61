use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::{RecordSink, StorageError};
use crate::report::GamesReport;

/// Pretty-printed UTF-8 JSON, non-ASCII left as is.
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for JsonSink {
    fn format(&self) -> &'static str {
        "json"
    }

    fn emit(&mut self, report: &GamesReport) -> Result<PathBuf, StorageError> {
        let file = File::create(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, report).map_err(|e| StorageError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        writer
            .flush()
            .map_err(|e| StorageError::io(&self.path, e))?;

        Ok(self.path.clone())
    }
}
