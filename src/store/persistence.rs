//! CSV-backed take list store.

use crate::error::{ApiError, StorageError};
use crate::record::TakeRecord;
use crate::store::TakeListStore;
use crate::types::Column;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Take list kept in a single CSV file, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct CsvTakeListStore {
    path: PathBuf,
}

impl CsvTakeListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn malformed(&self, line: u64, reason: impl Into<String>) -> ApiError {
        let err = ApiError::MalformedFile {
            path: self.path.clone(),
            line,
            reason: reason.into(),
        };
        error!("{}", err);
        err
    }

    fn parse(&self, content: &str) -> Result<Vec<TakeRecord>, ApiError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| self.malformed(1, e.to_string()))?
            .clone();
        let expected: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        if headers.iter().collect::<Vec<_>>() != expected {
            return Err(self.malformed(
                1,
                format!(
                    "unexpected header {:?} (expected {})",
                    headers.iter().collect::<Vec<_>>(),
                    expected.join(",")
                ),
            ));
        }

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<TakeRecord>().enumerate() {
            let fallback_line = idx as u64 + 2;
            let record = row.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                self.malformed(line, e.to_string())
            })?;
            record
                .validate()
                .map_err(|e| self.malformed(fallback_line, e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }

    fn encode(records: &[TakeRecord]) -> Result<Vec<u8>, StorageError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(Column::ALL.iter().map(|c| c.name()))?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.into_inner().map_err(|e| StorageError::Io {
            path: PathBuf::new(),
            source: std::io::Error::new(e.error().kind(), e.error().to_string()),
        })
    }
}

impl TakeListStore for CsvTakeListStore {
    fn load(&self) -> Result<Vec<TakeRecord>, ApiError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No take list at {}; starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source: e,
                }
                .into())
            }
        };
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
                let line = valid.iter().filter(|&&b| b == b'\n').count() as u64 + 1;
                return Err(self.malformed(line, "file is not valid UTF-8"));
            }
        };

        if content.trim().is_empty() {
            info!("Take list {} is empty", self.path.display());
            return Ok(Vec::new());
        }

        self.parse(&content)
    }

    fn save(&self, records: &[TakeRecord]) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let bytes = Self::encode(records)?;
        std::fs::write(&self.path, bytes).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        debug!("Wrote {} takes to {}", records.len(), self.path.display());
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
