//! Storage layer for the ti time tracker.
//!
//! The whole sheet lives in one JSON document with two top-level keys:
//!
//! ```json
//! {
//!   "work": [{"name": "docs", "start": "2026-03-10T09:00:00Z", "end": "2026-03-10T10:00:00Z", "notes": [], "tags": []}],
//!   "interrupt_stack": []
//! }
//! ```
//!
//! An entry without `end` is running. The document is loaded and dumped as a
//! whole; dumps go through a temporary file in the same directory that is then
//! renamed over the sheet, so a crash never leaves a truncated sheet behind.
//!
//! There is no locking: two processes writing at once race, and the last
//! rename wins.

pub mod edit;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use ti_core::{Store, WorkEntry, WorkLog};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The sheet file exists but could not be read.
    #[error("failed to read sheet {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sheet could not be written or moved into place.
    #[error("failed to write sheet {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sheet file is not valid JSON for a sheet document.
    #[error("failed to parse sheet {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize sheet: {0}")]
    Serialize(String),

    /// A document parsed but does not describe a valid sheet, or an edited
    /// document failed to parse.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Neither configuration nor the environment names an editor.
    #[error("no editor configured; set the EDITOR environment variable")]
    NoEditor,

    /// The editor could not be started or exited unsuccessfully.
    #[error("editor `{editor}` failed: {reason}")]
    Editor { editor: String, reason: String },

    #[error("temporary file error: {0}")]
    TempFile(#[source] io::Error),
}

/// On-disk shape of the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDocument {
    #[serde(default)]
    pub work: Vec<WorkEntry>,
    #[serde(default)]
    pub interrupt_stack: Vec<WorkEntry>,
}

impl SheetDocument {
    /// Converts the document into a log, checking the log invariants.
    pub fn into_log(self) -> Result<WorkLog, StoreError> {
        WorkLog::from_parts(self.work, self.interrupt_stack)
            .map_err(|err| StoreError::InvalidDocument(err.to_string()))
    }
}

impl From<&WorkLog> for SheetDocument {
    fn from(log: &WorkLog) -> Self {
        Self {
            work: log.entries().to_vec(),
            interrupt_stack: log.interrupt_stack().to_vec(),
        }
    }
}

/// Handle on a sheet file.
#[derive(Debug, Clone)]
pub struct SheetStore {
    path: PathBuf,
}

impl SheetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw document. A missing or blank file is an empty sheet.
    pub fn load_document(&self) -> Result<SheetDocument, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "sheet missing, starting empty");
                return Ok(SheetDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(SheetDocument::default());
        }

        let document: SheetDocument =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            path = %self.path.display(),
            entries = document.work.len(),
            interrupts = document.interrupt_stack.len(),
            "loaded sheet"
        );
        Ok(document)
    }

    /// Atomically replaces the sheet with `document`.
    pub fn dump_document(&self, document: &SheetDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;

        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let write_err = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        fs::create_dir_all(dir).map_err(write_err)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), entries = document.work.len(), "dumped sheet");
        Ok(())
    }
}

impl Store for SheetStore {
    type Error = StoreError;

    fn load(&self) -> Result<WorkLog, StoreError> {
        self.load_document()?.into_log()
    }

    fn dump(&self, log: &WorkLog) -> Result<(), StoreError> {
        self.dump_document(&SheetDocument::from(log))
    }
}
