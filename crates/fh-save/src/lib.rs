//! fh-save: Save/restore of scenario outcome state
//!
//! The outcome state is stored next to a small header so that files from
//! an incompatible build are rejected instead of silently misread.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fh_core::EvaluationState;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

const SAVE_MAGIC: &str = "FHRS";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("outcome save I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("outcome save is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no outcome save at {0}")]
    NotFound(PathBuf),

    #[error("outcome save format {found} is not supported (this build writes {expected})")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("not an outcome save (magic {0:?})")]
    InvalidHeader(String),
}

/// Identifies the file and the turn it was written on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveHeader {
    pub magic: String,
    pub version: u32,
    /// 1-based turn of the last evaluation
    pub turn: u32,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl SaveHeader {
    pub fn new(turn: u32) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self {
            magic: SAVE_MAGIC.to_string(),
            version: SAVE_VERSION,
            turn,
            timestamp,
        }
    }

    /// Reject files written by something else or by another format version
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != SAVE_MAGIC {
            return Err(SaveError::InvalidHeader(self.magic.clone()));
        }
        match self.version {
            SAVE_VERSION => Ok(()),
            found => Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub outcome: EvaluationState,
}

/// Save outcome state to a file
pub fn save_outcome(state: &EvaluationState, turn: u32, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let save_file = SaveFile {
        header: SaveHeader::new(turn),
        outcome: *state,
    };

    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), &save_file)?;
    log::debug!("saved outcome state to {}", path.as_ref().display());
    Ok(())
}

fn read_save(path: &Path) -> Result<SaveFile, SaveError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SaveError::NotFound(path.to_path_buf()),
        _ => SaveError::Io(e),
    })?;
    let save_file: SaveFile = serde_json::from_reader(BufReader::new(file))?;
    save_file.header.validate()?;
    Ok(save_file)
}

/// Load outcome state from a file
pub fn load_outcome(path: impl AsRef<Path>) -> Result<EvaluationState, SaveError> {
    Ok(read_save(path.as_ref())?.outcome)
}

/// Load only the header from a save file
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    Ok(read_save(path.as_ref())?.header)
}

/// Path of a named save slot, creating the saves directory if needed
pub fn default_save_path(slot: &str) -> Result<PathBuf, SaveError> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("fheroes-rs");
    path.push("saves");
    std::fs::create_dir_all(&path)?;
    path.push(format!("{slot}.json"));
    Ok(path)
}
