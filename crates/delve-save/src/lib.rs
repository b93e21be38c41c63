//! delve-save: save and restore for the Delve dungeon crawler.
//!
//! A save file is the magic bytes `DLVE`, a little-endian u32 header
//! length, a JSON [`SaveHeader`], and then the binary session body
//! produced by [`codec::encode_session`]. The header is validated before
//! a single body byte is touched, and a restored session is checked
//! against every game invariant before it is handed back.

pub mod codec;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use delve_core::Session;
use delve_core::errors::ValidationError;

use crate::codec::FormatError;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save file magic bytes
const SAVE_MAGIC: &[u8; 4] = b"DLVE";

/// Largest header we are willing to read back
const MAX_HEADER_LEN: usize = 4096;

/// Save/restore errors.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a delve save file (bad magic)")]
    InvalidMagic,

    #[error("save header too large ({0} bytes)")]
    OversizedHeader(usize),

    #[error("unreadable save header: {0}")]
    BadHeader(#[from] serde_json::Error),

    #[error("incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("header claims {header} rooms but the body holds {body}")]
    HeaderMismatch { header: u32, body: u32 },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Save file header, kept small and readable for the save browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Save format version
    pub version: u32,
    /// Rooms in the saved dungeon
    pub room_count: u32,
    /// Unix timestamp of the save
    pub saved_at: u64,
}

impl SaveHeader {
    pub fn new(session: &Session) -> Self {
        Self {
            version: SAVE_VERSION,
            room_count: session.dungeon.room_count() as u32,
            saved_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Check that this save can be loaded by this build
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Save a session to a file.
pub fn save_game(session: &Session, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let header = serde_json::to_vec(&SaveHeader::new(session))?;
    let body = codec::encode_session(session);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(SAVE_MAGIC)?;
    writer.write_all(&(header.len() as u32).to_le_bytes())?;
    writer.write_all(&header)?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Load a session from a file.
///
/// The restored session carries a fresh entropy-seeded RNG and has been
/// checked against every game invariant.
pub fn load_game(path: impl AsRef<Path>) -> Result<Session, SaveError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let header = read_header(&mut reader)?;
    header.validate()?;

    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    let session = codec::decode_session(&body)?;
    if session.dungeon.room_count() as u32 != header.room_count {
        return Err(SaveError::HeaderMismatch {
            header: header.room_count,
            body: session.dungeon.room_count() as u32,
        });
    }
    session.validate()?;
    Ok(session)
}

/// Read just the header of a save file.
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_header(&mut reader)
}

fn read_header(reader: &mut impl Read) -> Result<SaveHeader, SaveError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != SAVE_MAGIC {
        return Err(SaveError::InvalidMagic);
    }

    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_le_bytes(len_bytes) as usize;
    if len > MAX_HEADER_LEN {
        return Err(SaveError::OversizedHeader(len));
    }

    let mut header_bytes = vec![0u8; len];
    reader.read_exact(&mut header_bytes)?;
    Ok(serde_json::from_slice(&header_bytes)?)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Per-user directory where saves go by default
pub fn save_directory() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("delve");
    path.push("saves");
    path
}

/// Default save file path, creating the save directory if needed
pub fn default_save_path() -> PathBuf {
    let dir = save_directory();
    std::fs::create_dir_all(&dir).ok();
    dir.join("dungeon.dlv")
}

/// List the saves in the default directory, newest first.
///
/// Files that are not readable saves are skipped.
pub fn list_saves() -> Result<Vec<(PathBuf, SaveHeader)>, SaveError> {
    let dir = save_directory();
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut saves = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let path = entry?.path();
        if path.extension().map(|e| e == "dlv").unwrap_or(false)
            && let Ok(header) = load_header(&path)
        {
            saves.push((path, header));
        }
    }
    saves.sort_by(|a, b| b.1.saved_at.cmp(&a.1.saved_at));
    Ok(saves)
}
