//! Record decoding and per-file loading

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::Record;
use crate::error::{DecodeError, FileError};

/// Decode one whole JSON document into a [`Record`]. Pure; no partial parse.
pub fn decode(bytes: &[u8]) -> Result<Record, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read `path` fully and decode it. When `max_bytes` is set, larger files are rejected before reading.
pub fn load_record(path: &Path, max_bytes: Option<u64>) -> Result<Record, FileError> {
    let io_err = |source| FileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let size = file.metadata().map_err(io_err)?.len();
    if let Some(limit) = max_bytes
        && size > limit
    {
        return Err(FileError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_err)?;
    decode(&bytes).map_err(|source| FileError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
