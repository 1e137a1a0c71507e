//! Atomic JSON artifact I/O for pipeline stage outputs.
//!
//! Every stage reads its predecessor's artifact from the working directory
//! and writes its own (spec §4.1). Writes are write-temp-then-rename so a
//! crash mid-write never leaves a partially-written artifact that looks
//! valid to the next stage.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Write `value` to `path` atomically: serialize to `path.tmp`, then rename.
/// A crash mid-write never leaves a partially-written file a later reader
/// could mistake for valid.
pub fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(&tmp_path, json).map_err(|source| ArtifactError::Write {
        path: tmp_path.display().to_string(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| ArtifactError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

/// Read and parse a JSON artifact.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// A stage is stale (needs to re-run) if its output artifact is missing, or
/// older than any of its input artifacts (spec §4.1).
pub fn is_stale(output: &Path, inputs: &[&Path]) -> bool {
    let output_mtime = match fs::metadata(output).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return true,
    };

    for input in inputs {
        match fs::metadata(input).and_then(|m| m.modified()) {
            Ok(input_mtime) if input_mtime > output_mtime => return true,
            Err(_) => return true, // missing input: let the stage surface the real error
            _ => {}
        }
    }
    false
}
