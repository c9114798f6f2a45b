use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pomcheck_logging::pom_debug;
use thiserror::Error;

use crate::{decode_pom, DecodeError};

/// A local POM read into memory, ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomFile {
    /// Final path component; what the form validates against.
    pub name: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum PomError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path:?} has no file name")]
    NoFileName { path: PathBuf },
    #[error("cannot decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

pub fn load_pom(path: &Path) -> Result<PomFile, PomError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| PomError::NoFileName {
            path: path.to_path_buf(),
        })?;
    let bytes = fs::read(path).map_err(|source| PomError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode_pom(&bytes).map_err(|source| PomError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    pom_debug!(
        "loaded {:?}: {} bytes as {}",
        path,
        bytes.len(),
        decoded.encoding_label
    );

    Ok(PomFile {
        name,
        content: decoded.text,
    })
}
