use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{0:?} does not name a file")]
    NotAFile(PathBuf),
    #[error("cannot prepare report directory {dir:?}: {source}")]
    ReportDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Save a license report at `path`, replacing any previous one.
///
/// The text goes to a temp file next to the target which is then renamed
/// over it; missing parent directories are created.
pub fn write_report(path: &Path, report: &str) -> Result<PathBuf, PersistError> {
    if path.file_name().is_none() {
        return Err(PersistError::NotAFile(path.to_path_buf()));
    }
    let dir = report_dir(path)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(report.as_bytes())?;
    if !report.ends_with('\n') {
        tmp.write_all(b"\n")?;
    }
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| PersistError::Io(e.error))?;
    Ok(path.to_path_buf())
}

fn report_dir(path: &Path) -> Result<PathBuf, PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prepared = if dir.is_dir() {
        Ok(())
    } else {
        fs::create_dir_all(&dir)
    };
    prepared.map_err(|source| PersistError::ReportDir {
        dir: dir.clone(),
        source,
    })?;
    Ok(dir)
}
