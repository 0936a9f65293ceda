use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("directory missing or not writable: {0}")]
    Directory(String),
    #[error("{0:?} has no parent directory")]
    NoParentDirectory(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure directory exists; create if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::Directory(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::Directory("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::Directory(e.to_string()))?;
    }
    Ok(())
}

/// Atomically replace `target` with `content`: write a sibling temp file, then rename it over.
///
/// An existing target keeps its permissions. Readers see either the old or
/// the new bytes, never a partial file.
pub fn replace_file(target: &Path, content: &[u8]) -> Result<(), PersistError> {
    let dir = match target.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Err(PersistError::NoParentDirectory(target.to_path_buf())),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    if let Ok(meta) = fs::metadata(target) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.as_file_mut().sync_all()?;

    tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
    Ok(())
}
