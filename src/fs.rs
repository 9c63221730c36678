use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: OsString,
    pub local_path: PathBuf,
}

/// Flat listing of the regular files directly inside `dir`. Subdirectories
/// and other entry kinds are skipped, not recursed into. Order is whatever
/// the OS returns.
pub fn list_files(dir: &Path) -> Result<Vec<FileEntry>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("could not list {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("could not list {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("could not stat {}", entry.path().display()))?;

        if file_type.is_file() {
            files.push(FileEntry {
                name: entry.file_name(),
                local_path: entry.path(),
            });
        }
    }

    Ok(files)
}
