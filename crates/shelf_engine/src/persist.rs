use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory unusable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` if needed and checks that files can be created in it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() && !dir.is_dir() {
        return Err(PersistError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Export bytes sitting in a temp file next to their target.
///
/// The target keeps its previous contents until [`PendingExport::commit`]
/// renames the temp file over it. Dropping an uncommitted export removes the
/// temp file and leaves the target untouched.
#[derive(Debug)]
pub struct PendingExport {
    staged: NamedTempFile,
    target: PathBuf,
}

impl PendingExport {
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn commit(self) -> Result<PathBuf, PersistError> {
        let Self { staged, target } = self;
        staged
            .persist(&target)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}

/// Writes export files into one directory, replacing them by rename.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes and syncs `content` to a temp file without touching `filename`.
    pub fn stage(&self, filename: &str, content: &[u8]) -> Result<PendingExport, PersistError> {
        ensure_output_dir(&self.dir)?;
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file_mut().sync_all()?;
        Ok(PendingExport {
            staged,
            target: self.dir.join(filename),
        })
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        self.stage(filename, content)?.commit()
    }
}
