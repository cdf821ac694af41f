//! Output writers.
//!
//! Every output is written to a temporary file next to its destination and
//! renamed into place once complete, so a failed run never leaves a
//! truncated file at the destination path.
//!
//! Writing is split in two steps: [`stage`] fills the temporary file and
//! [`StagedOutput::commit`] renames it. Callers producing several outputs
//! stage all of them first and commit only once every one succeeded.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, RoadnetError};

pub mod csv;
pub mod json;

/// A fully written temporary file waiting to replace its destination.
///
/// Dropping it without committing removes the temporary file.
#[derive(Debug)]
pub struct StagedOutput {
    tmp: NamedTempFile,
    path: PathBuf,
}

impl StagedOutput {
    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the temporary file into place, replacing any existing file.
    pub fn commit(self) -> Result<()> {
        let path = self.path;
        self.tmp
            .persist(&path)
            .map_err(|e| RoadnetError::file_access(&path, e.error))?;
        Ok(())
    }
}

/// Write the contents of `path` into a temporary file in its directory.
///
/// Missing parent directories are created. Nothing at `path` changes until
/// the returned output is committed.
pub fn stage<F>(path: &Path, write: F) -> Result<StagedOutput>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| RoadnetError::file_access(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| RoadnetError::file_access(dir, e))?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush().map_err(|e| RoadnetError::file_access(path, e))?;
    }

    Ok(StagedOutput {
        tmp,
        path: path.to_path_buf(),
    })
}

/// Write `path` atomically through the given closure.
///
/// An existing file at `path` is replaced only after the closure succeeds.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    stage(path, write)?.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        write_atomic(&path, |w| {
            w.write_all(b"first")
                .map_err(|e| RoadnetError::file_access("out.txt", e))
        })
        .unwrap();
        write_atomic(&path, |w| {
            w.write_all(b"second")
                .map_err(|e| RoadnetError::file_access("out.txt", e))
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_failed_write_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "original").unwrap();

        let result = write_atomic(&path, |w| {
            w.write_all(b"partial")
                .map_err(|e| RoadnetError::file_access("out.txt", e))?;
            Err(RoadnetError::file_access("out.txt", "boom"))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        // Only the original file remains; the temporary file was removed.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_staged_output_invisible_until_commit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("graph.json");

        let staged = stage(&path, |w| {
            w.write_all(b"{}")
                .map_err(|e| RoadnetError::file_access("graph.json", e))
        })
        .unwrap();
        assert_eq!(staged.path(), path.as_path());
        assert!(!path.exists());

        staged.commit().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_dropped_stage_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let staged = stage(&path, |w| {
            w.write_all(b"a,b\n")
                .map_err(|e| RoadnetError::file_access("out.csv", e))
        })
        .unwrap();
        drop(staged);

        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
