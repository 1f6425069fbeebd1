//! Filesystem primitives used by the resolve-and-import loop

use std::fs::{self, File, Metadata};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Stat a path, mapping "not found" to `None`.
///
/// Any other failure (permission denied, I/O) is returned as an error.
pub fn stat(path: &Path) -> Result<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Open an existing file for reading.
pub fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::io(path, e))
}

/// Create (or truncate) a file for writing. Parent directories are not created.
pub fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::io(path, e))
}

/// Create a directory and all of its missing parents.
///
/// Existing directories, and anything inside them, are left untouched.
/// An existing entry that is not a directory is an `AlreadyExists` error.
pub fn create_dir_chain(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Copy everything from `source` into the freshly created `dest`.
///
/// On failure the partially written destination is removed so that a later
/// lookup does not mistake a truncated file for a completed import.
pub fn copy_into(source: &mut impl Read, mut dest: File, dest_path: &Path) -> Result<u64> {
    let copied = io::copy(source, &mut dest).and_then(|n| dest.flush().map(|()| n));
    match copied {
        Ok(n) => Ok(n),
        Err(e) => {
            drop(dest);
            if let Err(cleanup) = fs::remove_file(dest_path) {
                tracing::warn!(
                    path = %dest_path.display(),
                    error = %cleanup,
                    "Failed to remove partially copied file"
                );
            }
            Err(Error::io(dest_path, e))
        }
    }
}

/// List the regular files directly inside `dir`, sorted by path.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if !file_type.is_dir() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("disk went away"));
            }
            self.served = true;
            let chunk = b"partial";
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn stat_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(stat(&dir.path().join("missing")).unwrap().is_none());
    }

    #[test]
    fn copy_failure_removes_partial_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest_path = dir.path().join("out.bin");
        let dest = create_file(&dest_path).unwrap();

        let err = copy_into(&mut FailingReader { served: false }, dest, &dest_path).unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::Other));
        assert!(!dest_path.exists());
    }

    #[test]
    fn create_dir_chain_rejects_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();

        assert!(create_dir_chain(&file).is_err());
        assert_eq!(fs::read_to_string(&file).unwrap(), "x");
    }
}
