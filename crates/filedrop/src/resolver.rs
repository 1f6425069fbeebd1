//! Resolving logical file names, importing them from the operator when missing

use std::fs::File;
use std::path::{Path, PathBuf};

use filedrop_fs::io;

use crate::channel::{ask, clean_path_answer};
use crate::{Error, Result, Session};

impl Session {
    /// Open the managed file `name`, importing it first if it is missing.
    ///
    /// When the managed path does not exist the operator is asked for a
    /// source path until one opens; its bytes are copied into the managed
    /// store and the copy is then opened by path.
    pub fn resolve(&self, name: impl AsRef<Path>) -> Result<File> {
        let path = self.check(name)?;
        Ok(io::open(&path)?)
    }

    /// Make sure the managed file `name` exists and return its path.
    ///
    /// Same loop as [`Session::resolve`] without opening the result.
    pub fn check(&self, name: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.managed_path(name);
        loop {
            if io::stat(&path)?.is_some() {
                tracing::debug!(path = %path.display(), "Managed file present");
                return Ok(path);
            }
            self.import_missing(&path)?;
        }
    }

    /// Create (or truncate) the managed file `name`, creating missing
    /// parent directories along the way.
    pub fn create(&self, name: impl AsRef<Path>) -> Result<File> {
        self.create_at(&self.managed_path(name))
    }

    /// Ask the operator for any file and copy it into the managed directory
    /// `dir` under its own file name. Returns the new path.
    pub fn import_into(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = self.root().resolve_dir(dir);
        let (source_path, mut source) = self.prompt_for_source("drop file here: ", &dir)?;

        let Some(file_name) = source_path.file_name() else {
            return Err(Error::Import {
                source_path: source_path.clone(),
                destination: dir,
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "source path has no file name",
                ),
            });
        };
        let destination = dir.join(file_name);

        self.copy_in(&source_path, &mut source, &destination)?;
        Ok(destination)
    }

    /// The regular files directly inside the managed directory `dir`.
    ///
    /// A missing directory is created and the operator is told, so they can
    /// drop files into it before acknowledging; then it is listed again.
    pub fn list_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = self.root().resolve_dir(dir);
        let mut failures = 0;
        loop {
            match io::list_files(&dir) {
                Ok(files) => return Ok(files),
                Err(e) if e.is_not_found() => {
                    self.ensure_dir(&dir)?;
                    self.alert(&format!(
                        "dir '{}' not found; created, press enter to retry",
                        dir.display()
                    ))?;
                }
                Err(e) => {
                    failures += 1;
                    if self.config().retry.directories_exhausted(failures) {
                        return Err(e.into());
                    }
                    tracing::warn!(dir = %dir.display(), error = %e, "Listing failed, asking operator to retry");
                    self.alert(&format!("{e}; press enter to retry"))?;
                }
            }
        }
    }

    fn import_missing(&self, destination: &Path) -> Result<()> {
        tracing::debug!(path = %destination.display(), "Managed file missing, asking for a source");
        let message = format!("\"{}\" not found; drop file here: ", destination.display());
        let (source_path, mut source) = self.prompt_for_source(&message, destination)?;
        self.copy_in(&source_path, &mut source, destination).map(drop)
    }

    /// Keep asking until the operator names a file that opens.
    fn prompt_for_source(&self, message: &str, destination: &Path) -> Result<(PathBuf, File)> {
        let mut channel = self.channel();
        let mut message = message.to_owned();
        let mut attempts = 0;
        loop {
            let candidate = clean_path_answer(&ask(&mut **channel, &message)?);
            attempts += 1;
            match File::open(&candidate) {
                Ok(file) => return Ok((candidate, file)),
                Err(e) => {
                    tracing::warn!(source = %candidate.display(), error = %e, "Source file could not be opened");
                    if self.config().retry.sources_exhausted(attempts) {
                        return Err(Error::Import {
                            source_path: candidate,
                            destination: destination.to_path_buf(),
                            source: e,
                        });
                    }
                    message = format!("{e}; drop file here: ");
                }
            }
        }
    }

    fn copy_in(&self, source_path: &Path, source: &mut File, destination: &Path) -> Result<u64> {
        let dest = self
            .create_at(destination)
            .map_err(|e| e.during_import(source_path, destination))?;
        let bytes = io::copy_into(source, dest, destination)
            .map_err(|e| Error::from(e).during_import(source_path, destination))?;
        tracing::info!(
            source = %source_path.display(),
            destination = %destination.display(),
            bytes,
            "Imported file"
        );
        Ok(bytes)
    }

    fn create_at(&self, path: &Path) -> Result<File> {
        loop {
            match io::create_file(path) {
                Ok(file) => return Ok(file),
                Err(e) if e.is_not_found() => match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                        self.ensure_dir(parent)?;
                    }
                    _ => return Err(e.into()),
                },
                Err(e) => return Err(e.into()),
            }
        }
    }
}
