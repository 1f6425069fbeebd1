//! Directory creation with operator-confirmed retries

use std::path::Path;

use filedrop_fs::io;

use crate::{Error, Result, Session};

impl Session {
    /// Create `path` and any missing parents. Existing directories and their
    /// contents are left alone.
    ///
    /// `path` is used as given, not resolved under the managed root. When
    /// creation fails the operator sees the error and the attempt is repeated
    /// after they acknowledge it; with `retry.directory_attempts` set the
    /// failure is returned once the cap is reached.
    pub fn ensure_dir(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut attempts = 0;
        loop {
            let source = match io::create_dir_chain(path) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Directory ready");
                    return Ok(());
                }
                Err(e) => e.into_io().map_err(Error::from)?.1,
            };

            attempts += 1;
            if self.config().retry.directories_exhausted(attempts) {
                return Err(Error::Directory {
                    path: path.to_path_buf(),
                    attempts,
                    source,
                });
            }

            tracing::warn!(path = %path.display(), error = %source, attempts, "Directory creation failed");
            self.alert(&format!("{}: {source}; press enter to retry", path.display()))?;
        }
    }
}
