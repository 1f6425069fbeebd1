//! Managed-root path resolution

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The directory under which logical file names are resolved.
///
/// Resolution is a plain string join: no `..` folding, no separator
/// rewriting, and an absolute name stays inside the root rather than
/// replacing it the way [`Path::join`] would. An unset or empty root
/// resolves names as given, relative to the process working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ManagedRoot {
    dir: Option<PathBuf>,
}

impl ManagedRoot {
    /// Create a root at `dir`. An empty path behaves like [`ManagedRoot::unset`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            Self::unset()
        } else {
            Self { dir: Some(dir) }
        }
    }

    /// A root that resolves bare names against the working directory.
    pub fn unset() -> Self {
        Self { dir: None }
    }

    /// The configured directory, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Resolve a logical name to its managed path.
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        let name = name.as_ref();
        let Some(dir) = &self.dir else {
            return name.to_path_buf();
        };
        if name.as_os_str().is_empty() {
            return dir.clone();
        }

        let mut joined = OsString::from(dir.as_os_str());
        if !ends_with_separator(dir) {
            joined.push("/");
        }
        joined.push(name.as_os_str());
        PathBuf::from(joined)
    }

    /// The directory that listings of `dir` should read, `.` when nothing is set.
    pub fn resolve_dir(&self, dir: impl AsRef<Path>) -> PathBuf {
        let resolved = self.resolve(dir);
        if resolved.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            resolved
        }
    }
}

impl From<Option<PathBuf>> for ManagedRoot {
    fn from(dir: Option<PathBuf>) -> Self {
        dir.map_or_else(Self::unset, Self::new)
    }
}

impl std::fmt::Display for ManagedRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.dir {
            Some(dir) => write!(f, "{}", dir.display()),
            None => write!(f, "."),
        }
    }
}

fn ends_with_separator(dir: &Path) -> bool {
    let raw = dir.as_os_str().to_string_lossy();
    raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::unset(ManagedRoot::unset(), "data.csv", "data.csv")]
    #[case::empty(ManagedRoot::new(""), "data.csv", "data.csv")]
    #[case::joined(ManagedRoot::new("dump"), "a/b.txt", "dump/a/b.txt")]
    #[case::trailing_separator(ManagedRoot::new("dump/"), "b.txt", "dump/b.txt")]
    #[case::absolute_name(ManagedRoot::new("dump"), "/etc/hosts", "dump//etc/hosts")]
    fn resolves_names(#[case] root: ManagedRoot, #[case] name: &str, #[case] expected: &str) {
        assert_eq!(root.resolve(name), PathBuf::from(expected));
    }

    #[test]
    fn empty_root_is_unset() {
        assert_eq!(ManagedRoot::new("").dir(), None);
    }

    #[test]
    fn absolute_name_stays_under_root() {
        assert!(ManagedRoot::new("dump").resolve("/etc/hosts").starts_with("dump"));
    }

    #[rstest]
    #[case(ManagedRoot::unset(), ".")]
    #[case(ManagedRoot::new("dump"), "dump")]
    fn resolve_dir_of_empty_name(#[case] root: ManagedRoot, #[case] expected: &str) {
        assert_eq!(root.resolve_dir(""), PathBuf::from(expected));
    }
}
