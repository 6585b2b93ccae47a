//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// All bootstrap locations (environment directory, manifest, config file,
/// working directories) are carried as `NormalizedPath` and converted to a
/// platform-native `PathBuf` only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Resolve `candidate` against this path.
    ///
    /// Absolute candidates are returned unchanged; relative ones are joined
    /// onto `self`.
    pub fn resolve(&self, candidate: impl AsRef<Path>) -> Self {
        let candidate = candidate.as_ref();
        if is_absolute_str(&candidate.to_string_lossy()) {
            Self::new(candidate)
        } else {
            self.join(&candidate.to_string_lossy())
        }
    }

    /// Collapse `.` and `..` segments and redundant separators.
    ///
    /// Purely lexical: symlinks are not followed. An empty relative path
    /// cleans to `.`.
    pub fn clean(&self) -> Self {
        let absolute = self.inner.starts_with('/');
        let mut parts: Vec<&str> = Vec::new();
        for part in self.inner.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    let poppable = parts
                        .last()
                        .is_some_and(|last| *last != ".." && !last.ends_with(':'));
                    if poppable {
                        parts.pop();
                    } else if !absolute {
                        parts.push("..");
                    }
                }
                _ => parts.push(part),
            }
        }

        let joined = parts.join("/");
        let inner = if absolute {
            format!("/{}", joined)
        } else if joined.is_empty() {
            ".".to_string()
        } else {
            joined
        };
        Self { inner }
    }

    /// Whether `other` is this path or lies underneath it, compared after
    /// [`NormalizedPath::clean`].
    pub fn contains(&self, other: &NormalizedPath) -> bool {
        let this = self.clean();
        let other = other.clean();
        if this == other {
            return true;
        }
        if this.inner == "." {
            return !is_absolute_str(&other.inner) && !other.inner.starts_with("..");
        }
        let prefix = format!("{}/", this.inner.trim_end_matches('/'));
        other.inner.starts_with(&prefix)
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Unix roots (`/`), UNC prefixes (`//`) and drive letters (`C:/`).
fn is_absolute_str(path: &str) -> bool {
    let normalized = path.replace('\\', "/");
    let bytes = normalized.as_bytes();
    normalized.starts_with('/')
        || (bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/')
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_joins_base() {
        let base = NormalizedPath::new("/srv/app");
        assert_eq!(base.resolve("in").as_str(), "/srv/app/in");
    }

    #[test]
    fn test_resolve_absolute_is_kept() {
        let base = NormalizedPath::new("/srv/app");
        assert_eq!(base.resolve("/tmp/out").as_str(), "/tmp/out");
    }

    #[test]
    fn test_resolve_drive_letter_is_kept() {
        let base = NormalizedPath::new("/srv/app");
        assert_eq!(base.resolve("C:\\work\\app").as_str(), "C:/work/app");
        assert_eq!(base.resolve("work\\app").as_str(), "/srv/app/work/app");
    }
}
