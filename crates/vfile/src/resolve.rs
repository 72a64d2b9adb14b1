use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::vfile::VFile;

/// Absolute location of `file` on disk
///
/// Joins `path` onto `cwd` (an absolute `path` wins) and folds `.` and `..`
/// lexically. Never touches the filesystem.
pub fn resolve(file: &VFile) -> Result<PathBuf> {
    let path = file.path().ok_or(Error::MissingPath)?;
    Ok(normalize_lexically(&file.cwd().join(path)))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
