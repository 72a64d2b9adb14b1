//! Everything a caller may hand in to describe a file, and the normalizer
//! that turns it into a [`VFile`]

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::vfile::{VFile, VFileOptions};

/// Accepted shapes of a file description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    /// Used as the file's `path`
    Path(PathBuf),
    /// Decoded as (lossy) UTF-8 and used as the file's `path`
    Bytes(Vec<u8>),
    /// Passed field-for-field to [`VFile::new`]
    Options(VFileOptions),
    /// Passed through untouched
    File(VFile),
}

impl Default for Description {
    fn default() -> Self {
        Self::Options(VFileOptions::default())
    }
}

/// Turn any description into a file
///
/// An existing [`VFile`] is moved through as-is, never rebuilt. No I/O is
/// performed; the only failures are construction errors from [`VFile::new`].
pub fn normalize(description: impl Into<Description>) -> Result<VFile> {
    match description.into() {
        Description::File(file) => Ok(file),
        Description::Path(path) => VFile::new(VFileOptions::new().path(path)),
        Description::Bytes(bytes) => {
            let path = String::from_utf8_lossy(&bytes).into_owned();
            VFile::new(VFileOptions::new().path(path))
        }
        Description::Options(options) => VFile::new(options),
    }
}

impl From<&str> for Description {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for Description {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<&String> for Description {
    fn from(path: &String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<&Path> for Description {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Description {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&PathBuf> for Description {
    fn from(path: &PathBuf) -> Self {
        Self::Path(path.clone())
    }
}

impl From<Vec<u8>> for Description {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Description {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Description {
    fn from(bytes: &[u8; N]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<VFileOptions> for Description {
    fn from(options: VFileOptions) -> Self {
        Self::Options(options)
    }
}

impl From<VFile> for Description {
    fn from(file: VFile) -> Self {
        Self::File(file)
    }
}

/// `None` builds a file with every field defaulted
impl<T: Into<Self>> From<Option<T>> for Description {
    fn from(description: Option<T>) -> Self {
        description.map_or_else(Self::default, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::Value;

    #[test]
    fn test_string_becomes_path() {
        for path in ["readme.md", "a/b/c.txt", "/abs/file", "../up.rs"] {
            let file = normalize(path).unwrap();
            assert_eq!(file.path(), Some(Path::new(path)));
            assert!(file.value().is_none());
        }
    }

    #[test]
    fn test_bytes_become_path() {
        let file = normalize(b"from/bytes.txt").unwrap();
        assert_eq!(file.path(), Some(Path::new("from/bytes.txt")));

        let file = normalize(vec![b'x', b'.', b'y']).unwrap();
        assert_eq!(file.path(), Some(Path::new("x.y")));
    }

    #[test]
    fn test_options_pass_through() {
        let options = VFileOptions::new().cwd("/tmp").path("out.txt").value("data");
        let file = normalize(options).unwrap();
        assert_eq!(file.cwd(), Path::new("/tmp"));
        assert_eq!(file.path(), Some(Path::new("out.txt")));
        assert_eq!(file.value(), Some(&Value::from("data")));
    }

    #[test]
    fn test_existing_file_is_not_rebuilt() {
        let mut file = VFile::from_path("keep.txt").unwrap();
        file.set_path("renamed.txt").unwrap();
        file.set_value(vec![1u8, 2]);
        let expected = file.clone();

        let normalized = normalize(file).unwrap();
        assert_eq!(normalized, expected);
        assert_eq!(normalized.history().len(), 2);
    }

    #[test]
    fn test_absent_description() {
        let file = normalize(None::<&str>).unwrap();
        assert!(file.path().is_none());
        assert!(file.value().is_none());
    }

    #[test]
    fn test_construction_errors_propagate() {
        let err = normalize("").unwrap_err();
        assert!(matches!(err, Error::EmptyPath));
        let err = normalize(VFileOptions::new().cwd("nope")).unwrap_err();
        assert!(err.is_construction());
    }
}
