//! The virtual file: a working directory, a path and in-memory contents

use std::borrow::Cow;
use std::env;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::value::{Encoding, Value};

/// Configuration object a [`VFile`] is built from
///
/// Every field is optional. A missing `cwd` is filled in from the process
/// working directory when the file is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VFileOptions {
    pub cwd: Option<PathBuf>,
    pub path: Option<PathBuf>,
    pub value: Option<Value>,
}

impl VFileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A file that may or may not exist on disk yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VFile {
    cwd: PathBuf,
    path: Option<PathBuf>,
    value: Option<Value>,
    history: Vec<PathBuf>,
}

impl VFile {
    /// Build a file from its configuration
    ///
    /// `cwd` must be absolute. `path`, when given, must be non-empty.
    pub fn new(options: VFileOptions) -> Result<Self> {
        let cwd = match options.cwd {
            Some(cwd) if cwd.is_absolute() => cwd,
            Some(cwd) => return Err(Error::InvalidCwd(cwd)),
            None => env::current_dir()?,
        };

        let mut history = Vec::new();
        if let Some(path) = &options.path {
            validate_path(path)?;
            history.push(path.clone());
        }

        Ok(Self {
            cwd,
            path: options.path,
            value: options.value,
            history,
        })
    }

    /// Shorthand for a file with only a path
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(VFileOptions::new().path(path))
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Every path this file has had, oldest first
    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        validate_path(&path)?;
        if self.path.as_ref() != Some(&path) {
            self.history.push(path.clone());
        }
        self.path = Some(path);
        Ok(())
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = Some(value.into());
    }

    pub fn take_value(&mut self) -> Option<Value> {
        self.value.take()
    }

    /// Bytes a write puts on disk
    ///
    /// A file without a value writes as empty, whether it was never read or
    /// deliberately cleared.
    pub fn contents(&self, encoding: Option<Encoding>) -> io::Result<Cow<'_, [u8]>> {
        match &self.value {
            Some(value) => value.encode(encoding),
            None => Ok(Cow::Borrowed(&[])),
        }
    }

    /// Final component of the path, `index.md` for `docs/index.md`
    pub fn basename(&self) -> Option<&str> {
        self.path.as_deref()?.file_name()?.to_str()
    }

    /// Basename without its extension
    pub fn stem(&self) -> Option<&str> {
        self.path.as_deref()?.file_stem()?.to_str()
    }

    /// Extension without the leading dot
    pub fn extension(&self) -> Option<&str> {
        self.path.as_deref()?.extension()?.to_str()
    }

    /// Parent of the path, as written (not resolved against `cwd`)
    pub fn dirname(&self) -> Option<&Path> {
        self.path.as_deref()?.parent()
    }

    /// Swap the extension, recording the new path in the history
    pub fn set_extension(&mut self, extension: &str) -> Result<()> {
        let mut path = self.path.clone().ok_or(Error::MissingPath)?;
        path.set_extension(extension);
        self.set_path(path)
    }
}

impl fmt::Display for VFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => value.fmt(f),
            None => Ok(()),
        }
    }
}

fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::EmptyPath);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cwd_to_process_cwd() {
        let file = VFile::new(VFileOptions::new()).unwrap();
        assert_eq!(file.cwd(), env::current_dir().unwrap());
        assert!(file.path().is_none());
        assert!(file.value().is_none());
        assert!(file.history().is_empty());
    }

    #[test]
    fn test_rejects_relative_cwd() {
        let err = VFile::new(VFileOptions::new().cwd("relative/dir")).unwrap_err();
        assert!(matches!(err, Error::InvalidCwd(_)));
    }

    #[test]
    fn test_rejects_only_empty_paths() {
        assert!(matches!(VFile::from_path(""), Err(Error::EmptyPath)));
        // Left for the filesystem to reject
        let file = VFile::from_path("a\0b").unwrap();
        assert_eq!(file.path(), Some(Path::new("a\0b")));
    }

    #[test]
    fn test_path_parts() {
        let file = VFile::from_path("docs/readme.md").unwrap();
        assert_eq!(file.basename(), Some("readme.md"));
        assert_eq!(file.stem(), Some("readme"));
        assert_eq!(file.extension(), Some("md"));
        assert_eq!(file.dirname(), Some(Path::new("docs")));
    }

    #[test]
    fn test_history_tracks_path_changes() {
        let mut file = VFile::from_path("notes.txt").unwrap();
        file.set_path("notes.txt").unwrap();
        file.set_extension("md").unwrap();
        assert_eq!(
            file.history(),
            &[PathBuf::from("notes.txt"), PathBuf::from("notes.md")]
        );
        assert!(file.set_path("").is_err());
        assert_eq!(file.path(), Some(Path::new("notes.md")));
    }

    #[test]
    fn test_set_extension_needs_path() {
        let mut file = VFile::new(VFileOptions::new()).unwrap();
        assert!(matches!(file.set_extension("md"), Err(Error::MissingPath)));
    }

    #[test]
    fn test_display_renders_value() {
        let mut file = VFile::from_path("a.txt").unwrap();
        assert_eq!(file.to_string(), "");
        file.set_value("hello");
        assert_eq!(file.to_string(), "hello");
        assert_eq!(file.take_value(), Some(Value::from("hello")));
        assert!(file.value().is_none());
    }

    #[test]
    fn test_contents_of_absent_value_is_empty() {
        let mut file = VFile::from_path("a.txt").unwrap();
        assert!(file.contents(None).unwrap().is_empty());
        file.set_value("6869");
        assert_eq!(&*file.contents(Some(Encoding::Hex)).unwrap(), b"hi");
    }

    #[test]
    fn test_options_from_config() {
        let options: VFileOptions =
            serde_json::from_str(r#"{ "cwd": "/srv", "path": "a.txt", "value": "hi" }"#).unwrap();
        let file = VFile::new(options).unwrap();
        assert_eq!(file.cwd(), Path::new("/srv"));
        assert_eq!(file.value(), Some(&Value::from("hi")));
    }
}
