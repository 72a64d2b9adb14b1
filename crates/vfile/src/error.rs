use std::io;
use std::path::PathBuf;

/// Errors surfaced by the normalizer and the file operations.
///
/// Construction and resolution failures are raised before any filesystem
/// access. I/O failures carry the primitive's own `io::Error` untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `cwd` must be an absolute directory
    #[error("`cwd` must be absolute, got `{}`", .0.display())]
    InvalidCwd(PathBuf),

    #[error("`path` cannot be empty")]
    EmptyPath,

    /// The file has no `path` to resolve against its `cwd`
    #[error("cannot resolve a file without a `path`")]
    MissingPath,

    #[error(transparent)]
    Io(#[from] io::Error),

    /// Callback-style operations need a tokio runtime to run on
    #[error("no tokio runtime available to drive the operation")]
    NoRuntime,
}

impl Error {
    /// Kind of the underlying I/O error, if this is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// True for failures raised while building a file from its description.
    pub const fn is_construction(&self) -> bool {
        matches!(self, Self::InvalidCwd(_) | Self::EmptyPath)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_pass_through() {
        let err: Error = io::Error::from(io::ErrorKind::NotFound).into();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert!(!err.is_construction());
    }

    #[test]
    fn test_construction_errors() {
        assert!(Error::EmptyPath.is_construction());
        assert!(Error::InvalidCwd(PathBuf::from("rel")).is_construction());
        assert!(!Error::MissingPath.is_construction());
        assert_eq!(Error::MissingPath.io_kind(), None);
    }
}
