//! Blocking read and write

use tracing::{debug, warn};

use crate::description::{normalize, Description};
use crate::error::Result;
use crate::file_io::FileIo;
use crate::options::{ReadOptions, WriteOptions};
use crate::resolve::resolve;
use crate::value::Value;
use crate::vfile::VFile;

/// Read a file from the local filesystem into its value
pub fn read_sync(
    description: impl Into<Description>,
    options: impl Into<ReadOptions>,
) -> Result<VFile> {
    FileIo::local().read_sync(description, options)
}

/// Write a file's value to the local filesystem
pub fn write_sync(
    description: impl Into<Description>,
    options: impl Into<WriteOptions>,
) -> Result<VFile> {
    FileIo::local().write_sync(description, options)
}

impl FileIo {
    /// Read a file, storing its contents as the file's value
    ///
    /// Every failure is returned as-is: construction and resolution errors
    /// before the backend is touched, I/O errors straight from the backend.
    pub fn read_sync(
        &self,
        description: impl Into<Description>,
        options: impl Into<ReadOptions>,
    ) -> Result<VFile> {
        let file = normalize(description)?;
        self.read_file_sync(file, options.into())
    }

    /// Write a file's value and hand the file back unchanged
    ///
    /// A file without a value is written as empty.
    pub fn write_sync(
        &self,
        description: impl Into<Description>,
        options: impl Into<WriteOptions>,
    ) -> Result<VFile> {
        let file = normalize(description)?;
        self.write_file_sync(file, options.into())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(path = ?file.path()))]
    fn read_file_sync(&self, mut file: VFile, options: ReadOptions) -> Result<VFile> {
        let location = resolve(&file)?;
        let bytes = self
            .backend
            .read_sync(&location, options)
            .inspect_err(|err| {
                warn!(location = %location.display(), error = %err, "read failed");
            })?;

        debug!(location = %location.display(), bytes = bytes.len(), "read file");
        file.set_value(Value::decode(bytes, options.encoding));
        Ok(file)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(path = ?file.path()))]
    fn write_file_sync(&self, file: VFile, options: WriteOptions) -> Result<VFile> {
        let location = resolve(&file)?;
        let contents = file.contents(options.encoding)?;
        self.backend
            .write_sync(&location, &contents, options)
            .inspect_err(|err| {
                warn!(location = %location.display(), error = %err, "write failed");
            })?;

        debug!(location = %location.display(), bytes = contents.len(), "wrote file");
        Ok(file)
    }
}
