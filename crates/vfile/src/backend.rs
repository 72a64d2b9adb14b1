use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::options::{ReadOptions, WriteOptions};

/// Byte-level file primitives the read and write operations run on
///
/// Locations are already resolved to absolute paths. Errors must be the
/// primitive's own `io::Error`; callers pass them through untouched.
#[async_trait]
pub trait FsBackend: Send + Sync {
    /// Read the whole file, blocking the calling thread
    fn read_sync(&self, location: &Path, options: ReadOptions) -> io::Result<Vec<u8>>;

    /// Write `data` as the file's contents, blocking the calling thread
    fn write_sync(&self, location: &Path, data: &[u8], options: WriteOptions) -> io::Result<()>;

    /// Read the whole file without blocking the runtime
    async fn read(&self, location: &Path, options: ReadOptions) -> io::Result<Vec<u8>>;

    /// Write `data` as the file's contents without blocking the runtime
    async fn write(&self, location: &Path, data: &[u8], options: WriteOptions) -> io::Result<()>;
}
