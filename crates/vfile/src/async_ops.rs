//! Non-blocking read and write
//!
//! Each direction comes in two flavors sharing one execution path:
//! a deferred form returning a future, and a callback form that spawns the
//! work on the current tokio runtime and reports through a closure.
//!
//! Lifecycle of a call: normalize, resolve the location, run the backend
//! primitive, then settle once. A resolution failure settles without ever
//! reaching the backend.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::backend::FsBackend;
use crate::description::{normalize, Description};
use crate::error::{Error, Result};
use crate::file_io::FileIo;
use crate::options::{ReadOptions, WriteOptions};
use crate::resolve::resolve;
use crate::value::Value;
use crate::vfile::VFile;

/// Read a file from the local filesystem; resolves with the populated file
pub fn read(
    description: impl Into<Description>,
    options: impl Into<ReadOptions>,
) -> Result<impl Future<Output = Result<VFile>> + Send + 'static> {
    FileIo::local().read(description, options)
}

/// Read a file from the local filesystem, reporting through `callback`
pub fn read_with<F>(
    description: impl Into<Description>,
    options: impl Into<ReadOptions>,
    callback: F,
) -> Result<JoinHandle<()>>
where
    F: FnOnce(Result<VFile>) + Send + 'static,
{
    FileIo::local().read_with(description, options, callback)
}

/// Write a file to the local filesystem; resolves with the same file
pub fn write(
    description: impl Into<Description>,
    options: impl Into<WriteOptions>,
) -> Result<impl Future<Output = Result<VFile>> + Send + 'static> {
    FileIo::local().write(description, options)
}

/// Write a file to the local filesystem, reporting through `callback`
pub fn write_with<F>(
    description: impl Into<Description>,
    options: impl Into<WriteOptions>,
    callback: F,
) -> Result<JoinHandle<()>>
where
    F: FnOnce(Result<VFile>) + Send + 'static,
{
    FileIo::local().write_with(description, options, callback)
}

impl FileIo {
    /// Deferred read
    ///
    /// The description is normalized right away and a construction error is
    /// returned directly. Resolution and I/O errors are what the future
    /// resolves to. Nothing touches the backend until the future is polled.
    pub fn read(
        &self,
        description: impl Into<Description>,
        options: impl Into<ReadOptions>,
    ) -> Result<impl Future<Output = Result<VFile>> + Send + 'static> {
        let file = normalize(description)?;
        let options = options.into();
        let backend = Arc::clone(&self.backend);
        Ok(read_file(backend, file, options))
    }

    /// Callback read
    ///
    /// Construction errors, and a missing runtime, are returned directly and
    /// the callback is dropped unused. Otherwise `callback` runs exactly once
    /// on a spawned task, never on the caller's stack.
    pub fn read_with<F>(
        &self,
        description: impl Into<Description>,
        options: impl Into<ReadOptions>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<VFile>) + Send + 'static,
    {
        let file = normalize(description)?;
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let options = options.into();
        let backend = Arc::clone(&self.backend);
        Ok(runtime.spawn(async move { callback(read_file(backend, file, options).await) }))
    }

    /// Deferred write, resolving with the file it was given
    pub fn write(
        &self,
        description: impl Into<Description>,
        options: impl Into<WriteOptions>,
    ) -> Result<impl Future<Output = Result<VFile>> + Send + 'static> {
        let file = normalize(description)?;
        let options = options.into();
        let backend = Arc::clone(&self.backend);
        Ok(write_file(backend, file, options))
    }

    /// Callback write; see [`FileIo::read_with`] for the delivery rules
    pub fn write_with<F>(
        &self,
        description: impl Into<Description>,
        options: impl Into<WriteOptions>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<VFile>) + Send + 'static,
    {
        let file = normalize(description)?;
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let options = options.into();
        let backend = Arc::clone(&self.backend);
        Ok(runtime.spawn(async move { callback(write_file(backend, file, options).await) }))
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(path = ?file.path()))]
async fn read_file(
    backend: Arc<dyn FsBackend>,
    mut file: VFile,
    options: ReadOptions,
) -> Result<VFile> {
    let location = resolve(&file)?;
    let bytes = backend
        .read(&location, options)
        .await
        .inspect_err(|err| warn!(location = %location.display(), error = %err, "read failed"))?;

    debug!(location = %location.display(), bytes = bytes.len(), "read file");
    file.set_value(Value::decode(bytes, options.encoding));
    Ok(file)
}

#[tracing::instrument(level = "debug", skip_all, fields(path = ?file.path()))]
async fn write_file(
    backend: Arc<dyn FsBackend>,
    file: VFile,
    options: WriteOptions,
) -> Result<VFile> {
    let location = resolve(&file)?;
    let contents = file.contents(options.encoding)?;
    backend
        .write(&location, &contents, options)
        .await
        .inspect_err(|err| warn!(location = %location.display(), error = %err, "write failed"))?;

    debug!(location = %location.display(), bytes = contents.len(), "wrote file");
    Ok(file)
}
