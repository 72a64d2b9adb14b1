//! Read and write virtual files
//!
//! A file is described by a path, raw path bytes, a [`VFileOptions`] object
//! or an existing [`VFile`]. [`normalize`] turns any of these into a `VFile`;
//! the operations then resolve its location against its `cwd` and move its
//! value to or from disk:
//!
//! - [`read_sync`] / [`write_sync`] block the calling thread
//! - [`read`] / [`write`] return a future once the description is valid
//! - [`read_with`] / [`write_with`] spawn on the current tokio runtime and
//!   report through a callback
//!
//! All of them go through an [`FsBackend`]; the free functions use
//! [`LocalFs`], and [`FileIo`] lets callers pick another one.

pub mod async_ops;
pub mod backend;
pub mod description;
pub mod error;
pub mod file_io;
pub mod local;
pub mod memory;
pub mod options;
pub mod resolve;
pub mod sync_ops;
pub mod value;
pub mod vfile;

pub use async_ops::{read, read_with, write, write_with};
pub use backend::FsBackend;
pub use description::{normalize, Description};
pub use error::{Error, Result};
pub use file_io::FileIo;
pub use local::LocalFs;
pub use memory::MemoryFs;
pub use options::{OpenFlag, ReadOptions, WriteOptions, DEFAULT_MODE};
pub use resolve::resolve;
pub use sync_ops::{read_sync, write_sync};
pub use value::{Encoding, Value};
pub use vfile::{VFile, VFileOptions};
