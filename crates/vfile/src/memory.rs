//! In-memory backend
//!
//! A flat map of absolute paths to contents. There are no directories, so
//! parent paths never need to exist. Every primitive call is counted, which
//! lets tests assert that a failed call never reached the filesystem.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::backend::FsBackend;
use crate::options::{OpenFlag, ReadOptions, WriteOptions};

#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    calls: AtomicUsize,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial file contents
    pub fn with_files<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<PathBuf>,
        C: Into<Vec<u8>>,
    {
        let files = files
            .into_iter()
            .map(|(path, contents)| (path.into(), contents.into()))
            .collect();
        Self {
            files: RwLock::new(files),
            calls: AtomicUsize::new(0),
        }
    }

    /// Current contents at `location`
    pub fn get(&self, location: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location.as_ref())
            .cloned()
    }

    /// Number of read/write primitives invoked so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn open<'a>(
        files: &'a mut HashMap<PathBuf, Vec<u8>>,
        location: &Path,
        flag: OpenFlag,
    ) -> io::Result<&'a mut Vec<u8>> {
        let contents = match files.entry(location.to_path_buf()) {
            Entry::Occupied(_) if flag.exclusive() => {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("file exists: {}", location.display()),
                ))
            }
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) if flag.creates() => entry.insert(Vec::new()),
            Entry::Vacant(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file: {}", location.display()),
                ))
            }
        };
        if flag.truncates() {
            contents.clear();
        }
        Ok(contents)
    }
}

#[async_trait]
impl FsBackend for MemoryFs {
    fn read_sync(&self, location: &Path, options: ReadOptions) -> io::Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let flag = options.open_flag();
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        let contents = Self::open(&mut files, location, flag)?;
        if !flag.reads() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("`{flag}` does not open for reading"),
            ));
        }
        Ok(contents.clone())
    }

    fn write_sync(&self, location: &Path, data: &[u8], options: WriteOptions) -> io::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let flag = options.open_flag();
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        let contents = Self::open(&mut files, location, flag)?;
        if !flag.writes() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("`{flag}` does not open for writing"),
            ));
        }
        if flag.appends() {
            contents.extend_from_slice(data);
        } else {
            // Overwrite from the start, keeping any longer tail
            let overlap = data.len().min(contents.len());
            contents[..overlap].copy_from_slice(&data[..overlap]);
            contents.extend_from_slice(&data[overlap..]);
        }
        Ok(())
    }

    async fn read(&self, location: &Path, options: ReadOptions) -> io::Result<Vec<u8>> {
        tokio::task::yield_now().await;
        self.read_sync(location, options)
    }

    async fn write(&self, location: &Path, data: &[u8], options: WriteOptions) -> io::Result<()> {
        tokio::task::yield_now().await;
        self.write_sync(location, data, options)
    }
}
