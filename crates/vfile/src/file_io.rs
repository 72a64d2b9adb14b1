use std::fmt;
use std::sync::Arc;

use crate::backend::FsBackend;
use crate::local::LocalFs;

/// Entry point for reading and writing virtual files through a backend
///
/// The free functions at the crate root use [`FileIo::local`]. Build one
/// over another [`FsBackend`] to redirect the primitives, e.g. to a
/// [`MemoryFs`](crate::MemoryFs) in tests. Cloning shares the backend.
#[derive(Clone)]
pub struct FileIo {
    pub(crate) backend: Arc<dyn FsBackend>,
}

impl FileIo {
    pub fn new(backend: impl FsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Share a backend the caller keeps a handle to
    pub fn from_arc(backend: Arc<dyn FsBackend>) -> Self {
        Self { backend }
    }

    pub fn local() -> Self {
        Self::new(LocalFs)
    }

    pub fn backend(&self) -> &dyn FsBackend {
        &*self.backend
    }
}

impl Default for FileIo {
    fn default() -> Self {
        Self::local()
    }
}

impl fmt::Debug for FileIo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileIo").finish_non_exhaustive()
    }
}
