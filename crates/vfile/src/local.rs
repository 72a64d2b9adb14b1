use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::backend::FsBackend;
use crate::options::{ReadOptions, WriteOptions};

/// Local filesystem backend
///
/// `std::fs` for blocking calls, `tokio::fs` for the rest. Open flags and
/// mode map straight onto `OpenOptions`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl FsBackend for LocalFs {
    fn read_sync(&self, location: &Path, options: ReadOptions) -> io::Result<Vec<u8>> {
        let mut file: fs::File = options.open_options().open(location)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn write_sync(&self, location: &Path, data: &[u8], options: WriteOptions) -> io::Result<()> {
        let mut file: fs::File = options.open_options().open(location)?;
        file.write_all(data)
    }

    async fn read(&self, location: &Path, options: ReadOptions) -> io::Result<Vec<u8>> {
        let mut file = tokio::fs::OpenOptions::from(options.open_options())
            .open(location)
            .await?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).await?;
        Ok(bytes)
    }

    async fn write(&self, location: &Path, data: &[u8], options: WriteOptions) -> io::Result<()> {
        let mut file = tokio::fs::OpenOptions::from(options.open_options())
            .open(location)
            .await?;
        file.write_all(data).await?;
        // tokio hands writes to a blocking pool; wait for them to land
        file.flush().await
    }
}
