mod local;
mod walk;

pub use local::LocalFileReader;
pub use walk::walk_bundles;

use anyhow::{Result, bail};
use async_trait::async_trait;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// In-memory byte source, mostly useful for archives built in tests
#[async_trait]
impl ReadAt for Vec<u8> {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let start = offset as usize;
        let Some(src) = start
            .checked_add(buf.len())
            .and_then(|end| self.get(start..end))
        else {
            bail!("short read at offset {offset}");
        };
        buf.copy_from_slice(src);
        Ok(buf.len())
    }

    fn size(&self) -> u64 {
        self.len() as u64
    }
}
