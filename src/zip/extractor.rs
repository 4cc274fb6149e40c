use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::io::Read;
use std::sync::Arc;

use crate::io::ReadAt;
use anyhow::{Context, Result, bail};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Upper bound for a single decompressed entry.
///
/// Manifests and POMs are small; anything bigger is not metadata and is
/// refused rather than inflated into memory.
pub const MAX_ENTRY_SIZE: u64 = 16 * 1024 * 1024;

/// High-level access to the entries of one archive
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all entries in the archive
    pub async fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.list_files().await
    }

    /// Decompress an entry into memory, verifying its CRC-32.
    pub async fn extract_to_memory(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        if entry.is_encrypted() {
            bail!("Entry {} is encrypted", entry.file_name);
        }
        if entry.uncompressed_size > MAX_ENTRY_SIZE {
            bail!(
                "Entry {} is too large ({} bytes)",
                entry.file_name,
                entry.uncompressed_size
            );
        }

        let data_offset = self.parser.get_data_offset(entry).await?;
        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_at(data_offset, &mut raw).await?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                let mut out = Vec::with_capacity(entry.uncompressed_size as usize);
                DeflateDecoder::new(raw.as_slice())
                    .take(MAX_ENTRY_SIZE + 1)
                    .read_to_end(&mut out)
                    .with_context(|| format!("Corrupt deflate stream in {}", entry.file_name))?;
                out
            }
            CompressionMethod::Unknown(method) => {
                bail!(
                    "Unsupported compression method {} for {}",
                    method,
                    entry.file_name
                );
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            bail!(
                "Size mismatch for {}: expected {} bytes, got {}",
                entry.file_name,
                entry.uncompressed_size,
                data.len()
            );
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            bail!("CRC mismatch for {}", entry.file_name);
        }

        Ok(data)
    }
}
