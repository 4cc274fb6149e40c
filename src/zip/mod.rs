//! Read-only access to zip-structured bundles.
//!
//! Only what metadata extraction needs is implemented: locating the
//! central directory (including ZIP64), listing entries, and
//! decompressing a single entry on demand.
//!
//! - [`structures`]: fixed records of the format (EOCD, ZIP64 EOCD, headers)
//! - [`parser`]: binary parsing from any [`ReadAt`](crate::io::ReadAt) source
//! - [`extractor`]: entry listing and STORED / DEFLATE decompression
//!
//! Encrypted entries, multi-disk archives and compression methods other
//! than STORED and DEFLATE are rejected.

mod extractor;
mod parser;
mod structures;

pub use extractor::{MAX_ENTRY_SIZE, ZipExtractor};
pub use parser::ZipParser;
pub use structures::*;
