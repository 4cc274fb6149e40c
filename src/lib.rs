//! # bundle-deps
//!
//! Reconstructs a Maven dependency list from a directory of deployed OSGi
//! bundles.
//!
//! Every file below the root is opened as a zip archive. The bundle's
//! `META-INF/MANIFEST.MF` names the artifact and version; bundles outside
//! the `com.liferay` namespace get their coordinates from the pom.xml that
//! Maven embedded under `META-INF/maven/`. Resolved coordinates are sorted
//! and printed as `<dependency>` blocks with `provided` scope.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use bundle_deps::{collect, walk_bundles};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bundles = walk_bundles(Path::new("/opt/liferay/osgi"))?;
//!     let report = collect(&bundles).await;
//!     print!("{report}");
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod cli;
pub mod io;
pub mod logger;
pub mod report;
pub mod zip;

pub use bundle::{BundleError, Dependency, resolve_archive, resolve_bundle};
pub use cli::{Cli, UsageError};
pub use io::{LocalFileReader, ReadAt, walk_bundles};
pub use report::{Report, collect};
pub use zip::{ZipExtractor, ZipFileEntry};
