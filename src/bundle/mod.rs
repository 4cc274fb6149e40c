//! Dependency coordinates recovered from OSGi bundles.
//!
//! A bundle carries two possibly-conflicting sources of identity: the
//! OSGi headers of its manifest and the pom.xml Maven embedded at build
//! time. [`resolve_bundle`] reads both and decides which one to trust.

mod dependency;
mod descriptor;
mod error;
mod manifest;
mod resolver;

pub use dependency::{Dependency, VENDOR_GROUP};
pub use descriptor::{dependency_from_descriptor, is_descriptor, is_own_descriptor};
pub use error::BundleError;
pub use manifest::{Manifest, MANIFEST_NAME, dependency_from_manifest, is_manifest};
pub use resolver::{resolve_archive, resolve_bundle};
