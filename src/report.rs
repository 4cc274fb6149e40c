//! Collects resolved bundles into the final dependency report.

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::bundle::{Dependency, resolve_bundle};

const SEPARATOR_WIDTH: usize = 70;

/// Dependencies found in a scan, plus how many files were looked at.
#[derive(Debug, Default)]
pub struct Report {
    bundles: usize,
    dependencies: Vec<Dependency>,
}

impl Report {
    pub fn new(bundles: usize, mut dependencies: Vec<Dependency>) -> Self {
        dependencies.sort();
        Self {
            bundles,
            dependencies,
        }
    }

    pub fn bundles(&self) -> usize {
        self.bundles
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total number of found bundles: {}", self.bundles)?;
        writeln!(
            f,
            "Total number of found dependencies: {}",
            self.dependencies.len()
        )?;
        writeln!(f, "{}", "*".repeat(SEPARATOR_WIDTH))?;
        for dependency in &self.dependencies {
            writeln!(f, "{dependency}")?;
        }
        Ok(())
    }
}

/// Resolve every bundle in turn and build the sorted report.
///
/// Bundles are processed one at a time; each archive is closed before the
/// next one is opened. A bundle that cannot be resolved is logged and left
/// out, it never stops the scan.
pub async fn collect(bundles: &[PathBuf]) -> Report {
    let mut dependencies = Vec::new();

    for path in bundles {
        match resolve_bundle(path).await {
            Ok(Some(dependency)) => {
                debug!(
                    "Resolved {}:{}:{} from {}",
                    dependency.group().unwrap_or_default(),
                    dependency.artifact(),
                    dependency.version(),
                    path.display()
                );
                dependencies.push(dependency);
            }
            Ok(None) => {}
            Err(e) => warn!("{e}"),
        }
    }

    Report::new(bundles.len(), dependencies)
}
