use clap::Parser;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "bundle-deps")]
#[command(version)]
#[command(about = "Print Maven dependency declarations for a directory of deployed OSGi bundles", long_about = None)]
#[command(after_help = "Examples:\n  \
  bundle-deps /opt/liferay/osgi                 scan every file below the OSGi directory\n  \
  bundle-deps -q deploy > deps.xml 2> skipped.log   keep the report and the diagnostics apart")]
pub struct Cli {
    /// Directory with deployed OSGi bundles
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Also log every resolved bundle
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (-q hides informational notes, -qq hides skipped bundles)
    #[arg(short = 'q', action = clap::ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

/// Invalid scan root. Reported before anything is printed to stdout.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Directory is not readable: {} ({source})", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Cli {
    pub fn log_level(&self) -> Level {
        match (self.verbose, self.quiet) {
            (true, _) => Level::DEBUG,
            (false, 0) => Level::INFO,
            (false, 1) => Level::WARN,
            (false, _) => Level::ERROR,
        }
    }

    /// The scan root, checked to be an existing, readable directory.
    pub fn root_dir(&self) -> Result<&Path, UsageError> {
        let root = self.root.as_path();
        if !root.exists() {
            return Err(UsageError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(UsageError::NotADirectory(root.to_path_buf()));
        }
        std::fs::read_dir(root).map_err(|source| UsageError::Unreadable {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(root)
    }
}
