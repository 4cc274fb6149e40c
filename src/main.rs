//! Command-line entry point: scan a directory of bundles and print the
//! dependency report to stdout. Diagnostics go to stderr.

use anyhow::Result;
use clap::Parser;
use tokio::io::AsyncWriteExt;

use bundle_deps::{Cli, collect, logger, walk_bundles};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.log_level());

    let root = cli.root_dir()?;
    let bundles = walk_bundles(root)?;
    tracing::debug!("Found {} files under {}", bundles.len(), root.display());

    let report = collect(&bundles).await;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(report.to_string().as_bytes()).await?;
    stdout.flush().await?;

    Ok(())
}
