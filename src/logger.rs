use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Send diagnostics to stderr, leaving stdout to the report.
///
/// The level comes from the command line only; `RUST_LOG` is not read.
pub fn init_cli_logger(level: Level) {
    let filter = EnvFilter::new(format!("bundle_deps={level}"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .compact(),
        )
        .init();
}
