use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` switches the crate to debug.
pub fn init_logging(verbose: bool) {
    // Ensure logs directory exists
    let _ = fs::create_dir_all("logs");

    // Create a non-blocking file appender for daily log rotation
    let file_appender = tracing_appender::rolling::daily("logs", "review_scraper.log");
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    // JSON lines in the log file
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Logs go to stderr so the completion line on stdout stays clean
    let console_layer = fmt::layer().with_target(verbose).with_writer(std::io::stderr);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // Set the global default subscriber
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // We need to keep the guard in scope to ensure logs are flushed on exit
    std::mem::forget(_guard);
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "review_scraper=debug,info"
    } else {
        "review_scraper=info,warn"
    }
}
