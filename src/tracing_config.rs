//! Log filtering follows the usual `RUST_LOG` syntax. `TS_ANNOTATE_LOG` wins over
//! `RUST_LOG`; with neither set the level comes from the `-v` count.
//!
//! ```bash
//! ts-annotate src                              # one line per file
//! ts-annotate -v src                           # plus per-stage debug events
//! TS_ANNOTATE_LOG=ts_annotate=trace ts-annotate src
//! ```

use tracing_subscriber::EnvFilter;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "TS_ANNOTATE_LOG";

/// Default filter directive for a given `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbose: u8) -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(val)
    } else if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_directive(verbose))
    }
}

/// Installs the global subscriber. Everything goes to stderr.
pub fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
