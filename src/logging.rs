//! Tracing subscriber setup for the command-line binary.
//!
//! Logs go to stderr so `--json` result output on stdout stays clean.
//! `RUST_LOG` overrides the verbosity flag when set.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Map `-v` repetitions to a base level.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pillarscan={}", level_for(verbosity))))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbosity: u8, json: bool) {
    let subscriber = tracing_subscriber::registry().with(build_filter(verbosity));

    if json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        let _ = subscriber.with(fmt_layer).try_init();
    }
}
