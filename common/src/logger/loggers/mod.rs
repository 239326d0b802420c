// Copyright (c) 2018-2022 The Botho Foundation

//! Tracing subscriber setup.

use std::{
    env,
    io::{self, IsTerminal},
    sync::Once,
};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Global initialization guard for the tracing subscriber.
static INIT: Once = Once::new();

/// Where log lines go.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Output {
    Stdout,
    Stderr,
    /// The test harness' captured output.
    Test,
}

/// `RUST_LOG`, else `MW_LOG`, else `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("MW_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn env_flag(name: &str) -> bool {
    env::var(name).unwrap_or_default() == "1"
}

/// Install the process-wide subscriber. Only the first call has an effect,
/// and a subscriber installed elsewhere is left in place.
fn init_tracing_subscriber(use_json: bool, output: Output) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(env_filter());

        let result = if use_json {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::CLOSE);
            match output {
                Output::Stdout => registry.with(layer.with_writer(io::stdout)).try_init(),
                Output::Stderr => registry.with(layer.with_writer(io::stderr)).try_init(),
                Output::Test => registry.with(layer.with_test_writer()).try_init(),
            }
        } else {
            let layer = fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            match output {
                Output::Stdout => registry
                    .with(layer.with_ansi(io::stdout().is_terminal()).with_writer(io::stdout))
                    .try_init(),
                Output::Stderr => registry
                    .with(layer.with_ansi(io::stderr().is_terminal()).with_writer(io::stderr))
                    .try_init(),
                Output::Test => registry
                    .with(layer.with_ansi(false).with_test_writer())
                    .try_init(),
            }
        };

        // Another subscriber may already be installed.
        let _ = result;
    });
}

/// Set up logging for a binary.
///
/// Reads the following environment variables:
/// - `RUST_LOG` or `MW_LOG`: log level filter (default: "info")
/// - `MW_LOG_JSON`: if "1", output JSON
/// - `MW_LOG_STDERR`: if "1", write to stderr instead of stdout
pub fn init_root_logging() {
    let output = if env_flag("MW_LOG_STDERR") {
        Output::Stderr
    } else {
        Output::Stdout
    };
    init_tracing_subscriber(env_flag("MW_LOG_JSON"), output);
}

/// Set up logging for tests, writing through the test harness so output is
/// only shown for failing tests. Safe to call from every test.
pub fn init_test_logging() {
    init_tracing_subscriber(env_flag("MW_LOG_JSON"), Output::Test);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_test_logging();
        init_test_logging();
        init_root_logging();
        tracing::info!("logging initialized");
    }
}
