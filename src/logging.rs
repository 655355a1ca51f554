use crate::config::{LogFormat, LoggingConfig};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for the configured level, raised by `-v` flags.
///
/// Each `-v` only ever increases verbosity: the more verbose of the
/// configured level and the flag's level wins. A configured directive that
/// is not a bare level (e.g. `replace_bazel_deps=trace`) is kept and the
/// flag's level becomes the default for everything else. `RUST_LOG` wins
/// over both when set.
pub fn filter_directive(config: &LoggingConfig, verbose: u8) -> String {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        return filter;
    }

    let flag = match verbose {
        0 => return config.level.clone(),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    match LevelFilter::from_str(config.level.trim()) {
        Ok(configured) => configured.max(flag).to_string().to_lowercase(),
        Err(_) => format!("{},{}", flag.to_string().to_lowercase(), config.level),
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries only
/// the missing-placeholder diagnostic.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let directive = filter_directive(config, verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(verbose >= 2)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Warning: logging already initialized: {}", e);
    }
}
