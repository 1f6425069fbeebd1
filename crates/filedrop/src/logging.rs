//! Diagnostic logging for programs embedding a [`Session`](crate::Session)
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the host. [`init`] is the stock setup used by the `dump` demo.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "FILEDROP_LOG";

/// Engine events at info, everything else at warn.
pub const DEFAULT_DIRECTIVES: &str = "filedrop=info,filedrop_fs=info,warn";

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Log to stderr, leaving stdout to the operator prompts.
pub fn init() -> Result<(), InitError> {
    init_with_writer(std::io::stderr)
}

/// Install the global subscriber writing to `writer`.
///
/// Fails if a directive in the environment does not parse or a global
/// subscriber is already set.
pub fn init_with_writer<W>(writer: W) -> Result<(), InitError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let directives = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .ok();

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(filter(directives.as_deref())?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn filter(directives: Option<&str>) -> Result<EnvFilter, ParseError> {
    match directives.map(str::trim) {
        Some(spec) if !spec.is_empty() => EnvFilter::try_new(spec),
        _ => EnvFilter::try_new(DEFAULT_DIRECTIVES),
    }
}
