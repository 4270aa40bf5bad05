// src/log/mod.rs
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

const LOG_LEVEL_ENV: &str = "MOTTOOTH_LOG_LEVEL";
const LOG_FORMAT_ENV: &str = "MOTTOOTH_LOG_FORMAT";

/// Initialize tracing subscriber.
///
/// Behavior:
/// - Log level is read from `MOTTOOTH_LOG_LEVEL` if set, otherwise falls back to `RUST_LOG`,
///   then to `info`.
/// - `MOTTOOTH_LOG_FORMAT=json` switches to JSON lines. Any other value uses the
///   human-readable formatter.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = build_filter(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    let use_json = is_json_format(std::env::var(LOG_FORMAT_ENV).ok().as_deref());

    let fmt_layer = if use_json {
        fmt::layer()
            .json()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).is_ok()
}

fn build_filter(level: Option<&str>) -> EnvFilter {
    match level.map(str::trim).filter(|l| !l.is_empty()) {
        Some(lvl) => EnvFilter::new(lvl),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

fn is_json_format(raw: Option<&str>) -> bool {
    raw.map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
