use std::sync::OnceLock;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static TRACER: OnceLock<()> = OnceLock::new();

pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Logs go to stderr so they never interleave with the rendered grid.
/// `RUST_LOG` wins over `-v` when set.
pub fn setup_logger(verbose: u8, ansi: bool) {
    TRACER.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "countrydeck={}",
                level_for_verbosity(verbose).as_str().to_lowercase()
            ))
        });

        let stderr_layer = fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(std::io::stderr)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(stderr_layer)
            .try_init()
            .ok();
    });
}
