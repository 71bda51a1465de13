use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a global tracing subscriber for hosts that do not bring their own.
///
/// Filter comes from the environment (RUST_LOG), defaulting to "info".
pub fn init_logging(to_stderr: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        let _ = registry.with(stderr_layer).try_init();
    } else {
        let stdout_layer = fmt::layer().with_target(true);
        let _ = registry.with(stdout_layer).try_init();
    }
}
