//! Subscriber setup for the `tracing` output of the interpreter.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "VSVM_LOG";

/// Install a stderr subscriber. `trace` forces `debug` for every target,
/// otherwise the filter comes from `VSVM_LOG` and falls back to `warn`.
///
/// Installing twice is harmless; the first subscriber stays.
pub fn init(trace: bool) {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
