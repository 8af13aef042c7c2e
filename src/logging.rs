//! Diagnostic logging setup
//!
//! Logs go to stderr so that report output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "BUNDLEKIT_LOG";

fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Install the global subscriber; `BUNDLEKIT_LOG` overrides the default level
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    // A second install (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
