//! Diagnostic tracing on stderr.
//!
//! Silent unless `AGENTS_MD_LOG` holds an `EnvFilter` directive such as
//! `debug` or `agents_md_setup=info`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "AGENTS_MD_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
