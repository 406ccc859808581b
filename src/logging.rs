//! Logging initialisation for the CLI.
//!
//! The library only emits `tracing` events. A host that already installs a
//! subscriber (or none at all) gets them as-is; the `webp-images` binary calls
//! [`init`] once at startup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` overrides the level chosen by `verbose`. Calling this twice is
/// harmless: the second install is ignored.
pub fn init(verbose: bool, json_format: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}
