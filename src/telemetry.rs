//! Opt-in log output for the layout pipeline.
//!
//! Range checks and tick decisions log at `debug`, cache misses at `trace`
//! and glyph fallbacks at `warn`. Hosts that already own a subscriber can
//! ignore this module.

/// Installs a compact stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Yields `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::init_default_tracing;

    #[test]
    fn init_is_a_no_op_without_the_feature() {
        assert!(!init_default_tracing());
    }
}
