//! Logging setup for the trainer binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or empty.
pub const DEFAULT_DIRECTIVE: &str = "scam_classifier=info";

/// Builds the filter from a `RUST_LOG` value, falling back to [`DEFAULT_DIRECTIVE`].
pub fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
pub fn init() {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_directive_is_kept() {
        let filter = env_filter(Some("scam_classifier=debug"));
        assert_eq!(filter.to_string(), "scam_classifier=debug");
    }

    #[test]
    fn unset_or_empty_falls_back_to_default() {
        assert_eq!(env_filter(None).to_string(), DEFAULT_DIRECTIVE);
        assert_eq!(env_filter(Some("  ")).to_string(), DEFAULT_DIRECTIVE);
    }
}
