//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives when `RUST_LOG` is unset: platform crates at
/// debug, everything else (hyper, reqwest connection churn) at warn.
const DEFAULT_DIRECTIVES: &str = "warn,support_common=debug,support_admin_client=debug";

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directives used when `RUST_LOG` is not set
    pub directives: String,
    /// Whether to output JSON format
    pub json_output: bool,
    /// Whether to colorize output
    pub ansi: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            directives: DEFAULT_DIRECTIVES.to_string(),
            json_output: false,
            ansi: true,
        }
    }
}

impl TracingConfig {
    /// Set the fallback filter directives.
    #[must_use]
    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = directives.into();
        self
    }

    /// Enable JSON output (implies no ANSI colors).
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self.ansi = false;
        self
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured directives. Should be
/// called once at application startup; a second call panics in the
/// underlying registry, so leave it to the outermost binary.
pub fn init_tracing(config: &TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.directives));

    if config.json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_ansi(config.ansi))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert!(config.directives.contains("support_admin_client=debug"));
        assert!(!config.json_output);
        assert!(config.ansi);
    }

    #[test]
    fn test_json_output_disables_ansi() {
        let config = TracingConfig::default().with_json_output();
        assert!(config.json_output);
        assert!(!config.ansi);
    }
}
