use std::sync::Once;

/// Filter used when nothing else is configured: the color crates at `info`,
/// everything else (dependencies, host code) at `warn`.
pub const DEFAULT_FILTER: &str = "warn,legible_engine=info,legible_studio=info";

/// Filter for [`LoggingConfig::verbose`]: per-pass summaries and trigger
/// traffic from the color crates.
pub const VERBOSE_FILTER: &str = "warn,legible_engine=debug,legible_studio=debug";

/// Logger configuration.
///
/// The effective filter is picked by [`resolve_filter`](Self::resolve_filter):
/// an explicit `env_filter` first, then `verbose`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter syntax, e.g. `"legible_engine=trace"`.
    pub env_filter: Option<String>,
    pub verbose: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            verbose: false,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Filter string to install, given the value of `RUST_LOG` (if any).
    pub fn resolve_filter(&self, rust_log: Option<&str>) -> String {
        let rust_log = rust_log.map(str::trim).filter(|f| !f.is_empty());
        match (&self.env_filter, self.verbose, rust_log) {
            (Some(filter), _, _) => filter.clone(),
            (None, true, _) => VERBOSE_FILTER.to_string(),
            (None, false, Some(env)) => env.to_string(),
            (None, false, None) => DEFAULT_FILTER.to_string(),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Uses `try_init` so a logger installed by a
/// host application is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = config.resolve_filter(rust_log.as_deref());

        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&filter)
            .format_timestamp(None)
            .write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter {filter:?}");
        }
    });
}
