//! Environment-driven configuration.

use stockroom_observability::LogFormat;

/// Runtime configuration for the `stockroom` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `STOCKROOM_LOG_FORMAT`: `json` (default) or `pretty`.
    pub log_format: LogFormat,
    /// `STOCKROOM_SEED`: load the sample inventory at startup (default `true`).
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            seed: true,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    ///
    /// Returns the config plus any warnings; logging is not set up yet when
    /// this runs, so the caller reports them once it is.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (tests pass a closure over a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(raw) = lookup("STOCKROOM_LOG_FORMAT") {
            match raw.parse() {
                Ok(format) => config.log_format = format,
                Err(err) => warnings.push(format!("STOCKROOM_LOG_FORMAT ignored: {err}")),
            }
        }

        if let Some(raw) = lookup("STOCKROOM_SEED") {
            match parse_flag(&raw) {
                Some(seed) => config.seed = seed,
                None => warnings.push(format!(
                    "STOCKROOM_SEED ignored: expected true/false, got {raw:?}"
                )),
            }
        }

        (config, warnings)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
