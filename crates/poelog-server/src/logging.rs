//! Logging setup.
//!
//! Structured tracing with a handful of presets, per-target overrides from
//! the CLI, text or JSON output, and `RUST_LOG` taking precedence when set.
//! High-frequency targets (the 10ms tailer poll) stay quiet outside trace.

use std::collections::HashMap;
use tracing::Level;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: '{}'. Use 'text' or 'json'.", s)),
        }
    }
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Startup and warnings only; parsing noise is off.
    #[default]
    Production,
    /// Operational detail, one line per message event.
    Verbose,
    /// Everything except per-poll traces.
    Debug,
    /// Everything.
    Trace,
    /// Warnings and errors only.
    Quiet,
}

/// Logging configuration built from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub preset: LogPreset,
    /// Per-target overrides, e.g. "parser" -> DEBUG.
    pub overrides: HashMap<String, Level>,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn from_cli(
        verbose: bool,
        debug: bool,
        trace: bool,
        quiet: bool,
        log_overrides: Vec<String>,
        format: LogFormat,
    ) -> Self {
        let preset = if quiet {
            LogPreset::Quiet
        } else if trace {
            LogPreset::Trace
        } else if debug {
            LogPreset::Debug
        } else if verbose {
            LogPreset::Verbose
        } else {
            LogPreset::Production
        };

        // Overrides look like "target=level", comma-separable; bare targets
        // get the poelog:: prefix.
        let mut overrides = HashMap::new();
        for override_str in log_overrides {
            for part in override_str.split(',') {
                if let Some((target, level_str)) = part.split_once('=') {
                    let target = target.trim();
                    let full_target = if target.starts_with("poelog::") || target == "tower_http" {
                        target.to_string()
                    } else {
                        format!("poelog::{}", target)
                    };
                    if let Ok(level) = level_str.trim().parse::<Level>() {
                        overrides.insert(full_target, level);
                    }
                }
            }
        }

        Self {
            preset,
            overrides,
            format,
        }
    }

    /// Build an EnvFilter from this configuration.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }

        let mut directives: Vec<String> = match self.preset {
            LogPreset::Production => vec![
                "poelog::startup=info".into(),
                "poelog::tailer=info".into(),
                "poelog::parser=warn".into(),
                "poelog::splitter=warn".into(),
                "poelog::api=info".into(),
                "poelog::ws=info".into(),
                "poelog::compose=info".into(),
                "tower_http=warn".into(),
            ],
            LogPreset::Verbose => vec![
                "poelog=info".into(),
                "tower_http=info".into(),
            ],
            LogPreset::Debug => vec![
                "poelog=debug".into(),
                "tower_http=debug".into(),
            ],
            LogPreset::Trace => vec![
                "poelog=trace".into(),
                "tower_http=trace".into(),
            ],
            LogPreset::Quiet => vec![
                "poelog=warn".into(),
                "tower_http=error".into(),
            ],
        };

        for (target, level) in &self.overrides {
            directives.push(format!("{}={}", target, level.as_str().to_lowercase()));
        }

        let filter_str = directives.join(",");
        EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init(config: &LogConfig) {
    let filter = config.build_filter();

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_file(false))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(true))
                .init();
        }
    }
}
