//! Client configuration.
//!
//! Layered the usual way: built-in defaults, then an optional TOML file
//! (`presentai.toml`, or the path in `PRESENTAI_CONFIG`), then environment
//! variables such as `PRESENTAI__API__BASE_URL`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CoachError, CoachResult};
use crate::state::SelectionTuning;

const DEFAULT_CONFIG_PATH: &str = "presentai.toml";
const ENV_PREFIX: &str = "PRESENTAI";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the analysis backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PollingSettings {
    /// Delay between job status checks.
    pub status_interval_ms: u64,
    /// Delay between question-generation status checks.
    pub question_interval_ms: u64,
    /// Give up after this long without a terminal status.
    pub max_wait_secs: u64,
}

impl PollingSettings {
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    pub fn question_interval(&self) -> Duration {
        Duration::from_millis(self.question_interval_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectionSettings {
    /// Seconds of context shown before a clicked marker.
    pub lookback_secs: f64,
    /// Slack around a clicked marker before automatic selection resumes.
    pub buffer_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineSettings {
    /// Narrowest a marker may render, as a percentage of the timeline.
    pub min_marker_width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindowSettings {
    pub width: f64,
    pub height: f64,
}

/// Top-level configuration, shared with components through context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub polling: PollingSettings,
    pub selection: SelectionSettings,
    pub timeline: TimelineSettings,
    pub window: WindowSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_secs: 600,
            },
            polling: PollingSettings {
                status_interval_ms: 3000,
                question_interval_ms: 2000,
                max_wait_secs: 120,
            },
            selection: SelectionSettings {
                lookback_secs: 1.0,
                buffer_secs: 2.0,
            },
            timeline: TimelineSettings {
                min_marker_width_percent: 0.3,
            },
            window: WindowSettings {
                width: 1280.0,
                height: 860.0,
            },
        }
    }
}

impl ClientConfig {
    /// Load configuration from the default file location and the process environment.
    pub fn load() -> CoachResult<Self> {
        let path = std::env::var("PRESENTAI_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(Some(&path), environment())
    }

    /// Load configuration from an explicit file and environment source.
    pub fn load_from(path: Option<&Path>, env: config::Environment) -> CoachResult<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url.clone())?
            .set_default("api.request_timeout_secs", defaults.api.request_timeout_secs)?
            .set_default("polling.status_interval_ms", defaults.polling.status_interval_ms)?
            .set_default("polling.question_interval_ms", defaults.polling.question_interval_ms)?
            .set_default("polling.max_wait_secs", defaults.polling.max_wait_secs)?
            .set_default("selection.lookback_secs", defaults.selection.lookback_secs)?
            .set_default("selection.buffer_secs", defaults.selection.buffer_secs)?
            .set_default(
                "timeline.min_marker_width_percent",
                defaults.timeline.min_marker_width_percent,
            )?
            .set_default("window.width", defaults.window.width)?
            .set_default("window.height", defaults.window.height)?;

        if let Some(path) = path {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                builder = builder.add_source(config::File::from(path));
            } else {
                log::debug!("No configuration file at {}, using defaults", path.display());
            }
        }

        let loaded: Self = builder.add_source(env).build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values that would stall the polling loops or unpin a clicked marker.
    pub fn validate(&self) -> CoachResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(CoachError::Config("api.base_url must not be empty".to_string()));
        }
        if self.polling.status_interval_ms == 0 || self.polling.question_interval_ms == 0 {
            return Err(CoachError::Config("polling intervals must be positive".to_string()));
        }
        if self.polling.max_wait_secs == 0 {
            return Err(CoachError::Config("polling.max_wait_secs must be positive".to_string()));
        }
        if self.selection.lookback_secs < 0.0 || self.selection.buffer_secs < 0.0 {
            return Err(CoachError::Config(
                "selection windows must not be negative".to_string(),
            ));
        }
        // A marker seek lands lookback_secs before the start; it must stay pinned.
        if self.selection.lookback_secs > self.selection.buffer_secs {
            return Err(CoachError::Config(format!(
                "selection.lookback_secs ({}) must not exceed selection.buffer_secs ({})",
                self.selection.lookback_secs, self.selection.buffer_secs
            )));
        }
        Ok(())
    }

    pub fn selection_tuning(&self) -> SelectionTuning {
        SelectionTuning {
            lookback: self.selection.lookback_secs,
            buffer: self.selection.buffer_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
