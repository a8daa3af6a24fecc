/// Configuration management for discussion-ranking
///
/// Loads settings from `RANKING_*` environment variables (a `.env` file is
/// honoured), falling back to the platform defaults.
use crate::error::ConfigError;
use crate::services::comment_tree::{
    ThreadPolicy, DEFAULT_EDIT_WINDOW_SECONDS, DEFAULT_MAX_COMMENT_DEPTH,
};
use crate::services::hotness::{HotnessWindow, DEFAULT_HOTNESS_WINDOW_SECONDS};
use chrono::Duration;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "RANKING_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// RANKING_HOTNESS_WINDOW_SECONDS
    #[serde(default = "default_hotness_window_seconds")]
    pub hotness_window_seconds: f64,
    /// RANKING_COMMENT_EDIT_WINDOW_SECONDS
    #[serde(default = "default_comment_edit_window_seconds")]
    pub comment_edit_window_seconds: i64,
    /// RANKING_COMMENT_MAX_DEPTH
    #[serde(default = "default_comment_max_depth")]
    pub comment_max_depth: u32,
}

// Default values
fn default_hotness_window_seconds() -> f64 {
    DEFAULT_HOTNESS_WINDOW_SECONDS
}

fn default_comment_edit_window_seconds() -> i64 {
    DEFAULT_EDIT_WINDOW_SECONDS
}

fn default_comment_max_depth() -> u32 {
    DEFAULT_MAX_COMMENT_DEPTH
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            hotness_window_seconds: default_hotness_window_seconds(),
            comment_edit_window_seconds: default_comment_edit_window_seconds(),
            comment_max_depth: default_comment_max_depth(),
        }
    }
}

impl RankingConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: RankingConfig = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if HotnessWindow::new(self.hotness_window_seconds).is_none() {
            return Err(ConfigError::InvalidWindow(self.hotness_window_seconds));
        }
        if self.edit_window().is_none() {
            return Err(ConfigError::InvalidEditWindow(
                self.comment_edit_window_seconds,
            ));
        }
        if self.comment_max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(self.comment_max_depth));
        }
        Ok(())
    }

    pub fn hotness_window(&self) -> HotnessWindow {
        // Checked by validate(); a hand-built config falls back to 22h
        HotnessWindow::new(self.hotness_window_seconds).unwrap_or_default()
    }

    pub fn thread_policy(&self) -> ThreadPolicy {
        let defaults = ThreadPolicy::default();
        ThreadPolicy {
            edit_window: self.edit_window().unwrap_or(defaults.edit_window),
            max_depth: self.comment_max_depth,
        }
    }

    /// `None` when negative or too large for a `Duration`.
    fn edit_window(&self) -> Option<Duration> {
        if self.comment_edit_window_seconds < 0 {
            return None;
        }
        Duration::try_seconds(self.comment_edit_window_seconds)
    }
}
