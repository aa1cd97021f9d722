//! Simulation defaults and their validation.

use crate::core::{Grid, HistoryLedger, SimulationError, SimulationState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Settings for a new session.
///
/// Missing fields fall back to the defaults: a 20x20 grid, a 650 ms tick,
/// 30 history entries and an autosave every 5 steps.
///
/// # Example
///
/// ```rust
/// use cellsim::config::SimulationConfig;
///
/// let config = SimulationConfig::from_json_str(r#"{ "rows": 40 }"#).unwrap();
/// assert_eq!(config.rows, 40);
/// assert_eq!(config.cols, 20);
///
/// let config = SimulationConfig::default().with_interval_ms(100).with_max_history(5);
/// let state = config.initial_state().unwrap();
/// assert_eq!(state.history().capacity(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub interval_ms: u64,
    pub max_history: usize,
    /// Persist an already-stored grid every this many steps
    pub autosave_every: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            interval_ms: crate::core::DEFAULT_INTERVAL_MS,
            max_history: crate::core::MAX_HISTORY,
            autosave_every: 5,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = cols;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn with_autosave_every(mut self, steps: u64) -> Self {
        self.autosave_every = steps;
        self
    }

    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: u64| {
            if value == 0 {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be at least 1".to_string(),
                })
            } else {
                Ok(())
            }
        };
        positive("rows", self.rows as u64)?;
        positive("cols", self.cols as u64)?;
        positive("interval_ms", self.interval_ms)?;
        positive("max_history", self.max_history as u64)?;
        positive("autosave_every", self.autosave_every)?;
        Ok(())
    }

    /// Empty grid at step 0 configured with these settings.
    pub fn initial_state(&self) -> Result<SimulationState, SimulationError> {
        Ok(SimulationState::from_parts(
            Grid::empty(self.rows, self.cols)?,
            0,
            self.interval_ms,
            HistoryLedger::new(self.max_history),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sandbox_settings() {
        let config = SimulationConfig::default();
        assert_eq!((config.rows, config.cols), (20, 20));
        assert_eq!(config.interval_ms, 650);
        assert_eq!(config.max_history, 30);
        assert_eq!(config.autosave_every, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config =
            SimulationConfig::from_json_str(r#"{ "cols": 35, "max_history": 3 }"#).unwrap();
        assert_eq!(config.cols, 35);
        assert_eq!(config.max_history, 3);
        assert_eq!(config.rows, 20);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = SimulationConfig::from_json_str(r#"{ "rows": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "rows", .. }));

        let err = SimulationConfig::default()
            .with_autosave_every(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "autosave_every",
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SimulationConfig::from_json_str("{ rows: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn initial_state_applies_settings() {
        let state = SimulationConfig::default()
            .with_rows(7)
            .with_cols(9)
            .with_interval_ms(120)
            .with_max_history(4)
            .initial_state()
            .unwrap();

        assert_eq!((state.rows(), state.cols()), (7, 9));
        assert_eq!(state.interval_ms(), 120);
        assert_eq!(state.history().capacity(), 4);
        assert_eq!(state.step(), 0);
    }
}
