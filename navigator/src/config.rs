// config.rs - Timing and feel parameters for the navigation controller

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error_handling::{NavigatorError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Camera transition length in seconds
    pub transition_secs: f32,
    /// Route reveal length in seconds; the marker appears when it ends
    pub reveal_secs: f32,
    /// Idle orbit speed in radians per second
    pub auto_rotate_speed: f32,
    /// Per-frame pointer smoothing factor in (0, 1]
    pub parallax_smoothing: f32,
    /// Look-at offset at full pointer deflection, horizontal then vertical
    pub parallax_strength: [f32; 2],
    /// Keep adding the parallax offset while a transition runs
    pub parallax_during_transition: bool,
    /// Distance below which two camera transforms count as equal
    pub epsilon: f32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            transition_secs: 1.2,
            reveal_secs: 4.0,
            auto_rotate_speed: 0.1,
            parallax_smoothing: 0.05,
            parallax_strength: [2.0, 1.0],
            parallax_during_transition: true,
            epsilon: 1e-3,
        }
    }
}

impl NavigatorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| NavigatorError::io(path, e))?;
        let config: NavigatorConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("transition_secs", self.transition_secs),
            ("reveal_secs", self.reveal_secs),
            ("epsilon", self.epsilon),
            ("auto_rotate_speed", self.auto_rotate_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(NavigatorError::invalid_config(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if !(self.parallax_smoothing > 0.0 && self.parallax_smoothing <= 1.0) {
            return Err(NavigatorError::invalid_config(format!(
                "parallax_smoothing must be in (0, 1] (got {})",
                self.parallax_smoothing
            )));
        }

        if self.parallax_strength.iter().any(|s| !s.is_finite()) {
            return Err(NavigatorError::invalid_config("parallax_strength must be finite"));
        }

        Ok(())
    }

    pub fn transition_duration(&self) -> Duration {
        secs_to_duration(self.transition_secs)
    }

    pub fn reveal_duration(&self) -> Duration {
        secs_to_duration(self.reveal_secs)
    }
}

/// Seconds to a duration rounded to whole microseconds, so `1.2` maps to
/// exactly 1200 ms instead of carrying f32 noise.
pub fn secs_to_duration(secs: f32) -> Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_micros((secs as f64 * 1e6).round() as u64)
}
