//! Core configuration for keyframer-core.

use serde::{Deserialize, Serialize};

use crate::error::{KeyframeError, Result};

/// Timing configuration shared by every timeline a registry creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ticks per second of animation time. Offsets given in seconds are
    /// multiplied by this before being stored.
    pub ticks_per_second: u32,

    /// Gap placed after the last keyframe when an insert omits its offset.
    pub default_spacing_ticks: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            default_spacing_ticks: 60,
        }
    }
}

impl Config {
    /// Reject configurations that cannot map seconds onto ticks.
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_second == 0 {
            return Err(KeyframeError::InvalidArgument {
                reason: "Config.ticks_per_second must be > 0".into(),
            });
        }
        Ok(())
    }

    /// Convert a time offset in seconds to a tick offset.
    pub fn seconds_to_ticks(&self, seconds: f32) -> Result<u32> {
        self.validate()?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(KeyframeError::InvalidArgument {
                reason: format!("time offset must be finite and >= 0, got {seconds}"),
            });
        }
        let ticks = (f64::from(seconds) * f64::from(self.ticks_per_second)).round();
        if ticks > f64::from(u32::MAX) {
            return Err(KeyframeError::InvalidArgument {
                reason: format!("time offset {seconds}s overflows the tick range"),
            });
        }
        Ok(ticks as u32)
    }

    #[inline]
    pub fn ticks_to_seconds(&self, ticks: u32) -> f32 {
        ticks as f32 / self.ticks_per_second.max(1) as f32
    }
}
