use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, TrajectoryError},
    math::Vec3,
    trajectories::{generator::generate, Profile},
    CONTROL_PERIOD,
};

/// Parameters of one planned motion, as authored in a JSON file.
///
/// Missing fields take their default value.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub start: Vec3,
    pub end: Vec3,
    pub max_velocity: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub sampling_interval: f64,
    /// follower tick period
    pub control_period_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            start: Vec3::new(-5., 0., 0.),
            end: Vec3::new(5., 0., 0.),
            max_velocity: 5.,
            acceleration: 2.,
            deceleration: 2.,
            sampling_interval: 0.1,
            control_period_ms: CONTROL_PERIOD.as_millis() as u64,
        }
    }
}

impl MotionConfig {
    /// Fails with `ZeroControlPeriod` if `control_period_ms` is 0, the follower can't tick that fast.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        if config.control_period_ms == 0 {
            return Err(ConfigError::ZeroControlPeriod);
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn control_period(&self) -> Duration {
        Duration::from_millis(self.control_period_ms)
    }

    pub fn generate(&self) -> Result<Profile, TrajectoryError> {
        generate(
            self.start,
            self.end,
            self.max_velocity,
            self.acceleration,
            self.deceleration,
            self.sampling_interval,
        )
    }
}
