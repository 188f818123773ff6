use crate::constants::{CONTAINER_ID, INITIAL_TIME, TIME_STEP};

/// GPU adapter preference requested by the loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerPreference {
    #[default]
    HighPerformance,
    LowPower,
}

/// Per-mount settings. Defaults come from `constants`.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub initial_time: f32,
    /// Added to the time uniform on every refresh tick.
    pub time_step: f32,
    pub power_preference: PowerPreference,
    /// Element id used when the page auto-mounts.
    pub container_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_time: INITIAL_TIME,
            time_step: TIME_STEP,
            power_preference: PowerPreference::default(),
            container_id: CONTAINER_ID.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("time step must be positive and finite, got {0}")]
    BadTimeStep(f32),
    #[error("initial time must be finite, got {0}")]
    BadInitialTime(f32),
    #[error("container id is empty")]
    EmptyContainerId,
}

impl SessionConfig {
    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_power_preference(mut self, power_preference: PowerPreference) -> Self {
        self.power_preference = power_preference;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::BadTimeStep(self.time_step));
        }
        if !self.initial_time.is_finite() {
            return Err(ConfigError::BadInitialTime(self.initial_time));
        }
        if self.container_id.trim().is_empty() {
            return Err(ConfigError::EmptyContainerId);
        }
        Ok(())
    }
}
