use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    /// a kinematic limit or the sampling interval isn't strictly positive
    #[error("invalid parameter `{name}`: {value} (must be strictly positive)")]
    InvalidParameter { name: &'static str, value: f64 },
    /// the sampling interval is so fine the profile wouldn't fit in memory
    #[error("sampling would produce {requested:e} waypoints, more than the {limit} allowed")]
    TooManySamples { requested: f64, limit: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file: {0}")]
    Io(#[from] io::Error),
    #[error("couldn't parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("control_period_ms must be at least 1")]
    ZeroControlPeriod,
}

/// Fails with `InvalidParameter` unless `value > 0`. NaN is rejected too.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, TrajectoryError> {
    if value > 0. {
        Ok(value)
    } else {
        Err(TrajectoryError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_negative_and_nan() {
        assert!(ensure_positive("v", 0.).is_err());
        assert!(ensure_positive("v", -1.).is_err());
        assert!(ensure_positive("v", f64::NAN).is_err());
        assert_eq!(ensure_positive("v", 0.5).ok(), Some(0.5));
    }

    #[test]
    fn message_names_the_parameter() {
        let err = ensure_positive("deceleration", -2.).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter `deceleration`: -2 (must be strictly positive)"
        );
    }
}
