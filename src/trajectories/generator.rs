//! Profile generation: motion parameters in, timestamped waypoints out.
//!
//! ```
//! use trajplan::{math::Vec3, trajectories::generator::generate};
//!
//! let profile = generate(Vec3::zeros(), Vec3::new(20., 0., 0.), 5., 2., 2., 0.1)
//!     .expect("limits are positive");
//! assert_eq!(profile.first().time, 0.);
//! assert_eq!(profile.last().position, Vec3::new(20., 0., 0.));
//! assert!((profile.duration() - 6.5).abs() < 0.05);
//! ```

use super::{trapezoidal::TrapezoidalProfile, Profile};
use crate::{
    error::{ensure_positive, TrajectoryError},
    math::Vec3,
};

/// Plans a rest-to-rest straight-line motion from `start` to `end` and samples it
/// every `sampling_interval` seconds.
///
/// Fails with `InvalidParameter` if any of the limits or the interval isn't
/// strictly positive, nothing is computed in that case. Fails with
/// `TooManySamples` if the interval is too fine for the motion's duration.
pub fn generate(
    start: Vec3,
    end: Vec3,
    max_velocity: f64,
    acceleration: f64,
    deceleration: f64,
    sampling_interval: f64,
) -> Result<Profile, TrajectoryError> {
    ensure_positive("max_velocity", max_velocity)?;
    ensure_positive("acceleration", acceleration)?;
    ensure_positive("deceleration", deceleration)?;
    ensure_positive("sampling_interval", sampling_interval)?;

    TrapezoidalProfile::plan(start, end, max_velocity, acceleration, deceleration)
        .sample_validated(sampling_interval)
}

/// Same as [`generate`], without the timestamps.
pub fn generate_path(
    start: Vec3,
    end: Vec3,
    max_velocity: f64,
    acceleration: f64,
    deceleration: f64,
    sampling_interval: f64,
) -> Result<Vec<Vec3>, TrajectoryError> {
    let profile = generate(
        start,
        end,
        max_velocity,
        acceleration,
        deceleration,
        sampling_interval,
    )?;
    Ok(profile.positions().collect())
}
