// Straight-line trapezoidal / triangular velocity profile, starting and ending at rest

use tracing::debug;

use super::{Profile, Trajectory, Waypoint};
use crate::{
    error::{ensure_positive, TrajectoryError},
    math::{Vec3, POSITION_EPSILON},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileShape {
    /// start and end are the same point, nothing to plan
    Stationary,
    /// the velocity limit is never reached, zero-duration cruise
    Triangular,
    /// accelerate, cruise at the velocity limit, decelerate
    Trapezoidal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Phase {
    end_time: f64,
    initial_dist: f64,
    initial_vel: f64,
    accel: f64,
}

impl Phase {
    fn dist_after(&self, t: f64) -> f64 {
        self.initial_dist + (self.initial_vel * t) + (0.5 * self.accel * t * t)
    }
}

/// An analytic one-dimensional motion profile along the segment `start -> end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidalProfile {
    start: Vec3,
    end: Vec3,
    direction: Vec3,
    total_distance: f64,
    shape: ProfileShape,
    peak_velocity: f64,
    // accel, cruise, decel
    phases: [Phase; 3],
}

/// upper bound on the waypoints a single profile may hold
pub const MAX_SAMPLES: usize = 1 << 22;

/// distance covered going from rest to `v` (or from `v` to rest) at rate `a`
fn ramp_distance(v: f64, a: f64) -> f64 {
    v * v / (2. * a)
}

impl TrapezoidalProfile {
    pub fn new(
        start: Vec3,
        end: Vec3,
        max_velocity: f64,
        acceleration: f64,
        deceleration: f64,
    ) -> Result<Self, TrajectoryError> {
        ensure_positive("max_velocity", max_velocity)?;
        ensure_positive("acceleration", acceleration)?;
        ensure_positive("deceleration", deceleration)?;
        Ok(Self::plan(start, end, max_velocity, acceleration, deceleration))
    }

    /// limits must already be validated
    pub(crate) fn plan(start: Vec3, end: Vec3, v_max: f64, accel: f64, decel: f64) -> Self {
        let displacement = end - start;
        let total_distance = displacement.norm();

        if total_distance < POSITION_EPSILON {
            return Self {
                start,
                end,
                direction: Vec3::zeros(),
                total_distance: 0.,
                shape: ProfileShape::Stationary,
                peak_velocity: 0.,
                phases: [Phase::default(); 3],
            };
        }

        let dist_to_max_vel = ramp_distance(v_max, accel);
        let dist_from_max_vel = ramp_distance(v_max, decel);

        let (shape, peak_velocity, t_cruise) = if dist_to_max_vel + dist_from_max_vel > total_distance {
            // can't reach v_max before having to brake
            let v_peak = (2. * total_distance * accel * decel / (accel + decel)).sqrt();
            (ProfileShape::Triangular, v_peak, 0.)
        } else {
            let cruise_distance = total_distance - (dist_to_max_vel + dist_from_max_vel);
            (ProfileShape::Trapezoidal, v_max, cruise_distance / v_max)
        };
        let t_accel = peak_velocity / accel;
        let t_decel = peak_velocity / decel;

        let d_accel_end = 0.5 * accel * t_accel * t_accel;
        let d_cruise_end = d_accel_end + peak_velocity * t_cruise;

        let phases = [
            Phase {
                end_time: t_accel,
                initial_dist: 0.,
                initial_vel: 0.,
                accel,
            },
            Phase {
                end_time: t_accel + t_cruise,
                initial_dist: d_accel_end,
                initial_vel: peak_velocity,
                accel: 0.,
            },
            Phase {
                end_time: t_accel + t_cruise + t_decel,
                initial_dist: d_cruise_end,
                initial_vel: peak_velocity,
                accel: -decel,
            },
        ];

        debug!(
            ?shape,
            total_distance, peak_velocity, t_accel, t_cruise, t_decel, "planned motion profile"
        );

        Self {
            start,
            end,
            direction: displacement / total_distance,
            total_distance,
            shape,
            peak_velocity,
            phases,
        }
    }

    pub fn shape(&self) -> ProfileShape {
        self.shape
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// unit vector from start to end, zero for a stationary profile
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn peak_velocity(&self) -> f64 {
        self.peak_velocity
    }

    pub fn accel_time(&self) -> f64 {
        self.phases[0].end_time
    }

    pub fn cruise_time(&self) -> f64 {
        self.phases[1].end_time - self.phases[0].end_time
    }

    pub fn decel_time(&self) -> f64 {
        self.phases[2].end_time - self.phases[1].end_time
    }

    /// index of the phase `t` falls into, cruise wins at the accel/cruise boundary
    fn find_phase_idx(&self, t: f64) -> usize {
        if t <= self.phases[0].end_time {
            0
        } else if t <= self.phases[1].end_time {
            1
        } else {
            2
        }
    }

    fn phase_start_time(&self, idx: usize) -> f64 {
        if idx < 1 {
            0.
        } else {
            self.phases[idx - 1].end_time
        }
    }

    /// Scalar distance travelled along the line at time `t`, clamped to `[0, total_distance]`.
    pub fn distance_at(&self, t: f64) -> f64 {
        if !(t > 0.) {
            return 0.;
        }
        if t >= self.get_total_runtime() {
            return self.total_distance;
        }
        let idx = self.find_phase_idx(t);
        self.phases[idx].dist_after(t - self.phase_start_time(idx))
    }

    fn speed_at(&self, t: f64) -> f64 {
        if !(t > 0.) || t >= self.get_total_runtime() {
            return 0.;
        }
        let idx = self.find_phase_idx(t);
        let phase = self.phases[idx];
        phase.initial_vel + phase.accel * (t - self.phase_start_time(idx))
    }

    /// Samples the profile every `sampling_interval` seconds.
    ///
    /// The first waypoint is `start` at `t = 0`, the last one is exactly `end` at
    /// the total runtime, in between samples sit at `k * sampling_interval` for every
    /// such time strictly before the end.
    ///
    /// Fails with `TooManySamples` rather than allocating more than [`MAX_SAMPLES`] waypoints.
    pub fn sample(&self, sampling_interval: f64) -> Result<Profile, TrajectoryError> {
        ensure_positive("sampling_interval", sampling_interval)?;
        self.sample_validated(sampling_interval)
    }

    /// `sampling_interval` must already be validated
    pub(crate) fn sample_validated(&self, sampling_interval: f64) -> Result<Profile, TrajectoryError> {
        if self.shape == ProfileShape::Stationary {
            return Ok(Profile::stationary(self.start));
        }

        let total_time = self.get_total_runtime();
        let requested = total_time / sampling_interval;
        if !(requested < MAX_SAMPLES as f64) {
            return Err(TrajectoryError::TooManySamples {
                requested,
                limit: MAX_SAMPLES,
            });
        }

        let mut waypoints = Vec::with_capacity(requested.ceil() as usize + 1);
        waypoints.push(Waypoint::new(self.start, 0.));
        waypoints.extend(
            (1..)
                .map(|i| i as f64 * sampling_interval)
                .take_while(|&t| t < total_time)
                .map(|t| Waypoint::new(self.start + self.direction * self.distance_at(t), t)),
        );
        // exact arrival, whatever the rounding of the interval
        waypoints.push(Waypoint::new(self.end, total_time));

        debug!(
            samples = waypoints.len(),
            sampling_interval, total_time, "sampled motion profile"
        );
        Ok(Profile::from_samples_unchecked(waypoints))
    }
}

impl Trajectory<Vec3, Vec3> for TrapezoidalProfile {
    fn get_position(&self, t: f64) -> Vec3 {
        if t >= self.get_total_runtime() {
            return self.end;
        }
        self.start + self.direction * self.distance_at(t)
    }

    fn get_velocity(&self, t: f64) -> Vec3 {
        self.direction * self.speed_at(t)
    }

    fn get_acceleration(&self, t: f64) -> Vec3 {
        if !(t > 0.) || t >= self.get_total_runtime() {
            return Vec3::zeros();
        }
        self.direction * self.phases[self.find_phase_idx(t)].accel
    }

    fn get_total_runtime(&self) -> f64 {
        self.phases[2].end_time
    }

    fn get_final_destination(&self) -> Vec3 {
        self.end
    }

    fn get_max_speed(&self) -> Option<f64> {
        Some(self.peak_velocity)
    }

    fn get_time_sections(&self) -> impl Iterator<Item = f64> {
        self.phases.iter().map(|p| p.end_time)
    }
}
