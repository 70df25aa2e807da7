use std::sync::Arc;

use tracing::{trace, warn};

use super::Profile;
use crate::math::{lerp, Vec3};

/// Plays a [`Profile`] back against elapsed time.
///
/// The player never schedules anything itself: its owner calls
/// [`TrajectoryPlayer::advance`] with the time elapsed since the previous call
/// and applies the returned position. Once finished it stays finished, build a
/// new player to replay a profile.
#[derive(Debug, Clone)]
pub struct TrajectoryPlayer {
    profile: Arc<Profile>,
    segment_index: usize,
    elapsed: f64,
    finished: bool,
}

impl TrajectoryPlayer {
    /// A profile with fewer than 2 waypoints has nothing to traverse, the
    /// player starts finished.
    pub fn new(profile: impl Into<Arc<Profile>>) -> Self {
        let profile = profile.into();
        let finished = profile.len() < 2;
        Self {
            profile,
            segment_index: 0,
            elapsed: 0.,
            finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// total time fed through `advance` so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// index of the waypoint starting the segment being interpolated
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn profile(&self) -> &Arc<Profile> {
        &self.profile
    }

    /// Moves `delta_time` seconds forward and returns the interpolated position.
    ///
    /// Negative or NaN deltas are treated as zero, time never goes backward.
    pub fn advance(&mut self, delta_time: f64) -> Vec3 {
        let last = *self.profile.last();
        if self.finished {
            return last.position;
        }

        if !(delta_time >= 0.) {
            warn!(delta_time, "ignoring a negative time step");
        } else {
            self.elapsed += delta_time;
        }

        if self.elapsed >= last.time {
            self.finished = true;
            trace!(elapsed = self.elapsed, "trajectory finished");
            return last.position;
        }

        // elapsed < last.time so the scan stops before the final waypoint
        let waypoints = self.profile.waypoints();
        while self.segment_index + 1 < waypoints.len() - 1
            && waypoints[self.segment_index + 1].time <= self.elapsed
        {
            self.segment_index += 1;
        }

        let current = waypoints[self.segment_index];
        let next = waypoints[self.segment_index + 1];

        let segment_duration = next.time - current.time;
        if segment_duration <= 0. {
            return current.position;
        }
        let t = ((self.elapsed - current.time) / segment_duration).clamp(0., 1.);
        lerp(current.position, next.position, t)
    }
}
