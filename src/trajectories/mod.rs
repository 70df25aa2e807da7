pub mod generator;
pub mod player;
pub mod trapezoidal;

use serde::{Deserialize, Serialize};

use crate::math::{lerp, Vec3};

pub trait Trajectory<P, V> {
    fn get_position(&self, t: f64) -> P;
    fn get_velocity(&self, t: f64) -> V;
    fn get_acceleration(&self, t: f64) -> V;
    fn get_total_runtime(&self) -> f64;
    fn get_final_destination(&self) -> P;
    fn get_max_speed(&self) -> Option<f64>;
    fn get_time_sections(&self) -> impl Iterator<Item = f64>;
}

/// A timestamped position sample along a planned path.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug)]
pub struct Waypoint {
    pub position: Vec3,
    /// seconds since the start of the motion
    pub time: f64,
}

impl Waypoint {
    pub fn new(position: Vec3, time: f64) -> Self {
        Self { position, time }
    }
}

/// The full ordered sequence of waypoints describing one planned motion.
///
/// Never empty, times never decrease, first waypoint is at `t = 0`.
/// Immutable once built: share it between players behind an `Arc`.
#[derive(Deserialize, Serialize, PartialEq, Clone, Debug)]
#[serde(try_from = "Vec<Waypoint>", into = "Vec<Waypoint>")]
pub struct Profile {
    waypoints: Vec<Waypoint>,
}

impl Profile {
    /// A motion that stays at `position`.
    pub fn stationary(position: Vec3) -> Self {
        Self {
            waypoints: vec![Waypoint::new(position, 0.)],
        }
    }

    /// Builds a profile from already timestamped waypoints.
    ///
    /// Returns `None` when `waypoints` is empty, doesn't start at `t = 0`
    /// or goes back in time.
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Option<Self> {
        let first = waypoints.first()?;
        if first.time != 0. {
            return None;
        }
        if waypoints.windows(2).any(|w| !(w[1].time >= w[0].time)) {
            return None;
        }
        Some(Self { waypoints })
    }

    pub(crate) fn from_samples_unchecked(waypoints: Vec<Waypoint>) -> Self {
        debug_assert!(!waypoints.is_empty());
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// always false, kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    pub fn last(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    /// time of the last waypoint
    pub fn duration(&self) -> f64 {
        self.last().time
    }

    /// the position-only view of the profile
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.waypoints.iter().map(|w| w.position)
    }

    /// Stateless piecewise-linear lookup, `t` is clamped to the profile's time span.
    pub fn position_at(&self, t: f64) -> Vec3 {
        if !(t > 0.) {
            return self.first().position;
        }
        if t >= self.duration() {
            return self.last().position;
        }
        // index of the first waypoint strictly after t, it exists since t < duration
        let next = self.waypoints.partition_point(|w| w.time <= t);
        let (a, b) = (self.waypoints[next - 1], self.waypoints[next]);
        let segment_duration = b.time - a.time;
        if segment_duration <= 0. {
            return a.position;
        }
        lerp(a.position, b.position, (t - a.time) / segment_duration)
    }
}

impl TryFrom<Vec<Waypoint>> for Profile {
    type Error = &'static str;

    fn try_from(waypoints: Vec<Waypoint>) -> Result<Self, Self::Error> {
        Profile::from_waypoints(waypoints)
            .ok_or("a profile starts at t = 0 and its times never decrease")
    }
}

impl From<Profile> for Vec<Waypoint> {
    fn from(profile: Profile) -> Self {
        profile.waypoints
    }
}
