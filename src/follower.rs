//! Drives a [`TrajectoryPlayer`] in real time.
//!
//! The follower owns the tick: every `period` it measures how much time went by,
//! advances the player by that amount and hands the position to an [`Actuator`].

use std::time::Duration;

use tokio::{
    select,
    sync::oneshot::{self, Sender},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{math::Vec3, trajectories::player::TrajectoryPlayer};

/// whatever is being moved along the trajectory
pub trait Actuator {
    fn apply_position(&mut self, pos: Vec3);
}

impl<F: FnMut(Vec3)> Actuator for F {
    fn apply_position(&mut self, pos: Vec3) {
        self(pos)
    }
}

/// Plays `player` until it's finished, one `advance` per tick.
///
/// The actuator first receives the profile's start position, then one position per tick.
///
/// # Panics
///
/// If `period` is zero, like `tokio::time::interval`.
pub async fn follow(player: &mut TrajectoryPlayer, actuator: &mut impl Actuator, period: Duration) {
    actuator.apply_position(player.profile().first().position);

    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();
    info!(
        waypoints = player.profile().len(),
        duration = player.profile().duration(),
        "following trajectory"
    );
    while !player.is_finished() {
        interval.tick().await; // first tick ticks immediately that's why it's at the beginning

        let now = Instant::now();
        let dt = now.duration_since(last_tick);
        last_tick = now;

        let pos = player.advance(dt.as_secs_f64());
        debug!(x = pos.x, y = pos.y, z = pos.z, elapsed = player.elapsed(), "applying position");
        actuator.apply_position(pos);
    }
    info!(elapsed = player.elapsed(), "trajectory finished");
}

/// Spawns [`follow`] on the runtime.
///
/// Sending on the returned `Sender` stops the follower early, dropping it doesn't.
/// The handle gives the player back, finished or not.
pub fn launch_follow_thread(
    mut player: TrajectoryPlayer,
    mut actuator: impl Actuator + Send + 'static,
    period: Duration,
) -> (Sender<()>, JoinHandle<TrajectoryPlayer>) {
    let (stop_sender, stop_receiver) = oneshot::channel();
    let handle = tokio::spawn(async move {
        select! {
            _ = follow(&mut player, &mut actuator, period) => {}
            Ok(()) = stop_receiver => {
                info!("follow thread received stop signal")
            }
        };
        player
    });
    (stop_sender, handle)
}
