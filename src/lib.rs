//! Straight-line motion planning and playback.
//!
//! Plan a rest-to-rest move with [`trajectories::generator::generate`], then play
//! it back with a [`trajectories::player::TrajectoryPlayer`], either by hand or
//! through [`follower::launch_follow_thread`].
//!
//! ```
//! use trajplan::{math::Vec3, trajectories::{generator::generate, player::TrajectoryPlayer}};
//!
//! let profile = generate(Vec3::zeros(), Vec3::new(5., 0., 0.), 10., 4., 4., 0.1)?;
//! let mut player = TrajectoryPlayer::new(profile);
//! while !player.is_finished() {
//!     let _pos = player.advance(1. / 60.);
//! }
//! assert_eq!(player.advance(1. / 60.), Vec3::new(5., 0., 0.));
//! # Ok::<(), trajplan::error::TrajectoryError>(())
//! ```
#![deny(clippy::unwrap_used)]
pub mod config;
pub mod error;
pub mod follower;
pub mod math;
pub mod trajectories;

use std::time::Duration;

/// default follower tick period
pub const CONTROL_PERIOD: Duration = Duration::from_millis(10);
