use std::{
    env,
    process::ExitCode,
    sync::{Arc, Mutex},
};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trajplan::{
    config::MotionConfig,
    follower::launch_follow_thread,
    math::Vec3,
    trajectories::player::TrajectoryPlayer,
};

#[derive(Debug, Default, PartialEq)]
struct Args {
    dump: bool,
    config_path: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    for arg in args {
        if arg == "--dump" {
            parsed.dump = true;
        } else if arg.starts_with("--") {
            return Err(format!("unknown flag `{arg}`"));
        } else if parsed.config_path.is_some() {
            return Err(format!("unexpected argument `{arg}`"));
        } else {
            parsed.config_path = Some(arg);
        }
    }
    Ok(parsed)
}

/// Plans the configured motion and follows it in real time.
///
/// usage: `trajplan [--dump] [config.json]`
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Args { dump, config_path } = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            error!("{e}, usage: trajplan [--dump] [config.json]");
            return ExitCode::FAILURE;
        }
    };

    let config = match config_path {
        Some(path) => match MotionConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(%path, "{e}");
                return ExitCode::FAILURE;
            }
        },
        None => MotionConfig::default(),
    };

    let profile = match config.generate() {
        Ok(profile) => profile,
        Err(e) => {
            error!("couldn't plan the motion: {e}");
            return ExitCode::FAILURE;
        }
    };

    if dump {
        match serde_json::to_string_pretty(&profile) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("couldn't serialize the profile: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    // stands in for the moved object
    let position = Arc::new(Mutex::new(Vec3::zeros()));
    let actuator = {
        let position = position.clone();
        move |p: Vec3| {
            if let Ok(mut pos) = position.lock() {
                *pos = p;
            }
        }
    };

    let (stop_sender, handle) = launch_follow_thread(
        TrajectoryPlayer::new(profile),
        actuator,
        config.control_period(),
    );
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_sender.send(());
        }
    });

    let player = match handle.await {
        Ok(player) => player,
        Err(e) => {
            error!("follow thread failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let final_pos = position.lock().map(|p| *p).unwrap_or_else(|p| *p.into_inner());
    info!(
        finished = player.is_finished(),
        elapsed = player.elapsed(),
        x = final_pos.x,
        y = final_pos.y,
        z = final_pos.z,
        "done"
    );
    ExitCode::SUCCESS
}
