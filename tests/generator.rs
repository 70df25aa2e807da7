use rand::{rngs::StdRng, Rng, SeedableRng};
use trajplan::{
    error::TrajectoryError,
    math::Vec3,
    trajectories::{
        generator::generate,
        trapezoidal::{ProfileShape, TrapezoidalProfile},
        Profile,
    },
};

const TOLERANCE: f64 = 1e-4;

fn segment_speeds(profile: &Profile) -> Vec<f64> {
    profile
        .waypoints()
        .windows(2)
        .map(|w| (w[1].position - w[0].position).norm() / (w[1].time - w[0].time))
        .collect()
}

fn max_speed(profile: &Profile) -> f64 {
    segment_speeds(profile).into_iter().fold(0., f64::max)
}

fn random_point(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
    )
}

#[test]
fn trapezoidal_scenario() {
    let end = Vec3::new(20., 0., 0.);
    let profile = generate(Vec3::zeros(), end, 5., 2., 2., 0.1).unwrap();

    assert_eq!(profile.first().position, Vec3::zeros());
    assert_eq!(profile.first().time, 0.);
    assert_eq!(profile.last().position, end);
    assert!((profile.duration() - 6.5).abs() < 0.05);

    let speeds = segment_speeds(&profile);
    assert!(speeds.iter().all(|&v| v <= 5. + TOLERANCE));
    assert!((max_speed(&profile) - 5.).abs() < 0.1);
}

#[test]
fn triangular_scenario() {
    let end = Vec3::new(5., 0., 0.);
    let profile = generate(Vec3::zeros(), end, 10., 4., 4., 0.1).unwrap();

    assert_eq!(profile.first().position, Vec3::zeros());
    assert_eq!(profile.last().position, end);

    let speeds = segment_speeds(&profile);
    let peak = max_speed(&profile);
    assert!(peak < 10.);
    assert!(peak > 0.);
    // speeds up, then slows down
    assert!(peak > speeds[0]);
    assert!(peak > speeds[speeds.len() - 1]);
}

#[test]
fn zero_distance() {
    let here = Vec3::new(1., 2., 3.);
    let profile = generate(here, here, 5., 2., 2., 0.1).unwrap();
    assert_eq!(profile.len(), 1);
    assert_eq!(*profile.first(), *profile.last());
    assert_eq!(profile.first().position, here);
    assert_eq!(profile.first().time, 0.);
}

#[test]
fn non_positive_parameters_are_rejected() {
    let (start, end) = (Vec3::zeros(), Vec3::new(1., 1., 1.));
    let cases = [
        (0., 1., 1., 0.1, "max_velocity"),
        (1., -1., 1., 0.1, "acceleration"),
        (1., 1., 0., 0.1, "deceleration"),
        (1., 1., 1., 0., "sampling_interval"),
        (1., 1., 1., -0.5, "sampling_interval"),
        (f64::NAN, 1., 1., 0.1, "max_velocity"),
    ];
    for (v, a, d, dt, expected) in cases {
        match generate(start, end, v, a, d, dt) {
            Err(TrajectoryError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            Ok(_) => panic!("{expected} should have been rejected"),
            Err(e) => panic!("{expected} rejected for the wrong reason: {e}"),
        }
    }
}

#[test]
fn tiny_sampling_interval_fails_cleanly() {
    match generate(Vec3::zeros(), Vec3::new(20., 0., 0.), 5., 2., 2., 1e-300) {
        Err(TrajectoryError::TooManySamples { requested, .. }) => assert!(requested > 1e300),
        other => panic!("expected TooManySamples, got {other:?}"),
    }
}

#[test]
fn random_profiles_keep_their_invariants() {
    let mut rng = StdRng::seed_from_u64(0x7a);
    for _ in 0..200 {
        let start = random_point(&mut rng);
        let end = random_point(&mut rng);
        let v_max = rng.gen_range(0.5..20.0);
        let accel = rng.gen_range(0.5..10.0);
        let decel = rng.gen_range(0.5..10.0);
        let interval = rng.gen_range(0.01..0.5);

        let profile = generate(start, end, v_max, accel, decel, interval).unwrap();
        let planned = TrapezoidalProfile::new(start, end, v_max, accel, decel).unwrap();

        assert_eq!(profile.first().position, start);
        assert_eq!(profile.first().time, 0.);
        assert_eq!(profile.last().position, end);
        assert!(profile.waypoints().windows(2).all(|w| w[1].time > w[0].time));

        let peak = max_speed(&profile);
        assert!(peak <= v_max + TOLERANCE, "{peak} > {v_max}");

        let d = (end - start).norm();
        let ramps = v_max * v_max / (2. * accel) + v_max * v_max / (2. * decel);
        if ramps > d {
            assert_eq!(planned.shape(), ProfileShape::Triangular);
            assert!(peak < v_max);
        } else {
            assert_eq!(planned.shape(), ProfileShape::Trapezoidal);
        }
    }
}

#[test]
fn long_cruise_reaches_the_velocity_limit() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let v_max = rng.gen_range(1.0..5.0);
        let accel = rng.gen_range(1.0..5.0);
        let decel = rng.gen_range(1.0..5.0);
        // at least one full second of cruise
        let d = v_max * v_max / (2. * accel) + v_max * v_max / (2. * decel) + v_max;
        let profile = generate(Vec3::zeros(), Vec3::new(0., d, 0.), v_max, accel, decel, 0.05).unwrap();
        assert!((max_speed(&profile) - v_max).abs() < 1e-6);
    }
}
