use homeward::{HomePoint, HomingConfig, HomingController, Mode, Pose, Step, VelocityCommand};
use rstest::{fixture, rstest};

const HOME: f64 = 5.544445;

#[fixture]
fn controller() -> HomingController {
    HomingController::new(&HomingConfig::default())
}

fn home_offset(dx: f64, dy: f64, theta: f64) -> Pose {
    Pose::new(HOME + dx, HOME + dy, theta)
}

#[rstest]
#[case(Pose::new(0.0, 0.0, 0.0))]
#[case(Pose::new(HOME, HOME, 0.0))]
#[case(Pose::new(100.0, -40.0, 2.0))]
fn first_sample_is_only_a_reference(mut controller: HomingController, #[case] first: Pose) {
    assert_eq!(controller.step(first), Step::Bootstrap);

    let state = controller.state();
    assert_eq!(state.last_pose, Some(first));
    assert_eq!(state.distance_traveled, 0.0);
    assert_eq!(state.battery, 100.0);
    assert_eq!(state.mode, Mode::Roaming);
}

#[rstest]
fn distance_accumulates_between_consecutive_samples(mut controller: HomingController) {
    let path = [
        Pose::new(0.0, 0.0, 0.0),
        Pose::new(1.0, 0.0, 0.0),
        Pose::new(1.0, 1.0, 1.0),
        Pose::new(4.0, 5.0, 2.0),
    ];
    for pose in path {
        controller.step(pose);
    }

    let state = controller.state();
    assert!((state.distance_traveled - 7.0).abs() < 1e-12);
    assert!((state.battery - 86.0).abs() < 1e-12);
    assert_eq!(state.last_pose, Some(path[3]));
}

#[rstest]
fn battery_follows_odometer_and_never_goes_negative(mut controller: HomingController) {
    controller.step(Pose::new(-50.0, -50.0, 0.0));
    for i in 1..=20 {
        let step = controller.step(Pose::new(-50.0 + 5.0 * i as f64, -50.0, 0.0));
        let report = step.report().unwrap();
        let expected = (100.0 - 2.0 * report.distance_traveled).max(0.0);

        assert!(report.battery >= 0.0);
        assert!((report.battery - expected).abs() < 1e-9);
    }
    assert_eq!(controller.state().battery, 0.0);
}

#[rstest]
fn returning_is_sticky_until_arrival() {
    // Return costs twice the drain, so moving toward home makes the trip
    // affordable again
    let config = HomingConfig {
        return_cost_factor: 4.0,
        ..HomingConfig::default()
    };
    let mut controller = HomingController::new(&config);

    controller.step(home_offset(20.0, 0.0, 0.0));
    let report = controller.step(home_offset(24.0, 0.0, 0.0)).report().cloned().unwrap();
    assert_eq!(report.mode, Mode::Returning);
    assert!((report.battery - 92.0).abs() < 1e-9);

    let report = controller.step(home_offset(10.0, 0.0, 0.0)).report().cloned().unwrap();
    assert!(report.battery > report.min_battery_needed);
    assert_eq!(report.mode, Mode::Returning);
    assert!(report.command.is_some());

    let report = controller.step(home_offset(0.05, 0.0, 0.0)).report().cloned().unwrap();
    assert!(report.arrived);
    assert_eq!(report.mode, Mode::Roaming);

    let report = controller.step(home_offset(1.0, 0.0, 0.0)).report().cloned().unwrap();
    assert_eq!(report.mode, Mode::Roaming);
    assert_eq!(report.command, None);
}

#[rstest]
fn arrival_stops_and_recharges(mut controller: HomingController) {
    controller.step(Pose::new(0.0, 0.0, 0.0));
    controller.step(Pose::new(49.0, 0.0, 0.0));
    assert_eq!(controller.mode(), Mode::Returning);

    let step = controller.step(home_offset(0.0, 0.05, 0.3));
    assert_eq!(step.command(), Some(VelocityCommand::stop()));

    let state = controller.state();
    assert_eq!(state.distance_traveled, 0.0);
    assert_eq!(state.battery, 100.0);
    assert_eq!(state.mode, Mode::Roaming);
}

#[rstest]
fn starting_at_home_stops_on_second_sample(mut controller: HomingController) {
    assert_eq!(controller.step(Pose::new(HOME, HOME, 0.0)), Step::Bootstrap);

    let step = controller.step(Pose::new(HOME, HOME, 0.0));
    let report = step.report().unwrap();

    assert!(report.arrived);
    assert_eq!(report.distance_to_home, 0.0);
    assert_eq!(report.command, Some(VelocityCommand::stop()));
    assert_eq!(report.battery, 100.0);
}

#[rstest]
fn short_roam_stays_silent(mut controller: HomingController) {
    controller.step(Pose::new(0.0, 0.0, 0.0));
    let step = controller.step(Pose::new(3.0, 0.0, 0.0));
    let report = step.report().unwrap();

    assert_eq!(report.distance_traveled, 3.0);
    assert_eq!(report.battery, 94.0);
    assert!((report.distance_to_home - 6.1004).abs() < 1e-3);
    assert!((report.min_battery_needed - 12.2008).abs() < 1e-2);
    assert_eq!(report.mode, Mode::Roaming);
    assert_eq!(report.command, None);
}

#[rstest]
#[case(0.0)]
#[case(0.5)]
#[case(-2.0)]
fn low_battery_turns_toward_home(mut controller: HomingController, #[case] theta: f64) {
    controller.step(Pose::new(0.0, 0.0, 0.0));
    let step = controller.step(Pose::new(49.0, 0.0, theta));
    let report = step.report().unwrap();

    assert_eq!(report.battery, 2.0);
    assert!(report.min_battery_needed > 2.0);
    assert_eq!(report.mode, Mode::Returning);

    let expected_error = (HOME - 0.0).atan2(HOME - 49.0) - theta;
    let cmd = report.command.unwrap();
    assert_eq!(cmd.linear, 1.0);
    assert!((cmd.angular - 2.0 * expected_error).abs() < 1e-12);
}

/// Pose 10m from home whose bearing to home is exactly `bearing`
fn facing_home_from(bearing: f64, theta: f64) -> Pose {
    Pose::new(HOME - 10.0 * bearing.cos(), HOME - 10.0 * bearing.sin(), theta)
}

#[rstest]
fn heading_error_is_not_wrapped_by_default(mut controller: HomingController) {
    let target = facing_home_from(-3.0, 3.0);
    controller.step(Pose::new(target.x - 49.0, target.y, 0.0));

    let report = controller.step(target).report().cloned().unwrap();
    assert_eq!(report.mode, Mode::Returning);

    let error = report.heading_error.unwrap();
    assert!((error - (-6.0)).abs() < 1e-9);
    assert!((report.command.unwrap().angular - (-12.0)).abs() < 1e-9);
}

#[rstest]
fn heading_error_wraps_when_enabled() {
    let config = HomingConfig {
        normalize_heading_error: true,
        ..HomingConfig::default()
    };
    let mut controller = HomingController::new(&config);

    let target = facing_home_from(-3.0, 3.0);
    controller.step(Pose::new(target.x - 49.0, target.y, 0.0));

    let report = controller.step(target).report().cloned().unwrap();
    let wrapped = 2.0 * std::f64::consts::PI - 6.0;
    assert!((report.heading_error.unwrap() - wrapped).abs() < 1e-9);
    assert!((report.command.unwrap().angular - 2.0 * wrapped).abs() < 1e-9);
}

#[rstest]
fn custom_home_point_is_respected() {
    let config = HomingConfig {
        home: HomePoint::new(0.0, 0.0),
        ..HomingConfig::default()
    };
    let mut controller = HomingController::new(&config);

    controller.step(Pose::new(1.0, 1.0, 0.0));
    let step = controller.step(Pose::new(0.0, 0.05, 0.0));
    assert!(step.report().unwrap().arrived);
    assert_eq!(controller.home(), HomePoint::new(0.0, 0.0));
}
