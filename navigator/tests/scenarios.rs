// tests/scenarios.rs - End-to-end navigation sessions driven through the public API

use std::time::Duration;

use poi_navigator::animation::DriverState;
use poi_navigator::{
    Catalog, Category, NavigationController, NavigatorBuilder, Scenario, Vec3, ViewSource,
};

const FRAME: Duration = Duration::from_micros(16_667);

fn navigator() -> NavigationController {
    NavigatorBuilder::new().build(Catalog::demo().unwrap()).unwrap()
}

fn advance(nav: &mut NavigationController, total: Duration) {
    let mut t = Duration::ZERO;
    while t < total {
        nav.tick(FRAME);
        t += FRAME;
    }
}

#[test]
fn test_category_from_home_settles_on_default_view() {
    let mut nav = navigator();
    let expected = nav.catalog().default_view(Category::Historical).unwrap();

    nav.select_category(Category::Historical).unwrap();
    advance(&mut nav, Duration::from_millis(600));
    assert!(nav.is_transitioning());

    advance(&mut nav, Duration::from_millis(700));
    assert_eq!(nav.driver_state(), DriverState::Idle);
    assert_eq!(nav.live_camera(), expected);
    assert_eq!(nav.last_view().source, ViewSource::CategoryDefault);
}

#[test]
fn test_poi_camera_lands_on_catalog_position() {
    let mut nav = navigator();
    nav.select_category(Category::Historical).unwrap();
    nav.select_path("Mount Mary Church").unwrap();
    advance(&mut nav, Duration::from_millis(1300));

    assert_eq!(nav.live_camera().position, Vec3::new(100.0, 200.0, 300.0));
    assert_eq!(nav.last_view().source, ViewSource::Poi);
}

#[test]
fn test_unknown_poi_uses_category_view() {
    let mut nav = navigator();
    nav.select_category(Category::Historical).unwrap();
    nav.select_path("Nonexistent").unwrap();
    advance(&mut nav, Duration::from_millis(1300));

    let expected = nav.catalog().default_view(Category::Historical).unwrap();
    assert_eq!(nav.live_camera(), expected);
    assert_eq!(nav.last_view().source, ViewSource::LookupMiss);
    assert_eq!(nav.reveal_state().progress, 0.0);
}

#[test]
fn test_clear_mid_flight_retargets_from_live_transform() {
    let mut nav = navigator();
    let category_view = nav.catalog().default_view(Category::Historical).unwrap();
    let home = nav.catalog().home();

    nav.select_category(Category::Historical).unwrap();
    advance(&mut nav, Duration::from_millis(600));
    let mid_flight = nav.live_camera();
    assert!(nav.is_transitioning());

    nav.clear().unwrap();
    assert!(nav.sync_selection());
    // New tween starts where the camera is, heading home
    assert_eq!(nav.live_camera(), mid_flight);
    assert_eq!(nav.transition_target(), Some(home.orbit(nav.azimuth())));

    let mut closest = f32::MAX;
    let mut t = Duration::ZERO;
    while t < Duration::from_millis(1300) {
        nav.tick(FRAME);
        closest = closest.min(nav.live_camera().max_distance(category_view));
        t += FRAME;
    }
    assert!(closest > 10.0, "abandoned target was approached: {closest}");
    assert_eq!(nav.driver_state(), DriverState::Idle);
    assert!(nav.applied_selection().is_empty());
}

#[test]
fn test_single_point_route_never_reveals() {
    let mut nav = navigator();
    nav.select_category(Category::Historical).unwrap();
    nav.select_path("Old Lighthouse").unwrap();

    let mut t = Duration::ZERO;
    while t < Duration::from_secs(5) {
        let frame = nav.tick(FRAME).unwrap();
        assert_eq!(frame.reveal.progress, 0.0);
        assert!(!frame.reveal.marker_visible);
        t += FRAME;
    }
    // The camera still flies to the point itself
    assert_eq!(nav.last_view().source, ViewSource::Poi);
}

#[test]
fn test_drag_freezes_and_resumes_orbit_angle() {
    let mut nav = NavigatorBuilder::new()
        .auto_rotate_speed(1.0)
        .build(Catalog::demo().unwrap())
        .unwrap();

    nav.tick(Duration::from_millis(1200));
    assert!((nav.azimuth() - 1.2).abs() < 1e-6);

    nav.drag_started();
    for _ in 0..120 {
        let frame = nav.tick(FRAME).unwrap();
        assert!(!frame.idle_rotating);
    }
    assert!((nav.azimuth() - 1.2).abs() < 1e-6);

    nav.drag_ended();
    let frame = nav.tick(FRAME).unwrap();
    assert!(frame.idle_rotating);
    let expected = 1.2 + FRAME.as_secs_f32();
    assert!((frame.azimuth - expected).abs() < 1e-5);
}

#[test]
fn test_switching_poi_restarts_reveal() {
    let mut nav = navigator();
    nav.select_category(Category::Historical).unwrap();
    nav.select_path("Bandra Fort").unwrap();
    advance(&mut nav, Duration::from_secs(2));
    let partial = nav.reveal_state().progress;
    assert!(partial > 0.0 && partial < 1.0);

    nav.select_path("Mount Mary Church").unwrap();
    let frame = nav.tick(FRAME).unwrap();
    assert!(frame.reveal.progress < partial);
    assert!(!frame.reveal.marker_visible);

    advance(&mut nav, Duration::from_secs(4));
    let state = nav.reveal_state();
    assert!(state.marker_visible);
    assert_eq!(state.head, Some(Vec3::new(40.0, 2.0, -60.0)));
}

#[test]
fn test_scripted_replay_matches_direct_calls() {
    let mut nav = navigator();
    let scenario = Scenario::select(Category::Hotels, Some("Taj Lands End".to_string()));
    let frames = poi_navigator::scenario::run(&mut nav, scenario, 60.0, 2.0).unwrap();

    assert_eq!(frames.len(), 120);
    assert!(frames[0].output.is_transitioning);
    let last = frames.last().unwrap();
    assert!(!last.output.is_transitioning);
    assert_eq!(last.output.camera.position, Vec3::new(-80.0, 130.0, -240.0));
}

#[test]
fn test_handles_from_other_components_drive_the_camera() {
    let mut nav = navigator();
    let ui = nav.selection_handle();
    std::thread::spawn(move || {
        ui.select_category(Category::Recreational);
    })
    .join()
    .unwrap();

    let frame = nav.tick(FRAME).unwrap();
    assert!(frame.is_transitioning);
    assert_eq!(nav.applied_selection().category, Some(Category::Recreational));
}
