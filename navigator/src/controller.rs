// controller.rs - Ties selection, resolver, transitions, idle orbit and reveal together

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::animation::{
    CameraTransform, DriverState, IdleRotate, Parallax, PathReveal, PathRevealState,
    RevealUniforms, TransitionDriver,
};
use crate::catalog::{Catalog, Category};
use crate::config::NavigatorConfig;
use crate::error_handling::{NavigatorError, Result};
use crate::resolver::{resolve, ResolvedView, ViewSource};
use crate::selection::{Selection, SelectionHandle, SelectionListener};

/// Catmull-Rom pieces per route span before the route is revealed
const ROUTE_SEGMENTS: usize = 12;

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub frame: u64,
    /// Session time at the end of this tick, in seconds
    pub time: f32,
    /// Live camera with the parallax offset applied to the look-at point
    pub camera: CameraTransform,
    pub reveal: PathRevealState,
    pub is_transitioning: bool,
    pub idle_rotating: bool,
    pub azimuth: f32,
}

/// One navigation session.
///
/// Selection changes are picked up at the start of every tick, before the
/// resolver runs, so the camera and the reveal always react to the latest
/// value. Per tick the live camera has exactly one writer: the transition
/// driver while a tween runs, otherwise the idle orbit when it is allowed
/// to run.
pub struct NavigationController {
    session_id: Uuid,
    catalog: Arc<Catalog>,
    config: NavigatorConfig,

    selection: SelectionHandle,
    listener: SelectionListener,
    applied: Selection,
    last_view: ResolvedView,

    driver: TransitionDriver,
    idle: IdleRotate,
    parallax: Parallax,
    reveal: PathReveal,

    frame: u64,
    elapsed: Duration,
    closed: bool,
}

impl NavigationController {
    pub fn new(catalog: impl Into<Arc<Catalog>>, config: NavigatorConfig) -> Result<Self> {
        config.validate()?;
        let catalog = catalog.into();

        let selection = SelectionHandle::new();
        let listener = selection.subscribe();
        let home = catalog.home();

        let driver = TransitionDriver::new(home, config.transition_duration())
            .with_epsilon(config.epsilon);
        let idle = IdleRotate::new(config.auto_rotate_speed);
        let parallax = Parallax::new(
            config.parallax_smoothing,
            (config.parallax_strength[0], config.parallax_strength[1]),
        );
        let reveal = PathReveal::new(config.reveal_duration());

        let session_id = Uuid::new_v4();
        log::info!("Navigation session {session_id} started");

        Ok(Self {
            session_id,
            catalog,
            config,
            selection,
            listener,
            applied: Selection::none(),
            last_view: ResolvedView { transform: home, source: ViewSource::Home },
            driver,
            idle,
            parallax,
            reveal,
            frame: 0,
            elapsed: Duration::ZERO,
            closed: false,
        })
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Handle for UI components that read or change the selection
    pub fn selection_handle(&self) -> SelectionHandle {
        self.selection.clone()
    }

    pub fn select_category(&self, category: Category) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.selection.select_category(category))
    }

    pub fn select_path(&self, name: impl Into<String>) -> Result<bool> {
        self.ensure_open()?;
        self.selection.select_path(name)
    }

    pub fn clear(&self) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.selection.clear())
    }

    /// Apply a pending selection change now instead of on the next tick.
    ///
    /// Returns true when a change was applied.
    pub fn sync_selection(&mut self) -> bool {
        if self.closed {
            return false;
        }
        match self.listener.poll() {
            Some(selection) => {
                self.apply_selection(selection);
                true
            }
            None => false,
        }
    }

    fn apply_selection(&mut self, selection: Selection) {
        let view = resolve(&selection, &self.catalog);

        // Returning home lands on the orbit angle the idle behaviour will
        // continue from.
        let target = match view.source {
            ViewSource::Home => self.idle.apply(view.transform),
            _ => view.transform,
        };
        let started = self.driver.retarget(target);

        let route = match (view.source, selection.category, selection.path.as_deref()) {
            (ViewSource::Poi, Some(category), Some(name)) => {
                self.catalog.find(category, name).map(|poi| poi.route().smoothed(ROUTE_SEGMENTS))
            }
            _ => None,
        };
        self.reveal.restart(route);

        log::info!(
            "[{}] selection {:?} -> {:?} view (transition {})",
            self.session_id,
            selection,
            view.source,
            if started { "started" } else { "not needed" }
        );

        self.applied = selection;
        self.last_view = view;
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if !self.closed {
            self.parallax.pointer_moved(x, y);
        }
    }

    pub fn drag_started(&mut self) {
        if !self.closed {
            self.idle.begin_drag();
        }
    }

    pub fn drag_ended(&mut self) {
        if !self.closed {
            self.idle.end_drag();
        }
    }

    // ------------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------------

    /// Advance one rendered frame. Returns `None` once the session is shut
    /// down.
    pub fn tick(&mut self, dt: Duration) -> Option<FrameOutput> {
        if self.closed {
            return None;
        }

        self.sync_selection();
        self.parallax.update();

        let mut idle_rotating = false;
        if self.driver.is_transitioning() {
            self.driver.update(dt);
        } else if self.idle.can_run(self.applied.is_empty(), true) {
            self.idle.advance(dt);
            self.driver.snap_to(self.idle.apply(self.catalog.home()));
            idle_rotating = true;
        }

        self.reveal.update(dt);

        self.frame += 1;
        self.elapsed = self.elapsed.saturating_add(dt);

        let output = FrameOutput {
            frame: self.frame,
            time: self.elapsed.as_secs_f32(),
            camera: self.rendered_camera(),
            reveal: self.reveal.state(),
            is_transitioning: self.driver.is_transitioning(),
            idle_rotating,
            azimuth: self.idle.azimuth(),
        };
        log::trace!("[{}] {:?}", self.session_id, output);
        Some(output)
    }

    fn rendered_camera(&self) -> CameraTransform {
        let live = self.driver.live();
        if self.config.parallax_during_transition || !self.driver.is_transitioning() {
            live.with_target_offset(self.parallax.offset())
        } else {
            live
        }
    }

    /// Stop every tween and timer. Later ticks and input are ignored.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.driver.cancel();
        self.reveal.cancel();
        self.closed = true;
        log::info!(
            "Navigation session {} closed after {} frames ({:.1}s)",
            self.session_id,
            self.frame,
            self.elapsed.as_secs_f32()
        );
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(NavigatorError::SessionClosed(self.session_id))
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Selection the camera is currently following
    pub fn applied_selection(&self) -> &Selection {
        &self.applied
    }

    pub fn last_view(&self) -> ResolvedView {
        self.last_view
    }

    /// Live camera without parallax
    pub fn live_camera(&self) -> CameraTransform {
        self.driver.live()
    }

    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    pub fn is_transitioning(&self) -> bool {
        self.driver.is_transitioning()
    }

    pub fn transition_target(&self) -> Option<CameraTransform> {
        self.driver.destination()
    }

    pub fn azimuth(&self) -> f32 {
        self.idle.azimuth()
    }

    pub fn is_dragging(&self) -> bool {
        self.idle.is_dragging()
    }

    pub fn reveal_state(&self) -> PathRevealState {
        self.reveal.state()
    }

    pub fn reveal_uniforms(&self) -> RevealUniforms {
        self.reveal.uniforms()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for controller configuration
pub struct NavigatorBuilder {
    config: NavigatorConfig,
}

impl NavigatorBuilder {
    pub fn new() -> Self {
        Self { config: NavigatorConfig::default() }
    }

    pub fn from_config(config: NavigatorConfig) -> Self {
        Self { config }
    }

    pub fn transition_secs(mut self, secs: f32) -> Self {
        self.config.transition_secs = secs;
        self
    }

    pub fn reveal_secs(mut self, secs: f32) -> Self {
        self.config.reveal_secs = secs;
        self
    }

    pub fn auto_rotate_speed(mut self, radians_per_sec: f32) -> Self {
        self.config.auto_rotate_speed = radians_per_sec;
        self
    }

    pub fn parallax(mut self, smoothing: f32, strength: [f32; 2]) -> Self {
        self.config.parallax_smoothing = smoothing;
        self.config.parallax_strength = strength;
        self
    }

    pub fn parallax_during_transition(mut self, enabled: bool) -> Self {
        self.config.parallax_during_transition = enabled;
        self
    }

    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    pub fn build(self, catalog: impl Into<Arc<Catalog>>) -> Result<NavigationController> {
        NavigationController::new(catalog, self.config)
    }
}

impl Default for NavigatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Vec3;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn controller() -> NavigationController {
        NavigatorBuilder::new()
            .parallax(0.05, [0.0, 0.0])
            .build(Catalog::demo().unwrap())
            .unwrap()
    }

    fn run(nav: &mut NavigationController, frames: usize) -> Option<FrameOutput> {
        let mut last = None;
        for _ in 0..frames {
            last = nav.tick(FRAME);
        }
        last
    }

    #[test]
    fn test_idle_orbit_runs_when_nothing_selected() {
        let mut nav = controller();
        let frame = nav.tick(Duration::from_secs(1)).unwrap();
        assert!(frame.idle_rotating);
        assert!((frame.azimuth - 0.1).abs() < 1e-6);
        assert_eq!(nav.live_camera(), nav.catalog().home().orbit(frame.azimuth));
    }

    #[test]
    fn test_category_selection_flies_to_default_view() {
        let mut nav = controller();
        nav.select_category(Category::Historical).unwrap();
        let frame = nav.tick(FRAME).unwrap();
        assert!(frame.is_transitioning);
        assert!(!frame.idle_rotating);

        let expected = nav.catalog().default_view(Category::Historical).unwrap();
        assert_eq!(nav.transition_target(), Some(expected));

        run(&mut nav, 80);
        assert_eq!(nav.driver_state(), DriverState::Idle);
        assert!(nav.live_camera().max_distance(expected) < 1e-3);
    }

    #[test]
    fn test_orbit_frozen_while_selected() {
        let mut nav = controller();
        run(&mut nav, 60);
        let azimuth = nav.azimuth();
        nav.select_category(Category::Hotels).unwrap();
        run(&mut nav, 200);
        assert_eq!(nav.azimuth(), azimuth);
    }

    #[test]
    fn test_return_home_continues_orbit_without_snap() {
        let mut nav = controller();
        run(&mut nav, 120);
        let azimuth = nav.azimuth();
        nav.select_category(Category::Schools).unwrap();
        run(&mut nav, 100);
        nav.clear().unwrap();
        run(&mut nav, 100);

        let home = nav.catalog().home();
        assert_eq!(nav.driver_state(), DriverState::Idle);
        // Settled on the remembered angle, then resumed from it
        let resumed = nav.azimuth();
        assert!(resumed > azimuth);
        assert!(resumed - azimuth < 0.1);
        assert!(nav.live_camera().max_distance(home.orbit(resumed)) < 1e-3);
    }

    #[test]
    fn test_poi_selection_reveals_route_and_marker() {
        let mut nav = controller();
        nav.select_category(Category::Historical).unwrap();
        nav.select_path("Mount Mary Church").unwrap();
        let first = nav.tick(FRAME).unwrap();
        assert!(first.reveal.progress > 0.0);
        assert!(!first.reveal.marker_visible);

        let mut t = FRAME;
        while t < Duration::from_secs(4) {
            nav.tick(FRAME);
            t += FRAME;
        }
        let state = nav.reveal_state();
        assert_eq!(state.progress, 1.0);
        assert!(state.marker_visible);
        assert_eq!(nav.reveal_uniforms().marker_visible, 1);
    }

    #[test]
    fn test_sync_selection_resets_marker_immediately() {
        let mut nav = controller();
        nav.select_category(Category::Historical).unwrap();
        nav.select_path("Bandra Fort").unwrap();
        nav.tick(Duration::from_secs(5));
        assert!(nav.reveal_state().marker_visible);

        nav.select_path("Mount Mary Church").unwrap();
        assert!(nav.sync_selection());
        assert!(!nav.reveal_state().marker_visible);
        assert_eq!(nav.reveal_state().progress, 0.0);
    }

    #[test]
    fn test_parallax_offsets_rendered_target_only() {
        let mut nav = NavigatorBuilder::new()
            .parallax(1.0, [2.0, 1.0])
            .auto_rotate_speed(0.0)
            .build(Catalog::demo().unwrap())
            .unwrap();
        nav.pointer_moved(1.0, -1.0);
        let frame = nav.tick(FRAME).unwrap();
        let live = nav.live_camera();
        assert_eq!(frame.camera.position, live.position);
        assert_eq!(frame.camera.target, live.target + Vec3::new(2.0, -1.0, 0.0));
    }

    #[test]
    fn test_parallax_suppressed_during_transition_when_disabled() {
        let mut nav = NavigatorBuilder::new()
            .parallax(1.0, [2.0, 1.0])
            .parallax_during_transition(false)
            .build(Catalog::demo().unwrap())
            .unwrap();
        nav.pointer_moved(1.0, 1.0);
        nav.select_category(Category::Hospitals).unwrap();
        let frame = nav.tick(FRAME).unwrap();
        assert!(frame.is_transitioning);
        assert_eq!(frame.camera, nav.live_camera());
    }

    #[test]
    fn test_shutdown_stops_everything() {
        let mut nav = controller();
        nav.select_category(Category::Historical).unwrap();
        nav.select_path("Mount Mary Church").unwrap();
        nav.tick(FRAME);
        let frozen = nav.live_camera();

        nav.shutdown();
        assert!(nav.is_closed());
        assert!(nav.tick(Duration::from_secs(10)).is_none());
        assert_eq!(nav.live_camera(), frozen);
        assert!(!nav.reveal_state().marker_visible);
        assert!(matches!(nav.clear(), Err(NavigatorError::SessionClosed(_))));

        // Handles outliving the session cannot revive it
        let handle = nav.selection_handle();
        handle.clear();
        assert!(!nav.sync_selection());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = NavigatorBuilder::new()
            .transition_secs(f32::NAN)
            .build(Catalog::demo().unwrap());
        assert!(matches!(result, Err(NavigatorError::InvalidConfig { .. })));
    }
}
