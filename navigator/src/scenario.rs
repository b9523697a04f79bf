// scenario.rs - Timed input scripts replayed against a controller at a fixed frame rate

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::config::secs_to_duration;
use crate::controller::{FrameOutput, NavigationController};
use crate::error_handling::{NavigatorError, Result};
use crate::selection::Selection;

/// One user input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SelectCategory { category: Category },
    SelectPath { name: String },
    Clear,
    PointerMove { x: f32, y: f32 },
    DragStart,
    DragEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Seconds from the start of the replay
    pub at: f32,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn new(mut steps: Vec<ScenarioStep>) -> Result<Self> {
        for step in &steps {
            if !step.at.is_finite() || step.at < 0.0 {
                return Err(NavigatorError::invalid_config(format!(
                    "scenario step time must be finite and non-negative (got {})",
                    step.at
                )));
            }
        }
        // Stable, so steps sharing a timestamp keep their written order
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self { steps })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Scenario = serde_json::from_str(json)?;
        Self::new(raw.steps)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| NavigatorError::io(path, e))?;
        let scenario = Self::from_json_str(&json)?;
        log::info!("Loaded scenario {:?} with {} steps", path, scenario.steps.len());
        Ok(scenario)
    }

    /// Select a category and optionally one of its points at time zero
    pub fn select(category: Category, poi: Option<String>) -> Self {
        let mut steps = vec![ScenarioStep { at: 0.0, action: Action::SelectCategory { category } }];
        if let Some(name) = poi {
            steps.push(ScenarioStep { at: 0.0, action: Action::SelectPath { name } });
        }
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Output of one replayed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(flatten)]
    pub output: FrameOutput,
    pub selection: Selection,
}

/// Feeds scenario steps into a controller one frame at a time.
///
/// Steps due at or before a frame's start time are applied before that
/// frame is ticked.
pub struct Replay {
    scenario: Scenario,
    next_step: usize,
    frame_dt: Duration,
    total_frames: u64,
    frames_done: u64,
}

impl Replay {
    pub fn new(scenario: Scenario, fps: f32, seconds: f32) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(NavigatorError::invalid_config(format!("fps must be positive (got {fps})")));
        }
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(NavigatorError::invalid_config(format!(
                "seconds must be non-negative (got {seconds})"
            )));
        }

        let frame_dt = secs_to_duration(1.0 / fps);
        if frame_dt.is_zero() {
            return Err(NavigatorError::invalid_config(format!(
                "fps {fps} gives a frame shorter than one microsecond"
            )));
        }
        let total_frames = (seconds * fps).ceil() as u64;
        Ok(Self { scenario, next_step: 0, frame_dt, total_frames, frames_done: 0 })
    }

    pub fn frame_dt(&self) -> Duration {
        self.frame_dt
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Session time at which `frame` starts
    pub fn frame_start(&self, frame: u64) -> Duration {
        // frame_dt is a whole number of microseconds
        let micros = (self.frame_dt.as_micros() as u64).saturating_mul(frame);
        Duration::from_micros(micros)
    }

    pub fn is_finished(&self) -> bool {
        self.frames_done >= self.total_frames
    }

    /// Apply due steps and tick once. `None` when the replay is over.
    pub fn step(&mut self, nav: &mut NavigationController) -> Result<Option<FrameRecord>> {
        if self.is_finished() {
            return Ok(None);
        }

        let now = self.frame_start(self.frames_done);
        while let Some(step) = self.scenario.steps.get(self.next_step) {
            if secs_to_duration(step.at) > now {
                break;
            }
            apply(nav, &step.action)?;
            self.next_step += 1;
        }

        self.frames_done += 1;
        Ok(nav.tick(self.frame_dt).map(|output| FrameRecord {
            output,
            selection: nav.applied_selection().clone(),
        }))
    }
}

fn apply(nav: &mut NavigationController, action: &Action) -> Result<()> {
    log::debug!("[{}] replay {:?}", nav.session_id(), action);
    match action {
        Action::SelectCategory { category } => {
            nav.select_category(*category)?;
        }
        Action::SelectPath { name } => match nav.select_path(name.clone()) {
            Ok(_) => {}
            // Rejected mutations leave the selection untouched; keep going
            Err(NavigatorError::NoCategorySelected) => {}
            Err(e) => return Err(e),
        },
        Action::Clear => {
            nav.clear()?;
        }
        Action::PointerMove { x, y } => nav.pointer_moved(*x, *y),
        Action::DragStart => nav.drag_started(),
        Action::DragEnd => nav.drag_ended(),
    }
    Ok(())
}

/// Replay a whole scenario and collect every frame
pub fn run(
    nav: &mut NavigationController,
    scenario: Scenario,
    fps: f32,
    seconds: f32,
) -> Result<Vec<FrameRecord>> {
    let mut replay = Replay::new(scenario, fps, seconds)?;
    let mut frames = Vec::with_capacity(replay.total_frames() as usize);
    while let Some(record) = replay.step(nav)? {
        frames.push(record);
    }
    Ok(frames)
}
