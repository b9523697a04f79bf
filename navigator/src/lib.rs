// lib.rs - Library exports for poi-navigator
// Camera navigation between points of interest: selection, transitions, idle orbit and route reveal

pub mod animation;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error_handling;
pub mod path;
pub mod resolver;
pub mod scenario;
pub mod selection;

// Re-export commonly used types
pub use animation::{CameraTransform, Easing, PathRevealState, RevealUniforms, Vec3};
pub use catalog::{Catalog, Category, PointOfInterest};
pub use config::NavigatorConfig;
pub use controller::{FrameOutput, NavigationController, NavigatorBuilder};
pub use error_handling::{NavigatorError, Result};
pub use path::RoutePath;
pub use resolver::{resolve, ResolvedView, ViewSource};
pub use scenario::{Action, FrameRecord, Replay, Scenario, ScenarioStep};
pub use selection::{Selection, SelectionHandle, SelectionListener};
