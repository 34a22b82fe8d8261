use crate::geometry::Finger;
use crate::scorer::rules::Violation;
use serde::Serialize;

/// One scored transition inside a window or passage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionDetail {
    pub from_index: usize,
    pub to_index: usize,
    pub finger: Finger,
    pub displacement: f32,
    pub elapsed: f32,
    pub velocity: f32,
    pub violation: Option<Violation>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct WindowScore {
    // Mean velocity over all transitions
    pub mean_velocity: f32,
    pub max_velocity: f32,
    pub total_displacement: f32,

    pub transitions: Vec<TransitionDetail>,

    // Counters
    pub stat_black: usize,
    pub stat_thumb_under: usize,
    pub stat_violations: usize,
}

impl WindowScore {
    pub fn is_feasible(&self) -> bool {
        self.stat_violations == 0
    }

    pub fn violations(&self) -> impl Iterator<Item = &TransitionDetail> {
        self.transitions.iter().filter(|t| t.violation.is_some())
    }
}
