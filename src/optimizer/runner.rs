use crate::config::{DepthMode, EngineConfig, PassageScope};
use crate::error::FfResult;
use crate::geometry::{Finger, FingerPositions, HandSide, MIDDLE};
use crate::notes::{self, NoteEvent, PADDING_SIZE};
use crate::optimizer::{WindowOptimizer, WindowResult};
use crate::scorer::Scorer;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Diagnostics for one committed decision.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub finger: Finger,
    /// Window cost, `None` when no fingering survived the feasibility filter.
    pub cost: Option<f32>,
    pub depth: usize,
    pub window: Vec<Finger>,
    pub positions: FingerPositions,
    pub repaired: bool,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct FingeringReport {
    pub steps: Vec<StepRecord>,
    pub repaired: Vec<usize>,
}

impl FingeringReport {
    pub fn step(&self, index: usize) -> Option<&StepRecord> {
        self.steps
            .binary_search_by_key(&index, |s| s.index)
            .ok()
            .map(|pos| &self.steps[pos])
    }

    pub fn infeasible_windows(&self) -> usize {
        self.steps.iter().filter(|s| s.cost.is_none()).count()
    }

    pub fn mean_cost(&self) -> f32 {
        let costs: Vec<f32> = self.steps.iter().filter_map(|s| s.cost).collect();
        if costs.is_empty() {
            0.0
        } else {
            costs.iter().sum::<f32>() / costs.len() as f32
        }
    }
}

/// Receives every decision, e.g. to annotate the source score.
///
/// `on_commit` sees only notes that got a finger from their window; notes left
/// blank by an infeasible window arrive later through `on_repair`.
pub trait FingeringCallback {
    fn on_commit(&self, index: usize, note: &NoteEvent, step: &StepRecord);

    fn on_repair(&self, _index: usize, _note: &NoteEvent, _finger: Finger) {}
}

pub struct NoCallback;

impl FingeringCallback for NoCallback {
    fn on_commit(&self, _index: usize, _note: &NoteEvent, _step: &StepRecord) {}
}

/// Rolling-horizon driver: re-solves a lookahead window at every note and
/// commits only the first finger, threading the second one forward.
pub struct Scheduler {
    optimizer: WindowOptimizer,
    mode: DepthMode,
    verbose: bool,
}

impl Scheduler {
    pub fn new(scorer: Arc<Scorer>, config: &EngineConfig) -> Self {
        Self {
            optimizer: WindowOptimizer::new(scorer, config),
            mode: config.depth_mode(),
            verbose: config.verbose,
        }
    }

    pub fn optimizer(&self) -> &WindowOptimizer {
        &self.optimizer
    }

    pub fn run(&self, events: &mut [NoteEvent], scope: PassageScope) -> FfResult<FingeringReport> {
        self.run_with(events, scope, &NoCallback)
    }

    /// Writes a finger into every in-scope event of `events`.
    pub fn run_with<CB: FingeringCallback>(
        &self,
        events: &mut [NoteEvent],
        scope: PassageScope,
        callback: &CB,
    ) -> FfResult<FingeringReport> {
        notes::validate_passage(events)?;

        let profile = &self.optimizer.scorer().profile;
        let n = events.len();

        // Work on a padded copy so neither mirroring nor padding leaks out.
        let mut work = notes::pad_tail(events);
        if profile.side == HandSide::Left {
            notes::mirror(&mut work);
        }

        let mut report = FingeringReport::default();
        let mut continuation: Finger = 0;
        let mut positions = profile.rest_positions();

        for i in 0..n {
            if !notes::in_scope(&work[i], scope.start_measure, scope.measure_limit) {
                continue;
            }

            let end = (i + PADDING_SIZE).min(work.len());
            let result = self.optimizer.optimize(&work[i..end], continuation);
            let finger = result.first();
            continuation = result.continuation();

            work[i].fingering = finger;
            events[i].fingering = finger;
            if finger > 0 {
                positions = profile.positions_given_anchor(finger, work[i].x);
            }

            let step = StepRecord {
                index: i,
                finger,
                cost: result.is_feasible().then_some(result.cost),
                depth: result.depth,
                window: result.fingering.clone(),
                positions,
                repaired: false,
            };
            self.log_decision(i, n, &work[i], &result, profile.side);
            if finger > 0 {
                callback.on_commit(i, &events[i], &step);
            }
            report.steps.push(step);
        }

        // Backward pass: fill gaps left by infeasible windows.
        for i in (0..n).rev() {
            if work[i].fingering != 0
                || !notes::in_scope(&work[i], scope.start_measure, scope.measure_limit)
            {
                continue;
            }

            let finger = nearest_fingered(&work[..n], i).unwrap_or(MIDDLE);
            work[i].fingering = finger;
            events[i].fingering = finger;

            if let Ok(pos) = report.steps.binary_search_by_key(&i, |s| s.index) {
                let step = &mut report.steps[pos];
                step.finger = finger;
                step.positions = profile.positions_given_anchor(finger, work[i].x);
                step.repaired = true;
            }
            report.repaired.push(i);

            if self.verbose {
                info!(
                    "Fixed missing fingering in measure {}: {} -> finger_{} (filled)",
                    measure_label(&work[i]),
                    work[i].label(),
                    finger
                );
            } else {
                debug!("Filled gap at note {} with finger_{}", i, finger);
            }
            callback.on_repair(i, &events[i], finger);
        }
        report.repaired.reverse();

        debug!(
            "Fingered {} notes for the {} hand ({} infeasible windows, {} gaps filled)",
            report.steps.len(),
            profile.side,
            report.infeasible_windows(),
            report.repaired.len()
        );
        Ok(report)
    }

    fn log_decision(
        &self,
        i: usize,
        n: usize,
        note: &NoteEvent,
        result: &WindowResult,
        side: HandSide,
    ) {
        if !self.verbose {
            if i > 0 && i % 100 == 0 {
                if let Some(m) = note.measure {
                    debug!(
                        "scanned {} / {} notes, measure {} for the {} hand...",
                        i,
                        n,
                        m + 1,
                        side
                    );
                }
            }
            return;
        }

        let finger = match result.first() {
            0 => "?".to_string(),
            f => f.to_string(),
        };
        let indent = match self.mode {
            DepthMode::Auto { .. } => String::new(),
            DepthMode::Fixed(d) => "   ".repeat(i % d.max(1)),
        };
        info!(
            "meas.{: <3} finger_{}  plays {: >3}  v={:.1}\t{}{:?} d:{}",
            measure_label(note),
            finger,
            note.label(),
            result.cost,
            indent,
            result.fingering,
            result.depth
        );
    }
}

fn measure_label(note: &NoteEvent) -> String {
    note.measure.map_or_else(|| "-".to_string(), |m| m.to_string())
}

/// Finger of the closest fingered event before `i`, else after it.
fn nearest_fingered(events: &[NoteEvent], i: usize) -> Option<Finger> {
    events[..i]
        .iter()
        .rev()
        .chain(events[i + 1..].iter())
        .map(|e| e.fingering)
        .find(|&f| f > 0)
}
