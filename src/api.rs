use crate::config::Config;
use crate::error::{FfResult, FingerForgeError};
use crate::geometry::{HandProfile, HandSide};
use crate::notes::{self, NoteEvent};
use crate::optimizer::runner::{FingeringCallback, FingeringReport, NoCallback, Scheduler};
use crate::scorer::{Scorer, WindowScore};
use serde::Serialize;
use std::sync::Arc;

/// Scores of a caller-supplied fingering over a whole passage.
#[derive(Serialize, Debug, Clone)]
pub struct AuditResult {
    pub notes: usize,
    pub score: WindowScore,
}

pub fn build_scorer(config: &Config) -> Arc<Scorer> {
    let profile = HandProfile::new(config.hand.side, config.hand.size);
    Arc::new(Scorer::new(profile))
}

/// Service: decide a finger for every in-scope note of `events`.
pub fn finger_passage(events: &mut [NoteEvent], config: &Config) -> FfResult<FingeringReport> {
    finger_passage_with(events, config, &NoCallback)
}

pub fn finger_passage_with<CB: FingeringCallback>(
    events: &mut [NoteEvent],
    config: &Config,
    callback: &CB,
) -> FfResult<FingeringReport> {
    config.check()?;
    let scheduler = Scheduler::new(build_scorer(config), &config.engine);
    scheduler.run_with(events, config.scope, callback)
}

/// Service: evaluate an existing fingering with the same cost model and rules.
pub fn audit_fingering(events: &[NoteEvent], config: &Config) -> FfResult<AuditResult> {
    notes::validate_passage(events)?;
    if let Some((i, _)) = events.iter().enumerate().find(|(_, e)| e.fingering == 0) {
        return Err(FingerForgeError::Validation(format!(
            "Event {} has no fingering to audit",
            i
        )));
    }

    let scorer = build_scorer(config);
    let mut work = events.to_vec();
    if config.hand.side == HandSide::Left {
        notes::mirror(&mut work);
    }
    let fingering: Vec<u8> = work.iter().map(|e| e.fingering).collect();

    Ok(AuditResult {
        notes: events.len(),
        score: scorer.evaluate_debug(&fingering, &work),
    })
}
