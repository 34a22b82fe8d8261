pub mod physics;
pub mod rules;
pub mod types;

pub use self::rules::Violation;
pub use self::types::{TransitionDetail, WindowScore};
use crate::geometry::{Finger, HandProfile, THUMB};
use crate::notes::NoteEvent;

/// Cost model and feasibility filter for one hand.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub profile: HandProfile,
}

impl Scorer {
    pub fn new(profile: HandProfile) -> Self {
        Self { profile }
    }

    /// Mean velocity of playing the first `depth` notes with `fingering`.
    ///
    /// The hand is a rigid shape anchored on the first note, then re-anchored
    /// on every note just played. Lower is better.
    pub fn evaluate(&self, fingering: &[Finger], notes: &[NoteEvent], depth: usize) -> f32 {
        let depth = depth.min(fingering.len()).min(notes.len());
        if depth < 2 {
            return 0.0;
        }

        let mut positions = self.profile.positions_given_anchor(fingering[0], notes[0].x);
        let mut vsum = 0.0;
        for i in 1..depth {
            let fb = fingering[i];
            vsum += physics::transition_velocity(
                &self.profile,
                &positions,
                &notes[i - 1],
                &notes[i],
                fb,
            );
            positions = self.profile.positions_given_anchor(fb, notes[i].x);
        }
        vsum / (depth - 1) as f32
    }

    /// Same model as `evaluate`, over the whole slice, keeping every detail.
    /// Forbidden transitions are reported, not skipped.
    pub fn evaluate_debug(&self, fingering: &[Finger], notes: &[NoteEvent]) -> WindowScore {
        let depth = fingering.len().min(notes.len());
        let mut res = WindowScore::default();
        if depth < 2 {
            return res;
        }

        let mut positions = self.profile.positions_given_anchor(fingering[0], notes[0].x);
        let mut vsum = 0.0;
        for i in 1..depth {
            let (na, nb) = (&notes[i - 1], &notes[i]);
            let (fa, fb) = (fingering[i - 1], fingering[i]);

            let velocity = physics::transition_velocity(&self.profile, &positions, na, nb, fb);
            let violation = rules::check_transition(&self.profile, fa, fb, na, nb);

            if nb.is_black {
                res.stat_black += 1;
            }
            if fb == THUMB && fa > THUMB {
                res.stat_thumb_under += 1;
            }
            if violation.is_some() {
                res.stat_violations += 1;
            }

            let displacement = physics::displacement(&positions, nb, fb);
            res.total_displacement += displacement;
            res.max_velocity = res.max_velocity.max(velocity);
            vsum += velocity;

            res.transitions.push(TransitionDetail {
                from_index: i - 1,
                to_index: i,
                finger: fb,
                displacement,
                elapsed: physics::elapsed(na, nb),
                velocity,
                violation,
            });

            positions = self.profile.positions_given_anchor(fb, nb.x);
        }
        res.mean_velocity = vsum / (depth - 1) as f32;
        res
    }

    #[inline(always)]
    pub fn forbidden(&self, fa: Finger, fb: Finger, na: &NoteEvent, nb: &NoteEvent) -> bool {
        rules::forbidden(&self.profile, fa, fb, na, nb)
    }
}
