use crate::geometry::{Finger, FingerPositions, HandProfile};
use crate::notes::NoteEvent;

/// Smoothing term added to every elapsed time (s).
pub const TIME_FLOOR: f32 = 0.1;

/// Time available for a transition, never zero.
#[inline(always)]
pub fn elapsed(prev: &NoteEvent, next: &NoteEvent) -> f32 {
    (next.time - prev.time).abs() + TIME_FLOOR
}

/// Distance finger `finger` must travel from its modeled position to `next`.
#[inline(always)]
pub fn displacement(positions: &FingerPositions, next: &NoteEvent, finger: Finger) -> f32 {
    (next.x - positions.get(finger)).abs()
}

/// Effort of moving `finger` onto `next`, weighted by finger strength and,
/// for black keys, by the finger's black-key bias.
#[inline(always)]
pub fn transition_velocity(
    profile: &HandProfile,
    positions: &FingerPositions,
    prev: &NoteEvent,
    next: &NoteEvent,
    finger: Finger,
) -> f32 {
    let v = displacement(positions, next, finger) / elapsed(prev, next);
    if next.is_black {
        v / (profile.strength(finger) * profile.black_bias(finger))
    } else {
        v / profile.strength(finger)
    }
}
