use crate::geometry::{Finger, HandProfile, HandSide, THUMB};
use crate::notes::NoteEvent;
use serde::Serialize;
use strum_macros::Display;

// Melodic notes shorter than this many beats may not repeat a finger on a new key.
const REPEAT_MAX_BEATS: f32 = 4.0;
// Thumb leaving a black key leftward within this many beats.
const THUMB_BLACK_MAX_BEATS: f32 = 2.0;
// Chord spans are compared in units of (cm * hand factor / 0.8).
const SPAN_UNIT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Violation {
    // Melodic
    RepeatedFinger,
    FingerCrossing,
    ThumbUnderToBlack,
    ThumbOffBlack,
    // Chord-internal
    ChordFingerReuse,
    ChordOrder,
    ChordSpan,
}

/// Largest normalized span two fingers can hold in one chord, if capped.
pub fn max_chord_span(fa: Finger, fb: Finger) -> Option<f32> {
    let (lo, hi) = if fa < fb { (fa, fb) } else { (fb, fa) };
    match (lo, hi) {
        (3, 4) | (4, 5) => Some(5.0),
        (2, 3) => Some(6.0),
        (2, 4) => Some(7.0),
        (3, 5) => Some(8.0),
        (2, 5) => Some(11.0),
        (1, 2) => Some(12.0),
        (1, 3) => Some(14.0),
        (1, 4) => Some(16.0),
        _ => None,
    }
}

#[inline(always)]
pub fn normalized_span(profile: &HandProfile, dx: f32) -> f32 {
    dx.abs() * profile.hand_factor / SPAN_UNIT
}

/// Classifies the transition `na -(fa)-> nb -(fb)`. `None` means playable.
pub fn check_transition(
    profile: &HandProfile,
    fa: Finger,
    fb: Finger,
    na: &NoteEvent,
    nb: &NoteEvent,
) -> Option<Violation> {
    let dx = nb.x - na.x;

    if na.shares_chord(nb) {
        return check_chord(profile, fa, fb, dx);
    }
    // A chord note next to a single note is never constrained.
    if na.is_chord != nb.is_chord {
        return None;
    }

    if fa == fb && dx != 0.0 && na.duration < REPEAT_MAX_BEATS {
        return Some(Violation::RepeatedFinger);
    }

    if fa > THUMB {
        if fb > THUMB && (fb as f32 - fa as f32) * dx < 0.0 {
            return Some(Violation::FingerCrossing);
        }
        if fb == THUMB && nb.is_black && dx > 0.0 {
            return Some(Violation::ThumbUnderToBlack);
        }
    } else if na.is_black && dx < 0.0 && fb > THUMB && na.duration < THUMB_BLACK_MAX_BEATS {
        return Some(Violation::ThumbOffBlack);
    }

    None
}

fn check_chord(profile: &HandProfile, fa: Finger, fb: Finger, dx: f32) -> Option<Violation> {
    if fa == fb {
        return Some(Violation::ChordFingerReuse);
    }

    // Two chord notes on the same spot may take either order.
    if dx != 0.0 {
        let inverted = match profile.side {
            HandSide::Right => fa > fb,
            HandSide::Left => fa < fb,
        };
        if inverted {
            return Some(Violation::ChordOrder);
        }
    }

    match max_chord_span(fa, fb) {
        Some(cap) if normalized_span(profile, dx) > cap => Some(Violation::ChordSpan),
        _ => None,
    }
}

#[inline(always)]
pub fn forbidden(
    profile: &HandProfile,
    fa: Finger,
    fb: Finger,
    na: &NoteEvent,
    nb: &NoteEvent,
) -> bool {
    check_transition(profile, fa, fb, na, nb).is_some()
}
