use crate::error::{FfResult, FingerForgeError};
use crate::geometry::Finger;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of synthetic events appended behind the last real note.
pub const PADDING_SIZE: usize = 9;

fn one() -> u8 {
    1
}

fn default_duration() -> f32 {
    1.0
}

/// One note (or one note of a chord) as delivered by the score parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub x: f32,    // Lateral keyboard position (cm)
    pub time: f32, // Onset (s)
    #[serde(default = "default_duration")]
    pub duration: f32, // Beats

    #[serde(default)]
    pub is_black: bool,

    // Chord membership. `chord_nr` is 1-based within the chord.
    #[serde(default)]
    pub is_chord: bool,
    #[serde(default)]
    pub chord_id: u32,
    #[serde(default = "one")]
    pub chord_nr: u8,
    #[serde(default = "one")]
    pub n_in_chord: u8,

    #[serde(default)]
    pub measure: Option<u32>,
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub fingering: Finger,

    #[serde(skip)]
    pub is_padding: bool,
}

impl NoteEvent {
    pub fn new(x: f32, time: f32, duration: f32) -> Self {
        Self {
            x,
            time,
            duration,
            is_black: false,
            is_chord: false,
            chord_id: 0,
            chord_nr: 1,
            n_in_chord: 1,
            measure: None,
            name: String::new(),
            fingering: 0,
            is_padding: false,
        }
    }

    pub fn black(mut self) -> Self {
        self.is_black = true;
        self
    }

    pub fn in_chord(mut self, chord_id: u32, chord_nr: u8, n_in_chord: u8) -> Self {
        self.is_chord = true;
        self.chord_id = chord_id;
        self.chord_nr = chord_nr;
        self.n_in_chord = n_in_chord;
        self
    }

    pub fn at_measure(mut self, measure: u32) -> Self {
        self.measure = Some(measure);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// True when both notes are members of the same chord group.
    #[inline(always)]
    pub fn shares_chord(&self, other: &NoteEvent) -> bool {
        self.is_chord && other.is_chord && self.chord_id == other.chord_id
    }

    /// Chord notes still to come after this one.
    pub fn remaining_in_chord(&self) -> usize {
        (self.n_in_chord as usize).saturating_sub(self.chord_nr as usize)
    }

    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            "?"
        } else {
            &self.name
        }
    }
}

/// Rejects passages that break the parser contract instead of mis-scoring them.
pub fn validate_passage(events: &[NoteEvent]) -> FfResult<()> {
    let mut closed_chords: HashSet<u32> = HashSet::new();
    let mut open_chord: Option<u32> = None;
    let mut prev_time = f32::NEG_INFINITY;

    for (i, n) in events.iter().enumerate() {
        if !n.x.is_finite() || !n.time.is_finite() || !n.duration.is_finite() {
            return Err(FingerForgeError::Validation(format!(
                "Event {}: non-finite position, time or duration",
                i
            )));
        }
        if n.duration < 0.0 {
            return Err(FingerForgeError::Validation(format!(
                "Event {}: negative duration {}",
                i, n.duration
            )));
        }
        if n.time < prev_time {
            return Err(FingerForgeError::Validation(format!(
                "Event {}: onset {} precedes previous onset {}",
                i, n.time, prev_time
            )));
        }
        prev_time = n.time;

        if n.fingering > 5 {
            return Err(FingerForgeError::Validation(format!(
                "Event {}: fingering {} outside 0..=5",
                i, n.fingering
            )));
        }

        if n.is_chord {
            if n.n_in_chord == 0 || n.chord_nr == 0 || n.chord_nr > n.n_in_chord {
                return Err(FingerForgeError::Validation(format!(
                    "Event {}: chord position {}/{} is invalid",
                    i, n.chord_nr, n.n_in_chord
                )));
            }
            if open_chord != Some(n.chord_id) {
                if closed_chords.contains(&n.chord_id) {
                    return Err(FingerForgeError::Validation(format!(
                        "Event {}: chord {} is not contiguous",
                        i, n.chord_id
                    )));
                }
                if let Some(prev) = open_chord {
                    closed_chords.insert(prev);
                }
                open_chord = Some(n.chord_id);
            }
        } else if let Some(prev) = open_chord.take() {
            closed_chords.insert(prev);
        }
    }
    Ok(())
}

/// Plays a left hand as a right hand on a mirrored keyboard.
pub fn mirror(events: &mut [NoteEvent]) {
    for n in events.iter_mut() {
        n.x = -n.x;
    }
}

/// Copies the real events and appends flagged lookahead padding.
///
/// Padding is built from the last `min(PADDING_SIZE, n)` real events, cycling
/// through that tail when the passage is shorter than the padding. Padding
/// events carry no measure.
pub fn pad_tail(events: &[NoteEvent]) -> Vec<NoteEvent> {
    let n = events.len();
    let mut out = Vec::with_capacity(n + PADDING_SIZE);
    out.extend_from_slice(events);
    if n == 0 {
        return out;
    }

    let tail = &events[n.saturating_sub(PADDING_SIZE)..];
    for k in 0..PADDING_SIZE {
        let mut pad = tail[k % tail.len()].clone();
        pad.is_padding = true;
        pad.fingering = 0;
        pad.measure = None;
        out.push(pad);
    }
    out
}

/// Measure-range filter. Events without a measure are always in scope.
pub fn in_scope(note: &NoteEvent, start_measure: u32, measure_limit: u32) -> bool {
    match note.measure {
        Some(m) => m >= start_measure && m <= start_measure.saturating_add(measure_limit),
        None => true,
    }
}
