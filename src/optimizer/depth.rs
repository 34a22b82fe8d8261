use crate::config::{DepthMode, MAX_DEPTH, MIN_DEPTH};
use crate::notes::NoteEvent;

// Autodepth starts growing a melodic window from this many notes.
const AUTO_START: usize = 4;

/// Number of window positions to enumerate, never more than the window holds.
///
/// A window opening inside a chord covers the rest of that chord plus one
/// note. A melodic window grows from 4 notes until the last included note
/// lies more than `horizon` seconds after the first, or 9 notes are reached.
pub fn window_depth(window: &[NoteEvent], mode: DepthMode) -> usize {
    let Some(first) = window.first() else {
        return 0;
    };

    let depth = match mode {
        DepthMode::Fixed(d) => d.clamp(MIN_DEPTH, MAX_DEPTH),
        DepthMode::Auto { .. } if first.is_chord => {
            (first.remaining_in_chord() + 1).clamp(MIN_DEPTH, MAX_DEPTH)
        }
        DepthMode::Auto { horizon } => {
            let mut depth = AUTO_START;
            for d in AUTO_START..=MAX_DEPTH.min(window.len()) {
                depth = d;
                if window[d - 1].time - first.time > horizon {
                    break;
                }
            }
            depth
        }
    };

    depth.min(window.len())
}
