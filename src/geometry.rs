use crate::sizes::HandSize;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::info;

/// Finger number: 1 = thumb ... 5 = pinkie. 0 means "unassigned".
pub type Finger = u8;

pub const THUMB: Finger = 1;
pub const MIDDLE: Finger = 3;
pub const FINGERS: [Finger; 5] = [1, 2, 3, 4, 5];

// Rest offsets in cm for thumb..pinkie. The asymmetry helps with scales.
const REST_OFFSETS: [f32; 5] = [-7.0, -2.8, 0.0, 2.8, 5.6];
const STRENGTH: [f32; 5] = [1.1, 1.0, 1.1, 0.9, 0.8];
const BLACK_BIAS: [f32; 5] = [0.3, 1.0, 1.1, 0.8, 0.7];

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HandSide {
    Left,
    #[default]
    Right,
}

/// Modeled lateral position (cm) of every finger of a rigid hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FingerPositions {
    pub x: [f32; 5],
}

impl FingerPositions {
    #[inline(always)]
    pub fn get(&self, finger: Finger) -> f32 {
        self.x[finger as usize - 1]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandProfile {
    pub side: HandSide,
    pub size: HandSize,
    pub hand_factor: f32,
    rest: [f32; 5],
}

impl HandProfile {
    pub fn new(side: HandSide, size: HandSize) -> Self {
        let profile = Self::with_factor(side, size.factor());
        info!(
            "✋ {} hand set to size-{}, span {:.1} cm (max relaxed distance between thumb and pinkie)",
            side,
            size,
            size.span_cm()
        );
        Self { size, ..profile }
    }

    /// Builds a profile from a raw scale factor, bypassing the size labels.
    pub fn with_factor(side: HandSide, hand_factor: f32) -> Self {
        let mut rest = REST_OFFSETS;
        for r in rest.iter_mut() {
            *r *= hand_factor;
        }
        Self {
            side,
            size: HandSize::default(),
            hand_factor,
            rest,
        }
    }

    #[inline(always)]
    pub fn rest_offset(&self, finger: Finger) -> f32 {
        self.rest[finger as usize - 1]
    }

    #[inline(always)]
    pub fn strength(&self, finger: Finger) -> f32 {
        STRENGTH[finger as usize - 1]
    }

    #[inline(always)]
    pub fn black_bias(&self, finger: Finger) -> f32 {
        BLACK_BIAS[finger as usize - 1]
    }

    /// Finger positions at rest, thumb..pinkie, centred on the middle finger.
    pub fn rest_positions(&self) -> FingerPositions {
        FingerPositions { x: self.rest }
    }

    /// Translates the rest shape so that `anchor` sits exactly on `anchor_x`.
    #[inline(always)]
    pub fn positions_given_anchor(&self, anchor: Finger, anchor_x: f32) -> FingerPositions {
        let anchor_rest = self.rest_offset(anchor);
        let mut x = self.rest;
        for p in x.iter_mut() {
            *p = (*p - anchor_rest) + anchor_x;
        }
        FingerPositions { x }
    }
}
