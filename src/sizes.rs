use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Span of the reference hand (thumb to pinkie, relaxed) in cm.
pub const REFERENCE_SPAN_CM: f32 = 21.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum HandSize {
    Xxs,
    Xs,
    S,
    #[default]
    M,
    L,
    Xl,
    Xxl,
}

impl HandSize {
    /// Multiplicative scale of the hand relative to the reference span.
    pub fn factor(&self) -> f32 {
        match self {
            Self::Xxs => 0.33,
            Self::Xs => 0.46,
            Self::S => 0.64,
            Self::M => 0.82,
            Self::L => 1.0,
            Self::Xl => 1.1,
            Self::Xxl => 1.2,
        }
    }

    pub fn span_cm(&self) -> f32 {
        REFERENCE_SPAN_CM * self.factor()
    }
}

/// All labels in ascending order with their factors.
pub fn get_all_sizes() -> Vec<(HandSize, f32)> {
    HandSize::iter().map(|s| (s, s.factor())).collect()
}
