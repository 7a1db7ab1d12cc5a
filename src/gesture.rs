// Finger-state to gesture classification.
//
// Rules are checked in a fixed priority order and the first match wins.
// The classifier keeps no state between frames.

use crate::types::FingerState;

/// Recognized hand poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Index and middle up, ring and pinky down. Thumb ignored. Draws.
    PeaceSign,
    /// Every finger folded. Erases.
    Fist,
    /// Only the thumb up. Clears the canvas.
    ThumbsUp,
    /// Every finger up. Lifts the pen.
    OpenPalm,
    /// Only the index up. Stamps a single dot.
    Pointing,
    /// Anything else.
    None,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PeaceSign => "peace-sign",
            Self::Fist => "fist",
            Self::ThumbsUp => "thumbs-up",
            Self::OpenPalm => "open-palm",
            Self::Pointing => "pointing",
            Self::None => "none",
        }
    }
}

/// Classify one frame's finger state.
pub fn classify(fingers: FingerState) -> Gesture {
    match fingers {
        [_, true, true, false, false] => Gesture::PeaceSign,
        [false, false, false, false, false] => Gesture::Fist,
        [true, false, false, false, false] => Gesture::ThumbsUp,
        [true, true, true, true, true] => Gesture::OpenPalm,
        [false, true, false, false, false] => Gesture::Pointing,
        _ => Gesture::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(bits: u8) -> FingerState {
        std::array::from_fn(|i| bits & (1 << i) != 0)
    }

    #[test]
    fn test_scenarios() {
        assert_eq!(classify([false, true, true, false, false]), Gesture::PeaceSign);
        assert_eq!(classify([false, false, false, false, false]), Gesture::Fist);
        assert_eq!(classify([true, false, false, false, false]), Gesture::ThumbsUp);
        assert_eq!(classify([true, true, true, true, true]), Gesture::OpenPalm);
        assert_eq!(classify([false, true, false, false, false]), Gesture::Pointing);
    }

    #[test]
    fn test_peace_sign_ignores_thumb() {
        assert_eq!(classify([true, true, true, false, false]), Gesture::PeaceSign);
    }

    #[test]
    fn test_unmatched_states_are_none() {
        assert_eq!(classify([false, true, true, true, false]), Gesture::None);
        assert_eq!(classify([true, true, false, false, false]), Gesture::None);
        assert_eq!(classify([false, false, false, false, true]), Gesture::None);
    }

    #[test]
    fn test_exhaustive_counts() {
        // 32 states: 2 peace (thumb either way), one each for the other named
        // gestures, the remaining 26 fall through.
        let mut counts = std::collections::HashMap::new();
        for bits in 0..32u8 {
            *counts.entry(classify(state(bits))).or_insert(0) += 1;
        }
        assert_eq!(counts[&Gesture::PeaceSign], 2);
        assert_eq!(counts[&Gesture::Fist], 1);
        assert_eq!(counts[&Gesture::ThumbsUp], 1);
        assert_eq!(counts[&Gesture::OpenPalm], 1);
        assert_eq!(counts[&Gesture::Pointing], 1);
        assert_eq!(counts[&Gesture::None], 26);
    }

    #[test]
    fn test_classification_is_repeatable() {
        for bits in 0..32u8 {
            let s = state(bits);
            assert_eq!(classify(s), classify(s));
        }
    }
}
