use std::time::Duration;

use bigdecimal::BigDecimal;

use crate::event_model::{Classification, NoteDuration};
use crate::util::duration_to_beats;

// Lower bounds in hundredths of a beat, checked from the longest value down
const THRESHOLDS: [(i64, NoteDuration); 5] = [
    (350, NoteDuration::Whole),
    (150, NoteDuration::Half),
    (75, NoteDuration::Quarter),
    (35, NoteDuration::Eighth),
    (18, NoteDuration::Sixteenth),
];

/// Classifies the time elapsed since a group's first hit.
///
/// Anything shorter than the sixteenth threshold counts as played together
/// with the group, i.e. a chord. `bpm` must be positive.
pub fn classify(delta: Duration, bpm: i64) -> Classification {
    let hundredths = duration_to_beats(delta, bpm) * BigDecimal::from(100);

    THRESHOLDS.iter()
        .find(|(limit, _)| hundredths >= BigDecimal::from(*limit))
        .map(|(_, duration)| Classification::Duration(*duration))
        .unwrap_or(Classification::Chord)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn rank(classification: Classification) -> u8 {
        match classification {
            Classification::Chord => 0,
            Classification::Duration(NoteDuration::Sixteenth) => 1,
            Classification::Duration(NoteDuration::Eighth) => 2,
            Classification::Duration(NoteDuration::Quarter) => 3,
            Classification::Duration(NoteDuration::Half) => 4,
            Classification::Duration(NoteDuration::Whole) => 5,
        }
    }

    #[test]
    fn thresholds_at_120_bpm() {
        // 500ms per beat
        assert_eq!(classify(ms(0), 120), Classification::Chord);
        assert_eq!(classify(ms(89), 120), Classification::Chord);
        assert_eq!(classify(ms(90), 120), Classification::Duration(NoteDuration::Sixteenth));
        assert_eq!(classify(ms(174), 120), Classification::Duration(NoteDuration::Sixteenth));
        assert_eq!(classify(ms(175), 120), Classification::Duration(NoteDuration::Eighth));
        assert_eq!(classify(ms(375), 120), Classification::Duration(NoteDuration::Quarter));
        assert_eq!(classify(ms(600), 120), Classification::Duration(NoteDuration::Quarter));
        assert_eq!(classify(ms(750), 120), Classification::Duration(NoteDuration::Half));
        assert_eq!(classify(ms(1749), 120), Classification::Duration(NoteDuration::Half));
        assert_eq!(classify(ms(1750), 120), Classification::Duration(NoteDuration::Whole));
        assert_eq!(classify(ms(60_000), 120), Classification::Duration(NoteDuration::Whole));
    }

    #[test]
    fn tempo_scales_thresholds() {
        // 250ms is an eighth at 120 but a quarter at 240
        assert_eq!(classify(ms(250), 120), Classification::Duration(NoteDuration::Eighth));
        assert_eq!(classify(ms(250), 240), Classification::Duration(NoteDuration::Quarter));
        assert_eq!(classify(ms(500), 60), Classification::Duration(NoteDuration::Eighth));
        assert_eq!(classify(ms(1000), 60), Classification::Duration(NoteDuration::Quarter));
        // 150ms at 40 bpm is 0.1 beats
        assert_eq!(classify(ms(150), 40), Classification::Chord);
    }

    #[test]
    fn monotonic_in_delta() {
        for bpm in [40, 61, 97, 120, 155, 220] {
            let mut previous = rank(classify(ms(0), bpm));
            for delta in (0..8000).step_by(7) {
                let current = rank(classify(ms(delta), bpm));
                assert!(current >= previous, "bpm {} delta {}", bpm, delta);
                previous = current;
            }
        }
    }

    #[test]
    fn deterministic() {
        for delta in [0, 45, 120, 333, 999, 2500] {
            assert_eq!(classify(ms(delta), 133), classify(ms(delta), 133));
        }
    }
}
