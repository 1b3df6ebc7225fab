use std::time::Duration;

use bigdecimal::BigDecimal;

pub fn duration_to_beats(duration: Duration, bpm: i64) -> BigDecimal {
    // E.g. 60 / 120 = half a second per beat
    let seconds_per_beat = BigDecimal::from(60) / BigDecimal::from(bpm);
    let seconds_elapsed = BigDecimal::from(duration.as_micros() as u64)
        / BigDecimal::from(1_000_000u64);
    seconds_elapsed / seconds_per_beat
}

pub fn clamp_bpm(bpm: i64) -> i64 {
    bpm.clamp(crate::state::MIN_BPM, crate::state::MAX_BPM)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn verify() {
        assert_eq!(
            duration_to_beats(Duration::from_millis(600), 120),
            BigDecimal::from_str("1.2").unwrap()
        );

        assert_eq!(
            duration_to_beats(Duration::from_millis(2000), 60),
            BigDecimal::from(2)
        );

        assert_eq!(
            duration_to_beats(Duration::from_millis(90), 120),
            BigDecimal::from_str("0.18").unwrap()
        );
    }

    #[test]
    fn bpm_is_kept_in_range() {
        assert_eq!(clamp_bpm(10), 40);
        assert_eq!(clamp_bpm(300), 220);
        assert_eq!(clamp_bpm(96), 96);
    }
}
