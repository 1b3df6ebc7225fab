use std::fmt;
use std::time::Instant;

use bigdecimal::BigDecimal;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum DrumType {
    Kick,
    Snare,
    HiHatClosed,
    HiHatOpen,
    Crash,
    Ride,
}

impl DrumType {
    // Drum mode names, as LilyPond spells them
    pub fn short_name(&self) -> &'static str {
        match self {
            DrumType::Kick => "bd",
            DrumType::Snare => "sn",
            DrumType::HiHatClosed => "hhc",
            DrumType::HiHatOpen => "hho",
            DrumType::Crash => "cymc",
            DrumType::Ride => "cymr",
        }
    }
}

/// A single normalized hit, consumed immediately by the transcriber.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Pulse {
    pub drum: DrumType,
    pub time: Instant,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NoteDuration {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteDuration {
    /// Length in quarter-note beats.
    pub fn beats(&self) -> BigDecimal {
        let sixteenths: i64 = match self {
            NoteDuration::Whole => 16,
            NoteDuration::Half => 8,
            NoteDuration::Quarter => 4,
            NoteDuration::Eighth => 2,
            NoteDuration::Sixteenth => 1,
        };

        BigDecimal::from(sixteenths) / BigDecimal::from(4)
    }

    /// Note value denominator, e.g. 8 for an eighth.
    pub fn denominator(&self) -> u8 {
        match self {
            NoteDuration::Whole => 1,
            NoteDuration::Half => 2,
            NoteDuration::Quarter => 4,
            NoteDuration::Eighth => 8,
            NoteDuration::Sixteenth => 16,
        }
    }
}

/// Outcome of classifying the gap since a pending group's anchor.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Classification {
    Chord,
    Duration(NoteDuration),
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A committed note or chord. Never modified after commit.
#[derive(PartialEq, Clone, Debug)]
pub struct Note {
    pub id: NoteId,
    pub types: Vec<DrumType>,
    pub duration: NoteDuration,
    pub is_rest: bool,
}

impl Note {
    pub fn is_chord(&self) -> bool {
        self.types.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn beat_values() {
        assert_eq!(NoteDuration::Whole.beats(), BigDecimal::from(4));
        assert_eq!(NoteDuration::Half.beats(), BigDecimal::from(2));
        assert_eq!(NoteDuration::Quarter.beats(), BigDecimal::from(1));
        assert_eq!(NoteDuration::Eighth.beats(), BigDecimal::from_str("0.5").unwrap());
        assert_eq!(NoteDuration::Sixteenth.beats(), BigDecimal::from_str("0.25").unwrap());
    }

    #[test]
    fn note_id_display() {
        assert_eq!(NoteId(12).to_string(), "n12");
    }
}
