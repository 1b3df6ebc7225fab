use std::ops::Range;

use crate::event_model::DrumType;

/*
    CHARTING:

    note on: [status, note, velocity]
        - 144: note on, channel 1 (most pads and keyboards)
        - 153: note on, channel 10 (general MIDI percussion)
        - velocity 0 doubles as note off on many devices, ignore it
    everything else (note off 128/137, controllers 176, bend 224) is of no use for transcription

    General MIDI percussion keys of interest:
        35/36 bass drum, 37/38/40 snare and side stick, 42/44 closed and pedal hat,
        46 open hat, 49/57 crash, 51/59 ride
*/

const NOTE_ON_STATUS: [u8; 2] = [144u8, 153u8];

#[derive(Clone)]
enum IntMatch {
    Range(Range<u8>),
    OneOf(&'static [u8]),
}

fn matches(event: &[u8], structure: &[IntMatch]) -> bool {
    if event.len() != structure.len() {
        return false;
    }

    event.iter()
        .zip(structure.iter())
        .all(|(content, expected)| match expected {
            IntMatch::Range(range) => range.contains(content),
            IntMatch::OneOf(values) => values.contains(content),
        })
}

pub fn note_to_drum(note: u8) -> Option<DrumType> {
    match note {
        35 | 36 => Some(DrumType::Kick),
        37 | 38 | 40 => Some(DrumType::Snare),
        42 | 44 => Some(DrumType::HiHatClosed),
        46 => Some(DrumType::HiHatOpen),
        49 | 57 => Some(DrumType::Crash),
        51 | 59 => Some(DrumType::Ride),
        _ => None,
    }
}

// Keyboard substitute, mapped onto the same general MIDI keys as the pads
pub fn key_to_note(key: char) -> Option<u8> {
    match key.to_ascii_lowercase() {
        'a' => Some(36),
        's' => Some(38),
        'd' => Some(42),
        'f' => Some(46),
        ' ' => Some(49),
        'j' => Some(51),
        _ => None,
    }
}

pub fn map_key(key: char) -> Option<DrumType> {
    key_to_note(key).and_then(note_to_drum)
}

/// Maps a raw MIDI message to the drum it strikes, if any.
pub fn map(event: &[u8]) -> Option<DrumType> {
    if matches(event, &[
        IntMatch::OneOf(&NOTE_ON_STATUS),
        IntMatch::Range(0u8..128u8),
        IntMatch::Range(1u8..128u8),
    ]) {
        return note_to_drum(event[1]);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_maps_to_drum() {
        assert_eq!(map(&[144, 36, 100]), Some(DrumType::Kick));
        assert_eq!(map(&[153, 38, 1]), Some(DrumType::Snare));
        assert_eq!(map(&[153, 46, 127]), Some(DrumType::HiHatOpen));
        assert_eq!(map(&[144, 59, 64]), Some(DrumType::Ride));
    }

    #[test]
    fn silent_or_foreign_messages_are_ignored() {
        // Velocity zero is a release
        assert_eq!(map(&[144, 36, 0]), None);
        // Note off
        assert_eq!(map(&[128, 36, 100]), None);
        // Control change
        assert_eq!(map(&[176, 36, 100]), None);
        // Unmapped key (low tom)
        assert_eq!(map(&[153, 45, 100]), None);
        // Truncated
        assert_eq!(map(&[144, 36]), None);
    }

    #[test]
    fn keyboard_keys() {
        assert_eq!(map_key('a'), Some(DrumType::Kick));
        assert_eq!(map_key('S'), Some(DrumType::Snare));
        assert_eq!(map_key('d'), Some(DrumType::HiHatClosed));
        assert_eq!(map_key('f'), Some(DrumType::HiHatOpen));
        assert_eq!(map_key(' '), Some(DrumType::Crash));
        assert_eq!(map_key('j'), Some(DrumType::Ride));
        assert_eq!(map_key('z'), None);
    }
}
