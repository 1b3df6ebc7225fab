use std::error::Error;

use itertools::Itertools;
use wl_clipboard_rs::copy::{MimeType, Options, Source};

use crate::event_model::Note;

/*
    Snapshot of the score as a LilyPond drum staff, e.g.

        <bd hhc>4 sn8 hhc8 cymc1

    Chords go in angle brackets, durations are note value denominators.
*/

fn drummode_note(note: &Note) -> String {
    let duration = note.duration.denominator();

    if note.is_rest {
        return format!("r{}", duration);
    }

    if note.is_chord() {
        let names = note.types.iter().map(|drum| drum.short_name()).join(" ");
        format!("<{}>{}", names, duration)
    } else {
        let name = note.types.first().map(|drum| drum.short_name()).unwrap_or("r");
        format!("{}{}", name, duration)
    }
}

pub fn to_drummode(notes: &[Note]) -> String {
    notes.iter().map(drummode_note).join(" ")
}

pub fn lilypond_document(notes: &[Note]) -> String {
    format!(
        r#"\version "2.24.0"
\score {{
  \new DrumStaff \drummode {{
    \set DrumStaff.drumStyleTable = #drums-style
    \time 4/4
    {}
  }}
  \layout {{ }}
}}
"#,
        to_drummode(notes)
    )
}

pub fn copy_to_clipboard(document: &str) -> Result<(), Box<dyn Error>> {
    let opts = Options::new();
    opts.copy(
        Source::Bytes(document.to_string().into_bytes().into()),
        MimeType::Autodetect,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_model::{DrumType, NoteDuration, NoteId};

    fn note(types: Vec<DrumType>, duration: NoteDuration) -> Note {
        Note { id: NoteId(0), types, duration, is_rest: false }
    }

    #[test]
    fn drummode_sequence() {
        let notes = vec![
            note(vec![DrumType::Kick, DrumType::HiHatClosed], NoteDuration::Quarter),
            note(vec![DrumType::Snare], NoteDuration::Eighth),
            note(vec![DrumType::HiHatOpen], NoteDuration::Sixteenth),
            note(vec![DrumType::Crash], NoteDuration::Whole),
            Note { is_rest: true, ..note(vec![DrumType::Kick], NoteDuration::Half) },
        ];

        assert_eq!(to_drummode(&notes), "<bd hhc>4 sn8 hho16 cymc1 r2");
    }

    #[test]
    fn document_wraps_notes() {
        let document = lilypond_document(&[note(vec![DrumType::Ride], NoteDuration::Half)]);

        assert!(document.starts_with("\\version \"2.24.0\""));
        assert!(document.contains("\\new DrumStaff \\drummode {"));
        assert!(document.contains("    cymr2\n"));
    }

    #[test]
    fn empty_score_is_an_empty_staff() {
        assert_eq!(to_drummode(&[]), "");
    }
}
