use itertools::Itertools;

use crate::event_model::Note;
use crate::measure_layout::{Page, PlacedMeasure};

const CLEF_MARK: &str = "𝄥";
const TIME_SIGNATURE_MARK: &str = "4/4";

// E.g. "bd+sn/8", or "r/4" for a rest
pub fn note_label(note: &Note) -> String {
    let head = if note.is_rest {
        "r".to_string()
    } else {
        note.types.iter().map(|drum| drum.short_name()).join("+")
    };

    format!("{}/{}", head, note.duration.denominator())
}

fn measure_label(placed: &PlacedMeasure) -> String {
    let mut prefix = Vec::new();
    if placed.clef {
        prefix.push(CLEF_MARK);
    }
    if placed.time_signature {
        prefix.push(TIME_SIGNATURE_MARK);
    }

    let body = match &placed.measure {
        Some(measure) => measure.notes.iter().map(note_label).join(" "),
        None => "-".to_string(),
    };

    if prefix.is_empty() {
        format!("| {} ", body)
    } else {
        format!("{} | {} ", prefix.join(" "), body)
    }
}

/// One text line per system of staves.
pub fn render_page(page: &Page) -> Vec<String> {
    page.measures.iter()
        .chunk_by(|placed| placed.line)
        .into_iter()
        .map(|(_, line)| line.map(measure_label).join("") + "|")
        .collect()
}
