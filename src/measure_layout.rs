use bigdecimal::{BigDecimal, Zero};

use crate::event_model::Note;

pub const BEATS_PER_MEASURE: i64 = 4;

/// Measures are always displayed in whole rows of this many.
pub const MEASURE_BATCH_SIZE: usize = 4;

#[derive(PartialEq, Clone, Debug)]
pub struct Measure {
    pub notes: Vec<Note>,
    pub beats: BigDecimal,
}

impl Measure {
    fn new() -> Measure {
        Measure { notes: Vec::new(), beats: BigDecimal::zero() }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Packs notes into 4/4 measures without ever splitting a note.
///
/// A note that would overflow the running measure closes it, so measures may
/// come out under-full.
pub fn layout(notes: &[Note]) -> Vec<Measure> {
    let capacity = BigDecimal::from(BEATS_PER_MEASURE);
    let mut measures: Vec<Measure> = Vec::new();
    let mut current = Measure::new();

    for note in notes {
        let value = note.duration.beats();

        if &current.beats + &value > capacity {
            measures.push(std::mem::replace(&mut current, Measure::new()));
        }

        current.beats += value;
        current.notes.push(note.clone());
    }

    if !current.is_empty() {
        measures.push(current);
    }

    measures
}

/// Number of measures to show for `filled` real ones: never zero, always whole batches.
pub fn display_count(filled: usize) -> usize {
    filled.max(1).div_ceil(MEASURE_BATCH_SIZE) * MEASURE_BATCH_SIZE
}

#[derive(PartialEq, Clone, Debug)]
pub struct LayoutConfig {
    pub available_width: u32,
    pub min_measure_width: u32,
    pub note_spacing: u32,
    pub measure_margin: u32,
    pub system_height: u32,
    pub padding: u32,
    pub top: u32,
}

impl Default for LayoutConfig {
    fn default() -> LayoutConfig {
        LayoutConfig {
            available_width: 800,
            min_measure_width: 250,
            note_spacing: 40,
            measure_margin: 50,
            system_height: 150,
            padding: 10,
            top: 20,
        }
    }
}

impl LayoutConfig {
    pub fn measure_width(&self, measure: Option<&Measure>) -> u32 {
        let notes = measure.map(|m| m.notes.len() as u32).unwrap_or(0);
        let content = self.measure_margin + notes * self.note_spacing;
        content.max(self.min_measure_width)
    }
}

/// A measure slot with its on-screen position. Placeholders carry no measure.
#[derive(PartialEq, Clone, Debug)]
pub struct PlacedMeasure {
    pub index: usize,
    pub line: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub clef: bool,
    pub time_signature: bool,
    pub measure: Option<Measure>,
}

#[derive(PartialEq, Clone, Debug)]
pub struct Page {
    pub measures: Vec<PlacedMeasure>,
    pub filled: usize,
    pub height: u32,
}

impl Page {
    pub fn lines(&self) -> usize {
        self.measures.last().map(|m| m.line + 1).unwrap_or(0)
    }
}

pub fn paginate(measures: &[Measure], config: &LayoutConfig) -> Page {
    let filled = measures.len();
    let total = display_count(filled);

    let mut placed = Vec::with_capacity(total);
    let mut x = config.padding;
    let mut y = config.top;
    let mut line = 0;

    for index in 0..total {
        let measure = measures.get(index);
        let width = config.measure_width(measure);

        // A measure wider than the whole line still gets a line of its own
        if x + width > config.available_width && x != config.padding {
            x = config.padding;
            y += config.system_height;
            line += 1;
        }

        let line_start = x == config.padding;

        placed.push(PlacedMeasure {
            index,
            line,
            x,
            y,
            width,
            clef: index == 0 || line_start,
            time_signature: index == 0,
            measure: measure.cloned(),
        });

        x += width;
    }

    Page {
        measures: placed,
        filled,
        height: y + config.system_height,
    }
}

/// Convenience for the renderer: notes straight to a placed page.
pub fn layout_page(notes: &[Note], config: &LayoutConfig) -> Page {
    paginate(&layout(notes), config)
}
