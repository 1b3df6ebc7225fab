use crate::event_model::{Note, NoteId};

/// The ordered list of committed notes.
///
/// Appending is reserved for the transcriber; everyone else may only clear
/// or swap in a whole new sequence (e.g. when hydrating from the store).
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Score {
    notes: Vec<Note>,
    pub modified: bool,
}

impl Score {
    pub fn new() -> Score {
        Score { notes: Vec::new(), modified: false }
    }

    pub(crate) fn append(&mut self, note: Note) {
        self.notes.push(note);
        self.modified = true;
    }

    pub fn clear(&mut self) {
        self.notes.clear();
        self.modified = true;
    }

    pub fn replace(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        self.modified = true;
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn max_id(&self) -> Option<NoteId> {
        self.notes.iter().map(|note| note.id).max()
    }
}
