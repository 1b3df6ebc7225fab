use std::time::{Duration, Instant};

use itertools::Itertools;
use tracing::{debug, warn};

use crate::event_model::{Classification, DrumType, Note, NoteDuration, NoteId, Pulse};
use crate::note_store::NoteStore;
use crate::quantizer;
use crate::score::Score;

/// Silence after the last hit before the pending group is committed as a whole note.
/// Fixed, independent of tempo.
pub const IDLE_FLUSH: Duration = Duration::from_millis(2000);

#[derive(PartialEq, Clone, Copy, Debug)]
struct PendingHit {
    drum: DrumType,
    time: Instant,
}

/// Hits collected so far into the next note. Never empty.
#[derive(PartialEq, Clone, Debug)]
pub struct PendingGroup {
    hits: Vec<PendingHit>,
}

impl PendingGroup {
    fn start(pulse: Pulse) -> PendingGroup {
        PendingGroup {
            hits: vec![PendingHit { drum: pulse.drum, time: pulse.time }],
        }
    }

    fn push(&mut self, pulse: Pulse) {
        self.hits.push(PendingHit { drum: pulse.drum, time: pulse.time });
    }

    /// Time of the first hit; every delta is measured from here.
    pub fn anchor(&self) -> Instant {
        self.hits[0].time
    }

    /// Struck drums in the order they arrived, repeats collapsed.
    pub fn drum_types(&self) -> Vec<DrumType> {
        self.hits.iter()
            .map(|hit| hit.drum)
            .unique()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

/// One-shot deadline. Arming always replaces the previous deadline.
#[derive(Default, Debug)]
pub struct IdleTimer {
    deadline: Option<Instant>,
}

impl IdleTimer {
    pub fn arm(&mut self, from: Instant) {
        self.deadline = Some(from + IDLE_FLUSH);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/*
    Sliding-window grouper.

    Idle:         no pending group, no timer.
    Accumulating: a pending group and an armed idle timer.

    A note's length is only known once the next hit arrives, so every commit
    except the idle flush closes the group *behind* the incoming pulse: the gap
    since the group's anchor becomes the closed group's duration, and the
    incoming pulse starts the next group.
*/
pub struct Transcriber {
    pending: Option<PendingGroup>,
    idle_timer: IdleTimer,
    score: Score,
    store: Box<dyn NoteStore>,
    next_id: u64,
}

impl Transcriber {
    pub fn new(store: Box<dyn NoteStore>) -> Transcriber {
        Transcriber {
            pending: None,
            idle_timer: IdleTimer::default(),
            score: Score::new(),
            store,
            next_id: 0,
        }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// True once after every change to the score.
    pub fn take_modified(&mut self) -> bool {
        std::mem::replace(&mut self.score.modified, false)
    }

    pub fn pending(&self) -> Option<&PendingGroup> {
        self.pending.as_ref()
    }

    pub fn idle_deadline(&self) -> Option<Instant> {
        self.idle_timer.deadline()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Feeds one normalized hit. `bpm` is read fresh for every pulse and must be positive.
    pub fn on_pulse(&mut self, pulse: Pulse, bpm: i64) {
        // A flush that came due before this hit happens first
        self.tick(pulse.time);

        self.idle_timer.arm(pulse.time);

        let Some(mut group) = self.pending.take() else {
            self.pending = Some(PendingGroup::start(pulse));
            return;
        };

        let delta = pulse.time.saturating_duration_since(group.anchor());

        match quantizer::classify(delta, bpm) {
            Classification::Chord => {
                group.push(pulse);
                self.pending = Some(group);
            }
            Classification::Duration(duration) => {
                self.commit(group, duration);
                self.pending = Some(PendingGroup::start(pulse));
            }
        }
    }

    /// Fires the idle flush if its deadline has passed. Returns true if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.idle_timer.is_due(now) {
            self.on_idle_timeout();
            true
        } else {
            false
        }
    }

    pub fn on_idle_timeout(&mut self) {
        self.idle_timer.cancel();

        if let Some(group) = self.pending.take() {
            self.commit(group, NoteDuration::Whole);
        }
    }

    /// Drops any pending group and wipes both the score and the store.
    pub fn clear_score(&mut self) {
        self.reset();
        self.score.clear();

        if let Err(e) = self.store.clear_all() {
            warn!("Could not clear note store: {}", e);
        }
    }

    /// Swaps in a whole new score, e.g. one fetched from the store.
    pub fn replace_score(&mut self, notes: Vec<Note>) {
        self.reset();
        self.score.replace(notes);
        self.next_id = self.score.max_id().map(|id| id.0 + 1).unwrap_or(0);
    }

    /// Replaces the score with whatever the store holds. Best-effort.
    pub fn hydrate(&mut self) {
        match self.store.fetch_all() {
            Ok(notes) => {
                debug!("Hydrated {} notes from store", notes.len());
                self.replace_score(notes);
            }
            Err(e) => warn!("Could not fetch notes from store: {}", e),
        }
    }

    fn reset(&mut self) {
        self.pending = None;
        self.idle_timer.cancel();
    }

    fn commit(&mut self, group: PendingGroup, duration: NoteDuration) {
        let note = Note {
            id: NoteId(self.next_id),
            types: group.drum_types(),
            duration,
            is_rest: false,
        };
        self.next_id += 1;

        debug!("Committed {} {:?} {:?}", note.id, note.types, note.duration);

        self.score.append(note.clone());

        if let Err(e) = self.store.save(&note) {
            warn!("Could not save note {}: {}", note.id, e);
        }
    }
}
