use std::time::{Duration, Instant};

use crate::event_model::{DrumType, Pulse};
use crate::input_model::InputSource;

/// How long a triggered slot stays set before clearing itself.
pub const PULSE_WINDOW: Duration = Duration::from_millis(10);

/// A single-slot momentary input: set on trigger, cleared after `PULSE_WINDOW`.
#[derive(Default, Debug)]
pub struct PulseSlot {
    drum: Option<DrumType>,
    clears_at: Option<Instant>,
}

impl PulseSlot {
    pub fn trigger(&mut self, drum: DrumType, now: Instant) {
        self.drum = Some(drum);
        self.clears_at = Some(now + PULSE_WINDOW);
    }

    pub fn poll(&mut self, now: Instant) -> Option<DrumType> {
        if self.clears_at.is_some_and(|clears_at| now >= clears_at) {
            self.drum = None;
            self.clears_at = None;
        }

        self.drum
    }
}

/// Controller first, keyboard only when the controller slot is empty.
pub fn combine(controller: Option<DrumType>, keyboard: Option<DrumType>) -> Option<DrumType> {
    controller.or(keyboard)
}

/*
    Fuses the two sources into one pulse stream. Evaluated once per tick of the
    transcription loop: every source event popped during a tick is triggered first,
    then tick() reports a pulse whenever the combined value turns on or changes.
*/
#[derive(Default, Debug)]
pub struct HitNormalizer {
    controller: PulseSlot,
    keyboard: PulseSlot,
    last: Option<DrumType>,
}

impl HitNormalizer {
    pub fn new() -> HitNormalizer {
        HitNormalizer::default()
    }

    fn combined(&mut self, now: Instant) -> Option<DrumType> {
        let controller = self.controller.poll(now);
        let keyboard = self.keyboard.poll(now);
        combine(controller, keyboard)
    }

    pub fn trigger(&mut self, source: InputSource, drum: DrumType, now: Instant) {
        // A slot that already expired must not mask a retrigger of the same drum
        if self.combined(now).is_none() {
            self.last = None;
        }

        match source {
            InputSource::Controller => self.controller.trigger(drum, now),
            InputSource::Keyboard => self.keyboard.trigger(drum, now),
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<Pulse> {
        let current = self.combined(now);
        let changed = current != self.last;
        self.last = current;

        if changed {
            current.map(|drum| Pulse { drum, time: now })
        } else {
            None
        }
    }
}
