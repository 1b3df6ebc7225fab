use crate::util;

pub const MIN_BPM: i64 = 40;
pub const MAX_BPM: i64 = 220;

/*
    Configurable, shared state variables.
*/

pub struct State {
    pub bpm: i64,
}

impl State {

    pub fn new(bpm: i64) -> State {
        State {
            bpm: util::clamp_bpm(bpm),
        }
    }

    // Out of range values are clamped, the classifier must never see a tempo it can't use
    pub fn set_bpm(&mut self, value: i64) {
        self.bpm = util::clamp_bpm(value);
    }
}

impl Default for State {
    fn default() -> State {
        State::new(120)
    }
}
