use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use notcurses::{Key, Notcurses, NotcursesResult};
use ringbuf::traits::Producer;
use ringbuf::HeapProd;
use tracing::{info, warn};

use crate::event_model::DrumType;
use crate::input_model::{ControlEvent, InputSource, SourceEvent};
use crate::midi_mapping::map_key;
use crate::state::State;

/*
    Keyboard substitute for a drum kit, one raw key press per hit.

    a: kick   s: snare   d: closed hat   f: open hat   space: crash   j: ride
    +/-: tempo up/down   x: export   enter: clear score   F1: quit
*/

const DRUM_KEYS: [char; 6] = ['a', 's', 'd', 'f', ' ', 'j'];

const MOD_KEYS: [char; 3] = ['+', '-', 'x'];

pub const BPM_STEP: i64 = 5;

// Nothing to read, don't spin the core
const IDLE_POLL: Duration = Duration::from_micros(500);

#[derive(PartialEq, Eq, Debug)]
pub enum KeyAction {
    Hit(DrumType),
    NudgeBpm(i64),
    Control(ControlEvent),
}

pub fn key_action(key: char) -> Option<KeyAction> {
    if let Some(drum) = map_key(key) {
        return Some(KeyAction::Hit(drum));
    }

    match key {
        '+' => Some(KeyAction::NudgeBpm(BPM_STEP)),
        '-' => Some(KeyAction::NudgeBpm(-BPM_STEP)),
        'x' => Some(KeyAction::Control(ControlEvent::Export)),
        _ => None,
    }
}

// Apply one key press stamped at `time`. Returns false once the loop should stop reading.
fn dispatch(
    action: KeyAction,
    time: Instant,
    publisher: &mut HeapProd<SourceEvent>,
    control: &Sender<ControlEvent>,
    state: &Mutex<State>,
) -> bool {
    match action {
        KeyAction::Hit(drum) => {
            let event = SourceEvent { source: InputSource::Keyboard, drum, time };

            if publisher.try_push(event).is_err() {
                warn!("Keyboard pipe full, dropped {:?}", drum);
            }
            true
        }
        KeyAction::NudgeBpm(delta) => {
            match state.lock() {
                Ok(mut state) => {
                    let bpm = state.bpm + delta;
                    state.set_bpm(bpm);
                    info!("Tempo set to {}", state.bpm);
                }
                Err(_) => warn!("State lock poisoned, tempo unchanged"),
            }
            true
        }
        KeyAction::Control(event) => {
            let quit = event == ControlEvent::Quit;
            control.send(event).is_ok() && !quit
        }
    }
}

fn read_keys(
    mut publisher: HeapProd<SourceEvent>,
    control: Sender<ControlEvent>,
    state: Arc<Mutex<State>>,
) -> NotcursesResult<()> {

    let mut nc = Notcurses::new()?;

    info!("Keyboard ready: a s d f space j to strike, +/- tempo, x export, enter clear, F1 quit");

    loop {
        let event = nc.poll_event()?;

        if !event.received() {
            thread::sleep(IDLE_POLL);
            continue;
        }

        // Stamp before anything else, the gap between presses is the rhythm
        let time = Instant::now();

        // Only releases are skipped, terminals without release reporting never flag a press
        if event.is_release() {
            continue;
        }

        let action = if event.is_key(Key::F01) {
            Some(KeyAction::Control(ControlEvent::Quit))
        } else if event.is_key(Key::Enter) {
            Some(KeyAction::Control(ControlEvent::ClearScore))
        } else {
            DRUM_KEYS.iter()
                .chain(MOD_KEYS.iter())
                .find(|&&key| event.is_char(key))
                .and_then(|&key| key_action(key))
        };

        if let Some(action) = action {
            if !dispatch(action, time, &mut publisher, &control, &state) {
                return Ok(());
            }
        }
    }
}

pub fn begin(
    publisher: HeapProd<SourceEvent>,
    control: Sender<ControlEvent>,
    state: Arc<Mutex<State>>,
) {
    thread::spawn(move || {
        if let Err(e) = read_keys(publisher, control, state) {
            warn!("Keyboard input failed: {:?}", e);
        }

        info!("Keyboard input closed");
    });
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use ringbuf::traits::{Consumer, Split};
    use ringbuf::HeapRb;

    use super::*;

    #[test]
    fn keys() {
        assert_eq!(key_action('a'), Some(KeyAction::Hit(DrumType::Kick)));
        assert_eq!(key_action('s'), Some(KeyAction::Hit(DrumType::Snare)));
        assert_eq!(key_action(' '), Some(KeyAction::Hit(DrumType::Crash)));
        assert_eq!(key_action('j'), Some(KeyAction::Hit(DrumType::Ride)));
        assert_eq!(key_action('+'), Some(KeyAction::NudgeBpm(5)));
        assert_eq!(key_action('-'), Some(KeyAction::NudgeBpm(-5)));
        assert_eq!(key_action('x'), Some(KeyAction::Control(ControlEvent::Export)));
        assert_eq!(key_action('z'), None);

        for key in DRUM_KEYS.iter().chain(MOD_KEYS.iter()) {
            assert!(key_action(*key).is_some());
        }
    }

    #[test]
    fn every_press_is_its_own_hit() {
        let start = Instant::now();
        let (mut publisher, mut subscriber) = HeapRb::<SourceEvent>::new(10).split();
        let (tx, _rx) = mpsc::channel();
        let state = Mutex::new(State::default());

        for millis in [0, 500, 1000, 1500] {
            let time = start + Duration::from_millis(millis);
            assert!(dispatch(KeyAction::Hit(DrumType::Snare), time, &mut publisher, &tx, &state));
        }

        let times: Vec<Instant> = std::iter::from_fn(|| subscriber.try_pop())
            .map(|event| {
                assert_eq!(event.source, InputSource::Keyboard);
                assert_eq!(event.drum, DrumType::Snare);
                event.time
            })
            .collect();

        assert_eq!(times, vec![
            start,
            start + Duration::from_millis(500),
            start + Duration::from_millis(1000),
            start + Duration::from_millis(1500),
        ]);
    }

    #[test]
    fn tempo_and_controls() {
        let now = Instant::now();
        let (mut publisher, _subscriber) = HeapRb::<SourceEvent>::new(10).split();
        let (tx, rx) = mpsc::channel();
        let state = Mutex::new(State::new(215));

        assert!(dispatch(KeyAction::NudgeBpm(BPM_STEP), now, &mut publisher, &tx, &state));
        assert!(dispatch(KeyAction::NudgeBpm(BPM_STEP), now, &mut publisher, &tx, &state));
        assert_eq!(state.lock().unwrap().bpm, 220);
        assert!(dispatch(KeyAction::NudgeBpm(-BPM_STEP), now, &mut publisher, &tx, &state));
        assert_eq!(state.lock().unwrap().bpm, 215);

        assert!(dispatch(KeyAction::Control(ControlEvent::ClearScore), now, &mut publisher, &tx, &state));
        assert!(!dispatch(KeyAction::Control(ControlEvent::Quit), now, &mut publisher, &tx, &state));
        assert_eq!(rx.try_recv(), Ok(ControlEvent::ClearScore));
        assert_eq!(rx.try_recv(), Ok(ControlEvent::Quit));

        drop(rx);
        assert!(!dispatch(KeyAction::Control(ControlEvent::Export), now, &mut publisher, &tx, &state));
    }
}
