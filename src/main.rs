use std::error::Error;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use ringbuf::traits::{Consumer, Split};
use ringbuf::HeapRb;
use tracing::{debug, error, info, warn, Level};

use drum_transcriber::config::Config;
use drum_transcriber::hit_normalizer::HitNormalizer;
use drum_transcriber::input_model::{ControlEvent, SourceEvent};
use drum_transcriber::measure_layout::{self, LayoutConfig};
use drum_transcriber::note_store::{MemoryStore, NoteStore, OscNoteStore};
use drum_transcriber::osc_client::OscClient;
use drum_transcriber::state::State;
use drum_transcriber::transcriber::Transcriber;
use drum_transcriber::{export, keyboard_daemon, midi_read_daemon, osc_read_daemon, render};

// One logical tick of the transcription loop
const LOOP_INTERVAL: Duration = Duration::from_nanos(500000);

fn main() {
    let config = Config::parse();

    let level = if config.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(config) {
        Ok(_) => (),
        Err(err) => error!("Error: {}", err),
    }
}

/*
    Everything that happens on the transcription loop: raw hits are triggered into the
    normalizer, the normalizer is ticked once, and the resulting pulse (if any) plus the
    idle timer go through the transcriber. Nothing here blocks.
*/
struct Session {
    normalizer: HitNormalizer,
    transcriber: Transcriber,
    layout: LayoutConfig,
}

impl Session {
    fn new(transcriber: Transcriber, layout: LayoutConfig) -> Session {
        Session {
            normalizer: HitNormalizer::new(),
            transcriber,
            layout,
        }
    }

    // Slots open at the moment the daemon stamped the hit, not when the loop got to it
    fn ingest(&mut self, event: SourceEvent) {
        self.normalizer.trigger(event.source, event.drum, event.time);
    }

    fn step(&mut self, now: Instant, bpm: i64) {
        if let Some(pulse) = self.normalizer.tick(now) {
            debug!("Pulse {:?} at bpm {}", pulse.drum, bpm);
            self.transcriber.on_pulse(pulse, bpm);
        }

        self.transcriber.tick(now);
    }

    // Returns false when the loop should stop
    fn control(&mut self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::ClearScore => {
                info!("Clearing score");
                self.transcriber.clear_score();
                true
            }
            ControlEvent::Export => {
                let document = export::lilypond_document(self.transcriber.score().notes());

                match export::copy_to_clipboard(&document) {
                    Ok(_) => info!("Copied LilyPond score to clipboard"),
                    Err(e) => {
                        warn!("Could not copy to clipboard: {}", e);
                        println!("{}", document);
                    }
                }
                true
            }
            ControlEvent::Quit => false,
        }
    }

    fn render(&self) -> Vec<String> {
        let page = measure_layout::layout_page(self.transcriber.score().notes(), &self.layout);
        render::render_page(&page)
    }

    fn print(&self) {
        println!("{}", "-".repeat(50));
        for line in self.render() {
            println!("{}", line);
        }
    }
}

fn drain_control(session: &mut Session, control: &Receiver<ControlEvent>) -> bool {
    while let Ok(event) = control.try_recv() {
        if !session.control(event) {
            return false;
        }
    }
    true
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {

    // NOTE: Capacity is generous, a pipe is drained every loop
    let (midi_pub, mut midi_sub) = HeapRb::<SourceEvent>::new(100).split();
    let (keyboard_pub, mut keyboard_sub) = HeapRb::<SourceEvent>::new(100).split();
    let (control_tx, control_rx) = mpsc::channel::<ControlEvent>();

    // State init

    let state = Arc::new(Mutex::new(State::new(config.bpm)));

    let store: Box<dyn NoteStore> = match config.store_target {
        Some(target) => {
            info!("Forwarding committed notes to {} (write-only, the score starts empty)", target);
            Box::new(OscNoteStore::new(OscClient::bind(target)?))
        }
        None => Box::new(MemoryStore::new()),
    };

    let mut session = Session::new(Transcriber::new(store), config.layout());
    session.transcriber.hydrate();
    session.print();

    osc_read_daemon::begin(config.osc_listen, state.clone(), control_tx.clone())?;
    keyboard_daemon::begin(keyboard_pub, control_tx, state.clone());

    // _midi_conn needs to be a named binding, the connection closes when dropped
    let _midi_conn = match midi_read_daemon::begin(midi_pub, config.midi_port.as_deref()) {
        Ok(connection) => connection,
        Err(e) => {
            warn!("MIDI input unavailable, keyboard only: {}", e);
            None
        }
    };

    loop {
        thread::sleep(LOOP_INTERVAL);

        let now = Instant::now();

        while let Some(event) = midi_sub.try_pop() {
            session.ingest(event);
        }
        while let Some(event) = keyboard_sub.try_pop() {
            session.ingest(event);
        }

        let bpm = state.lock().map_err(|_| "state lock poisoned")?.bpm;
        session.step(now, bpm);

        if !drain_control(&mut session, &control_rx) {
            info!("Bye");
            return Ok(());
        }

        if session.transcriber.take_modified() {
            session.print();
        }
    }
}
