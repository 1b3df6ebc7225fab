use std::error::Error;
use std::time::Instant;

use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort};
use ringbuf::traits::Producer;
use ringbuf::HeapProd;
use tracing::{debug, info, warn};

use crate::input_model::{InputSource, SourceEvent};
use crate::midi_mapping::map;

fn select_port(midi_in: &MidiInput, name_filter: Option<&str>) -> Option<MidiInputPort> {
    let ports = midi_in.ports();

    for (i, port) in ports.iter().enumerate() {
        info!("MIDI port {}: {}", i, midi_in.port_name(port).unwrap_or_else(|_| "Unknown".to_string()));
    }

    match name_filter {
        Some(filter) => ports.into_iter().find(|port| {
            midi_in.port_name(port)
                .map(|name| name.contains(filter))
                .unwrap_or(false)
        }),
        None => ports.into_iter().next(),
    }
}

// Read drum hits from a MIDI controller and publish them to the provided ringbuf.
// The returned connection must be kept alive for as long as input is wanted;
// None means no matching device, and the caller carries on keyboard-only.
pub fn begin(
    mut publisher: HeapProd<SourceEvent>,
    name_filter: Option<&str>,
) -> Result<Option<MidiInputConnection<()>>, Box<dyn Error>> {

    let mut midi_in = MidiInput::new("drum-transcriber input")?;
    midi_in.ignore(Ignore::All);

    let Some(port) = select_port(&midi_in, name_filter) else {
        warn!("No MIDI input device found{}", name_filter.map(|f| format!(" matching '{}'", f)).unwrap_or_default());
        return Ok(None);
    };

    let in_port_name = midi_in.port_name(&port)?;
    info!("Opening MIDI connection to '{}'", in_port_name);

    let connection = midi_in.connect(
        &port,
        "drum-transcriber-read",
        move |_stamp, message, _| {

            if let Some(drum) = map(message) {
                let event = SourceEvent {
                    source: InputSource::Controller,
                    drum,
                    time: Instant::now(),
                };

                if publisher.try_push(event).is_err() {
                    warn!("MIDI pipe full, dropped {:?}", drum);
                }
            } else {
                debug!("Ignored MIDI message {:?}", message);
            }
        },
        (),
    )?;

    info!("Connection open, reading input from '{}'", in_port_name);
    Ok(Some(connection))
}
