use std::error::Error;
use std::net::{SocketAddrV4, UdpSocket};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

use rosc::decoder;
use tracing::{debug, info, warn};

use crate::input_model::ControlEvent;
use crate::osc_model::{self, InboundCommand};
use crate::state::State;

// Apply one inbound command. Returns false once the transcription loop is gone.
fn dispatch(command: InboundCommand, state: &Mutex<State>, control: &Sender<ControlEvent>) -> bool {
    match command {
        InboundCommand::SetBpm(bpm) => {
            match state.lock() {
                Ok(mut state) => {
                    state.set_bpm(bpm);
                    info!("Tempo set to {} via OSC", state.bpm);
                }
                Err(_) => warn!("State lock poisoned, tempo unchanged"),
            }
            true
        }
        InboundCommand::ClearScore => control.send(ControlEvent::ClearScore).is_ok(),
        InboundCommand::Export => control.send(ControlEvent::Export).is_ok(),
    }
}

// Listen for tempo and score commands from other tools
pub fn begin(
    addr: SocketAddrV4,
    state: Arc<Mutex<State>>,
    control: Sender<ControlEvent>,
) -> Result<(), Box<dyn Error>> {

    let socket = UdpSocket::bind(addr)?;
    info!("Listening for OSC on {}", addr);

    thread::spawn(move || {
        let mut buf = [0u8; decoder::MTU];

        loop {
            let size = match socket.recv_from(&mut buf) {
                Ok((size, _)) => size,
                Err(e) => {
                    warn!("OSC receive failed: {}", e);
                    continue;
                }
            };

            let packet = match decoder::decode_udp(&buf[..size]) {
                Ok((_, packet)) => packet,
                Err(e) => {
                    warn!("Could not decode OSC packet: {:?}", e);
                    continue;
                }
            };

            for msg in osc_model::messages(packet) {
                match osc_model::read_command(&msg) {
                    Some(command) => {
                        if !dispatch(command, &state, &control) {
                            return;
                        }
                    }
                    None => debug!("Ignored OSC message {}", msg.addr),
                }
            }
        }
    });

    Ok(())
}
