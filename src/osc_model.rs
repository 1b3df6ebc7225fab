use rosc::{OscMessage, OscPacket, OscType};

use crate::event_model::Note;

/*
    Outgoing: committed notes and score wipes, for whatever keeps the score durable.
    Incoming: tempo and score commands from other tools.
*/

pub fn create_note_save(note: &Note) -> OscPacket {

    let mut base_args = vec![
        OscType::String(note.id.to_string()),
        OscType::Int(note.duration.denominator() as i32),
        OscType::Bool(note.is_rest),
    ];

    for drum in &note.types {
        base_args.push(OscType::String(drum.short_name().to_string()));
    }

    OscPacket::Message(OscMessage {
        addr: "/note_save".to_string(),
        args: base_args,
    })
}

pub fn create_score_clear() -> OscPacket {
    OscPacket::Message(OscMessage {
        addr: "/score_clear".to_string(),
        args: vec![],
    })
}

#[derive(PartialEq, Eq, Debug)]
pub enum InboundCommand {
    SetBpm(i64),
    ClearScore,
    Export,
}

pub fn read_command(msg: &OscMessage) -> Option<InboundCommand> {
    match msg.addr.as_str() {
        "/set_bpm" => {
            let bpm = match msg.args.first()? {
                OscType::Int(value) => *value as i64,
                OscType::Long(value) => *value,
                OscType::Float(value) => value.round() as i64,
                _ => return None,
            };
            Some(InboundCommand::SetBpm(bpm))
        }
        "/clear_score" => Some(InboundCommand::ClearScore),
        "/export" => Some(InboundCommand::Export),
        _ => None,
    }
}

/// Flattens bundles into their messages, depth first.
pub fn messages(packet: OscPacket) -> Vec<OscMessage> {
    match packet {
        OscPacket::Message(msg) => vec![msg],
        OscPacket::Bundle(bundle) => bundle.content.into_iter()
            .flat_map(messages)
            .collect(),
    }
}
