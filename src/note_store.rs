use std::error::Error;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::event_model::Note;
use crate::osc_client::OscClient;
use crate::osc_model;

/*
    Durable side of the score. The transcriber only ever calls these
    fire-and-forget: errors are logged by the caller, never retried, and
    never undo the in-memory score.
*/
pub trait NoteStore: Send {
    fn save(&mut self, note: &Note) -> Result<(), Box<dyn Error>>;
    fn fetch_all(&mut self) -> Result<Vec<Note>, Box<dyn Error>>;
    fn clear_all(&mut self) -> Result<(), Box<dyn Error>>;
}

/// Keeps notes for the lifetime of the process. Clones share the same list.
#[derive(Clone, Default)]
pub struct MemoryStore {
    notes: Arc<Mutex<Vec<Note>>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> MemoryStore {
        MemoryStore { notes: Arc::new(Mutex::new(notes)) }
    }

    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().map(|notes| notes.clone()).unwrap_or_default()
    }
}

impl NoteStore for MemoryStore {
    fn save(&mut self, note: &Note) -> Result<(), Box<dyn Error>> {
        self.notes.lock()
            .map_err(|_| "note store lock poisoned")?
            .push(note.clone());
        Ok(())
    }

    fn fetch_all(&mut self) -> Result<Vec<Note>, Box<dyn Error>> {
        let notes = self.notes.lock().map_err(|_| "note store lock poisoned")?;
        Ok(notes.clone())
    }

    fn clear_all(&mut self) -> Result<(), Box<dyn Error>> {
        self.notes.lock()
            .map_err(|_| "note store lock poisoned")?
            .clear();
        Ok(())
    }
}

/// Forwards committed notes to a remote OSC listener.
///
/// UDP gives nothing back, so the remote side cannot be used to hydrate.
pub struct OscNoteStore {
    client: OscClient,
}

impl OscNoteStore {
    pub fn new(client: OscClient) -> OscNoteStore {
        OscNoteStore { client }
    }
}

impl NoteStore for OscNoteStore {
    fn save(&mut self, note: &Note) -> Result<(), Box<dyn Error>> {
        self.client.send(osc_model::create_note_save(note))
    }

    fn fetch_all(&mut self) -> Result<Vec<Note>, Box<dyn Error>> {
        debug!("OSC note store is write-only, starting from an empty score");
        Ok(Vec::new())
    }

    fn clear_all(&mut self) -> Result<(), Box<dyn Error>> {
        self.client.send(osc_model::create_score_clear())
    }
}

#[cfg(test)]
mod tests {
    use std::net::{SocketAddrV4, UdpSocket};
    use std::str::FromStr;
    use std::time::Duration;

    use rosc::decoder;

    use super::*;
    use crate::event_model::{DrumType, NoteDuration, NoteId};

    fn note(id: u64) -> Note {
        Note {
            id: NoteId(id),
            types: vec![DrumType::Snare],
            duration: NoteDuration::Half,
            is_rest: false,
        }
    }

    #[test]
    fn memory_store_round() {
        let mut store = MemoryStore::new();
        let observer = store.clone();

        store.save(&note(0)).unwrap();
        store.save(&note(1)).unwrap();
        assert_eq!(observer.snapshot(), vec![note(0), note(1)]);
        assert_eq!(store.fetch_all().unwrap(), vec![note(0), note(1)]);

        store.clear_all().unwrap();
        assert!(observer.snapshot().is_empty());
    }

    #[test]
    fn osc_store_sends_saves() {
        let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
        listener.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        let target = SocketAddrV4::from_str(&listener.local_addr().unwrap().to_string()).unwrap();

        let mut store = OscNoteStore::new(OscClient::bind(target).unwrap());
        store.save(&note(3)).unwrap();
        assert!(store.fetch_all().unwrap().is_empty());

        let mut buf = [0u8; 1024];
        let (size, _) = listener.recv_from(&mut buf).unwrap();
        let (_, packet) = decoder::decode_udp(&buf[..size]).unwrap();
        let addrs: Vec<String> = osc_model::messages(packet).into_iter().map(|m| m.addr).collect();
        assert_eq!(addrs, vec!["/note_save".to_string()]);
    }
}
