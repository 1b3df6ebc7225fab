use std::time::Instant;

use crate::event_model::DrumType;

/*
    Raw hits as published by the input daemons, before normalization.
    Each daemon owns the producer end of its own ring buffer, so the
    source is known from the pipe it arrived on as well as the tag.
*/

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum InputSource {
    Controller,
    Keyboard,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub struct SourceEvent {
    pub source: InputSource,
    pub drum: DrumType,
    pub time: Instant,
}

/// Commands that reach the transcription loop from the keyboard or OSC.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ControlEvent {
    ClearScore,
    Export,
    Quit,
}
