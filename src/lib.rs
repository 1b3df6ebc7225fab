//! Live drum transcription: pad or keyboard hits in, notes and measures out.
//!
//! Hits from both sources are fused by the [`hit_normalizer`], grouped and timed by the
//! [`transcriber`] (using [`quantizer::classify`]), and packed into measures by
//! [`measure_layout`].

pub mod config;
pub mod event_model;
pub mod export;
pub mod hit_normalizer;
pub mod input_model;
pub mod measure_layout;
pub mod midi_mapping;
pub mod note_store;
pub mod osc_client;
pub mod osc_model;
pub mod quantizer;
pub mod render;
pub mod score;
pub mod state;
pub mod transcriber;
pub mod util;

pub mod keyboard_daemon;
pub mod midi_read_daemon;
pub mod osc_read_daemon;
