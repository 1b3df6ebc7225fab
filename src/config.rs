use std::net::SocketAddrV4;

use clap::Parser;

use crate::measure_layout::LayoutConfig;
use crate::state::{MAX_BPM, MIN_BPM};

/// Transcribes drum pad (or keyboard) hits into notes and measures.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Starting tempo, changeable at runtime with the +/- keys or OSC /set_bpm
    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(i64).range(MIN_BPM..=MAX_BPM))]
    pub bpm: i64,

    /// Part of the MIDI input port name to connect to; first port if omitted
    #[arg(long)]
    pub midi_port: Option<String>,

    /// Address to receive OSC control messages on
    #[arg(long, default_value = "127.0.0.1:17777")]
    pub osc_listen: SocketAddrV4,

    /// OSC address that receives committed notes; notes stay in memory if omitted.
    /// Either way nothing survives a restart: the OSC target is never read back
    #[arg(long)]
    pub store_target: Option<SocketAddrV4>,

    /// Width available to the measure layout
    #[arg(long, default_value_t = 800)]
    pub available_width: u32,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            available_width: self.available_width,
            ..LayoutConfig::default()
        }
    }
}
