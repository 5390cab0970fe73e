//! # fretwire-core
//!
//! Core abstractions for the Fretwire controller-to-MIDI framework.
//!
//! This crate provides the format-agnostic seam between a host wrapper
//! (VST3, AU, standalone JACK client, test harness) and an event
//! translator. It has no external dependencies.
//!
//! ## Main Traits
//!
//! - [`Plugin`] - The unprepared translator, holds persistent state
//! - [`EventProcessor`] - The prepared translator, ready for block processing
//!
//! ## Types
//!
//! - [`MidiEvent`] - A sample-stamped MIDI event
//! - [`MidiBuffer`] - Fixed-capacity, allocation-free output event buffer
//! - [`SysEx`] - Fixed-size system-exclusive payload
//! - [`ProcessContext`] - Per-block sample rate and length
//! - [`PluginError`] - Error types

pub mod error;
pub mod midi;
pub mod plugin;
pub mod process_context;

// Re-exports for convenience
pub use error::{PluginError, PluginResult};
pub use midi::{
    MidiBuffer, MidiChannel, MidiEvent, MidiEventKind, MidiNote, NoteOff, NoteOn, SysEx,
    MAX_MIDI_EVENTS, MAX_SYSEX_SIZE,
};
pub use plugin::{AudioSetup, EventProcessor, NoConfig, Plugin, ProcessorConfig};
pub use process_context::ProcessContext;
