//! Fretwire: a guitar-controller SysEx to MIDI note translator.
//!
//! The translator consumes the proprietary SysEx frames a MIDI guitar
//! controller sends (fret positions, plucks, button images, keepalives)
//! and produces sample-accurate note-on/note-off events, one MIDI
//! channel per string. It models per-string playing state with hammer-on,
//! pull-off, open-string damping and tap modes, debounced input, global
//! detune, and an adjustable sustain whose countdown scales inversely
//! with pluck velocity.
//!
//! The translator plugs into a host through the [`fretwire_core`]
//! lifecycle: a [`GuitarPlugin`] is prepared with an
//! [`AudioSetup`](fretwire_core::AudioSetup) into a [`GuitarProcessor`],
//! whose `process_events` is allocation-free and lock-free.
//!
//! ```
//! use fretwire::GuitarPlugin;
//! use fretwire_core::{AudioSetup, EventProcessor, MidiBuffer, MidiEvent, Plugin, ProcessContext};
//!
//! let plugin = GuitarPlugin::default();
//! let mut processor = plugin.prepare(AudioSetup {
//!     sample_rate: 48000.0,
//!     max_buffer_size: 512,
//! });
//!
//! // A silent block ages the strings past the debounce window.
//! let mut output = MidiBuffer::new();
//! processor.process_events(&[], &ProcessContext::new(48000.0, 4800), &mut output);
//!
//! // Pluck the high E string at full velocity, 10 samples into the block.
//! let input = [MidiEvent::sysex(10, &[0x08, 0x40, 0x0A, 0x05, 0x01, 0x7F])];
//! output.clear();
//! processor.process_events(&input, &ProcessContext::new(48000.0, 512), &mut output);
//! assert_eq!(output.len(), 1);
//! ```

pub mod aging;
pub mod buttons;
pub mod decode;
pub mod emit;
pub mod processor;
pub mod snapshot;
pub mod state;
pub mod timing;

pub use buttons::{Button, ButtonSet};
pub use processor::{GuitarPlugin, GuitarProcessor};
pub use state::{GuitarState, StringState, OPEN_TUNING, STRING_COUNT};
pub use timing::{
    Timing, BUTTON_HOLD_LEAD_IN, BUTTON_REPEAT, DEBOUNCE, MAX_SUSTAIN, MIN_SUSTAIN,
    SUSTAIN_INCREMENT,
};
