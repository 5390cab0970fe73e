//! The guitar translator plugin.
//!
//! [`GuitarPlugin`] holds the persistent state before the sample rate is
//! known; [`GuitarProcessor`] is the prepared form that processes blocks.
//! Per block the processor walks the incoming SysEx frames in order,
//! aging the state up to each frame, decoding it, and emitting notes for
//! dirty frames, then ages the remainder of the block.

use fretwire_core::{
    AudioSetup, EventProcessor, MidiBuffer, MidiEvent, MidiEventKind, Plugin, PluginResult,
    ProcessContext,
};

use crate::aging::age_state;
use crate::decode::decode_frame;
use crate::emit::emit_notes;
use crate::snapshot;
use crate::state::GuitarState;
use crate::timing::Timing;

/// Frames shorter than this cannot carry a type code.
const MIN_FRAME_LEN: usize = 4;

/// The unprepared translator.
#[derive(Debug, Default)]
pub struct GuitarPlugin {
    state: GuitarState,
}

impl GuitarPlugin {
    /// Create a plugin starting from a specific state, e.g. restored
    /// settings or non-default playing modes.
    pub fn new(state: GuitarState) -> Self {
        Self { state }
    }
}

impl Plugin for GuitarPlugin {
    type Config = AudioSetup;
    type Processor = GuitarProcessor;

    fn prepare(self, config: Self::Config) -> Self::Processor {
        GuitarProcessor {
            timing: Timing::new(config.sample_rate),
            state: self.state,
            button_hold: 0,
        }
    }

    fn wants_midi(&self) -> bool {
        true
    }
}

/// The prepared translator.
#[derive(Debug)]
pub struct GuitarProcessor {
    timing: Timing,
    state: GuitarState,
    /// Samples the current button hold has accumulated toward the next
    /// auto-repeat. Negative right after a press (lead-in).
    button_hold: i64,
}

impl GuitarProcessor {
    /// Read-only copy of the current state, for presentation.
    pub fn state(&self) -> GuitarState {
        self.state
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

impl EventProcessor for GuitarProcessor {
    type Plugin = GuitarPlugin;

    fn process_events(
        &mut self,
        input: &[MidiEvent],
        context: &ProcessContext,
        output: &mut MidiBuffer,
    ) {
        let mut cursor = 0u32;
        for event in input {
            let MidiEventKind::SysEx(sysex) = &event.event else {
                continue;
            };
            let payload = sysex.as_slice();
            if payload.len() < MIN_FRAME_LEN {
                continue;
            }
            let sample = event.sample_offset;
            self.state = age_state(
                &self.timing,
                self.state,
                cursor,
                sample,
                &mut self.button_hold,
                output,
            );
            let decoded = decode_frame(&self.timing, self.state, sample, payload, &mut self.button_hold);
            if decoded.dirty {
                self.state = emit_notes(&self.state, decoded, output);
            }
            cursor = sample;
        }
        self.state = age_state(
            &self.timing,
            self.state,
            cursor,
            context.block_end(),
            &mut self.button_hold,
            output,
        );
        // Expiries from different strings can interleave with frame
        // events; downstream consumers get chronological order.
        output.sort_by_offset();
    }

    fn unprepare(self) -> Self::Plugin {
        GuitarPlugin { state: self.state }
    }

    fn tail_samples(&self) -> u32 {
        self.timing.max_tail_samples()
    }

    fn save_state(&self) -> PluginResult<Vec<u8>> {
        snapshot::save(&self.state)
    }

    fn load_state(&mut self, data: &[u8]) -> PluginResult<()> {
        self.state = snapshot::load(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> GuitarProcessor {
        GuitarPlugin::default().prepare(AudioSetup {
            sample_rate: 48000.0,
            max_buffer_size: 512,
        })
    }

    #[test]
    fn test_non_sysex_events_ignored() {
        let mut proc = processor();
        let before = proc.state();
        let input = [MidiEvent::note_on(0, 1, 60, 100)];
        let mut output = MidiBuffer::new();
        proc.process_events(&input, &ProcessContext::new(48000.0, 0), &mut output);
        assert!(output.is_empty());
        assert_eq!(proc.state(), before);
    }

    #[test]
    fn test_load_failure_keeps_state() {
        let mut proc = processor();
        let mut state = proc.state();
        state.detune = 5;
        proc.load_state(&snapshot::save(&state).unwrap()).unwrap();
        assert_eq!(proc.state().detune, 5);

        assert!(proc.load_state(b"garbage").is_err());
        assert_eq!(proc.state().detune, 5);
    }

    #[test]
    fn test_round_trip_through_unprepare() {
        let mut proc = processor();
        let mut state = proc.state();
        state.sustain = 3.0;
        proc.load_state(&snapshot::save(&state).unwrap()).unwrap();
        let plugin = proc.unprepare();
        let proc = plugin.prepare(AudioSetup {
            sample_rate: 96000.0,
            max_buffer_size: 256,
        });
        assert_eq!(proc.state().sustain, 3.0);
        assert_eq!(proc.timing().sample_rate(), 96000.0);
    }
}
