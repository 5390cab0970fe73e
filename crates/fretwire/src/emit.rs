//! Note emission.
//!
//! After a dirty decode, the emitter diffs the updated state against the
//! previous one and turns pending markers into note events. Each string
//! owns one MIDI channel (string index + 1), so a new note on a sounding
//! string always pairs a note-off for the old pitch with the note-on.

use fretwire_core::{MidiBuffer, MidiEvent};

use crate::state::{GuitarState, STRING_COUNT};

/// Emit note events for every pending string and settle the new state.
///
/// `old` is the state the frame was decoded against; `state` is the
/// decoder's updated copy. Pitches outside 0..=127 are dropped silently,
/// but the pending marker is cleared either way so a bad frame cannot
/// wedge a string. Clears `dirty` on return.
pub fn emit_notes(old: &GuitarState, mut state: GuitarState, output: &mut MidiBuffer) -> GuitarState {
    let detune = state.detune;
    for index in 0..STRING_COUNT {
        let old_string = &old.strings[index];
        let string = &mut state.strings[index];
        let Some(sample) = string.pending else {
            continue;
        };

        let pitch = string.open_note as i32 + string.fret + detune;
        if (0..=127).contains(&pitch) {
            let pitch = pitch as u8;
            let channel = (index + 1) as u8;
            string.note = Some(pitch);

            if old_string.samples_left > 0 {
                if let Some(previous) = old_string.note {
                    output.push(MidiEvent::note_off(sample, channel, previous, string.velocity));
                }
            }
            if string.samples_left > 0 {
                output.push(MidiEvent::note_on(sample, channel, pitch, string.velocity));
                if old_string.note != Some(pitch) {
                    string.age = 0;
                }
            }
        }
        string.pending = None;
    }
    state.dirty = false;
    state
}
