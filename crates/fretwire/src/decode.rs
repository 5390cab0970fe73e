//! SysEx frame decoder.
//!
//! Each frame updates a copy of the state; the processor emits from the
//! copy and swaps it in. Payload layout (framing bytes already stripped):
//! three header bytes, a type code at index 3, then type-specific data.

use crate::buttons::{on_button, Button, ButtonSet};
use crate::state::{GuitarState, STRING_COUNT};
use crate::timing::Timing;

/// Frame type codes at payload index 3.
pub mod frame {
    /// Fret position change. Data: string id, fretted MIDI note.
    pub const FRET: u8 = 0x01;
    /// String pluck. Data: string id, velocity.
    pub const PLUCK: u8 = 0x05;
    /// Button image. Data: face byte, system byte, motion byte.
    pub const BUTTONS: u8 = 0x08;
    /// Keepalive. No data, ignored.
    pub const KEEPALIVE: u8 = 0x09;
}

/// Map a frame's string id byte to a string index.
///
/// Ids are one-based on the wire; anything out of range wraps into
/// 0..6. Frames too short to carry an id address string 0.
#[inline]
fn string_index(payload: &[u8]) -> usize {
    if payload.len() >= 5 {
        (payload[4] as i32 - 1).rem_euclid(STRING_COUNT as i32) as usize
    } else {
        0
    }
}

/// Decode one frame against the current state.
///
/// Returns the updated state copy. `state.dirty` is set whenever the
/// frame may have scheduled note events; the caller runs the emitter on
/// dirty states and discards clean copies. The payload must be at least
/// 4 bytes (caller-checked).
pub fn decode_frame(
    timing: &Timing,
    mut state: GuitarState,
    sample: u32,
    payload: &[u8],
    hold: &mut i64,
) -> GuitarState {
    let debounce = timing.debounce_samples();
    match (payload[3], payload.len()) {
        (frame::KEEPALIVE, _) => {}
        (frame::FRET, 6..) => {
            let index = string_index(payload);
            let fret = payload[5] as i32 - state.strings[index].open_note as i32;
            let (damp_open, tap, hammer_on, pull_off) =
                (state.damp_open, state.tap, state.hammer_on, state.pull_off);
            let sustain = state.sustain;
            let string = &mut state.strings[index];

            if damp_open && string.fret > 0 && fret == 0 && string.age >= debounce {
                // Release to open damps the string.
                string.samples_left = 0;
            } else if tap && string.fret != fret {
                string.velocity = 127;
                let samples = timing.sustain_samples(sustain);
                string.samples_left = samples;
                string.samples_sustain = samples;
            }

            if !hammer_on && fret > string.fret {
                string.samples_left = 0;
            } else if !pull_off && fret < string.fret {
                string.samples_left = 0;
            }

            if string.fret != fret || string.age >= debounce {
                string.fret = fret;
                string.pending = Some(sample);
            }
            state.dirty = true;
        }
        (frame::PLUCK, 6..) => {
            let index = string_index(payload);
            let sustain = state.sustain;
            let string = &mut state.strings[index];
            string.velocity = payload[5].clamp(1, 127);
            if string.age >= debounce {
                string.pending = Some(sample);
                let samples = timing.pluck_samples(sustain, string.velocity);
                string.samples_left = samples;
                string.samples_sustain = samples;
            }
            state.dirty = true;
        }
        (frame::BUTTONS, 7..) => {
            let old = state.buttons;
            state.buttons = ButtonSet::from_payload(payload[4], payload[5], payload[6]);
            state.dirty = true;
            for button in Button::ALL {
                if state.buttons.is_pressed(button) != old.is_pressed(button) {
                    state = on_button(timing, state, button, sample, hold);
                }
            }
        }
        _ => {
            log::debug!("unhandled sysex frame: {:02x?}", payload);
        }
    }
    state
}
