//! Time advancement between frames.
//!
//! The processor calls [`age_state`] before each decoded frame and once
//! more at the end of the block, so every string's age and countdown are
//! current at the moment a frame is interpreted. Expiring notes emit
//! their note-off at the exact sample the countdown reaches zero.

use fretwire_core::{MidiBuffer, MidiEvent};

use crate::buttons::Button;
use crate::state::GuitarState;
use crate::timing::{Timing, MIN_SUSTAIN};

/// Advance the state from `start` to `end` (half-open, block-relative).
///
/// Ages every string, decrements sounding countdowns, emits note-offs for
/// notes that expire in the interval, and runs the button auto-repeat for
/// held sustain buttons via the `hold` accumulator.
pub fn age_state(
    timing: &Timing,
    mut state: GuitarState,
    start: u32,
    end: u32,
    hold: &mut i64,
    output: &mut MidiBuffer,
) -> GuitarState {
    let elapsed = end.saturating_sub(start);

    for (index, string) in state.strings.iter_mut().enumerate() {
        string.age = string.age.saturating_add(elapsed);
        if string.samples_left == 0 {
            continue;
        }
        if string.samples_left <= elapsed {
            if let Some(note) = string.note {
                let channel = (index + 1) as u8;
                output.push(MidiEvent::note_off(
                    start + string.samples_left,
                    channel,
                    note,
                    string.velocity,
                ));
            }
            string.samples_left = 0;
        } else {
            string.samples_left -= elapsed;
        }
    }

    *hold += elapsed as i64;
    if *hold >= timing.button_repeat_samples() {
        if state.buttons.is_pressed(Button::Triangle) && state.sustain > MIN_SUSTAIN {
            state.drop_sustain();
        } else if state.buttons.is_pressed(Button::Cross) {
            state.bump_sustain();
        }
        *hold = 0;
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::SUSTAIN_INCREMENT;
    use fretwire_core::{MidiEventKind, NoteOff};

    fn timing() -> Timing {
        Timing::new(48000.0)
    }

    #[test]
    fn test_partial_decrement() {
        let mut state = GuitarState::default();
        state.strings[0].samples_left = 1000;
        state.strings[0].age = 5;
        let mut output = MidiBuffer::new();
        let mut hold = i64::MIN / 2;
        let state = age_state(&timing(), state, 0, 300, &mut hold, &mut output);
        assert_eq!(state.strings[0].samples_left, 700);
        assert_eq!(state.strings[0].age, 305);
        assert!(output.is_empty());
    }

    #[test]
    fn test_expiry_emits_note_off_at_exact_sample() {
        let mut state = GuitarState::default();
        state.strings[2].samples_left = 150;
        state.strings[2].note = Some(55);
        state.strings[2].velocity = 90;
        let mut output = MidiBuffer::new();
        let mut hold = i64::MIN / 2;
        let state = age_state(&timing(), state, 100, 400, &mut hold, &mut output);
        assert_eq!(state.strings[2].samples_left, 0);
        assert_eq!(output.len(), 1);
        let event = &output.as_slice()[0];
        assert_eq!(event.sample_offset, 250);
        assert_eq!(
            event.event,
            MidiEventKind::NoteOff(NoteOff {
                channel: 3,
                pitch: 55,
                velocity: 90,
            })
        );
    }

    #[test]
    fn test_expiry_without_note_is_silent() {
        let mut state = GuitarState::default();
        state.strings[0].samples_left = 10;
        let mut output = MidiBuffer::new();
        let mut hold = i64::MIN / 2;
        let state = age_state(&timing(), state, 0, 100, &mut hold, &mut output);
        assert_eq!(state.strings[0].samples_left, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_age_saturates() {
        let mut state = GuitarState::default();
        state.strings[0].age = u32::MAX - 10;
        let mut output = MidiBuffer::new();
        let mut hold = i64::MIN / 2;
        let state = age_state(&timing(), state, 0, 100, &mut hold, &mut output);
        assert_eq!(state.strings[0].age, u32::MAX);
    }

    #[test]
    fn test_held_cross_repeats_after_interval() {
        let mut state = GuitarState::default();
        state.buttons.set(Button::Cross, true);
        let base = state.sustain;
        let mut output = MidiBuffer::new();
        let mut hold = 0i64;
        let repeat = timing().button_repeat_samples() as u32;

        // One sample short of the interval: no repeat yet.
        let state = age_state(&timing(), state, 0, repeat - 1, &mut hold, &mut output);
        assert_eq!(state.sustain, base);

        // Crossing the interval fires one repeat and resets.
        let state = age_state(&timing(), state, 0, 1, &mut hold, &mut output);
        assert!((state.sustain - (base + SUSTAIN_INCREMENT)).abs() < 1e-9);
        assert_eq!(hold, 0);
    }

    #[test]
    fn test_held_triangle_stops_at_floor() {
        let mut state = GuitarState::default();
        state.buttons.set(Button::Triangle, true);
        state.sustain = MIN_SUSTAIN;
        let mut output = MidiBuffer::new();
        let mut hold = timing().button_repeat_samples();
        let state = age_state(&timing(), state, 0, 10, &mut hold, &mut output);
        assert_eq!(state.sustain, MIN_SUSTAIN);
    }
}
