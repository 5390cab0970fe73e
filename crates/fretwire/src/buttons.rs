//! Controller buttons.
//!
//! Button frames carry the full button image in three payload bytes.
//! [`ButtonSet::from_payload`] unpacks them; the decoder diffs the new
//! image against the previous one and calls [`on_button`] once per edge
//! (press or release).

use serde::{Deserialize, Serialize};

use crate::state::GuitarState;
use crate::timing::Timing;

/// One controller button.
///
/// The four directions are the D-pad, reported as an exclusive nibble:
/// at most one can be pressed at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Square,
    Cross,
    Circle,
    Triangle,
    Select,
    Start,
    Console,
    Shake,
    Down,
    Right,
    Up,
    Left,
}

impl Button {
    pub const COUNT: usize = 12;

    pub const ALL: [Button; Button::COUNT] = [
        Button::Square,
        Button::Cross,
        Button::Circle,
        Button::Triangle,
        Button::Select,
        Button::Start,
        Button::Console,
        Button::Shake,
        Button::Down,
        Button::Right,
        Button::Up,
        Button::Left,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Pressed/released image of every button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonSet([bool; Button::COUNT]);

impl ButtonSet {
    #[inline]
    pub fn is_pressed(&self, button: Button) -> bool {
        self.0[button.index()]
    }

    #[inline]
    pub fn set(&mut self, button: Button, pressed: bool) {
        self.0[button.index()] = pressed;
    }

    /// Unpack a button frame's three data bytes into a full image.
    ///
    /// Byte layout (bits not listed are ignored):
    /// - `face`: 0x01 Square, 0x02 Cross, 0x04 Circle, 0x08 Triangle
    /// - `system`: 0x01 Select, 0x02 Start, 0x10 Console
    /// - `motion`: 0x40 Shake; low nibble is the D-pad position
    ///   (0x0 Down, 0x2 Right, 0x4 Up, 0x6 Left, anything else released)
    pub fn from_payload(face: u8, system: u8, motion: u8) -> Self {
        let mut set = ButtonSet::default();
        set.set(Button::Square, face & 0x01 != 0);
        set.set(Button::Cross, face & 0x02 != 0);
        set.set(Button::Circle, face & 0x04 != 0);
        set.set(Button::Triangle, face & 0x08 != 0);
        set.set(Button::Select, system & 0x01 != 0);
        set.set(Button::Start, system & 0x02 != 0);
        set.set(Button::Console, system & 0x10 != 0);
        set.set(Button::Shake, motion & 0x40 != 0);
        let dpad = motion & 0x0F;
        set.set(Button::Down, dpad == 0x0);
        set.set(Button::Right, dpad == 0x2);
        set.set(Button::Up, dpad == 0x4);
        set.set(Button::Left, dpad == 0x6);
        set
    }
}

/// Apply one button edge to the state.
///
/// `state.buttons` already holds the new image; `button` is the one that
/// changed. Every press re-seeds the hold accumulator so the repeat
/// engine waits a full lead-in before auto-repeating. Detune changes mark
/// all sounding strings pending so they are re-emitted at the new pitch.
pub fn on_button(
    timing: &Timing,
    mut state: GuitarState,
    button: Button,
    sample: u32,
    hold: &mut i64,
) -> GuitarState {
    let pressed = state.buttons.is_pressed(button);
    if pressed {
        *hold = -timing.hold_lead_in_samples();
    }

    let old_detune = state.detune;
    match button {
        Button::Cross => {
            if pressed {
                state.bump_sustain();
            }
        }
        Button::Triangle => {
            if pressed {
                state.drop_sustain();
            }
        }
        Button::Select => {
            if pressed {
                state.detune = 0;
            }
        }
        Button::Console => {
            // Panic: silence everything and schedule the note-offs.
            if pressed {
                for string in state.strings.iter_mut() {
                    string.samples_left = 0;
                    string.pending = Some(sample);
                }
            }
            state.dirty = true;
        }
        Button::Down => {
            if pressed {
                state.detune -= 1;
            }
        }
        Button::Up => {
            if pressed {
                state.detune += 1;
            }
        }
        Button::Right => {
            if pressed {
                state.detune += 12;
            }
        }
        Button::Left => {
            if pressed {
                state.detune -= 12;
            }
        }
        Button::Square | Button::Circle | Button::Start | Button::Shake => {}
    }

    if state.detune != old_detune {
        // Sounding strings must be retuned in place.
        for string in state.strings.iter_mut() {
            if string.samples_left > 0 {
                string.pending = Some(sample);
            }
        }
    }

    state
}
