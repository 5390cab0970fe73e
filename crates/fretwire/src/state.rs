//! Translator state.
//!
//! All state is plain `Copy` data. The decoder takes the current state by
//! value, returns an updated copy, and the processor swaps it in after
//! emission. Nothing here touches the heap, so copies are safe on the
//! audio thread and snapshots of the whole aggregate are trivial.

use serde::{Deserialize, Serialize};

use crate::buttons::ButtonSet;
use crate::timing::{MAX_SUSTAIN, MIN_SUSTAIN, SUSTAIN_INCREMENT};

/// Number of strings on the controller.
pub const STRING_COUNT: usize = 6;

/// Open-string MIDI notes, high E first: E4 B3 G3 D3 A2 E2.
pub const OPEN_TUNING: [u8; STRING_COUNT] = [0x40, 0x3B, 0x37, 0x32, 0x2D, 0x28];

/// Per-string tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StringState {
    /// MIDI note of the open string.
    pub open_note: u8,
    /// Current fret. Signed: raw fret bytes below the open note produce
    /// a transiently negative value until the next frame corrects it.
    pub fret: i32,
    /// Velocity of the most recent pluck (1-127).
    pub velocity: u8,
    /// Samples until the sounding note expires. Zero means silent.
    pub samples_left: u32,
    /// Countdown length the current note started from.
    pub samples_sustain: u32,
    /// Samples since this string last triggered a note. Saturating.
    pub age: u32,
    /// MIDI note currently (or last) sounding on this string.
    pub note: Option<u8>,
    /// Sample offset at which a note event should be emitted, if any.
    pub pending: Option<u32>,
}

impl StringState {
    pub fn new(open_note: u8) -> Self {
        Self {
            open_note,
            fret: 0,
            velocity: 0,
            samples_left: 0,
            samples_sustain: 0,
            age: 0,
            note: None,
            pending: None,
        }
    }

    /// Whether the string currently has a sounding note.
    #[inline]
    pub fn is_sounding(&self) -> bool {
        self.samples_left > 0
    }
}

/// Full translator state: six strings plus global playing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuitarState {
    pub strings: [StringState; STRING_COUNT],
    /// Last received button image.
    pub buttons: ButtonSet,
    /// Semitone offset applied to every emitted note.
    pub detune: i32,
    /// Base sustain in seconds, [`MIN_SUSTAIN`]..=[`MAX_SUSTAIN`].
    pub sustain: f64,
    /// Fretting a higher fret on a sounding string triggers a new note.
    pub hammer_on: bool,
    /// Fretting a lower fret on a sounding string triggers a new note.
    pub pull_off: bool,
    /// Releasing to the open fret damps the string instead of sounding it.
    pub damp_open: bool,
    /// Fret changes alone trigger notes at full velocity, without a pluck.
    pub tap: bool,
    /// Set by the decoder when the frame may have scheduled note events.
    pub dirty: bool,
}

impl Default for GuitarState {
    fn default() -> Self {
        let mut strings = [StringState::new(0); STRING_COUNT];
        for (string, &note) in strings.iter_mut().zip(OPEN_TUNING.iter()) {
            string.open_note = note;
        }
        Self {
            strings,
            buttons: ButtonSet::default(),
            detune: 0,
            sustain: 1.0,
            hammer_on: true,
            pull_off: true,
            damp_open: true,
            tap: false,
            dirty: false,
        }
    }
}

impl GuitarState {
    /// Increase sustain by one step, capped at [`MAX_SUSTAIN`].
    ///
    /// A sustain resting at the floor snaps back onto the step grid
    /// before the increment.
    pub fn bump_sustain(&mut self) {
        if self.sustain <= MIN_SUSTAIN {
            self.sustain = 0.0;
        }
        self.sustain = (self.sustain + SUSTAIN_INCREMENT).min(MAX_SUSTAIN);
    }

    /// Decrease sustain by one step, floored at [`MIN_SUSTAIN`].
    pub fn drop_sustain(&mut self) {
        if self.sustain > MIN_SUSTAIN {
            self.sustain = (self.sustain - SUSTAIN_INCREMENT).max(MIN_SUSTAIN);
        }
    }
}
