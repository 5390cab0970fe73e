//! MIDI event types for controller translators.
//!
//! This module provides format-agnostic MIDI event types designed for
//! real-time processing. Note events are `Copy` and can be passed without
//! heap allocation.
//!
//! ## SysEx Handling
//!
//! The [`MidiEventKind::SysEx`] variant uses `Box<SysEx>` to avoid stack
//! overflow from the large fixed SysEx buffer. As a result, [`MidiEvent`]
//! and [`MidiEventKind`] are `Clone` but not `Copy`.
//!
//! **Note:** Cloning a SysEx event allocates. Translators that only read
//! incoming SysEx payloads (the common case) never clone them.
//!
//! ## Buffer Sizes
//!
//! SysEx payload size can be configured via Cargo features:
//! - Default: 512 bytes
//! - `sysex-256`: 256 bytes (smaller memory footprint)
//! - `sysex-1024`: 1024 bytes

// =============================================================================
// Buffer Size Configuration
// =============================================================================

/// Maximum SysEx payload size in bytes.
///
/// Configurable via Cargo features: `sysex-256`, `sysex-1024`.
#[cfg(feature = "sysex-1024")]
pub const MAX_SYSEX_SIZE: usize = 1024;

/// Maximum SysEx payload size in bytes.
#[cfg(all(feature = "sysex-256", not(feature = "sysex-1024")))]
pub const MAX_SYSEX_SIZE: usize = 256;

/// Maximum SysEx payload size in bytes.
#[cfg(not(any(feature = "sysex-256", feature = "sysex-1024")))]
pub const MAX_SYSEX_SIZE: usize = 512;

// =============================================================================
// Basic MIDI Types
// =============================================================================

/// MIDI channel (1-16). Channel 0 is reserved for "unassigned".
pub type MidiChannel = u8;

/// MIDI note number (0-127, where 60 = middle C).
pub type MidiNote = u8;

/// A MIDI note-on event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOn {
    /// MIDI channel (1-16).
    pub channel: MidiChannel,
    /// Note number (0-127).
    pub pitch: MidiNote,
    /// Velocity (1-127).
    pub velocity: u8,
}

/// A MIDI note-off event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOff {
    /// MIDI channel (1-16).
    pub channel: MidiChannel,
    /// Note number (0-127).
    pub pitch: MidiNote,
    /// Release velocity (1-127).
    pub velocity: u8,
}

/// System Exclusive (SysEx) message.
///
/// Uses a fixed-size buffer for efficient storage. When used in
/// [`MidiEventKind`], it is boxed (`Box<SysEx>`) to prevent the large
/// buffer from bloating the enum size.
#[derive(Clone, Copy)]
pub struct SysEx {
    /// Raw SysEx data (excluding F0/F7 framing bytes).
    pub data: [u8; MAX_SYSEX_SIZE],
    /// Actual length of valid data in the buffer.
    pub len: u16,
}

impl SysEx {
    /// Create a new empty SysEx message.
    pub const fn new() -> Self {
        Self {
            data: [0u8; MAX_SYSEX_SIZE],
            len: 0,
        }
    }

    /// Get the valid data slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }
}

impl Default for SysEx {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for SysEx {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SysEx")
            .field("len", &self.len)
            .field("data", &self.as_slice())
            .finish()
    }
}

impl PartialEq for SysEx {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_slice() == other.as_slice()
    }
}

// =============================================================================
// MIDI Event Enum
// =============================================================================

/// MIDI event types.
///
/// Note variants are small and `Copy`-friendly. The `SysEx` variant uses
/// `Box<SysEx>` to avoid bloating the enum size.
#[derive(Debug, Clone, PartialEq)]
pub enum MidiEventKind {
    /// Note on event.
    NoteOn(NoteOn),
    /// Note off event.
    NoteOff(NoteOff),
    /// System Exclusive (SysEx) message.
    ///
    /// Boxed because the payload buffer is large. SysEx input is read in
    /// place; translators never need to clone it on the real-time path.
    SysEx(Box<SysEx>),
}

/// A sample-accurate MIDI event.
///
/// The `sample_offset` field specifies when within the current processing
/// block this event occurs, enabling sample-accurate timing.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiEvent {
    /// Sample offset within the current block (0 = start of block).
    pub sample_offset: u32,
    /// The MIDI event data.
    pub event: MidiEventKind,
}

impl Default for MidiEvent {
    /// Creates a default MidiEvent (NoteOff with all fields zeroed).
    ///
    /// Used for buffer initialization. Does not allocate.
    fn default() -> Self {
        Self {
            sample_offset: 0,
            event: MidiEventKind::NoteOff(NoteOff {
                channel: 0,
                pitch: 0,
                velocity: 0,
            }),
        }
    }
}

impl MidiEvent {
    /// Create a new note-on event.
    pub const fn note_on(
        sample_offset: u32,
        channel: MidiChannel,
        pitch: MidiNote,
        velocity: u8,
    ) -> Self {
        Self {
            sample_offset,
            event: MidiEventKind::NoteOn(NoteOn {
                channel,
                pitch,
                velocity,
            }),
        }
    }

    /// Create a new note-off event.
    pub const fn note_off(
        sample_offset: u32,
        channel: MidiChannel,
        pitch: MidiNote,
        velocity: u8,
    ) -> Self {
        Self {
            sample_offset,
            event: MidiEventKind::NoteOff(NoteOff {
                channel,
                pitch,
                velocity,
            }),
        }
    }

    /// Create a SysEx event.
    ///
    /// Data beyond [`MAX_SYSEX_SIZE`] is truncated. This allocates the
    /// SysEx payload on the heap; hosts build these outside the real-time
    /// path or accept the one-off allocation.
    pub fn sysex(sample_offset: u32, data: &[u8]) -> Self {
        let mut sysex = SysEx::new();
        let copy_len = data.len().min(MAX_SYSEX_SIZE);
        sysex.data[..copy_len].copy_from_slice(&data[..copy_len]);
        sysex.len = copy_len as u16;
        Self {
            sample_offset,
            event: MidiEventKind::SysEx(Box::new(sysex)),
        }
    }

    /// Create a new event with the same timing but different event data.
    pub fn with(self, kind: MidiEventKind) -> Self {
        MidiEvent {
            sample_offset: self.sample_offset,
            event: kind,
        }
    }
}

// =============================================================================
// MIDI Buffer
// =============================================================================

/// Maximum number of MIDI events per buffer.
/// This is a reasonable limit for real-time processing.
pub const MAX_MIDI_EVENTS: usize = 1024;

/// A buffer for collecting MIDI events during processing.
///
/// Uses a fixed-size array to avoid heap allocation during processing.
/// Events should be added in chronological order (by sample_offset).
#[derive(Debug)]
pub struct MidiBuffer {
    events: [MidiEvent; MAX_MIDI_EVENTS],
    len: usize,
    /// Set to true when a push fails due to buffer exhaustion
    overflowed: bool,
}

impl MidiBuffer {
    /// Create a new empty MIDI buffer.
    ///
    /// Uses `std::array::from_fn` with `MidiEvent::default()` since
    /// `MidiEvent` is not `Copy` (due to `Box<SysEx>`).
    pub fn new() -> Self {
        Self {
            events: std::array::from_fn(|_| MidiEvent::default()),
            len: 0,
            overflowed: false,
        }
    }

    /// Clear all events from the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Returns the number of events in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if any push failed since the last clear.
    #[inline]
    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Push an event to the buffer.
    ///
    /// Returns `true` if the event was added, `false` if the buffer is
    /// full. Sets the overflow flag when the buffer is exhausted.
    #[inline]
    pub fn push(&mut self, event: MidiEvent) -> bool {
        if self.len < MAX_MIDI_EVENTS {
            self.events[self.len] = event;
            self.len += 1;
            true
        } else {
            self.overflowed = true;
            false
        }
    }

    /// Restore chronological order after out-of-order pushes.
    ///
    /// Stable insertion sort by sample offset. Buffers are nearly sorted
    /// in practice, so this stays cheap and never allocates.
    pub fn sort_by_offset(&mut self) {
        for i in 1..self.len {
            let mut j = i;
            while j > 0 && self.events[j - 1].sample_offset > self.events[j].sample_offset {
                self.events.swap(j - 1, j);
                j -= 1;
            }
        }
    }

    /// Iterate over events in the buffer.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &MidiEvent> {
        self.events[..self.len].iter()
    }

    /// Get the events as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[MidiEvent] {
        &self.events[..self.len]
    }
}

impl Default for MidiBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iterate() {
        let mut buffer = MidiBuffer::new();
        assert!(buffer.is_empty());

        assert!(buffer.push(MidiEvent::note_on(0, 1, 64, 127)));
        assert!(buffer.push(MidiEvent::note_off(480, 1, 64, 127)));

        assert_eq!(buffer.len(), 2);
        let offsets: Vec<u32> = buffer.iter().map(|e| e.sample_offset).collect();
        assert_eq!(offsets, vec![0, 480]);
    }

    #[test]
    fn test_overflow_flag() {
        let mut buffer = MidiBuffer::new();
        for i in 0..MAX_MIDI_EVENTS {
            assert!(buffer.push(MidiEvent::note_on(i as u32, 1, 60, 100)));
        }
        assert!(!buffer.has_overflowed());
        assert!(!buffer.push(MidiEvent::note_on(0, 1, 60, 100)));
        assert!(buffer.has_overflowed());
        assert_eq!(buffer.len(), MAX_MIDI_EVENTS);

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(!buffer.has_overflowed());
    }

    #[test]
    fn test_sort_by_offset_is_stable() {
        let mut buffer = MidiBuffer::new();
        buffer.push(MidiEvent::note_on(100, 1, 60, 100));
        buffer.push(MidiEvent::note_off(50, 2, 55, 90));
        buffer.push(MidiEvent::note_on(50, 3, 50, 80));
        buffer.sort_by_offset();
        let offsets: Vec<u32> = buffer.iter().map(|e| e.sample_offset).collect();
        assert_eq!(offsets, vec![50, 50, 100]);
        // Equal offsets keep their push order.
        assert!(matches!(
            buffer.as_slice()[0].event,
            MidiEventKind::NoteOff(_)
        ));
        assert!(matches!(
            buffer.as_slice()[1].event,
            MidiEventKind::NoteOn(_)
        ));
    }

    #[test]
    fn test_sysex_truncation() {
        let data = vec![0xAB; MAX_SYSEX_SIZE + 16];
        let event = MidiEvent::sysex(10, &data);
        match event.event {
            MidiEventKind::SysEx(sysex) => {
                assert_eq!(sysex.len as usize, MAX_SYSEX_SIZE);
                assert!(sysex.as_slice().iter().all(|&b| b == 0xAB));
            }
            _ => panic!("expected SysEx"),
        }
    }

    #[test]
    fn test_with_preserves_offset() {
        let event = MidiEvent::note_on(123, 1, 60, 100);
        let replaced = event.with(MidiEventKind::NoteOff(NoteOff {
            channel: 1,
            pitch: 60,
            velocity: 100,
        }));
        assert_eq!(replaced.sample_offset, 123);
    }
}
