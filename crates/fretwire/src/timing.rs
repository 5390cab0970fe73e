//! Sample-rate-dependent timing.
//!
//! All thresholds of the translator are specified in seconds and converted
//! to sample counts once the sample rate is known. [`Timing`] is created in
//! `prepare()` and owned by the processor; nothing in this module changes
//! during block processing.

/// Sustain change per button repeat, in seconds.
pub const SUSTAIN_INCREMENT: f64 = 0.1;

/// Shortest allowed sustain, in seconds.
pub const MIN_SUSTAIN: f64 = 0.01;

/// Longest allowed sustain, in seconds.
pub const MAX_SUSTAIN: f64 = 10.0;

/// Debounce window for fret and pluck frames, in seconds.
pub const DEBOUNCE: f64 = 0.05;

/// Interval between repeats of a held sustain button, in seconds.
pub const BUTTON_REPEAT: f64 = 0.05;

/// Extra delay before the first repeat of a held button, in seconds.
///
/// A fresh press seeds the hold accumulator with the negative of this
/// value, so the first repeat arrives after lead-in + repeat interval.
pub const BUTTON_HOLD_LEAD_IN: f64 = 0.1;

/// Timing conversions for one prepared sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    sample_rate: f64,
}

impl Timing {
    pub fn new(sample_rate: f64) -> Self {
        Self { sample_rate }
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Minimum age before a fret or pluck frame is acted on.
    #[inline]
    pub fn debounce_samples(&self) -> u32 {
        (DEBOUNCE * self.sample_rate) as u32
    }

    /// Samples between sustain adjustments while a button is held.
    #[inline]
    pub fn button_repeat_samples(&self) -> i64 {
        (BUTTON_REPEAT * self.sample_rate) as i64
    }

    /// Hold accumulator seed magnitude for a fresh button press.
    #[inline]
    pub fn hold_lead_in_samples(&self) -> i64 {
        (BUTTON_HOLD_LEAD_IN * self.sample_rate) as i64
    }

    /// Sustain countdown for a tap-triggered note (full velocity).
    #[inline]
    pub fn sustain_samples(&self, sustain_secs: f64) -> u32 {
        (sustain_secs * self.sample_rate) as u32
    }

    /// Sustain countdown for a plucked note.
    ///
    /// Softer plucks ring longer: the base sustain is scaled by
    /// 127/velocity, with the truncation-then-divide order preserved from
    /// the controller's reference behavior. `velocity` must be nonzero.
    #[inline]
    pub fn pluck_samples(&self, sustain_secs: f64, velocity: u8) -> u32 {
        ((sustain_secs * self.sample_rate * 127.0) as u32) / velocity as u32
    }

    /// Longest possible note countdown at this sample rate.
    #[inline]
    pub fn max_tail_samples(&self) -> u32 {
        self.pluck_samples(MAX_SUSTAIN, 1)
    }
}

/// Clamp a sustain value into the legal range.
#[inline]
pub fn clamp_sustain(sustain_secs: f64) -> f64 {
    sustain_secs.clamp(MIN_SUSTAIN, MAX_SUSTAIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_at_48k() {
        let timing = Timing::new(48000.0);
        assert_eq!(timing.debounce_samples(), 2400);
        assert_eq!(timing.button_repeat_samples(), 2400);
        assert_eq!(timing.hold_lead_in_samples(), 4800);
        assert_eq!(timing.sustain_samples(1.0), 48000);
    }

    #[test]
    fn test_pluck_scales_inversely_with_velocity() {
        let timing = Timing::new(48000.0);
        // Full velocity plays the nominal sustain.
        assert_eq!(timing.pluck_samples(1.0, 127), 48000);
        // Half velocity roughly doubles it (integer division).
        assert_eq!(timing.pluck_samples(1.0, 64), 48000 * 127 / 64);
    }

    #[test]
    fn test_clamp_sustain() {
        assert_eq!(clamp_sustain(0.0), MIN_SUSTAIN);
        assert_eq!(clamp_sustain(11.0), MAX_SUSTAIN);
        assert_eq!(clamp_sustain(1.5), 1.5);
    }
}
