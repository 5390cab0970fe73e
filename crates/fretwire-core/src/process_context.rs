//! Per-block processing context.
//!
//! [`ProcessContext`] bundles the sample rate with the length of the
//! current processing block. Incoming event offsets are bounded by
//! `num_samples`; the translator ages its state to the block end after
//! the last event.

/// Context for one processing block.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessContext {
    /// Sample rate in Hz (e.g., 44100.0, 48000.0, 96000.0).
    pub sample_rate: f64,
    /// Number of samples in this block.
    pub num_samples: usize,
}

impl ProcessContext {
    /// Create a new processing context.
    pub const fn new(sample_rate: f64, num_samples: usize) -> Self {
        Self {
            sample_rate,
            num_samples,
        }
    }

    /// The block length as a sample offset (one past the last valid offset).
    #[inline]
    pub fn block_end(&self) -> u32 {
        self.num_samples as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_end() {
        let context = ProcessContext::new(48000.0, 512);
        assert_eq!(context.block_end(), 512);
    }
}
