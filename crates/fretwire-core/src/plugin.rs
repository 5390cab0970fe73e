//! Core plugin trait definitions.
//!
//! This module defines the two-phase translator lifecycle:
//!
//! - **[`Plugin`]** (unprepared state): Holds persistent state, created
//!   before audio configuration is known. Transforms into a processor via
//!   [`Plugin::prepare()`] when configuration arrives.
//!
//! - **[`EventProcessor`]** (prepared state): Ready for block processing
//!   with a real sample rate. Created by [`Plugin::prepare()`], can
//!   return to the unprepared state via [`EventProcessor::unprepare()`]
//!   for sample rate changes.
//!
//! This design eliminates placeholder values by making it impossible to
//! process events until proper configuration is available.

use crate::error::PluginResult;
use crate::midi::{MidiBuffer, MidiEvent};
use crate::process_context::ProcessContext;

// =============================================================================
// Processor Configuration Types
// =============================================================================

/// Marker trait for processor configuration types.
///
/// Plugins declare their configuration requirements via the associated
/// [`Plugin::Config`] type. The framework provides these standard configs:
///
/// - [`NoConfig`]: For translators with no sample-rate-dependent state
/// - [`AudioSetup`]: For translators that need sample rate and block size
pub trait ProcessorConfig: Clone + Send + 'static {}

/// Configuration for translators that don't need audio setup information.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoConfig;
impl ProcessorConfig for NoConfig {}

/// Standard audio setup configuration with sample rate and max block size.
///
/// Use this for translators with sample-rate-dependent state, such as
/// debounce windows or sustain countdowns measured in samples.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioSetup {
    /// Sample rate in Hz (e.g., 44100.0, 48000.0, 96000.0)
    pub sample_rate: f64,
    /// Maximum number of samples per process call
    pub max_buffer_size: usize,
}
impl ProcessorConfig for AudioSetup {}

// =============================================================================
// EventProcessor Trait
// =============================================================================

/// The prepared processor - ready for block processing.
///
/// An `EventProcessor` is created by calling [`Plugin::prepare()`] with
/// the audio configuration. Unlike a design where `setup()` is called
/// after construction, here the processor is created with valid
/// configuration from the start - no placeholder values.
///
/// # Lifecycle
///
/// ```text
/// Plugin::default() -> Plugin (unprepared, holds state)
///                      |
///                      v  Plugin::prepare(config)
///                      |
///                      v
///                EventProcessor (prepared, ready for blocks)
///                      |
///                      v  EventProcessor::unprepare()
///                      |
///                      v
///                 Plugin (unprepared, state preserved)
/// ```
///
/// # Thread Safety
///
/// Implementors must be `Send` because the processor may be moved between
/// threads. [`EventProcessor::process_events`] is called on the audio
/// thread and must be real-time safe:
/// - No allocations
/// - No locks (use lock-free structures)
/// - No syscalls
/// - No unbounded loops
pub trait EventProcessor: Send + 'static {
    /// The unprepared plugin type that created this processor.
    ///
    /// Used by [`EventProcessor::unprepare()`] to return to the
    /// unprepared state.
    type Plugin: Plugin<Processor = Self>;

    /// Process one block of incoming events.
    ///
    /// This is the main entry point, called on the audio thread once per
    /// block. Input events are sorted by `sample_offset` and bounded by
    /// `context.num_samples`. Output events must be pushed in
    /// chronological order.
    ///
    /// # Real-Time Safety
    ///
    /// This method must be real-time safe. Do not allocate, lock mutexes,
    /// or perform any operation with unbounded execution time.
    fn process_events(
        &mut self,
        input: &[MidiEvent],
        context: &ProcessContext,
        output: &mut MidiBuffer,
    );

    /// Return to the unprepared plugin state.
    ///
    /// This is used when the sample rate or block configuration changes.
    /// The processor is consumed and returns the original plugin with
    /// persistent state preserved. The wrapper can then call `prepare()`
    /// again with the new configuration.
    fn unprepare(self) -> Self::Plugin
    where
        Self: Sized;

    /// Called when the processor is activated or deactivated.
    ///
    /// Default implementation does nothing.
    fn set_active(&mut self, _active: bool) {}

    /// Get the tail length in samples.
    ///
    /// For an event translator this is the longest interval after the
    /// last input event during which output events may still be emitted
    /// (e.g., pending note-offs). Return 0 for no tail.
    ///
    /// Default returns 0 (no tail).
    fn tail_samples(&self) -> u32 {
        0
    }

    /// Save the processor state to bytes.
    ///
    /// This is called when the host saves a project or preset. The
    /// returned bytes should contain all state needed to restore the
    /// processor to its current configuration.
    ///
    /// Default returns an empty vector.
    fn save_state(&self) -> PluginResult<Vec<u8>> {
        Ok(Vec::new())
    }

    /// Load the processor state from bytes.
    ///
    /// This is called when the host loads a project or preset. The data
    /// is the same bytes returned from a previous `save_state` call. On
    /// error the current in-memory state must be left untouched.
    ///
    /// Default does nothing.
    fn load_state(&mut self, _data: &[u8]) -> PluginResult<()> {
        Ok(())
    }
}

// =============================================================================
// Plugin Trait
// =============================================================================

/// The unprepared plugin - holds persistent state before audio
/// configuration is known.
///
/// This is the primary trait that translator authors implement. It holds
/// state that doesn't depend on the sample rate and transforms into an
/// [`EventProcessor`] via [`Plugin::prepare()`] when audio configuration
/// becomes available.
pub trait Plugin: Default + Send + 'static {
    /// The configuration type this plugin needs to prepare.
    type Config: ProcessorConfig;

    /// The prepared processor type created by [`Plugin::prepare()`].
    type Processor: EventProcessor<Plugin = Self>;

    /// Transform this plugin into a prepared processor.
    ///
    /// This is called when audio configuration becomes available (in
    /// VST3, during `setupProcessing()`). The plugin is consumed and
    /// transformed into a processor with valid configuration - no
    /// placeholder values.
    fn prepare(self, config: Self::Config) -> Self::Processor;

    /// Returns whether this plugin processes MIDI events.
    ///
    /// This is used by the host wrapper to determine event bus
    /// configuration. Default returns `false`.
    fn wants_midi(&self) -> bool {
        false
    }
}
