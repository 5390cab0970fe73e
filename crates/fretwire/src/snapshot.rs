//! Versioned state snapshots.
//!
//! Host save/load moves the whole [`GuitarState`] through a small
//! versioned JSON document instead of a raw memory image, so snapshots
//! survive layout changes and malformed data is rejected cleanly.

use fretwire_core::{PluginError, PluginResult};
use serde::{Deserialize, Serialize};

use crate::state::GuitarState;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    state: GuitarState,
}

/// Serialize the state for host storage.
pub fn save(state: &GuitarState) -> PluginResult<Vec<u8>> {
    serde_json::to_vec(&Snapshot {
        version: SNAPSHOT_VERSION,
        state: *state,
    })
    .map_err(|err| PluginError::StateError(err.to_string()))
}

/// Deserialize a previously saved state.
///
/// Malformed data or an unknown version is an error; callers must leave
/// their live state untouched when this fails.
pub fn load(data: &[u8]) -> PluginResult<GuitarState> {
    let snapshot: Snapshot =
        serde_json::from_slice(data).map_err(|err| PluginError::StateError(err.to_string()))?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(PluginError::StateError(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }
    Ok(snapshot.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::Button;

    #[test]
    fn test_round_trip() {
        let mut state = GuitarState::default();
        state.detune = -12;
        state.sustain = 2.3;
        state.tap = true;
        state.buttons.set(Button::Shake, true);
        state.strings[4].fret = 7;
        state.strings[4].note = Some(52);
        state.strings[4].samples_left = 31_000;

        let bytes = save(&state).unwrap();
        let restored = load(&bytes).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(load(b"not a snapshot").is_err());
        assert!(load(b"").is_err());
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut bytes = save(&GuitarState::default()).unwrap();
        let text = String::from_utf8(std::mem::take(&mut bytes)).unwrap();
        let bumped = text.replacen("\"version\":1", "\"version\":999", 1);
        let err = load(bumped.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("version"));
    }
}
