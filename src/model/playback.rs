//! Player state snapshot types

use std::sync::{Arc, RwLock};

use super::items::Song;

pub const VOLUME_STEP: i16 = 5;
pub const SEEK_STEP_MS: i64 = 3000;

/// Player volume, clamped to `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    pub const MIN: Volume = Volume(0);
    pub const MAX: Volume = Volume(100);

    pub fn new(percent: u8) -> Self {
        Volume(percent.min(100))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn add(self, delta: i16) -> Self {
        let v = (self.0 as i16 + delta).clamp(0, 100);
        Volume(v as u8)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Volume(50)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
    Play,
    Pause,
    #[default]
    Stop,
}

/// The latest known player state. Always replaced wholesale, never mutated
/// in place, so a reader gets a consistent snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioStatus {
    pub song: Option<Song>,
    pub state: PlayState,
    pub position_ms: u64,
    pub volume: Volume,
}

impl AudioStatus {
    pub fn duration_ms(&self) -> u64 {
        self.song.as_ref().map(|s| s.duration_sec * 1000).unwrap_or(0)
    }
}

/// Shared handle to the latest [`AudioStatus`].
///
/// Both the update bridge (writer) and the draw path (reader) touch this,
/// so it sits behind a read/write lock held only for the swap or the clone,
/// never across drawing.
#[derive(Clone, Default)]
pub struct SharedStatus(Arc<RwLock<AudioStatus>>);

impl SharedStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, status: AudioStatus) {
        // Poisoning means a holder panicked; the latest state is still
        // the right thing to publish.
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        *guard = status;
    }

    pub fn load(&self) -> AudioStatus {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_clamps_at_bounds() {
        assert_eq!(Volume::new(130), Volume::MAX);
        assert_eq!(Volume::new(100).add(VOLUME_STEP), Volume::MAX);
        assert_eq!(Volume::new(3).add(-VOLUME_STEP), Volume::MIN);
        assert_eq!(Volume::new(50).add(VOLUME_STEP).percent(), 55);
    }

    #[test]
    fn shared_status_replaces_wholesale() {
        let shared = SharedStatus::new();
        for pos in [10u64, 12, 15] {
            shared.store(AudioStatus {
                position_ms: pos,
                state: PlayState::Play,
                ..Default::default()
            });
        }
        let status = shared.load();
        assert_eq!(status.position_ms, 15);
        assert_eq!(status.state, PlayState::Play);
    }
}
