//! Global playback commands.
//!
//! These are bound to keys that work in every UI state, including while a
//! modal or the search input is active, so they are checked before any
//! other key handling. Player calls are fire-and-forget: failures are
//! logged, the UI state does not change until the player reports back
//! over its status channel.

use crossterm::event::KeyCode;
use tracing::error;

use crate::model::{SEEK_STEP_MS, VOLUME_STEP};

use super::AppController;

impl AppController {
    /// Handle a global playback key. Returns true if the key was consumed.
    pub(crate) async fn handle_playback_key(&self, code: KeyCode) -> bool {
        let keys = &self.keys;
        if code == keys.play_pause {
            self.play_pause();
        } else if code == keys.stop {
            self.stop();
        } else if code == keys.previous {
            self.previous();
        } else if code == keys.next {
            self.next();
        } else if code == keys.seek_backward {
            self.seek(-SEEK_STEP_MS);
        } else if code == keys.seek_forward {
            self.seek(SEEK_STEP_MS);
        } else if code == keys.volume_down {
            self.volume_step(-VOLUME_STEP).await;
        } else if code == keys.volume_up {
            self.volume_step(VOLUME_STEP).await;
        } else {
            return false;
        }
        true
    }

    pub(crate) fn play_pause(&self) {
        let player = self.player.clone();
        tokio::spawn(async move {
            if let Err(err) = player.play_pause().await {
                error!(%err, "play/pause failed");
            }
        });
    }

    pub(crate) fn stop(&self) {
        let player = self.player.clone();
        tokio::spawn(async move {
            if let Err(err) = player.stop().await {
                error!(%err, "stop failed");
            }
        });
    }

    pub(crate) fn previous(&self) {
        let player = self.player.clone();
        tokio::spawn(async move {
            if let Err(err) = player.previous().await {
                error!(%err, "previous track failed");
            }
        });
    }

    pub(crate) fn next(&self) {
        let player = self.player.clone();
        tokio::spawn(async move {
            if let Err(err) = player.next().await {
                error!(%err, "next track failed");
            }
        });
    }

    pub(crate) fn seek(&self, delta_ms: i64) {
        let player = self.player.clone();
        tokio::spawn(async move {
            if let Err(err) = player.seek(delta_ms).await {
                error!(%err, delta_ms, "seek failed");
            }
        });
    }

    /// Step the volume relative to the latest known player state.
    pub(crate) async fn volume_step(&self, delta: i16) {
        let volume = {
            let model = self.model.lock().await;
            model.status.load().volume
        };
        let target = volume.add(delta);
        if target == volume {
            return;
        }
        let player = self.player.clone();
        tokio::spawn(async move {
            if let Err(err) = player.set_volume(target).await {
                error!(%err, volume = target.percent(), "volume change failed");
            }
        });
    }
}
