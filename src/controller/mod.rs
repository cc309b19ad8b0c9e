//! Controller module - input dispatch and navigation logic
//!
//! - `input`: keyboard/mouse event routing
//! - `navigation`: catalogue fetches, drill-down, paging, search
//! - `playback`: global playback commands forwarded to the player
//! - `updates`: the channel-to-redraw bridge for async state changes

mod input;
mod navigation;
mod playback;
mod updates;

pub use updates::{Redraw, UpdateBridge};

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::{ItemCatalogue, Player, QueueControl};
use crate::config::{KeyBinds, PlayerConfig};
use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) catalogue: Arc<dyn ItemCatalogue>,
    pub(crate) queue: Arc<dyn QueueControl>,
    pub(crate) player: Arc<dyn Player>,
    pub(crate) keys: Arc<KeyBinds>,
    pub(crate) config: Arc<PlayerConfig>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        catalogue: Arc<dyn ItemCatalogue>,
        queue: Arc<dyn QueueControl>,
        player: Arc<dyn Player>,
        config: PlayerConfig,
    ) -> Self {
        Self {
            model,
            catalogue,
            queue,
            player,
            keys: Arc::new(KeyBinds::default()),
            config: Arc::new(config),
        }
    }

    /// Apply a completed navigation fetch, unless a newer navigation has
    /// superseded it. Returns whether the result was applied.
    pub(crate) async fn apply_if_current(
        &self,
        generation: u64,
        apply: impl FnOnce(&mut AppModel),
    ) -> bool {
        let mut model = self.model.lock().await;
        if !model.generation_current(generation) {
            tracing::debug!(generation, "stale navigation result discarded");
            return false;
        }
        apply(&mut model);
        true
    }
}
