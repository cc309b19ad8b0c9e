//! Bridge between collaborator event channels and the draw loop.
//!
//! Player status, queue and history updates arrive on channels owned by
//! the collaborators. The bridge folds each into the model (or the
//! shared status slot) and emits a redraw request; the shell drains all
//! pending requests before drawing a frame, so bursts coalesce into one
//! draw. The bridge itself never draws and never blocks the UI thread.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::model::{AppModel, AudioStatus, SharedStatus, Song};

use std::sync::Arc;

/// A request to redraw, tagged with what changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    Status,
    Queue,
    History,
}

pub struct UpdateBridge {
    model: Arc<Mutex<AppModel>>,
    status: SharedStatus,
    status_rx: UnboundedReceiver<AudioStatus>,
    queue_rx: UnboundedReceiver<Vec<Song>>,
    history_rx: UnboundedReceiver<Vec<Song>>,
    redraw_tx: UnboundedSender<Redraw>,
    shutdown: watch::Receiver<bool>,
}

impl UpdateBridge {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        status: SharedStatus,
        status_rx: UnboundedReceiver<AudioStatus>,
        queue_rx: UnboundedReceiver<Vec<Song>>,
        history_rx: UnboundedReceiver<Vec<Song>>,
        redraw_tx: UnboundedSender<Redraw>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            model,
            status,
            status_rx,
            queue_rx,
            history_rx,
            redraw_tx,
            shutdown,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                // Shutdown wins over pending updates; sender loss counts
                // as shutdown too.
                _ = self.shutdown.changed() => break,
                Some(status) = self.status_rx.recv() => {
                    self.status.store(status);
                    let _ = self.redraw_tx.send(Redraw::Status);
                }
                Some(songs) = self.queue_rx.recv() => {
                    let mut model = self.model.lock().await;
                    // The cursor stays put when the queue mutates underneath it.
                    model.screens.queue.list.set_items_keep_selection(songs);
                    drop(model);
                    let _ = self.redraw_tx.send(Redraw::Queue);
                }
                Some(songs) = self.history_rx.recv() => {
                    let mut model = self.model.lock().await;
                    model.screens.history.list.set_items(songs);
                    drop(model);
                    let _ = self.redraw_tx.send(Redraw::History);
                }
                else => break,
            }
        }
        debug!("update bridge stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayState;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Harness {
        model: Arc<Mutex<AppModel>>,
        status: SharedStatus,
        status_tx: mpsc::UnboundedSender<AudioStatus>,
        queue_tx: mpsc::UnboundedSender<Vec<Song>>,
        history_tx: mpsc::UnboundedSender<Vec<Song>>,
        redraw_rx: mpsc::UnboundedReceiver<Redraw>,
        shutdown_tx: watch::Sender<bool>,
        handle: JoinHandle<()>,
    }

    fn start_bridge() -> Harness {
        let model = Arc::new(Mutex::new(AppModel::new()));
        let status = SharedStatus::new();
        let (status_tx, status_rx) = mpsc::unbounded_channel();
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (history_tx, history_rx) = mpsc::unbounded_channel();
        let (redraw_tx, redraw_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let bridge = UpdateBridge::new(
            model.clone(),
            status.clone(),
            status_rx,
            queue_rx,
            history_rx,
            redraw_tx,
            shutdown_rx,
        );
        Harness {
            model,
            status,
            status_tx,
            queue_tx,
            history_tx,
            redraw_rx,
            shutdown_tx,
            handle: bridge.spawn(),
        }
    }

    fn song(id: &str) -> Song {
        Song {
            id: id.into(),
            name: id.to_uppercase(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn rapid_status_updates_settle_on_the_last_one() {
        let mut h = start_bridge();
        for pos in [10u64, 12, 15] {
            h.status_tx
                .send(AudioStatus {
                    position_ms: pos,
                    state: PlayState::Play,
                    ..Default::default()
                })
                .unwrap();
        }
        // One redraw request per update; the shell drains them into a
        // single frame. Wait for the last to come through.
        for _ in 0..3 {
            let redraw = tokio::time::timeout(Duration::from_secs(1), h.redraw_rx.recv())
                .await
                .expect("redraw within deadline");
            assert_eq!(redraw, Some(Redraw::Status));
        }
        assert_eq!(h.status.load().position_ms, 15);

        h.shutdown_tx.send(true).unwrap();
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn queue_updates_keep_the_cursor_in_place() {
        let mut h = start_bridge();
        {
            let mut model = h.model.lock().await;
            model
                .screens
                .queue
                .list
                .set_items(vec![song("a"), song("b"), song("c")]);
            model.screens.queue.list.select(2);
        }
        h.queue_tx.send(vec![song("b"), song("c")]).unwrap();
        let redraw = tokio::time::timeout(Duration::from_secs(1), h.redraw_rx.recv())
            .await
            .expect("redraw within deadline");
        assert_eq!(redraw, Some(Redraw::Queue));

        let model = h.model.lock().await;
        assert_eq!(model.screens.queue.list.len(), 2);
        assert_eq!(model.screens.queue.list.selected(), 1); // clamped, not reset

        drop(model);
        h.shutdown_tx.send(true).unwrap();
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn history_updates_reset_to_the_top() {
        let mut h = start_bridge();
        h.history_tx.send(vec![song("x"), song("y")]).unwrap();
        let redraw = tokio::time::timeout(Duration::from_secs(1), h.redraw_rx.recv())
            .await
            .expect("redraw within deadline");
        assert_eq!(redraw, Some(Redraw::History));
        let model = h.model.lock().await;
        assert_eq!(model.screens.history.list.len(), 2);
        assert_eq!(model.screens.history.list.selected(), 0);

        drop(model);
        h.shutdown_tx.send(true).unwrap();
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_is_prompt_when_idle() {
        let h = start_bridge();
        h.shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), h.handle)
            .await
            .expect("bridge exits promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn dropping_all_senders_stops_the_bridge() {
        let h = start_bridge();
        drop(h.status_tx);
        drop(h.queue_tx);
        drop(h.history_tx);
        drop(h.shutdown_tx); // watch sender loss also ends the loop
        tokio::time::timeout(Duration::from_secs(1), h.handle)
            .await
            .expect("bridge exits when channels close")
            .unwrap();
    }
}
