//! Capability contracts for the external collaborators the UI consumes:
//! the server item catalogue, the play queue and the audio player.
//!
//! Implementations run their work off the UI thread; the controller only
//! ever calls these from spawned tasks. Asynchronous state changes
//! (player status, queue/history mutations) are delivered over channels
//! consumed by the update bridge.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::model::{
    Album, Artist, AudioStatus, IdName, ItemKind, Paging, Playlist, SearchItem, ServerStats, Song,
    Volume,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCatalogue: Send + Sync {
    async fn artists(&self, paging: Paging) -> Result<(Vec<Artist>, usize)>;
    async fn albums(&self, paging: Paging) -> Result<(Vec<Album>, usize)>;
    async fn songs(&self, paging: Paging) -> Result<(Vec<Song>, usize)>;
    async fn genres(&self, paging: Paging) -> Result<(Vec<IdName>, usize)>;
    async fn playlists(&self) -> Result<Vec<Playlist>>;

    async fn artist_albums(&self, id: &str) -> Result<Vec<Album>>;
    async fn album_songs(&self, id: &str) -> Result<Vec<Song>>;
    async fn playlist_songs(&self, id: &str) -> Result<Vec<Song>>;
    async fn genre_albums(&self, genre: &str) -> Result<Vec<Album>>;

    async fn similar_artists(&self, id: &str) -> Result<Vec<Artist>>;
    async fn similar_albums(&self, id: &str) -> Result<Vec<Album>>;

    async fn latest_albums(&self) -> Result<Vec<Album>>;
    async fn favorite_artists(&self) -> Result<Vec<Artist>>;
    async fn favorite_albums(&self, paging: Paging) -> Result<(Vec<Album>, usize)>;
    async fn recently_played(&self, paging: Paging) -> Result<(Vec<Song>, usize)>;

    async fn search(&self, kind: ItemKind, query: &str) -> Result<Vec<SearchItem>>;

    /// Build a playable mix seeded from the given item.
    async fn instant_mix(&self, id: &str) -> Result<Vec<Song>>;

    async fn server_stats(&self) -> Result<ServerStats>;

    /// Web address of an item on the server, for opening in a browser.
    fn item_url(&self, id: &str) -> String;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueControl: Send + Sync {
    async fn add_songs(&self, songs: Vec<Song>) -> Result<()>;
    async fn clear_queue(&self, stop_playback: bool) -> Result<()>;
    async fn history(&self, limit: usize) -> Result<Vec<Song>>;

    /// Full queue contents after each mutation. Fires on an arbitrary
    /// thread; consumed by the update bridge.
    fn queue_events(&self) -> UnboundedReceiver<Vec<Song>>;
    /// Play-history updates, same delivery contract as `queue_events`.
    fn history_events(&self) -> UnboundedReceiver<Vec<Song>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Player: Send + Sync {
    async fn play_pause(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
    async fn next(&self) -> Result<()>;
    async fn previous(&self) -> Result<()>;
    async fn seek(&self, delta_ms: i64) -> Result<()>;
    async fn set_volume(&self, volume: Volume) -> Result<()>;

    /// Player status ticks. Fires on an arbitrary thread; consumed by the
    /// update bridge.
    fn status_events(&self) -> UnboundedReceiver<AudioStatus>;
}
