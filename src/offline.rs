//! In-memory collaborators: a generated sample library plus a simulated
//! playback engine. They let the full UI run without a server while a
//! real backend speaks the same traits.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::api::{ItemCatalogue, Player, QueueControl};
use crate::model::{
    Album, Artist, AudioStatus, IdName, ItemKind, Paging, PlayState, Playlist, SearchItem,
    ServerStats, Song, Volume,
};

const TICK_MS: u64 = 500;

const ARTIST_NAMES: [&str; 12] = [
    "Aurora Drift", "Basement Waves", "Cedar & Pine", "Delta Meridian", "Echo Garden",
    "Fennel Court", "Glass Harbor", "Hollow Lantern", "Iron Orchard", "Juniper Line",
    "Kestrel Sky", "Low Tide Choir",
];

const GENRE_NAMES: [&str; 4] = ["Ambient", "Folk", "Electronic", "Jazz"];

pub struct OfflineLibrary {
    artists: Vec<Artist>,
    albums: Vec<Album>,
    songs: Vec<Song>,
    playlists: Vec<Playlist>,
    genres: Vec<IdName>,
    base_url: String,
}

impl OfflineLibrary {
    pub fn with_sample_data() -> Self {
        let mut artists = Vec::new();
        let mut albums = Vec::new();
        let mut songs = Vec::new();

        for (ai, name) in ARTIST_NAMES.iter().enumerate() {
            let artist_id = format!("ar{ai}");
            let album_count = 2 + ai % 3;
            let mut artist_duration = 0u64;
            for bi in 0..album_count {
                let album_id = format!("al{ai}-{bi}");
                let song_count = 6 + (ai + bi) % 5;
                let mut album_duration = 0u64;
                for si in 0..song_count {
                    let duration = 150 + ((ai * 7 + bi * 13 + si * 29) % 180) as u64;
                    album_duration += duration;
                    songs.push(Song {
                        id: format!("s{ai}-{bi}-{si}"),
                        name: format!("Track {} of {}", si + 1, name),
                        artist: name.to_string(),
                        album: format!("{} Vol. {}", name, bi + 1),
                        album_id: album_id.clone(),
                        track: si as u32 + 1,
                        duration_sec: duration,
                        last_played: (si % 3 == 0)
                            .then(|| Utc::now() - ChronoDuration::hours((ai * 5 + si) as i64)),
                    });
                }
                artist_duration += album_duration;
                albums.push(Album {
                    id: album_id,
                    name: format!("{} Vol. {}", name, bi + 1),
                    artist: name.to_string(),
                    artist_id: artist_id.clone(),
                    year: 2010 + (ai + bi * 3) as u16 % 15,
                    song_count,
                    duration_sec: album_duration,
                    favorite: (ai + bi) % 5 == 0,
                });
            }
            artists.push(Artist {
                id: artist_id,
                name: name.to_string(),
                album_count,
                total_duration_sec: artist_duration,
                favorite: ai % 4 == 0,
            });
        }

        let playlists = (0..4)
            .map(|i| {
                let member_songs: Vec<&Song> = songs.iter().skip(i).step_by(7).collect();
                Playlist {
                    id: format!("pl{i}"),
                    name: format!("Mixtape {}", i + 1),
                    song_count: member_songs.len(),
                    duration_sec: member_songs.iter().map(|s| s.duration_sec).sum(),
                }
            })
            .collect();

        let genres = GENRE_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| IdName {
                id: format!("g{i}"),
                name: name.to_string(),
            })
            .collect();

        Self {
            artists,
            albums,
            songs,
            playlists,
            genres,
            base_url: "http://localhost:8096".to_string(),
        }
    }

    fn genre_index(&self, album: &Album) -> usize {
        album.id.len() % self.genres.len()
    }
}

fn page_of<T: Clone>(items: &[T], paging: Paging) -> (Vec<T>, usize) {
    let start = paging.offset().min(items.len());
    let end = (start + paging.page_size()).min(items.len());
    (items[start..end].to_vec(), items.len())
}

fn matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

#[async_trait]
impl ItemCatalogue for OfflineLibrary {
    async fn artists(&self, paging: Paging) -> Result<(Vec<Artist>, usize)> {
        Ok(page_of(&self.artists, paging))
    }

    async fn albums(&self, paging: Paging) -> Result<(Vec<Album>, usize)> {
        Ok(page_of(&self.albums, paging))
    }

    async fn songs(&self, paging: Paging) -> Result<(Vec<Song>, usize)> {
        Ok(page_of(&self.songs, paging))
    }

    async fn genres(&self, paging: Paging) -> Result<(Vec<IdName>, usize)> {
        Ok(page_of(&self.genres, paging))
    }

    async fn playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.playlists.clone())
    }

    async fn artist_albums(&self, id: &str) -> Result<Vec<Album>> {
        Ok(self
            .albums
            .iter()
            .filter(|a| a.artist_id == id)
            .cloned()
            .collect())
    }

    async fn album_songs(&self, id: &str) -> Result<Vec<Song>> {
        Ok(self
            .songs
            .iter()
            .filter(|s| s.album_id == id)
            .cloned()
            .collect())
    }

    async fn playlist_songs(&self, id: &str) -> Result<Vec<Song>> {
        let index: usize = id.trim_start_matches("pl").parse().unwrap_or(0);
        Ok(self.songs.iter().skip(index).step_by(7).cloned().collect())
    }

    async fn genre_albums(&self, genre: &str) -> Result<Vec<Album>> {
        let index = self.genres.iter().position(|g| g.id == genre).unwrap_or(0);
        Ok(self
            .albums
            .iter()
            .filter(|a| self.genre_index(a) == index)
            .cloned()
            .collect())
    }

    async fn similar_artists(&self, id: &str) -> Result<Vec<Artist>> {
        // Same-bucket neighbours stand in for real similarity data.
        let Some(seed) = self.artists.iter().position(|a| a.id == id) else {
            return Ok(Vec::new());
        };
        Ok(self
            .artists
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != seed && i % 3 == seed % 3)
            .map(|(_, a)| a.clone())
            .collect())
    }

    async fn similar_albums(&self, id: &str) -> Result<Vec<Album>> {
        let Some(seed) = self.albums.iter().find(|a| a.id == id) else {
            return Ok(Vec::new());
        };
        let genre = self.genre_index(seed);
        Ok(self
            .albums
            .iter()
            .filter(|a| a.id != id && self.genre_index(a) == genre)
            .cloned()
            .collect())
    }

    async fn latest_albums(&self) -> Result<Vec<Album>> {
        let mut latest = self.albums.clone();
        latest.sort_by(|a, b| b.year.cmp(&a.year));
        latest.truncate(20);
        Ok(latest)
    }

    async fn favorite_artists(&self) -> Result<Vec<Artist>> {
        Ok(self.artists.iter().filter(|a| a.favorite).cloned().collect())
    }

    async fn favorite_albums(&self, paging: Paging) -> Result<(Vec<Album>, usize)> {
        let favorites: Vec<Album> = self.albums.iter().filter(|a| a.favorite).cloned().collect();
        Ok(page_of(&favorites, paging))
    }

    async fn recently_played(&self, paging: Paging) -> Result<(Vec<Song>, usize)> {
        let mut recent: Vec<Song> = self
            .songs
            .iter()
            .filter(|s| s.last_played.is_some())
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.last_played.cmp(&a.last_played));
        Ok(page_of(&recent, paging))
    }

    async fn search(&self, kind: ItemKind, query: &str) -> Result<Vec<SearchItem>> {
        let hits = match kind {
            ItemKind::Artist => self
                .artists
                .iter()
                .filter(|a| matches(&a.name, query))
                .map(|a| SearchItem::Artist(a.clone()))
                .collect(),
            ItemKind::Album => self
                .albums
                .iter()
                .filter(|a| matches(&a.name, query))
                .map(|a| SearchItem::Album(a.clone()))
                .collect(),
            ItemKind::Song => self
                .songs
                .iter()
                .filter(|s| matches(&s.name, query))
                .map(|s| SearchItem::Song(s.clone()))
                .collect(),
            ItemKind::Playlist => self
                .playlists
                .iter()
                .filter(|p| matches(&p.name, query))
                .map(|p| SearchItem::Playlist(p.clone()))
                .collect(),
            ItemKind::Genre => Vec::new(),
        };
        Ok(hits)
    }

    async fn instant_mix(&self, id: &str) -> Result<Vec<Song>> {
        // Every fourth song starting from the seed's bucket.
        let offset = id.bytes().map(usize::from).sum::<usize>() % 4;
        Ok(self.songs.iter().skip(offset).step_by(4).take(25).cloned().collect())
    }

    async fn server_stats(&self) -> Result<ServerStats> {
        Ok(ServerStats {
            server_name: "offline library".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            artist_count: self.artists.len(),
            album_count: self.albums.len(),
            song_count: self.songs.len(),
            playlist_count: self.playlists.len(),
        })
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/web/#/details?id={}", self.base_url, id)
    }
}

#[derive(Default)]
struct PlaybackState {
    queue: Vec<Song>,
    history: Vec<Song>,
    current: Option<Song>,
    state: PlayState,
    position_ms: u64,
    volume: Volume,
}

impl PlaybackState {
    fn status(&self) -> AudioStatus {
        AudioStatus {
            song: self.current.clone(),
            state: self.state,
            position_ms: self.position_ms,
            volume: self.volume,
        }
    }

    /// Move to the next queued song, or stop at the end of the queue.
    fn advance(&mut self) {
        if let Some(finished) = self.current.take() {
            self.history.push(finished);
        }
        self.position_ms = 0;
        if self.queue.is_empty() {
            self.state = PlayState::Stop;
        } else {
            self.current = Some(self.queue.remove(0));
            self.state = PlayState::Play;
        }
    }
}

/// Simulated playback: a queue plus a ticking position. Implements both
/// the queue and player contracts behind one state lock.
pub struct OfflinePlayback {
    state: StdMutex<PlaybackState>,
    status_tx: UnboundedSender<AudioStatus>,
    status_rx: StdMutex<Option<UnboundedReceiver<AudioStatus>>>,
    queue_tx: UnboundedSender<Vec<Song>>,
    queue_rx: StdMutex<Option<UnboundedReceiver<Vec<Song>>>>,
    history_tx: UnboundedSender<Vec<Song>>,
    history_rx: StdMutex<Option<UnboundedReceiver<Vec<Song>>>>,
}

impl OfflinePlayback {
    pub fn new() -> Arc<Self> {
        let (status_tx, status_rx) = unbounded_channel();
        let (queue_tx, queue_rx) = unbounded_channel();
        let (history_tx, history_rx) = unbounded_channel();
        let playback = Arc::new(Self {
            state: StdMutex::new(PlaybackState::default()),
            status_tx,
            status_rx: StdMutex::new(Some(status_rx)),
            queue_tx,
            queue_rx: StdMutex::new(Some(queue_rx)),
            history_tx,
            history_rx: StdMutex::new(Some(history_rx)),
        });

        let ticker = Arc::downgrade(&playback);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
            loop {
                interval.tick().await;
                let Some(playback) = ticker.upgrade() else {
                    break;
                };
                playback.tick();
            }
            debug!("playback ticker stopped");
        });

        playback
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PlaybackState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn tick(&self) {
        let mut state = self.lock();
        if state.state != PlayState::Play {
            return;
        }
        state.position_ms += TICK_MS;
        let duration_ms = state.status().duration_ms();
        let track_done = duration_ms > 0 && state.position_ms >= duration_ms;
        if track_done {
            state.advance();
            let _ = self.queue_tx.send(state.queue.clone());
            let _ = self.history_tx.send(recent_first(&state.history));
        }
        let _ = self.status_tx.send(state.status());
    }
}

fn recent_first(history: &[Song]) -> Vec<Song> {
    history.iter().rev().cloned().collect()
}

#[async_trait]
impl QueueControl for OfflinePlayback {
    async fn add_songs(&self, songs: Vec<Song>) -> Result<()> {
        let mut state = self.lock();
        state.queue.extend(songs);
        if state.current.is_none() {
            state.advance();
        }
        let _ = self.queue_tx.send(state.queue.clone());
        let _ = self.status_tx.send(state.status());
        Ok(())
    }

    async fn clear_queue(&self, stop_playback: bool) -> Result<()> {
        let mut state = self.lock();
        state.queue.clear();
        if stop_playback {
            state.current = None;
            state.state = PlayState::Stop;
            state.position_ms = 0;
        }
        let _ = self.queue_tx.send(state.queue.clone());
        let _ = self.status_tx.send(state.status());
        Ok(())
    }

    async fn history(&self, limit: usize) -> Result<Vec<Song>> {
        let state = self.lock();
        let mut recent = recent_first(&state.history);
        recent.truncate(limit);
        Ok(recent)
    }

    fn queue_events(&self) -> UnboundedReceiver<Vec<Song>> {
        self.queue_rx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .unwrap_or_else(|| unbounded_channel().1)
    }

    fn history_events(&self) -> UnboundedReceiver<Vec<Song>> {
        self.history_rx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .unwrap_or_else(|| unbounded_channel().1)
    }
}

#[async_trait]
impl Player for OfflinePlayback {
    async fn play_pause(&self) -> Result<()> {
        let mut state = self.lock();
        state.state = match state.state {
            PlayState::Play => PlayState::Pause,
            PlayState::Pause => PlayState::Play,
            PlayState::Stop if state.current.is_some() => PlayState::Play,
            PlayState::Stop => PlayState::Stop,
        };
        let _ = self.status_tx.send(state.status());
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let mut state = self.lock();
        state.state = PlayState::Stop;
        state.position_ms = 0;
        let _ = self.status_tx.send(state.status());
        Ok(())
    }

    async fn next(&self) -> Result<()> {
        let mut state = self.lock();
        if state.current.is_some() || !state.queue.is_empty() {
            state.advance();
            let _ = self.queue_tx.send(state.queue.clone());
            let _ = self.history_tx.send(recent_first(&state.history));
        }
        let _ = self.status_tx.send(state.status());
        Ok(())
    }

    async fn previous(&self) -> Result<()> {
        let mut state = self.lock();
        if let Some(last) = state.history.pop() {
            if let Some(current) = state.current.take() {
                state.queue.insert(0, current);
            }
            state.current = Some(last);
            state.position_ms = 0;
            state.state = PlayState::Play;
            let _ = self.queue_tx.send(state.queue.clone());
            let _ = self.history_tx.send(recent_first(&state.history));
        } else {
            state.position_ms = 0;
        }
        let _ = self.status_tx.send(state.status());
        Ok(())
    }

    async fn seek(&self, delta_ms: i64) -> Result<()> {
        let mut state = self.lock();
        let duration_ms = state.status().duration_ms();
        let target = state.position_ms as i64 + delta_ms;
        state.position_ms = target.clamp(0, duration_ms as i64) as u64;
        let _ = self.status_tx.send(state.status());
        Ok(())
    }

    async fn set_volume(&self, volume: Volume) -> Result<()> {
        let mut state = self.lock();
        state.volume = volume;
        let _ = self.status_tx.send(state.status());
        Ok(())
    }

    fn status_events(&self) -> UnboundedReceiver<AudioStatus> {
        self.status_rx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .unwrap_or_else(|| unbounded_channel().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enqueueing_into_an_empty_queue_starts_playback() {
        let playback = OfflinePlayback::new();
        let library = OfflineLibrary::with_sample_data();
        let songs = library.album_songs("al0-0").await.unwrap();
        let expected_queue = songs.len() - 1;

        playback.add_songs(songs).await.unwrap();
        let state = playback.lock();
        assert!(state.current.is_some());
        assert_eq!(state.state, PlayState::Play);
        assert_eq!(state.queue.len(), expected_queue);
    }

    #[tokio::test]
    async fn previous_walks_back_through_history() {
        let playback = OfflinePlayback::new();
        let library = OfflineLibrary::with_sample_data();
        let songs = library.album_songs("al0-0").await.unwrap();
        let first = songs[0].clone();
        let second = songs[1].clone();
        playback.add_songs(songs).await.unwrap();

        playback.next().await.unwrap();
        {
            let state = playback.lock();
            assert_eq!(state.current.as_ref(), Some(&second));
            assert_eq!(state.history.len(), 1);
        }
        playback.previous().await.unwrap();
        let state = playback.lock();
        assert_eq!(state.current.as_ref(), Some(&first));
        assert_eq!(state.queue.first(), Some(&second));
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn clearing_the_queue_can_keep_the_current_song() {
        let playback = OfflinePlayback::new();
        let library = OfflineLibrary::with_sample_data();
        playback
            .add_songs(library.album_songs("al0-0").await.unwrap())
            .await
            .unwrap();

        playback.clear_queue(false).await.unwrap();
        {
            let state = playback.lock();
            assert!(state.queue.is_empty());
            assert!(state.current.is_some());
        }
        playback.clear_queue(true).await.unwrap();
        let state = playback.lock();
        assert!(state.current.is_none());
        assert_eq!(state.state, PlayState::Stop);
    }

    #[tokio::test]
    async fn library_pages_and_drills_consistently() {
        let library = OfflineLibrary::with_sample_data();
        let (page, total) = library.artists(Paging::new(5)).await.unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(total, ARTIST_NAMES.len());

        let albums = library.artist_albums(&page[0].id).await.unwrap();
        assert_eq!(albums.len(), page[0].album_count);
        let songs = library.album_songs(&albums[0].id).await.unwrap();
        assert_eq!(songs.len(), albums[0].song_count);
        assert!(songs.iter().all(|s| s.album_id == albums[0].id));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_per_kind() {
        let library = OfflineLibrary::with_sample_data();
        let hits = library.search(ItemKind::Artist, "aurora").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(matches!(&hits[0], SearchItem::Artist(a) if a.name == "Aurora Drift"));
        let none = library.search(ItemKind::Playlist, "aurora").await.unwrap();
        assert!(none.is_empty());
    }
}
