//! Domain items served by the media server catalogue

use chrono::{DateTime, Utc};

/// Server-side item identifier. Opaque to the client.
pub type ItemId = String;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Artist {
    pub id: ItemId,
    pub name: String,
    pub album_count: usize,
    pub total_duration_sec: u64,
    pub favorite: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Album {
    pub id: ItemId,
    pub name: String,
    pub artist: String,
    pub artist_id: ItemId,
    pub year: u16,
    pub song_count: usize,
    pub duration_sec: u64,
    pub favorite: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Song {
    pub id: ItemId,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub album_id: ItemId,
    pub track: u32,
    pub duration_sec: u64,
    pub last_played: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Playlist {
    pub id: ItemId,
    pub name: String,
    pub song_count: usize,
    pub duration_sec: u64,
}

/// Minimal id/name pair, used for genres.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdName {
    pub id: ItemId,
    pub name: String,
}

/// Item types the catalogue can be queried for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Artist,
    Album,
    Song,
    Playlist,
    Genre,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Artist => "Artists",
            ItemKind::Album => "Albums",
            ItemKind::Song => "Songs",
            ItemKind::Playlist => "Playlists",
            ItemKind::Genre => "Genres",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "artist" | "artists" => Some(ItemKind::Artist),
            "album" | "albums" => Some(ItemKind::Album),
            "song" | "songs" => Some(ItemKind::Song),
            "playlist" | "playlists" => Some(ItemKind::Playlist),
            "genre" | "genres" => Some(ItemKind::Genre),
            _ => None,
        }
    }
}

/// A single search hit. The catalogue returns one homogeneous batch per
/// queried [`ItemKind`], but the aggregated results screen stores them
/// behind one type.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchItem {
    Artist(Artist),
    Album(Album),
    Song(Song),
    Playlist(Playlist),
}

impl SearchItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            SearchItem::Artist(_) => ItemKind::Artist,
            SearchItem::Album(_) => ItemKind::Album,
            SearchItem::Song(_) => ItemKind::Song,
            SearchItem::Playlist(_) => ItemKind::Playlist,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SearchItem::Artist(a) => &a.name,
            SearchItem::Album(a) => &a.name,
            SearchItem::Song(s) => &s.name,
            SearchItem::Playlist(p) => &p.name,
        }
    }
}

/// Server-reported library statistics, shown in the help overlay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServerStats {
    pub server_name: String,
    pub server_version: String,
    pub artist_count: usize,
    pub album_count: usize,
    pub song_count: usize,
    pub playlist_count: usize,
}
