//! Focus and navigation-mode types plus top-level UI state

use std::time::Instant;

use super::items::ServerStats;

/// A rectangular terminal region, used for mouse hit-testing against the
/// last computed layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Which top-level region owns keyboard input when no modal is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    MediaBar,
    Content,
}

/// The navigation controller's externally visible state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavMode {
    /// Media bar focused, no content screen visited yet.
    NavigatingMediaBar,
    /// Media bar focused while a content screen is on display.
    ViewingScreen,
    /// A content screen owns input.
    ScreenFocused,
    /// A modal overlays everything else.
    ModalActive,
}

/// Categories offered by the media bar. Selecting one triggers a catalogue
/// fetch and a lateral switch to the matching screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaCategory {
    LatestMusic,
    RecentlyPlayed,
    Artists,
    Albums,
    Songs,
    Playlists,
    FavoriteArtists,
    FavoriteAlbums,
    Genres,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 9] = [
        MediaCategory::LatestMusic,
        MediaCategory::RecentlyPlayed,
        MediaCategory::Artists,
        MediaCategory::Albums,
        MediaCategory::Songs,
        MediaCategory::Playlists,
        MediaCategory::FavoriteArtists,
        MediaCategory::FavoriteAlbums,
        MediaCategory::Genres,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MediaCategory::LatestMusic => "Latest Music",
            MediaCategory::RecentlyPlayed => "Recently Played",
            MediaCategory::Artists => "Artists",
            MediaCategory::Albums => "Albums",
            MediaCategory::Songs => "Songs",
            MediaCategory::Playlists => "Playlists",
            MediaCategory::FavoriteArtists => "Favorite Artists",
            MediaCategory::FavoriteAlbums => "Favorite Albums",
            MediaCategory::Genres => "Genres",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// Top-level UI state owned by the model.
#[derive(Clone, Debug)]
pub struct UiState {
    pub focus: Focus,
    pub media_selected: usize,
    /// Item counts shown next to media bar entries, filled in as fetches
    /// complete.
    pub media_counts: [Option<usize>; MediaCategory::ALL.len()],
    /// Text for the message modal.
    pub message: String,
    /// Server info shown in the help modal, fetched when it opens.
    pub server_stats: Option<ServerStats>,
    /// Last mouse press, for double-click detection.
    pub last_click: Option<(Instant, u16, u16)>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::MediaBar,
            media_selected: 0,
            media_counts: [None; MediaCategory::ALL.len()],
            message: String::new(),
            server_stats: None,
            last_click: None,
        }
    }
}

impl UiState {
    pub fn selected_category(&self) -> MediaCategory {
        MediaCategory::ALL[self.media_selected.min(MediaCategory::ALL.len() - 1)]
    }

    pub fn set_count(&mut self, category: MediaCategory, count: usize) {
        self.media_counts[category.index()] = Some(count);
    }
}
