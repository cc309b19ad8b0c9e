//! Pre-allocated screen states.
//!
//! Screens are created once at startup and repopulated wholesale on each
//! navigation into them; the navigation stack stores only their ids.

use super::items::{Album, Artist, IdName, ItemKind, Playlist, SearchItem, Song};
use super::list::{entry, ContextAction, PagedList};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenId {
    Artists,
    Albums,
    AlbumSongs,
    Playlists,
    PlaylistSongs,
    Genres,
    Songs,
    Search,
    Queue,
    History,
}

/// Cursor movement requests routed to whichever list a screen shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

/// Capability toggles for the one shared album list screen, passed at
/// activation time. The same screen serves "all albums", "latest",
/// "favorites", an artist's discography, a genre and similar-album
/// listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlbumListConfig {
    pub paging: bool,
    pub similar: bool,
    pub artist_mode: bool,
}

impl AlbumListConfig {
    pub const ALL_ALBUMS: AlbumListConfig = AlbumListConfig {
        paging: true,
        similar: true,
        artist_mode: false,
    };
    pub const ARTIST: AlbumListConfig = AlbumListConfig {
        paging: false,
        similar: true,
        artist_mode: true,
    };
    pub const FLAT: AlbumListConfig = AlbumListConfig {
        paging: false,
        similar: false,
        artist_mode: false,
    };
}

#[derive(Default)]
pub struct ArtistsScreen {
    pub title: String,
    pub list: PagedList<Artist>,
}

pub struct AlbumsScreen {
    pub title: String,
    pub config: AlbumListConfig,
    /// Which paged source fills the list, for page transitions.
    pub favorites: bool,
    pub artist: Option<Artist>,
    pub list: PagedList<Album>,
    pub header_focused: bool,
}

pub struct AlbumSongsScreen {
    pub album: Option<Album>,
    pub list: PagedList<Song>,
    pub header_focused: bool,
}

#[derive(Default)]
pub struct PlaylistsScreen {
    pub list: PagedList<Playlist>,
}

pub struct PlaylistSongsScreen {
    pub playlist: Option<Playlist>,
    pub list: PagedList<Song>,
    pub header_focused: bool,
}

#[derive(Default)]
pub struct GenresScreen {
    pub list: PagedList<IdName>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SongsMode {
    #[default]
    All,
    Recent,
}

pub struct SongsScreen {
    pub title: String,
    pub mode: SongsMode,
    pub list: PagedList<Song>,
}

pub struct SearchSection {
    pub kind: ItemKind,
    pub list: PagedList<SearchItem>,
}

/// Aggregated top-level search results: one list per item type plus the
/// query input line.
#[derive(Default)]
pub struct SearchScreen {
    pub query: String,
    pub input_active: bool,
    pub sections: Vec<SearchSection>,
    pub section_selected: usize,
}

impl SearchScreen {
    pub fn active_list(&self) -> Option<&PagedList<SearchItem>> {
        self.sections.get(self.section_selected).map(|s| &s.list)
    }

    pub fn active_list_mut(&mut self) -> Option<&mut PagedList<SearchItem>> {
        self.sections.get_mut(self.section_selected).map(|s| &mut s.list)
    }

    pub fn next_section(&mut self) {
        if !self.sections.is_empty() {
            self.section_selected = (self.section_selected + 1) % self.sections.len();
        }
    }

    pub fn prev_section(&mut self) {
        if !self.sections.is_empty() {
            self.section_selected =
                (self.section_selected + self.sections.len() - 1) % self.sections.len();
        }
    }
}

pub struct QueueScreen {
    pub list: PagedList<Song>,
}

pub struct HistoryScreen {
    pub list: PagedList<Song>,
}

pub struct Screens {
    pub artists: ArtistsScreen,
    pub albums: AlbumsScreen,
    pub album_songs: AlbumSongsScreen,
    pub playlists: PlaylistsScreen,
    pub playlist_songs: PlaylistSongsScreen,
    pub genres: GenresScreen,
    pub songs: SongsScreen,
    pub search: SearchScreen,
    pub queue: QueueScreen,
    pub history: HistoryScreen,
}

impl Screens {
    pub fn new() -> Self {
        // Each menu entry carries its own action; keys to the selected item
        // at dispatch time.
        let song_menu = [
            entry("Play", ContextAction::Play),
            entry("Play all", ContextAction::PlayAll),
            entry("Add to queue", ContextAction::AddToQueue),
            entry("Instant mix", ContextAction::InstantMix),
        ];
        Self {
            artists: ArtistsScreen {
                title: String::new(),
                list: PagedList::new().with_menu(&[
                    entry("Instant mix", ContextAction::InstantMix),
                    entry("Show similar", ContextAction::ShowSimilar),
                    entry("Open in browser", ContextAction::OpenInBrowser),
                ]),
            },
            albums: AlbumsScreen {
                title: String::new(),
                config: AlbumListConfig::ALL_ALBUMS,
                favorites: false,
                artist: None,
                list: PagedList::new().with_menu(&[
                    entry("Play all", ContextAction::PlayAll),
                    entry("Instant mix", ContextAction::InstantMix),
                    entry("Show similar", ContextAction::ShowSimilar),
                    entry("View artist", ContextAction::ViewArtist),
                    entry("Open in browser", ContextAction::OpenInBrowser),
                ]),
                header_focused: false,
            },
            album_songs: AlbumSongsScreen {
                album: None,
                list: PagedList::new().with_menu(&song_menu),
                header_focused: false,
            },
            playlists: PlaylistsScreen::default(),
            playlist_songs: PlaylistSongsScreen {
                playlist: None,
                list: PagedList::new().with_menu(&song_menu),
                header_focused: false,
            },
            genres: GenresScreen::default(),
            songs: SongsScreen {
                title: String::new(),
                mode: SongsMode::All,
                list: PagedList::new().with_menu(&[
                    entry("Play", ContextAction::Play),
                    entry("Add to queue", ContextAction::AddToQueue),
                    entry("Instant mix", ContextAction::InstantMix),
                ]),
            },
            search: SearchScreen::default(),
            queue: QueueScreen {
                list: PagedList::new().with_menu(&[entry("Clear queue", ContextAction::ClearQueue)]),
            },
            history: HistoryScreen {
                list: PagedList::new().with_menu(&[
                    entry("Play", ContextAction::Play),
                    entry("Add to queue", ContextAction::AddToQueue),
                ]),
            },
        }
    }

    /// Screens with a header banner the cursor can move into from list
    /// row zero.
    pub fn has_header(&self, id: ScreenId) -> bool {
        matches!(
            id,
            ScreenId::Albums | ScreenId::AlbumSongs | ScreenId::PlaylistSongs
        )
    }

    pub fn header_focused(&self, id: ScreenId) -> bool {
        match id {
            ScreenId::Albums => self.albums.header_focused,
            ScreenId::AlbumSongs => self.album_songs.header_focused,
            ScreenId::PlaylistSongs => self.playlist_songs.header_focused,
            _ => false,
        }
    }

    pub fn set_header_focused(&mut self, id: ScreenId, focused: bool) {
        match id {
            ScreenId::Albums => self.albums.header_focused = focused,
            ScreenId::AlbumSongs => self.album_songs.header_focused = focused,
            ScreenId::PlaylistSongs => self.playlist_songs.header_focused = focused,
            _ => {}
        }
    }

    fn with_list<R>(
        &mut self,
        id: ScreenId,
        f: impl FnOnce(&mut dyn ListOps) -> R,
    ) -> Option<R> {
        match id {
            ScreenId::Artists => Some(f(&mut self.artists.list)),
            ScreenId::Albums => Some(f(&mut self.albums.list)),
            ScreenId::AlbumSongs => Some(f(&mut self.album_songs.list)),
            ScreenId::Playlists => Some(f(&mut self.playlists.list)),
            ScreenId::PlaylistSongs => Some(f(&mut self.playlist_songs.list)),
            ScreenId::Genres => Some(f(&mut self.genres.list)),
            ScreenId::Songs => Some(f(&mut self.songs.list)),
            ScreenId::Search => self.search.active_list_mut().map(|l| f(l)),
            ScreenId::Queue => Some(f(&mut self.queue.list)),
            ScreenId::History => Some(f(&mut self.history.list)),
        }
    }

    pub fn selected_index(&mut self, id: ScreenId) -> Option<usize> {
        self.with_list(id, |list| list.selected())
    }

    pub fn move_selection(&mut self, id: ScreenId, motion: Motion) {
        self.with_list(id, |list| match motion {
            Motion::Up => list.move_up(),
            Motion::Down => list.move_down(),
            Motion::PageUp => list.page_up(),
            Motion::PageDown => list.page_down(),
            Motion::First => list.select_first(),
            Motion::Last => list.select_last(),
        });
    }

    pub fn set_viewport_rows(&mut self, id: ScreenId, rows: usize) {
        self.with_list(id, |list| list.set_viewport_rows(rows));
    }

    /// Mouse selection: map a viewport row to an item and select it.
    /// Returns true if a row was hit.
    pub fn click_row(&mut self, id: ScreenId, viewport_row: usize) -> bool {
        self.with_list(id, |list| {
            if let Some(index) = list.row_at(viewport_row) {
                list.select(index);
                true
            } else {
                false
            }
        })
        .unwrap_or(false)
    }

    pub fn menu_open(&mut self, id: ScreenId) -> bool {
        self.with_list(id, |l| l.menu_is_open()).unwrap_or(false)
    }

    pub fn open_menu(&mut self, id: ScreenId) {
        self.with_list(id, |l| l.open_menu());
    }

    pub fn close_menu(&mut self, id: ScreenId) {
        self.with_list(id, |l| l.close_menu());
    }

    pub fn menu_move(&mut self, id: ScreenId, down: bool) {
        self.with_list(id, |l| {
            if down {
                l.menu_move_down()
            } else {
                l.menu_move_up()
            }
        });
    }

    pub fn menu_action(&mut self, id: ScreenId) -> Option<ContextAction> {
        self.with_list(id, |l| l.menu_action()).flatten()
    }
}

impl Default for Screens {
    fn default() -> Self {
        Self::new()
    }
}

/// Item-type-erased view of a [`PagedList`], for routing per-screen input
/// without a ten-armed match at every call site.
trait ListOps {
    fn selected(&self) -> usize;
    fn move_up(&mut self);
    fn move_down(&mut self);
    fn page_up(&mut self);
    fn page_down(&mut self);
    fn select_first(&mut self);
    fn select_last(&mut self);
    fn select(&mut self, index: usize);
    fn row_at(&self, viewport_row: usize) -> Option<usize>;
    fn set_viewport_rows(&mut self, rows: usize);
    fn menu_is_open(&self) -> bool;
    fn open_menu(&mut self);
    fn close_menu(&mut self);
    fn menu_move_up(&mut self);
    fn menu_move_down(&mut self);
    fn menu_action(&self) -> Option<ContextAction>;
}

impl<T> ListOps for PagedList<T> {
    fn selected(&self) -> usize {
        PagedList::selected(self)
    }
    fn move_up(&mut self) {
        PagedList::move_up(self)
    }
    fn move_down(&mut self) {
        PagedList::move_down(self)
    }
    fn page_up(&mut self) {
        PagedList::page_up(self)
    }
    fn page_down(&mut self) {
        PagedList::page_down(self)
    }
    fn select_first(&mut self) {
        PagedList::select_first(self)
    }
    fn select_last(&mut self) {
        PagedList::select_last(self)
    }
    fn select(&mut self, index: usize) {
        PagedList::select(self, index)
    }
    fn row_at(&self, viewport_row: usize) -> Option<usize> {
        PagedList::row_at(self, viewport_row)
    }
    fn set_viewport_rows(&mut self, rows: usize) {
        PagedList::set_viewport_rows(self, rows)
    }
    fn menu_is_open(&self) -> bool {
        PagedList::menu_open(self)
    }
    fn open_menu(&mut self) {
        PagedList::open_menu(self)
    }
    fn close_menu(&mut self) {
        PagedList::close_menu(self)
    }
    fn menu_move_up(&mut self) {
        PagedList::menu_move_up(self)
    }
    fn menu_move_down(&mut self) {
        PagedList::menu_move_down(self)
    }
    fn menu_action(&self) -> Option<ContextAction> {
        PagedList::menu_action(self)
    }
}
