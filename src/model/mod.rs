//! Model module - application state and data types
//!
//! - `items`: domain items served by the catalogue
//! - `paging`: page-based partitioning of large collections
//! - `list`: the generic paged/selectable list every screen renders through
//! - `screens`: pre-allocated screen states and the screen registry
//! - `modal`: single-slot modal overlay management
//! - `playback`: player state snapshots
//! - `types`: focus, navigation mode, top-level UI state
//! - `app_model`: the main model tying the above together

mod app_model;
mod items;
mod list;
mod modal;
mod paging;
mod playback;
mod screens;
mod types;

pub use app_model::AppModel;

pub use items::{
    Album, Artist, IdName, ItemId, ItemKind, Playlist, SearchItem, ServerStats, Song,
};

pub use list::{ContextAction, ContextEntry, PagedList};

pub use modal::{ModalKind, ModalManager, ModalSize};

pub use paging::{Paging, DEFAULT_PAGE_SIZE};

pub use playback::{AudioStatus, PlayState, SharedStatus, Volume, SEEK_STEP_MS, VOLUME_STEP};

pub use screens::{
    AlbumListConfig, AlbumSongsScreen, AlbumsScreen, ArtistsScreen, GenresScreen, HistoryScreen,
    Motion, PlaylistSongsScreen, PlaylistsScreen, QueueScreen, ScreenId, Screens, SearchScreen,
    SearchSection, SongsMode, SongsScreen,
};

pub use types::{Focus, MediaCategory, NavMode, Region, UiState};
