//! Catalogue navigation: media-bar selections, drill-downs, paging,
//! search and context-menu actions.
//!
//! Fetches never run under the model lock. Each navigation takes a
//! generation tag before its fetch is spawned; a result landing after a
//! newer navigation began is discarded, so a slow response can never
//! overwrite the screen the user moved on to. A screen switch happens
//! only after its data arrived - on fetch failure the UI stays where it
//! was and the error goes to the log.

use anyhow::Result;
use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::model::{
    AlbumListConfig, Album, AppModel, Artist, ContextAction, IdName, MediaCategory, ModalKind,
    ModalSize, PagedList, Paging, Playlist, ScreenId, SearchSection, Song, SongsMode,
};

use super::AppController;

/// What pressing Enter on the focused list should do, captured under the
/// model lock and acted on after it is released.
enum Activation {
    Artist(Artist),
    Album(Album),
    Playlist(Playlist),
    Genre(IdName),
    PlaySongs(Vec<Song>),
    None,
}

impl AppController {
    fn page(&self) -> Paging {
        Paging::new(self.config.page_size)
    }

    /// Media-bar selection: lateral switch to the category's screen once
    /// its first page arrives.
    pub(crate) async fn select_media(&self, category: MediaCategory) {
        let generation = self.model.lock().await.begin_navigation();
        let paging = self.page();
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(err) = controller.load_category(category, paging, generation).await {
                error!(%err, ?category, "category fetch failed");
            }
        });
    }

    async fn load_category(
        &self,
        category: MediaCategory,
        paging: Paging,
        generation: u64,
    ) -> Result<()> {
        match category {
            MediaCategory::LatestMusic => self.load_latest_albums(generation).await,
            MediaCategory::RecentlyPlayed => self.load_recently_played(paging, generation).await,
            MediaCategory::Artists => self.load_artists(paging, generation).await,
            MediaCategory::Albums => self.load_albums(paging, generation).await,
            MediaCategory::Songs => self.load_songs(paging, generation).await,
            MediaCategory::Playlists => self.load_playlists(generation).await,
            MediaCategory::FavoriteArtists => self.load_favorite_artists(generation).await,
            MediaCategory::FavoriteAlbums => self.load_favorite_albums(paging, generation).await,
            MediaCategory::Genres => self.load_genres(paging, generation).await,
        }
    }

    pub(crate) async fn load_artists(&self, paging: Paging, generation: u64) -> Result<()> {
        let (artists, total) = self.catalogue.artists(paging).await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::Artists, total);
            let screen = &mut model.screens.artists;
            screen.title = format!("Artists: {total}");
            screen.list.set_items(artists);
            screen.list.set_paging(Some(paging.with_total(total)));
            model.show_screen(ScreenId::Artists, false);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn load_albums(&self, paging: Paging, generation: u64) -> Result<()> {
        let (albums, total) = self.catalogue.albums(paging).await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::Albums, total);
            let screen = &mut model.screens.albums;
            screen.title = format!("Albums: {total}");
            screen.config = AlbumListConfig::ALL_ALBUMS;
            screen.favorites = false;
            screen.artist = None;
            screen.list.set_items(albums);
            screen.list.set_paging(Some(paging.with_total(total)));
            model.show_screen(ScreenId::Albums, false);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn load_songs(&self, paging: Paging, generation: u64) -> Result<()> {
        let (songs, total) = self.catalogue.songs(paging).await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::Songs, total);
            let screen = &mut model.screens.songs;
            screen.title = format!("Songs: {total}");
            screen.mode = SongsMode::All;
            screen.list.set_items(songs);
            screen.list.set_paging(Some(paging.with_total(total)));
            model.show_screen(ScreenId::Songs, false);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn load_genres(&self, paging: Paging, generation: u64) -> Result<()> {
        let (genres, total) = self.catalogue.genres(paging).await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::Genres, total);
            let screen = &mut model.screens.genres;
            screen.list.set_items(genres);
            screen.list.set_paging(Some(paging.with_total(total)));
            model.show_screen(ScreenId::Genres, false);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn load_playlists(&self, generation: u64) -> Result<()> {
        let playlists = self.catalogue.playlists().await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::Playlists, playlists.len());
            model.screens.playlists.list.set_items(playlists);
            model.show_screen(ScreenId::Playlists, false);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn load_latest_albums(&self, generation: u64) -> Result<()> {
        let albums = self.catalogue.latest_albums().await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::LatestMusic, albums.len());
            let screen = &mut model.screens.albums;
            screen.title = format!("Latest albums: {}", albums.len());
            screen.config = AlbumListConfig::FLAT;
            screen.favorites = false;
            screen.artist = None;
            screen.list.set_items(albums);
            screen.list.set_paging(None);
            model.show_screen(ScreenId::Albums, false);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn load_recently_played(&self, paging: Paging, generation: u64) -> Result<()> {
        let (songs, total) = self.catalogue.recently_played(paging).await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::RecentlyPlayed, total);
            let screen = &mut model.screens.songs;
            screen.title = format!("Recently played: {total}");
            screen.mode = SongsMode::Recent;
            screen.list.set_items(songs);
            screen.list.set_paging(Some(paging.with_total(total)));
            model.show_screen(ScreenId::Songs, false);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn load_favorite_artists(&self, generation: u64) -> Result<()> {
        let artists = self.catalogue.favorite_artists().await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::FavoriteArtists, artists.len());
            let screen = &mut model.screens.artists;
            screen.title = format!("Favorite artists: {}", artists.len());
            screen.list.set_items(artists);
            screen.list.set_paging(None);
            model.show_screen(ScreenId::Artists, false);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn load_favorite_albums(&self, paging: Paging, generation: u64) -> Result<()> {
        let (albums, total) = self.catalogue.favorite_albums(paging).await?;
        self.apply_if_current(generation, |model| {
            model.ui.set_count(MediaCategory::FavoriteAlbums, total);
            let screen = &mut model.screens.albums;
            screen.title = format!("Favorite albums: {total}");
            screen.config = AlbumListConfig::ALL_ALBUMS;
            screen.favorites = true;
            screen.artist = None;
            screen.list.set_items(albums);
            screen.list.set_paging(Some(paging.with_total(total)));
            model.show_screen(ScreenId::Albums, false);
        })
        .await;
        Ok(())
    }

    // Drill-downs. Each pushes the prior screen so "back" returns to it,
    // but only after the fetch landed and is still current.

    pub(crate) async fn select_artist(&self, artist: Artist) {
        let generation = self.model.lock().await.begin_navigation();
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(err) = controller.load_artist_albums(artist, generation).await {
                error!(%err, "artist albums fetch failed");
            }
        });
    }

    pub(crate) async fn load_artist_albums(&self, mut artist: Artist, generation: u64) -> Result<()> {
        let albums = self.catalogue.artist_albums(&artist.id).await?;
        // The caller may only know the artist from an album row; fill the
        // banner counts from what actually came back.
        artist.album_count = albums.len();
        artist.total_duration_sec = albums.iter().map(|a| a.duration_sec).sum();
        self.apply_if_current(generation, |model| {
            let screen = &mut model.screens.albums;
            screen.title = artist.name.clone();
            screen.config = AlbumListConfig::ARTIST;
            screen.favorites = false;
            screen.list.set_items(albums);
            screen.list.set_paging(None);
            screen.artist = Some(artist);
            model.show_screen(ScreenId::Albums, true);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn select_album(&self, album: Album) {
        let generation = self.model.lock().await.begin_navigation();
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(err) = controller.load_album_songs(album, generation).await {
                error!(%err, "album songs fetch failed");
            }
        });
    }

    pub(crate) async fn load_album_songs(&self, album: Album, generation: u64) -> Result<()> {
        let songs = self.catalogue.album_songs(&album.id).await?;
        self.apply_if_current(generation, |model| {
            let screen = &mut model.screens.album_songs;
            screen.list.set_items(songs);
            screen.album = Some(album);
            model.show_screen(ScreenId::AlbumSongs, true);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn select_playlist(&self, playlist: Playlist) {
        let generation = self.model.lock().await.begin_navigation();
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(err) = controller.load_playlist_songs(playlist, generation).await {
                error!(%err, "playlist songs fetch failed");
            }
        });
    }

    pub(crate) async fn load_playlist_songs(
        &self,
        playlist: Playlist,
        generation: u64,
    ) -> Result<()> {
        let songs = self.catalogue.playlist_songs(&playlist.id).await?;
        self.apply_if_current(generation, |model| {
            let screen = &mut model.screens.playlist_songs;
            screen.list.set_items(songs);
            screen.playlist = Some(playlist);
            model.show_screen(ScreenId::PlaylistSongs, true);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn select_genre(&self, genre: IdName) {
        let generation = self.model.lock().await.begin_navigation();
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(err) = controller.load_genre_albums(genre, generation).await {
                error!(%err, "genre albums fetch failed");
            }
        });
    }

    pub(crate) async fn load_genre_albums(&self, genre: IdName, generation: u64) -> Result<()> {
        let albums = self.catalogue.genre_albums(&genre.id).await?;
        self.apply_if_current(generation, |model| {
            let screen = &mut model.screens.albums;
            screen.title = format!("Genre: {}", genre.name);
            screen.config = AlbumListConfig::FLAT;
            screen.favorites = false;
            screen.artist = None;
            screen.list.set_items(albums);
            screen.list.set_paging(None);
            model.show_screen(ScreenId::Albums, true);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn show_similar_artists(&self, artist: Artist) {
        let generation = self.model.lock().await.begin_navigation();
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(err) = controller.load_similar_artists(artist, generation).await {
                error!(%err, "similar artists fetch failed");
            }
        });
    }

    pub(crate) async fn load_similar_artists(&self, artist: Artist, generation: u64) -> Result<()> {
        let similar = self.catalogue.similar_artists(&artist.id).await?;
        if similar.is_empty() {
            let mut model = self.model.lock().await;
            if model.generation_current(generation) {
                let text = format!("No similar artists found for {}", artist.name);
                Self::show_message(&mut model, text);
            }
            return Ok(());
        }
        self.apply_if_current(generation, |model| {
            let screen = &mut model.screens.artists;
            screen.title = format!("Similar to {}", artist.name);
            screen.list.set_items(similar);
            screen.list.set_paging(None);
            model.show_screen(ScreenId::Artists, true);
        })
        .await;
        Ok(())
    }

    pub(crate) async fn show_similar_albums(&self, album: Album) {
        let generation = self.model.lock().await.begin_navigation();
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(err) = controller.load_similar_albums(album, generation).await {
                error!(%err, "similar albums fetch failed");
            }
        });
    }

    pub(crate) async fn load_similar_albums(&self, album: Album, generation: u64) -> Result<()> {
        let similar = self.catalogue.similar_albums(&album.id).await?;
        if similar.is_empty() {
            let mut model = self.model.lock().await;
            if model.generation_current(generation) {
                let text = format!("No similar albums found for {}", album.name);
                Self::show_message(&mut model, text);
            }
            return Ok(());
        }
        self.apply_if_current(generation, |model| {
            let screen = &mut model.screens.albums;
            screen.title = format!("Similar to {}", album.name);
            screen.config = AlbumListConfig::FLAT;
            screen.favorites = false;
            screen.artist = None;
            screen.list.set_items(similar);
            screen.list.set_paging(None);
            model.show_screen(ScreenId::Albums, true);
        })
        .await;
        Ok(())
    }

    // Search.

    /// Open the search screen with the query input active.
    pub(crate) async fn start_search(&self) {
        let mut model = self.model.lock().await;
        model.show_screen(ScreenId::Search, true);
        model.screens.search.input_active = true;
    }

    pub(crate) async fn submit_search(&self) {
        let (query, generation) = {
            let mut model = self.model.lock().await;
            let query = model.screens.search.query.trim().to_string();
            if query.is_empty() {
                return;
            }
            (query, model.begin_navigation())
        };
        let controller = self.clone();
        tokio::spawn(async move {
            controller.run_search(query, generation).await;
        });
    }

    /// Query every configured item type concurrently. A type that fails
    /// is logged and dropped; the others still show.
    pub(crate) async fn run_search(&self, query: String, generation: u64) {
        let kinds = self.config.search_kinds();
        let fetches = kinds.into_iter().map(|kind| {
            let catalogue = self.catalogue.clone();
            let query = query.clone();
            async move { (kind, catalogue.search(kind, &query).await) }
        });
        let results = join_all(fetches).await;

        let mut sections: Vec<SearchSection> = Vec::new();
        for (kind, result) in results {
            match result {
                Ok(items) if !items.is_empty() => {
                    let mut list = PagedList::new();
                    list.set_items(items);
                    sections.push(SearchSection { kind, list });
                }
                Ok(_) => {}
                Err(err) => warn!(%err, kind = kind.label(), "search failed for item type"),
            }
        }
        let total: usize = sections.iter().map(|s| s.list.len()).sum();
        info!(query, total, "search complete");

        self.apply_if_current(generation, |model| {
            let screen = &mut model.screens.search;
            screen.sections = sections;
            screen.section_selected = 0;
            screen.input_active = false;
            model.show_screen(ScreenId::Search, true);
        })
        .await;
    }

    // Queue, history, help.

    pub(crate) async fn show_queue(&self) {
        // Contents arrive over the queue channel; nothing to fetch here.
        let mut model = self.model.lock().await;
        if model.modal.has_modal() {
            Self::close_modal(&mut model);
        }
        model.show_screen(ScreenId::Queue, true);
    }

    pub(crate) async fn show_history(&self) {
        let generation = {
            let mut model = self.model.lock().await;
            if model.modal.has_modal() {
                Self::close_modal(&mut model);
            }
            model.begin_navigation()
        };
        let limit = self.config.history_limit;
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.queue.history(limit).await {
                Ok(songs) => {
                    controller
                        .apply_if_current(generation, |model| {
                            model.screens.history.list.set_items(songs);
                            model.show_screen(ScreenId::History, true);
                        })
                        .await;
                }
                Err(err) => error!(%err, "history fetch failed"),
            }
        });
    }

    /// Toggle the help modal: a second press closes it.
    pub(crate) async fn show_help(&self) {
        {
            let mut model = self.model.lock().await;
            if model.modal.active() == Some(ModalKind::Help) {
                Self::close_modal(&mut model);
                return;
            }
            let focus = model.ui.focus;
            if !model
                .modal
                .show(ModalKind::Help, ModalSize::DynamicLarge, focus)
            {
                return;
            }
        }
        // Fill in the server info line once it arrives; the modal is
        // usable without it.
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.catalogue.server_stats().await {
                Ok(stats) => {
                    let mut model = controller.model.lock().await;
                    if model.modal.active() == Some(ModalKind::Help) {
                        model.ui.server_stats = Some(stats);
                    }
                }
                Err(err) => debug!(%err, "server stats unavailable"),
            }
        });
    }

    pub(crate) fn show_message(model: &mut AppModel, text: String) {
        model.ui.message = text;
        let focus = model.ui.focus;
        model.modal.show(
            ModalKind::Message,
            ModalSize::Fixed {
                width: 50,
                height: 5,
            },
            focus,
        );
    }

    pub(crate) fn close_modal(model: &mut AppModel) {
        if let Some(focus) = model.modal.close() {
            model.ui.focus = focus;
            model.ui.server_stats = None;
        }
    }

    // Paging.

    /// Move the current screen one page forward or back, if it pages.
    pub(crate) async fn change_page(&self, forward: bool) {
        let (current, paging, favorites, songs_mode, generation) = {
            let mut model = self.model.lock().await;
            let Some(current) = model.current() else {
                return;
            };
            let paging = match current {
                ScreenId::Artists => model.screens.artists.list.paging(),
                ScreenId::Albums if model.screens.albums.config.paging => {
                    model.screens.albums.list.paging()
                }
                ScreenId::Songs => model.screens.songs.list.paging(),
                ScreenId::Genres => model.screens.genres.list.paging(),
                _ => None,
            };
            let Some(paging) = paging else {
                return;
            };
            let next = if forward {
                paging.next_page()
            } else {
                paging.prev_page()
            };
            if next.current_page() == paging.current_page() {
                return;
            }
            (
                current,
                next,
                model.screens.albums.favorites,
                model.screens.songs.mode,
                model.begin_navigation(),
            )
        };
        let controller = self.clone();
        tokio::spawn(async move {
            let result = match current {
                ScreenId::Artists => controller.load_artists(paging, generation).await,
                ScreenId::Albums if favorites => {
                    controller.load_favorite_albums(paging, generation).await
                }
                ScreenId::Albums => controller.load_albums(paging, generation).await,
                ScreenId::Songs if songs_mode == SongsMode::Recent => {
                    controller.load_recently_played(paging, generation).await
                }
                ScreenId::Songs => controller.load_songs(paging, generation).await,
                ScreenId::Genres => controller.load_genres(paging, generation).await,
                _ => Ok(()),
            };
            if let Err(err) = result {
                error!(%err, ?current, "page fetch failed");
            }
        });
    }

    // Item activation and context-menu actions.

    /// Enter on the focused content list: drill into containers, play
    /// playable leaves.
    pub(crate) async fn activate_selected(&self) {
        let activation = {
            let model = self.model.lock().await;
            let Some(current) = model.current() else {
                return;
            };
            let screens = &model.screens;
            match current {
                ScreenId::Artists => screens
                    .artists
                    .list
                    .selected_item()
                    .cloned()
                    .map_or(Activation::None, Activation::Artist),
                ScreenId::Albums => screens
                    .albums
                    .list
                    .selected_item()
                    .cloned()
                    .map_or(Activation::None, Activation::Album),
                ScreenId::Playlists => screens
                    .playlists
                    .list
                    .selected_item()
                    .cloned()
                    .map_or(Activation::None, Activation::Playlist),
                ScreenId::Genres => screens
                    .genres
                    .list
                    .selected_item()
                    .cloned()
                    .map_or(Activation::None, Activation::Genre),
                ScreenId::AlbumSongs => song_activation(&screens.album_songs.list),
                ScreenId::PlaylistSongs => song_activation(&screens.playlist_songs.list),
                ScreenId::Songs => song_activation(&screens.songs.list),
                ScreenId::History => song_activation(&screens.history.list),
                ScreenId::Search => match screens.search.active_list().and_then(|l| {
                    l.selected_item().cloned()
                }) {
                    Some(crate::model::SearchItem::Artist(a)) => Activation::Artist(a),
                    Some(crate::model::SearchItem::Album(a)) => Activation::Album(a),
                    Some(crate::model::SearchItem::Playlist(p)) => Activation::Playlist(p),
                    Some(crate::model::SearchItem::Song(s)) => Activation::PlaySongs(vec![s]),
                    None => Activation::None,
                },
                ScreenId::Queue => Activation::None,
            }
        };
        match activation {
            Activation::Artist(artist) => self.select_artist(artist).await,
            Activation::Album(album) => self.select_album(album).await,
            Activation::Playlist(playlist) => self.select_playlist(playlist).await,
            Activation::Genre(genre) => self.select_genre(genre).await,
            Activation::PlaySongs(songs) => self.queue_songs(songs),
            Activation::None => {}
        }
    }

    /// Dispatch a context-menu action against the selected item of the
    /// current screen.
    pub(crate) async fn run_context_action(&self, action: ContextAction) {
        let pending = {
            let mut model = self.model.lock().await;
            let Some(current) = model.current() else {
                return;
            };
            model.screens.close_menu(current);
            let screens = &model.screens;
            let pending = match current {
                ScreenId::Artists => screens
                    .artists
                    .list
                    .selected_item()
                    .cloned()
                    .map_or(Pending::None, Pending::Artist),
                ScreenId::Albums => screens
                    .albums
                    .list
                    .selected_item()
                    .cloned()
                    .map_or(Pending::None, Pending::Album),
                ScreenId::AlbumSongs if action == ContextAction::PlayAll => {
                    Pending::Songs(screens.album_songs.list.items().to_vec())
                }
                ScreenId::AlbumSongs => single_song(&screens.album_songs.list),
                ScreenId::PlaylistSongs if action == ContextAction::PlayAll => {
                    Pending::Songs(screens.playlist_songs.list.items().to_vec())
                }
                ScreenId::PlaylistSongs => single_song(&screens.playlist_songs.list),
                ScreenId::Songs => single_song(&screens.songs.list),
                ScreenId::History => single_song(&screens.history.list),
                _ => Pending::None,
            };
            pending
        };

        match (action, pending) {
            (ContextAction::Play | ContextAction::AddToQueue, Pending::Songs(songs)) => {
                self.queue_songs(songs);
            }
            (ContextAction::PlayAll, Pending::Songs(songs)) => self.queue_songs(songs),
            (ContextAction::PlayAll, Pending::Album(album)) => self.play_album(album),
            (ContextAction::InstantMix, Pending::Artist(artist)) => {
                self.start_instant_mix(artist.id, artist.name);
            }
            (ContextAction::InstantMix, Pending::Album(album)) => {
                self.start_instant_mix(album.id, album.name);
            }
            (ContextAction::InstantMix, Pending::Songs(songs)) => {
                if let Some(song) = songs.into_iter().next() {
                    self.start_instant_mix(song.id, song.name);
                }
            }
            (ContextAction::ShowSimilar, Pending::Artist(artist)) => {
                self.show_similar_artists(artist).await;
            }
            (ContextAction::ShowSimilar, Pending::Album(album)) => {
                // An artist discography asks for similar artists, a plain
                // album listing for similar albums. Flat listings (latest,
                // genre, similar results) offer neither.
                let (config, artist) = {
                    let model = self.model.lock().await;
                    (
                        model.screens.albums.config,
                        model.screens.albums.artist.clone(),
                    )
                };
                if config.similar {
                    match artist.filter(|_| config.artist_mode) {
                        Some(artist) => self.show_similar_artists(artist).await,
                        None => self.show_similar_albums(album).await,
                    }
                }
            }
            (ContextAction::ViewArtist, Pending::Album(album)) => {
                if !album.artist_id.is_empty() {
                    self.select_artist(Artist {
                        id: album.artist_id,
                        name: album.artist,
                        ..Default::default()
                    })
                    .await;
                }
            }
            (ContextAction::OpenInBrowser, Pending::Artist(artist)) => {
                self.open_in_browser(&artist.id);
            }
            (ContextAction::OpenInBrowser, Pending::Album(album)) => {
                self.open_in_browser(&album.id);
            }
            (ContextAction::ClearQueue, _) => self.clear_queue(),
            _ => {}
        }
    }

    pub(crate) fn queue_songs(&self, songs: Vec<Song>) {
        if songs.is_empty() {
            return;
        }
        let queue = self.queue.clone();
        tokio::spawn(async move {
            if let Err(err) = queue.add_songs(songs).await {
                error!(%err, "enqueue failed");
            }
        });
    }

    fn play_album(&self, album: Album) {
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.catalogue.album_songs(&album.id).await {
                Ok(songs) => controller.queue_songs(songs),
                Err(err) => error!(%err, album = album.name, "album fetch for playback failed"),
            }
        });
    }

    fn start_instant_mix(&self, id: String, name: String) {
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.catalogue.instant_mix(&id).await {
                Ok(songs) if !songs.is_empty() => controller.queue_songs(songs),
                Ok(_) => {
                    let mut model = controller.model.lock().await;
                    Self::show_message(&mut model, format!("No instant mix for {name}"));
                }
                Err(err) => error!(%err, "instant mix failed"),
            }
        });
    }

    fn clear_queue(&self) {
        let queue = self.queue.clone();
        tokio::spawn(async move {
            if let Err(err) = queue.clear_queue(false).await {
                error!(%err, "queue clear failed");
            }
        });
    }

    fn open_in_browser(&self, id: &str) {
        let url = self.catalogue.item_url(id);
        info!(url, "opening in browser");
        if let Err(err) = open::that_detached(&url) {
            error!(%err, url, "browser open failed");
        }
    }
}

/// Context-menu target captured under the model lock.
enum Pending {
    Artist(Artist),
    Album(Album),
    Songs(Vec<Song>),
    None,
}

fn song_activation(list: &PagedList<Song>) -> Activation {
    list.selected_item()
        .cloned()
        .map_or(Activation::None, |s| Activation::PlaySongs(vec![s]))
}

fn single_song(list: &PagedList<Song>) -> Pending {
    list.selected_item()
        .cloned()
        .map_or(Pending::None, |s| Pending::Songs(vec![s]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockItemCatalogue, MockPlayer, MockQueueControl};
    use crate::config::PlayerConfig;
    use crate::model::{AppModel, ItemKind, SearchItem};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn controller_with(catalogue: MockItemCatalogue) -> AppController {
        AppController::new(
            Arc::new(Mutex::new(AppModel::new())),
            Arc::new(catalogue),
            Arc::new(MockQueueControl::new()),
            Arc::new(MockPlayer::new()),
            PlayerConfig::default(),
        )
    }

    fn artist(id: &str, name: &str) -> Artist {
        Artist {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    fn album(id: &str, name: &str) -> Album {
        Album {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn artist_drill_down_populates_albums_and_chains_back() {
        let mut catalogue = MockItemCatalogue::new();
        catalogue
            .expect_artist_albums()
            .returning(|_| Ok(vec![album("al1", "First")]));
        let controller = controller_with(catalogue);
        {
            let mut model = controller.model.lock().await;
            model.show_screen(ScreenId::Artists, false);
        }
        let generation = controller.model.lock().await.begin_navigation();
        controller
            .load_artist_albums(artist("a1", "Ana"), generation)
            .await
            .unwrap();

        let mut model = controller.model.lock().await;
        assert_eq!(model.current(), Some(ScreenId::Albums));
        assert_eq!(model.screens.albums.list.len(), 1);
        assert_eq!(model.screens.albums.config, AlbumListConfig::ARTIST);
        assert_eq!(model.screens.albums.title, "Ana");
        assert!(model.back());
        assert_eq!(model.current(), Some(ScreenId::Artists));
    }

    #[tokio::test]
    async fn superseded_fetch_is_discarded() {
        let mut catalogue = MockItemCatalogue::new();
        catalogue
            .expect_artist_albums()
            .returning(|_| Ok(vec![album("al1", "First")]));
        let controller = controller_with(catalogue);

        let stale = controller.model.lock().await.begin_navigation();
        let _newer = controller.model.lock().await.begin_navigation();
        controller
            .load_artist_albums(artist("a1", "Ana"), stale)
            .await
            .unwrap();

        let model = controller.model.lock().await;
        assert_eq!(model.current(), None);
        assert!(model.screens.albums.list.is_empty());
    }

    #[tokio::test]
    async fn switching_to_the_queue_discards_a_late_category_fetch() {
        let mut catalogue = MockItemCatalogue::new();
        catalogue
            .expect_artists()
            .returning(|_| Ok((vec![artist("a1", "Ana")], 1)));
        let controller = controller_with(catalogue);

        // The queue switch involves no fetch of its own, but it must
        // still supersede the artists fetch already in flight.
        let generation = controller.model.lock().await.begin_navigation();
        controller.show_queue().await;
        controller
            .load_artists(Paging::new(100), generation)
            .await
            .unwrap();

        let model = controller.model.lock().await;
        assert_eq!(model.current(), Some(ScreenId::Queue));
        assert!(model.screens.artists.list.is_empty());
    }

    #[tokio::test]
    async fn flat_album_listings_do_not_offer_similar_lookups() {
        let catalogue = MockItemCatalogue::new();
        let controller = controller_with(catalogue);
        {
            let mut model = controller.model.lock().await;
            model.screens.albums.config = AlbumListConfig::FLAT;
            model.screens.albums.artist = None;
            model.screens.albums.list.set_items(vec![album("al1", "First")]);
            model.show_screen(ScreenId::Albums, false);
        }

        controller.run_context_action(ContextAction::ShowSimilar).await;

        let model = controller.model.lock().await;
        assert_eq!(model.current(), Some(ScreenId::Albums));
        assert!(!model.modal.has_modal());
    }

    #[tokio::test]
    async fn help_key_toggles_the_modal() {
        let mut catalogue = MockItemCatalogue::new();
        catalogue
            .expect_server_stats()
            .returning(|| Err(anyhow::anyhow!("offline")));
        let controller = controller_with(catalogue);

        controller.show_help().await;
        assert_eq!(
            controller.model.lock().await.modal.active(),
            Some(ModalKind::Help)
        );

        controller.show_help().await;
        assert!(!controller.model.lock().await.modal.has_modal());
    }

    #[tokio::test]
    async fn category_fetch_failure_leaves_navigation_unchanged() {
        let mut catalogue = MockItemCatalogue::new();
        catalogue
            .expect_artists()
            .returning(|_| Err(anyhow::anyhow!("server unreachable")));
        let controller = controller_with(catalogue);

        let generation = controller.model.lock().await.begin_navigation();
        let result = controller
            .load_artists(Paging::new(100), generation)
            .await;
        assert!(result.is_err());

        let model = controller.model.lock().await;
        assert_eq!(model.current(), None);
        assert!(model.screens.artists.list.is_empty());
    }

    #[tokio::test]
    async fn search_skips_failing_item_types() {
        let mut catalogue = MockItemCatalogue::new();
        catalogue.expect_search().returning(|kind, _| match kind {
            ItemKind::Song => Ok(vec![
                SearchItem::Song(Song {
                    id: "s1".into(),
                    name: "One".into(),
                    ..Default::default()
                }),
                SearchItem::Song(Song {
                    id: "s2".into(),
                    name: "Two".into(),
                    ..Default::default()
                }),
            ]),
            ItemKind::Album => Ok(Vec::new()),
            _ => Err(anyhow::anyhow!("bad request")),
        });
        let controller = controller_with(catalogue);

        let generation = controller.model.lock().await.begin_navigation();
        controller.run_search("two".into(), generation).await;

        let model = controller.model.lock().await;
        let search = &model.screens.search;
        assert_eq!(search.sections.len(), 1);
        assert_eq!(search.sections[0].kind, ItemKind::Song);
        assert_eq!(search.sections[0].list.len(), 2);
        assert!(!search.input_active);
        assert_eq!(model.current(), Some(ScreenId::Search));
    }

    #[tokio::test]
    async fn empty_similar_listing_shows_a_message_instead_of_navigating() {
        let mut catalogue = MockItemCatalogue::new();
        catalogue
            .expect_similar_artists()
            .returning(|_| Ok(Vec::new()));
        let controller = controller_with(catalogue);
        {
            let mut model = controller.model.lock().await;
            model.show_screen(ScreenId::Artists, false);
        }

        let generation = controller.model.lock().await.begin_navigation();
        controller
            .load_similar_artists(artist("a1", "Ana"), generation)
            .await
            .unwrap();

        let model = controller.model.lock().await;
        assert_eq!(model.current(), Some(ScreenId::Artists));
        assert_eq!(model.modal.active(), Some(crate::model::ModalKind::Message));
        assert!(model.ui.message.contains("Ana"));
    }

    #[tokio::test]
    async fn page_change_keeps_the_issued_page_on_the_result() {
        let mut catalogue = MockItemCatalogue::new();
        catalogue
            .expect_artists()
            .returning(|paging: Paging| {
                let items = (0..10).map(|i| artist(&format!("a{i}"), "x")).collect();
                assert_eq!(paging.offset(), paging.current_page() * paging.page_size());
                Ok((items, 250))
            });
        let controller = controller_with(catalogue);

        let generation = controller.model.lock().await.begin_navigation();
        controller
            .load_artists(Paging::new(100), generation)
            .await
            .unwrap();
        {
            let model = controller.model.lock().await;
            let paging = model.screens.artists.list.paging().unwrap();
            assert_eq!(paging.total_pages(), 3);
            assert_eq!(paging.current_page(), 0);
        }

        let generation = controller.model.lock().await.begin_navigation();
        controller
            .load_artists(Paging::new(100).with_total(250).select_page(2), generation)
            .await
            .unwrap();
        let model = controller.model.lock().await;
        let paging = model.screens.artists.list.paging().unwrap();
        assert_eq!(paging.current_page(), 2);
    }
}
