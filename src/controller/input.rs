//! Keyboard and mouse dispatch.
//!
//! Key handling is layered: global playback keys first (they work in
//! every state, including while typing a search query), then the nav-bar
//! chrome (quit, help, search, queue, history, focus toggle), then
//! whatever owns the focus - a modal, the media bar or the content
//! screen. Mouse events are hit-tested against the regions the last
//! layout pass stored on the model.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::model::{Focus, MediaCategory, Motion, NavMode, ScreenId, UiState};

use super::AppController;

impl AppController {
    pub async fn handle_key(&self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if self.handle_playback_key(key.code).await {
            return;
        }
        if self.handle_navbar_key(&key).await {
            return;
        }
        let mode = self.model.lock().await.nav_mode();
        match mode {
            NavMode::ModalActive => self.handle_modal_key(key.code).await,
            NavMode::NavigatingMediaBar | NavMode::ViewingScreen => {
                self.handle_media_bar_key(key.code).await;
            }
            NavMode::ScreenFocused => self.handle_screen_key(key.code).await,
        }
    }

    async fn handle_navbar_key(&self, key: &KeyEvent) -> bool {
        let keys = &self.keys;
        let code = key.code;

        // Ctrl-C / Ctrl-Q quit unconditionally.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.model.lock().await.set_should_quit();
            return true;
        }
        if code == keys.quit {
            let mut model = self.model.lock().await;
            // A letter quit key must still be typable in the search input.
            let typing = model.current() == Some(ScreenId::Search)
                && model.screens.search.input_active
                && model.nav_mode() == NavMode::ScreenFocused;
            if !typing {
                model.set_should_quit();
                return true;
            }
            return false;
        }
        if code == keys.toggle_focus {
            let mut model = self.model.lock().await;
            if model.modal.has_modal() {
                Self::close_modal(&mut model);
            } else {
                model.toggle_focus();
            }
            return true;
        }
        if code == keys.help {
            self.show_help().await;
        } else if code == keys.search {
            {
                let mut model = self.model.lock().await;
                if model.modal.has_modal() {
                    Self::close_modal(&mut model);
                }
            }
            self.start_search().await;
        } else if code == keys.queue {
            self.show_queue().await;
        } else if code == keys.history {
            self.show_history().await;
        } else {
            return false;
        }
        true
    }

    async fn handle_modal_key(&self, code: KeyCode) {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            let mut model = self.model.lock().await;
            Self::close_modal(&mut model);
        }
    }

    async fn handle_media_bar_key(&self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.model.lock().await.media_bar_move(false);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.model.lock().await.media_bar_move(true);
            }
            KeyCode::Enter => {
                let category = self.model.lock().await.ui.selected_category();
                self.select_media(category).await;
            }
            _ => {}
        }
    }

    async fn handle_screen_key(&self, code: KeyCode) {
        let mut model = self.model.lock().await;
        let Some(current) = model.current() else {
            return;
        };

        if model.screens.menu_open(current) {
            match code {
                KeyCode::Up => model.screens.menu_move(current, false),
                KeyCode::Down => model.screens.menu_move(current, true),
                KeyCode::Esc | KeyCode::Char('m') => model.screens.close_menu(current),
                KeyCode::Enter => {
                    if let Some(action) = model.screens.menu_action(current) {
                        drop(model);
                        self.run_context_action(action).await;
                    }
                }
                _ => {}
            }
            return;
        }

        if current == ScreenId::Search && model.screens.search.input_active {
            match code {
                KeyCode::Char(c) => model.screens.search.query.push(c),
                KeyCode::Backspace => {
                    model.screens.search.query.pop();
                }
                KeyCode::Esc => model.screens.search.input_active = false,
                KeyCode::Down => model.screens.search.input_active = false,
                KeyCode::Enter => {
                    drop(model);
                    self.submit_search().await;
                }
                _ => {}
            }
            return;
        }

        let has_header = model.screens.has_header(current);
        if has_header && model.screens.header_focused(current) {
            match code {
                // Activating the header banner goes back to the parent.
                KeyCode::Enter | KeyCode::Backspace | KeyCode::Esc => {
                    model.back();
                }
                KeyCode::Down => model.screens.set_header_focused(current, false),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                let at_top = model.screens.selected_index(current) == Some(0);
                if current == ScreenId::Search && at_top {
                    model.screens.search.input_active = true;
                } else if has_header && at_top {
                    model.screens.set_header_focused(current, true);
                } else {
                    model.screens.move_selection(current, Motion::Up);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                model.screens.move_selection(current, Motion::Down);
            }
            KeyCode::PageUp => model.screens.move_selection(current, Motion::PageUp),
            KeyCode::PageDown => model.screens.move_selection(current, Motion::PageDown),
            KeyCode::Home => model.screens.move_selection(current, Motion::First),
            KeyCode::End => model.screens.move_selection(current, Motion::Last),
            KeyCode::Left => {
                if current == ScreenId::Search {
                    model.screens.search.prev_section();
                } else {
                    drop(model);
                    self.change_page(false).await;
                }
            }
            KeyCode::Right => {
                if current == ScreenId::Search {
                    model.screens.search.next_section();
                } else {
                    drop(model);
                    self.change_page(true).await;
                }
            }
            KeyCode::Enter => {
                drop(model);
                self.activate_selected().await;
            }
            KeyCode::Backspace | KeyCode::Esc => {
                model.back();
            }
            KeyCode::Char('m') => model.screens.open_menu(current),
            KeyCode::Char('/') if current == ScreenId::Search => {
                model.screens.search.input_active = true;
            }
            _ => {}
        }
    }

    pub async fn handle_mouse(&self, mouse: MouseEvent) {
        let mut model = self.model.lock().await;
        if model.modal.has_modal() {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                Self::close_modal(&mut model);
            }
            return;
        }
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let double = register_click(&mut model.ui, x, y, self.config.double_click_ms);
                if let Some(region) = model.media_region {
                    if region.contains(x, y) {
                        let row = (y - region.y) as usize;
                        if row < MediaCategory::ALL.len() {
                            model.ui.focus = Focus::MediaBar;
                            model.ui.media_selected = row;
                            let category = model.ui.selected_category();
                            drop(model);
                            self.select_media(category).await;
                        }
                        return;
                    }
                }
                if let Some(region) = model.list_region {
                    if region.contains(x, y) {
                        let Some(current) = model.current() else {
                            return;
                        };
                        if model.screens.menu_open(current) {
                            model.screens.close_menu(current);
                            return;
                        }
                        model.ui.focus = Focus::Content;
                        model.screens.set_header_focused(current, false);
                        let row = (y - region.y) as usize;
                        if model.screens.click_row(current, row) && double {
                            drop(model);
                            self.activate_selected().await;
                        }
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(region) = model.list_region {
                    if region.contains(x, y) {
                        let Some(current) = model.current() else {
                            return;
                        };
                        model.ui.focus = Focus::Content;
                        let row = (y - region.y) as usize;
                        if model.screens.click_row(current, row) {
                            model.screens.open_menu(current);
                        }
                    }
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let down = mouse.kind == MouseEventKind::ScrollDown;
                if model.media_region.is_some_and(|r| r.contains(x, y)) {
                    model.media_bar_move(down);
                } else if model.list_region.is_some_and(|r| r.contains(x, y)) {
                    if let Some(current) = model.current() {
                        let motion = if down { Motion::Down } else { Motion::Up };
                        model.screens.move_selection(current, motion);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Record a click and report whether it completes a double-click: same
/// cell, within the configured interval. A completed double-click resets
/// the state so a third click starts over.
pub(crate) fn register_click(ui: &mut UiState, x: u16, y: u16, interval_ms: u64) -> bool {
    let now = Instant::now();
    let double = matches!(
        ui.last_click,
        Some((at, lx, ly))
            if lx == x && ly == y && now.duration_since(at) <= Duration::from_millis(interval_ms)
    );
    ui.last_click = if double { None } else { Some((now, x, y)) };
    double
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockItemCatalogue, MockPlayer, MockQueueControl};
    use crate::config::PlayerConfig;
    use crate::model::{AppModel, ModalKind, ModalSize, Song};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn controller() -> AppController {
        AppController::new(
            Arc::new(Mutex::new(AppModel::new())),
            Arc::new(MockItemCatalogue::new()),
            Arc::new(MockQueueControl::new()),
            Arc::new(MockPlayer::new()),
            PlayerConfig::default(),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn song(id: &str) -> Song {
        Song {
            id: id.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn tab_closes_a_modal_before_toggling_focus() {
        let c = controller();
        {
            let mut model = c.model.lock().await;
            model.show_screen(ScreenId::Artists, false);
            model.ui.focus = Focus::MediaBar;
            model
                .modal
                .show(ModalKind::Help, ModalSize::DynamicLarge, Focus::MediaBar);
        }
        c.handle_key(press(KeyCode::Tab)).await;
        {
            let model = c.model.lock().await;
            assert!(!model.modal.has_modal());
            assert_eq!(model.ui.focus, Focus::MediaBar); // restored, not toggled
        }
        c.handle_key(press(KeyCode::Tab)).await;
        let model = c.model.lock().await;
        assert_eq!(model.ui.focus, Focus::Content);
    }

    #[tokio::test]
    async fn typing_edits_the_search_query() {
        let c = controller();
        {
            let mut model = c.model.lock().await;
            model.show_screen(ScreenId::Search, false);
            model.screens.search.input_active = true;
        }
        for code in [KeyCode::Char('a'), KeyCode::Char('b'), KeyCode::Char('q')] {
            c.handle_key(press(code)).await;
        }
        c.handle_key(press(KeyCode::Backspace)).await;
        let model = c.model.lock().await;
        assert_eq!(model.screens.search.query, "ab");
        assert!(!model.should_quit()); // the letter quit key was typed, not obeyed
    }

    #[tokio::test]
    async fn plain_quit_key_works_outside_the_search_input() {
        let c = controller();
        {
            let mut model = c.model.lock().await;
            model.show_screen(ScreenId::Artists, false);
        }
        c.handle_key(press(KeyCode::Char('q'))).await;
        assert!(c.model.lock().await.should_quit());
    }

    #[tokio::test]
    async fn up_from_the_first_row_moves_into_the_header_and_enter_goes_back() {
        let c = controller();
        {
            let mut model = c.model.lock().await;
            model.show_screen(ScreenId::Albums, false);
            model.show_screen(ScreenId::AlbumSongs, true);
            model
                .screens
                .album_songs
                .list
                .set_items(vec![song("s1"), song("s2")]);
        }
        c.handle_key(press(KeyCode::Up)).await;
        {
            let model = c.model.lock().await;
            assert!(model.screens.album_songs.header_focused);
        }
        c.handle_key(press(KeyCode::Enter)).await;
        let model = c.model.lock().await;
        assert_eq!(model.current(), Some(ScreenId::Albums));
    }

    #[tokio::test]
    async fn menu_keys_cycle_and_close() {
        let c = controller();
        {
            let mut model = c.model.lock().await;
            model.show_screen(ScreenId::Queue, false);
            model.screens.queue.list.set_items(vec![song("s1")]);
        }
        c.handle_key(press(KeyCode::Char('m'))).await;
        assert!(c.model.lock().await.screens.menu_open(ScreenId::Queue));
        c.handle_key(press(KeyCode::Esc)).await;
        let mut model = c.model.lock().await;
        assert!(!model.screens.menu_open(ScreenId::Queue));
    }

    #[test]
    fn double_click_requires_same_cell_within_interval() {
        let mut ui = UiState::default();
        assert!(!register_click(&mut ui, 4, 7, 1_000));
        assert!(register_click(&mut ui, 4, 7, 1_000));
        // The pair consumed the state; a third click starts over.
        assert!(!register_click(&mut ui, 4, 7, 1_000));

        // Different cell never pairs.
        let mut ui = UiState::default();
        assert!(!register_click(&mut ui, 4, 7, 1_000));
        assert!(!register_click(&mut ui, 5, 7, 1_000));

        // Zero interval cannot pair in practice.
        let mut ui = UiState::default();
        assert!(!register_click(&mut ui, 1, 1, 0));
        std::thread::sleep(Duration::from_millis(2));
        assert!(!register_click(&mut ui, 1, 1, 0));
    }
}
