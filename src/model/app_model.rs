//! Main application model: screen stack, focus, modal slot and the
//! navigation generation counter.

use super::modal::ModalManager;
use super::playback::SharedStatus;
use super::screens::{ScreenId, Screens};
use super::types::{Focus, NavMode, Region, UiState};

pub struct AppModel {
    pub screens: Screens,
    pub ui: UiState,
    pub modal: ModalManager,
    pub status: SharedStatus,
    /// Content-list geometry from the last computed layout, for mouse
    /// hit-testing. None until the first frame.
    pub list_region: Option<Region>,
    pub media_region: Option<Region>,
    stack: Vec<ScreenId>,
    current: Option<ScreenId>,
    generation: u64,
    should_quit: bool,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            screens: Screens::new(),
            ui: UiState::default(),
            modal: ModalManager::new(),
            status: SharedStatus::new(),
            list_region: None,
            media_region: None,
            stack: Vec::new(),
            current: None,
            generation: 0,
            should_quit: false,
        }
    }

    pub fn current(&self) -> Option<ScreenId> {
        self.current
    }

    pub fn nav_mode(&self) -> NavMode {
        if self.modal.has_modal() {
            NavMode::ModalActive
        } else {
            match self.ui.focus {
                Focus::Content => NavMode::ScreenFocused,
                Focus::MediaBar if self.current.is_some() => NavMode::ViewingScreen,
                Focus::MediaBar => NavMode::NavigatingMediaBar,
            }
        }
    }

    /// Make `id` the current screen and move focus into it.
    ///
    /// A drill-down pushes the prior screen so "back" can return to it; a
    /// lateral category switch starts a fresh navigation context instead.
    /// Re-entering a screen already on the stack truncates the stack at
    /// its earlier occurrence, so a screen can never become its own
    /// ancestor.
    pub fn show_screen(&mut self, id: ScreenId, drill_down: bool) {
        // Every switch of the visible screen supersedes in-flight
        // fetches, fetch-backed or not; a late result must not steal
        // the screen the user moved to.
        self.generation += 1;
        if self.current == Some(id) {
            // A lateral re-selection still starts a fresh context.
            if !drill_down {
                self.stack.clear();
            }
            self.ui.focus = Focus::Content;
            return;
        }
        if drill_down {
            if let Some(pos) = self.stack.iter().position(|s| *s == id) {
                self.stack.truncate(pos);
            }
            if let Some(prev) = self.current {
                debug_assert!(!self.stack.contains(&prev));
                self.stack.push(prev);
            }
        } else {
            self.stack.clear();
        }
        self.screens.set_header_focused(id, false);
        self.current = Some(id);
        self.ui.focus = Focus::Content;
    }

    /// Follow the back link. No-op (returns false) at the root.
    pub fn back(&mut self) -> bool {
        match self.stack.pop() {
            Some(prev) => {
                self.generation += 1;
                if let Some(left) = self.current {
                    self.screens.set_header_focused(left, false);
                }
                self.current = Some(prev);
                true
            }
            None => false,
        }
    }

    /// Start a navigation request, superseding any in flight. The returned
    /// tag must match [`Self::generation_current`] when the fetch lands,
    /// otherwise the result is stale and must be discarded.
    pub fn begin_navigation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn generation_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn toggle_focus(&mut self) {
        self.ui.focus = match self.ui.focus {
            Focus::MediaBar if self.current.is_some() => Focus::Content,
            Focus::MediaBar => Focus::MediaBar,
            Focus::Content => Focus::MediaBar,
        };
    }

    pub fn media_bar_move(&mut self, down: bool) {
        let max = crate::model::MediaCategory::ALL.len() - 1;
        if down {
            self.ui.media_selected = (self.ui.media_selected + 1).min(max);
        } else {
            self.ui.media_selected = self.ui.media_selected.saturating_sub(1);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self) {
        self.should_quit = true;
    }

    #[cfg(test)]
    pub(crate) fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Focus;

    #[test]
    fn drill_downs_then_equal_backs_restore_the_origin() {
        let mut m = AppModel::new();
        m.show_screen(ScreenId::Artists, false);

        m.show_screen(ScreenId::Albums, true);
        m.show_screen(ScreenId::AlbumSongs, true);
        assert_eq!(m.current(), Some(ScreenId::AlbumSongs));

        assert!(m.back());
        assert_eq!(m.current(), Some(ScreenId::Albums));
        assert!(m.back());
        assert_eq!(m.current(), Some(ScreenId::Artists));

        // Back at the root is a no-op.
        assert!(!m.back());
        assert_eq!(m.current(), Some(ScreenId::Artists));
    }

    #[test]
    fn lateral_switch_does_not_chain_history() {
        let mut m = AppModel::new();
        m.show_screen(ScreenId::Artists, false);
        m.show_screen(ScreenId::Albums, true);
        // Picking a category in the media bar is lateral: fresh context.
        m.show_screen(ScreenId::Playlists, false);
        assert!(!m.back());
        assert_eq!(m.current(), Some(ScreenId::Playlists));
    }

    #[test]
    fn reentering_a_stacked_screen_cannot_create_a_cycle() {
        let mut m = AppModel::new();
        m.show_screen(ScreenId::Artists, false);
        m.show_screen(ScreenId::Albums, true);
        // "Show similar artists" drills back into the artists screen.
        m.show_screen(ScreenId::Artists, true);
        assert_eq!(m.current(), Some(ScreenId::Artists));
        assert_eq!(m.stack_depth(), 1);
        assert!(m.back());
        assert_eq!(m.current(), Some(ScreenId::Albums));
        assert!(!m.back());
    }

    #[test]
    fn showing_the_current_screen_again_only_refocuses() {
        let mut m = AppModel::new();
        m.show_screen(ScreenId::Songs, false);
        m.ui.focus = Focus::MediaBar;
        m.show_screen(ScreenId::Songs, true);
        assert_eq!(m.ui.focus, Focus::Content);
        assert_eq!(m.stack_depth(), 0);
    }

    #[test]
    fn nav_mode_reflects_focus_modal_and_history() {
        let mut m = AppModel::new();
        m.ui.focus = Focus::MediaBar;
        assert_eq!(m.nav_mode(), NavMode::NavigatingMediaBar);

        m.show_screen(ScreenId::Artists, false);
        assert_eq!(m.nav_mode(), NavMode::ScreenFocused);

        m.ui.focus = Focus::MediaBar;
        assert_eq!(m.nav_mode(), NavMode::ViewingScreen);

        use crate::model::{ModalKind, ModalSize};
        m.modal
            .show(ModalKind::Help, ModalSize::DynamicLarge, m.ui.focus);
        assert_eq!(m.nav_mode(), NavMode::ModalActive);
    }

    #[test]
    fn screen_switches_supersede_inflight_fetches() {
        let mut m = AppModel::new();
        m.show_screen(ScreenId::Artists, false);

        // Switching to a fetch-less screen (queue, search) still
        // invalidates an outstanding navigation tag.
        let fetch = m.begin_navigation();
        m.show_screen(ScreenId::Queue, true);
        assert!(!m.generation_current(fetch));

        let fetch = m.begin_navigation();
        assert!(m.back());
        assert!(!m.generation_current(fetch));
    }

    #[test]
    fn stale_generation_is_detected() {
        let mut m = AppModel::new();
        let first = m.begin_navigation();
        let second = m.begin_navigation();
        assert!(!m.generation_current(first));
        assert!(m.generation_current(second));
    }
}
