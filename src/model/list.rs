//! Generic scrollable, selectable list with optional paging and a
//! per-item context menu.
//!
//! Every concrete screen renders through one of these. Items and their
//! display state live in a single `Vec`, so selection can never point at
//! a row whose backing item was replaced separately.

use super::paging::Paging;

/// Action attached to a context-menu entry. Dispatched by the controller,
/// which is the single implementation of every operation listed here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextAction {
    Play,
    PlayAll,
    AddToQueue,
    InstantMix,
    ShowSimilar,
    ViewArtist,
    OpenInBrowser,
    ClearQueue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextEntry {
    pub label: &'static str,
    pub action: ContextAction,
}

pub const fn entry(label: &'static str, action: ContextAction) -> ContextEntry {
    ContextEntry { label, action }
}

#[derive(Clone, Debug)]
pub struct PagedList<T> {
    items: Vec<T>,
    selected: usize,
    offset: usize,
    viewport_rows: usize,
    paging: Option<Paging>,
    menu: Vec<ContextEntry>,
    menu_open: bool,
    menu_selected: usize,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            offset: 0,
            viewport_rows: 1,
            paging: None,
            menu: Vec::new(),
            menu_open: false,
            menu_selected: 0,
        }
    }
}

impl<T> PagedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menu(mut self, entries: &[ContextEntry]) -> Self {
        self.menu = entries.to_vec();
        self
    }

    /// Replace all items atomically. Selection and scroll reset to the top.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.selected = 0;
        self.offset = 0;
        self.menu_open = false;
    }

    /// Replace all items, keeping the selection (clamped to the new length).
    /// The queue screen uses this so an external mutation does not yank the
    /// cursor back to the top.
    pub fn set_items_keep_selection(&mut self, items: Vec<T>) {
        let selected = self.selected;
        self.items = items;
        self.selected = selected.min(self.items.len().saturating_sub(1));
        self.ensure_visible();
    }

    pub fn clear(&mut self) {
        self.set_items(Vec::new());
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.items.len().saturating_sub(1));
        self.ensure_visible();
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_visible();
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            self.ensure_visible();
        }
    }

    pub fn page_up(&mut self) {
        self.select(self.selected.saturating_sub(self.viewport_rows));
    }

    pub fn page_down(&mut self) {
        self.select(self.selected.saturating_add(self.viewport_rows));
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(self.items.len().saturating_sub(1));
    }

    /// Number of visible rows, set from the layout before drawing and
    /// hit-testing. Zero-height viewports are treated as one row.
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.ensure_visible();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Map a row inside the viewport to an item index, if one is there.
    pub fn row_at(&self, viewport_row: usize) -> Option<usize> {
        if viewport_row >= self.viewport_rows {
            return None;
        }
        let index = self.offset + viewport_row;
        (index < self.items.len()).then_some(index)
    }

    fn ensure_visible(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.viewport_rows {
            self.offset = self.selected + 1 - self.viewport_rows;
        }
    }

    // Paging is orthogonal to the item storage: a page transition always
    // requests a fresh fetch, there is no client-side page cache.

    pub fn set_paging(&mut self, paging: Option<Paging>) {
        self.paging = paging;
    }

    pub fn paging(&self) -> Option<Paging> {
        self.paging
    }

    // Context menu.

    pub fn has_menu(&self) -> bool {
        !self.menu.is_empty()
    }

    pub fn menu_entries(&self) -> &[ContextEntry] {
        &self.menu
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn open_menu(&mut self) {
        if self.has_menu() && !self.items.is_empty() {
            self.menu_open = true;
            self.menu_selected = 0;
        }
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn menu_selected(&self) -> usize {
        self.menu_selected
    }

    pub fn menu_move_up(&mut self) {
        self.menu_selected = self.menu_selected.saturating_sub(1);
    }

    pub fn menu_move_down(&mut self) {
        if self.menu_selected + 1 < self.menu.len() {
            self.menu_selected += 1;
        }
    }

    /// The action under the menu cursor, keyed to the selected item.
    pub fn menu_action(&self) -> Option<ContextAction> {
        self.menu_open
            .then(|| self.menu.get(self.menu_selected).map(|e| e.action))
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> PagedList<usize> {
        let mut l = PagedList::new();
        l.set_viewport_rows(5);
        l.set_items((0..n).collect());
        l
    }

    #[test]
    fn clear_and_repopulate_resets_selection() {
        let mut l = list_of(10);
        l.select(7);
        l.clear();
        assert_eq!(l.len(), 0);
        assert_eq!(l.selected(), 0);
        assert!(l.selected_item().is_none());

        // Repopulating with fewer items must not leave the old selection
        // pointing past the end.
        l.set_items(vec![1, 2, 3]);
        assert_eq!(l.selected(), 0);
        assert_eq!(l.selected_item(), Some(&1));
        assert_eq!(l.offset(), 0);
    }

    #[test]
    fn keep_selection_clamps_to_new_length() {
        let mut l = list_of(10);
        l.select(9);
        l.set_items_keep_selection(vec![0, 1, 2]);
        assert_eq!(l.selected(), 2);
        l.set_items_keep_selection(Vec::new());
        assert_eq!(l.selected(), 0);
    }

    #[test]
    fn movement_clamps_at_bounds() {
        let mut l = list_of(3);
        l.move_up();
        assert_eq!(l.selected(), 0);
        l.select_last();
        l.move_down();
        assert_eq!(l.selected(), 2);
        l.page_down();
        assert_eq!(l.selected(), 2);
        l.page_up();
        assert_eq!(l.selected(), 0);
    }

    #[test]
    fn scroll_follows_selection() {
        let mut l = list_of(20);
        l.select(12);
        // Selected row must be inside [offset, offset + viewport).
        assert!(l.offset() <= 12 && 12 < l.offset() + 5);
        l.select_first();
        assert_eq!(l.offset(), 0);
        l.select_last();
        assert_eq!(l.offset(), 15);
    }

    #[test]
    fn row_hit_testing_accounts_for_scroll() {
        let mut l = list_of(20);
        l.select(12); // offset becomes 8
        assert_eq!(l.row_at(0), Some(l.offset()));
        assert_eq!(l.row_at(4), Some(l.offset() + 4));
        assert_eq!(l.row_at(5), None); // outside viewport
        let mut short = list_of(2);
        assert_eq!(short.row_at(1), Some(1));
        assert_eq!(short.row_at(2), None); // inside viewport, past the items
        short.clear();
        assert_eq!(short.row_at(0), None);
    }

    #[test]
    fn menu_requires_entries_and_items() {
        let mut bare = list_of(3);
        bare.open_menu();
        assert!(!bare.menu_open());

        let mut l = PagedList::new().with_menu(&[
            entry("Play", ContextAction::Play),
            entry("Instant mix", ContextAction::InstantMix),
        ]);
        l.open_menu();
        assert!(!l.menu_open()); // no items yet
        l.set_items(vec![1]);
        l.open_menu();
        assert!(l.menu_open());
        l.menu_move_down();
        assert_eq!(l.menu_action(), Some(ContextAction::InstantMix));
        l.menu_move_down();
        assert_eq!(l.menu_action(), Some(ContextAction::InstantMix));
        l.close_menu();
        assert_eq!(l.menu_action(), None);
    }

    #[test]
    fn set_items_closes_open_menu() {
        let mut l = PagedList::new().with_menu(&[entry("Play", ContextAction::Play)]);
        l.set_items(vec![1, 2]);
        l.open_menu();
        l.set_items(vec![3]);
        assert!(!l.menu_open());
    }
}
