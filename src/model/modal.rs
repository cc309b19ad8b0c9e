//! Single-slot modal overlay management.
//!
//! At most one modal is visible at a time. Showing a second one, or
//! closing when none is active, is logged and ignored rather than
//! escalated.

use super::types::Focus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    Help,
    Message,
}

/// How the overlay should be sized over the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalSize {
    Fixed { width: u16, height: u16 },
    DynamicLarge,
}

#[derive(Default)]
pub struct ModalManager {
    active: Option<(ModalKind, ModalSize)>,
    last_focus: Option<Focus>,
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_modal(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<ModalKind> {
        self.active.map(|(kind, _)| kind)
    }

    pub fn size(&self) -> Option<ModalSize> {
        self.active.map(|(_, size)| size)
    }

    /// Show a modal, capturing the focus to restore on close.
    /// Returns false (and leaves the active modal untouched) if one is
    /// already visible.
    pub fn show(&mut self, kind: ModalKind, size: ModalSize, current_focus: Focus) -> bool {
        if self.active.is_some() {
            tracing::warn!(?kind, "modal already visible, ignoring show");
            return false;
        }
        self.active = Some((kind, size));
        self.last_focus = Some(current_focus);
        true
    }

    /// Close the active modal, returning the focus captured at show time.
    /// Returns None if no modal is active.
    pub fn close(&mut self) -> Option<Focus> {
        if self.active.is_none() {
            tracing::warn!("no modal to close");
            return None;
        }
        self.active = None;
        self.last_focus.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_show_leaves_first_modal_active() {
        let mut m = ModalManager::new();
        assert!(m.show(ModalKind::Help, ModalSize::DynamicLarge, Focus::Content));
        assert!(!m.show(
            ModalKind::Message,
            ModalSize::Fixed { width: 40, height: 5 },
            Focus::MediaBar
        ));
        assert!(m.has_modal());
        assert_eq!(m.active(), Some(ModalKind::Help));
        // The captured focus is the one from the accepted show.
        assert_eq!(m.close(), Some(Focus::Content));
    }

    #[test]
    fn close_without_modal_is_a_noop() {
        let mut m = ModalManager::new();
        assert_eq!(m.close(), None);
        assert!(!m.has_modal());
    }

    #[test]
    fn show_close_round_trip_restores_focus() {
        let mut m = ModalManager::new();
        m.show(
            ModalKind::Message,
            ModalSize::Fixed { width: 50, height: 3 },
            Focus::MediaBar,
        );
        assert_eq!(m.close(), Some(Focus::MediaBar));
        assert!(!m.has_modal());
        // State is fully cleared; the slot can be reused.
        assert!(m.show(ModalKind::Help, ModalSize::DynamicLarge, Focus::Content));
    }
}
