//! View module - UI rendering
//!
//! All rendering reads a locked model snapshot; the only writes back are
//! the layout geometry (hit-test regions, viewport heights) the
//! controller needs for mouse handling and scrolling.
//!
//! - `utils`: shared formatting helpers
//! - `layout`: frame structure (top bar, media bar, content, progress)
//! - `content`: main content area per screen
//! - `progress`: playback status bar
//! - `overlays`: modal overlays (help, message)

mod content;
mod layout;
mod overlays;
mod progress;
mod utils;

use ratatui::Frame;

use crate::model::AppModel;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &mut AppModel) {
        let computed = layout::AppLayout::compute(frame.area(), content::header_rows(model));

        // Geometry feeds back into the model: mouse hit-testing and
        // scroll clamping must agree with what this frame shows.
        model.media_region = Some(computed.media_rows);
        model.list_region = Some(computed.list_rows);
        if let Some(current) = model.current() {
            model
                .screens
                .set_viewport_rows(current, computed.list_rows.height as usize);
        }

        layout::render_top_bar(frame, computed.top_bar);
        layout::render_media_bar(frame, computed.media_bar, &model.ui);
        content::render_content(frame, computed.content, model);

        let status = model.status.load();
        progress::render_progress_bar(frame, computed.progress, &status);

        if let (Some(kind), Some(size)) = (model.modal.active(), model.modal.size()) {
            overlays::render_modal(frame, &model.ui, kind, size);
        }
    }
}
