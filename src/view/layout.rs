//! Layout structure (top bar, media bar sidebar, content, progress) and
//! the regions the controller hit-tests mouse events against.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{Focus, MediaCategory, Region, UiState};

pub const MEDIA_BAR_WIDTH: u16 = 26;

/// Rects of one frame, plus the inner row regions stored on the model
/// for mouse hit-testing.
pub struct AppLayout {
    pub top_bar: Rect,
    pub media_bar: Rect,
    pub content: Rect,
    pub progress: Rect,
    /// Inner rows of the media bar, one category per row.
    pub media_rows: Region,
    /// Inner rows of the content list, below any header banner.
    pub list_rows: Region,
}

impl AppLayout {
    /// `header_rows` is how much of the content box the current screen
    /// spends above its list (banner or search input), zero for plain
    /// list screens.
    pub fn compute(area: Rect, header_rows: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + key hints
                Constraint::Min(0),    // Media bar + content
                Constraint::Length(3), // Progress bar
            ])
            .split(area);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MEDIA_BAR_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);

        let media_bar = main_chunks[0];
        let content = main_chunks[1];

        Self {
            top_bar: chunks[0],
            media_bar,
            content,
            progress: chunks[2],
            media_rows: inner_rows(media_bar, 0),
            list_rows: inner_rows(content, header_rows),
        }
    }
}

/// The rows inside a bordered block, with `skip` rows reserved at the top.
fn inner_rows(rect: Rect, skip: u16) -> Region {
    let width = rect.width.saturating_sub(2);
    let height = rect.height.saturating_sub(2).saturating_sub(skip);
    if width == 0 || height == 0 {
        return Region::default();
    }
    Region {
        x: rect.x + 1,
        y: rect.y + 1 + skip,
        width,
        height,
    }
}

pub fn render_top_bar(frame: &mut Frame, area: Rect) {
    let hints =
        "F1 Help  F2 Search  F3 Queue  F4 History  F5 Play/Pause  Tab Focus  q Quit";
    let bar = Paragraph::new("mellow")
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1))
                .title_bottom(Line::from(format!(" {hints} ")).right_aligned()),
        );
    frame.render_widget(bar, area);
}

pub fn render_media_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let focused = ui_state.focus == Focus::MediaBar;

    let items: Vec<ListItem> = MediaCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let count = match ui_state.media_counts[i] {
                Some(n) => format!(" ({n})"),
                None => String::new(),
            };
            let style = if i == ui_state.media_selected && focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == ui_state.media_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{}{}", category.label(), count)).style(style)
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Media ")
            .border_style(border_style),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_nest_inside_their_blocks() {
        let layout = AppLayout::compute(Rect::new(0, 0, 120, 40), 0);
        assert_eq!(layout.media_bar.width, MEDIA_BAR_WIDTH);
        assert_eq!(layout.media_bar.x + layout.media_bar.width, layout.content.x);

        let m = layout.media_rows;
        assert!(m.x > layout.media_bar.x);
        assert!(m.y > layout.media_bar.y);
        assert_eq!(m.width, MEDIA_BAR_WIDTH - 2);

        let l = layout.list_rows;
        assert!(l.x > layout.content.x);
        assert_eq!(l.height, layout.content.height - 2);
        // The two hit-test regions never overlap.
        assert!(m.x + m.width <= l.x);
    }

    #[test]
    fn header_rows_shrink_the_list_region() {
        let plain = AppLayout::compute(Rect::new(0, 0, 120, 40), 0);
        let banner = AppLayout::compute(Rect::new(0, 0, 120, 40), 4);
        assert_eq!(banner.list_rows.y, plain.list_rows.y + 4);
        assert_eq!(banner.list_rows.height, plain.list_rows.height - 4);
    }

    #[test]
    fn tiny_terminals_do_not_underflow() {
        let layout = AppLayout::compute(Rect::new(0, 0, 4, 3), 4);
        assert_eq!(layout.list_rows, Region::default());
        assert_eq!(layout.media_rows, Region::default());
    }
}
