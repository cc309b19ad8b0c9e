//! Modal overlays (help popup, message popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{ModalKind, ModalSize, UiState};

pub fn render_modal(frame: &mut Frame, ui_state: &UiState, kind: ModalKind, size: ModalSize) {
    let area = frame.area();
    let popup_area = modal_area(area, size);
    frame.render_widget(Clear, popup_area);
    match kind {
        ModalKind::Help => render_help(frame, popup_area, ui_state),
        ModalKind::Message => render_message(frame, popup_area, ui_state),
    }
}

fn modal_area(area: Rect, size: ModalSize) -> Rect {
    let (width, height) = match size {
        ModalSize::Fixed { width, height } => (
            width.min(area.width.saturating_sub(4)),
            height.min(area.height.saturating_sub(4)),
        ),
        ModalSize::DynamicLarge => (
            (area.width * 7 / 10).max(40).min(area.width),
            (area.height * 7 / 10).max(10).min(area.height),
        ),
    };
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn render_help(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let keybindings = [
        ("", "── Navigation ──"),
        ("↑ / ↓", "Move selection"),
        ("PgUp / PgDn", "Move a screenful"),
        ("← / →", "Previous / next page"),
        ("Enter", "Open / Play"),
        ("Backspace / Esc", "Go back"),
        ("Tab", "Switch media bar / content"),
        ("m", "Item actions"),
        ("", ""),
        ("", "── Screens ──"),
        ("F2", "Search"),
        ("F3", "Queue"),
        ("F4", "History"),
        ("", ""),
        ("", "── Playback ──"),
        ("F5", "Play / Pause"),
        ("F6", "Stop"),
        ("F7 / F8", "Previous / next track"),
        ("F9 / F10", "Seek back / forward"),
        ("F11 / F12", "Volume down / up"),
        ("", ""),
        ("", "── General ──"),
        ("F1", "Toggle this help"),
        ("q", "Quit"),
    ];

    let mut lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    if let Some(stats) = &ui_state.server_stats {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{:^38}", "── Server ──"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "  {} {}",
            stats.server_name, stats.server_version
        )));
        lines.push(Line::from(format!(
            "  {} artists, {} albums, {} songs, {} playlists",
            stats.artist_count, stats.album_count, stats.song_count, stats.playlist_count
        )));
    }

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(help, area);
}

fn render_message(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let message = Paragraph::new(ui_state.message.clone())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Notice (Esc to dismiss) ")
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(message, area);
}
