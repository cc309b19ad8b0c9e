//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{AudioStatus, PlayState};
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, status: &AudioStatus) {
    let title = match (&status.song, status.state) {
        (None, _) | (_, PlayState::Stop) => " ■ Nothing playing ".to_string(),
        (Some(song), PlayState::Play) => {
            format!(" ▶ {} | {} ({}) ", song.name, song.artist, song.album)
        }
        (Some(song), PlayState::Pause) => {
            format!(" ⏸ {} | {} ({}) ", song.name, song.artist, song.album)
        }
    };

    let duration_ms = status.duration_ms();
    let ratio = if duration_ms > 0 {
        (status.position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let time_str = format!(
        "{} / {}",
        format_duration(status.position_ms),
        format_duration(duration_ms)
    );
    let volume_text = format!(" Vol: {}% ", status.volume.percent());

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(volume_text).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
