//! Main content area rendering (screen lists, header banners, search,
//! context-menu popup)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{
    AppModel, ContextEntry, Focus, PagedList, ScreenId, SearchScreen, Song,
};
use super::utils::{format_duration_sec, page_indicator, truncate_string};

/// Rows a header banner takes inside the content box.
pub const HEADER_ROWS: u16 = 4;
/// Rows the search input and section tabs take.
pub const SEARCH_HEADER_ROWS: u16 = 2;

/// How much of the content box the current screen spends above its list.
pub fn header_rows(model: &AppModel) -> u16 {
    match model.current() {
        Some(ScreenId::Albums | ScreenId::AlbumSongs | ScreenId::PlaylistSongs) => HEADER_ROWS,
        Some(ScreenId::Search) => SEARCH_HEADER_ROWS,
        _ => 0,
    }
}

pub fn render_content(frame: &mut Frame, area: Rect, model: &AppModel) {
    let focused = model.ui.focus == Focus::Content && !model.modal.has_modal();
    let Some(current) = model.current() else {
        render_welcome(frame, area);
        return;
    };

    match current {
        ScreenId::Artists => {
            let screen = &model.screens.artists;
            let title = format!(
                " {}{} ",
                screen.title,
                page_indicator(screen.list.paging())
            );
            render_plain_list(frame, area, title, &screen.list, focused, |a| {
                format!(
                    "{}  ({} albums, {})",
                    a.name,
                    a.album_count,
                    format_duration_sec(a.total_duration_sec)
                )
            });
        }
        ScreenId::Albums => {
            let screen = &model.screens.albums;
            let title = format!(
                " {}{} ",
                screen.title,
                page_indicator(screen.list.paging())
            );
            let banner = match &screen.artist {
                Some(artist) => vec![
                    Line::from(Span::styled(
                        artist.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!(
                        "{} albums, {}{}",
                        artist.album_count,
                        format_duration_sec(artist.total_duration_sec),
                        if artist.favorite { ", favorite" } else { "" }
                    )),
                ],
                None => vec![Line::from(Span::styled(
                    screen.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))],
            };
            render_header_list(
                frame,
                area,
                title,
                banner,
                screen.header_focused,
                &screen.list,
                focused,
                |a| {
                    format!(
                        "{} ({})  {} songs, {}",
                        a.name,
                        a.year,
                        a.song_count,
                        format_duration_sec(a.duration_sec)
                    )
                },
            );
        }
        ScreenId::AlbumSongs => {
            let screen = &model.screens.album_songs;
            let (title, banner) = match &screen.album {
                Some(album) => (
                    format!(" {} ", album.name),
                    vec![
                        Line::from(Span::styled(
                            album.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        Line::from(format!(
                            "{} ({})  {} songs, {}",
                            album.artist,
                            album.year,
                            album.song_count,
                            format_duration_sec(album.duration_sec)
                        )),
                    ],
                ),
                None => (" Album ".to_string(), Vec::new()),
            };
            render_header_list(
                frame,
                area,
                title,
                banner,
                screen.header_focused,
                &screen.list,
                focused,
                song_row,
            );
        }
        ScreenId::Playlists => {
            let screen = &model.screens.playlists;
            render_plain_list(frame, area, " Playlists ".into(), &screen.list, focused, |p| {
                format!(
                    "{}  ({} songs, {})",
                    p.name,
                    p.song_count,
                    format_duration_sec(p.duration_sec)
                )
            });
        }
        ScreenId::PlaylistSongs => {
            let screen = &model.screens.playlist_songs;
            let (title, banner) = match &screen.playlist {
                Some(playlist) => (
                    format!(" {} ", playlist.name),
                    vec![
                        Line::from(Span::styled(
                            playlist.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        Line::from(format!(
                            "{} songs, {}",
                            playlist.song_count,
                            format_duration_sec(playlist.duration_sec)
                        )),
                    ],
                ),
                None => (" Playlist ".to_string(), Vec::new()),
            };
            render_header_list(
                frame,
                area,
                title,
                banner,
                screen.header_focused,
                &screen.list,
                focused,
                song_row,
            );
        }
        ScreenId::Genres => {
            let screen = &model.screens.genres;
            let title = format!(" Genres{} ", page_indicator(screen.list.paging()));
            render_plain_list(frame, area, title, &screen.list, focused, |g| g.name.clone());
        }
        ScreenId::Songs => {
            let screen = &model.screens.songs;
            let title = format!(
                " {}{} ",
                screen.title,
                page_indicator(screen.list.paging())
            );
            render_plain_list(frame, area, title, &screen.list, focused, song_row);
        }
        ScreenId::Search => render_search(frame, area, &model.screens.search, focused),
        ScreenId::Queue => {
            let screen = &model.screens.queue;
            let title = format!(" Queue: {} songs ", screen.list.len());
            render_plain_list(frame, area, title, &screen.list, focused, song_row);
        }
        ScreenId::History => {
            let screen = &model.screens.history;
            render_plain_list(frame, area, " History ".into(), &screen.list, focused, song_row);
        }
    }

    let menu = match current {
        ScreenId::Artists => menu_state(&model.screens.artists.list),
        ScreenId::Albums => menu_state(&model.screens.albums.list),
        ScreenId::AlbumSongs => menu_state(&model.screens.album_songs.list),
        ScreenId::PlaylistSongs => menu_state(&model.screens.playlist_songs.list),
        ScreenId::Songs => menu_state(&model.screens.songs.list),
        ScreenId::Queue => menu_state(&model.screens.queue.list),
        ScreenId::History => menu_state(&model.screens.history.list),
        _ => None,
    };
    if let Some((entries, selected)) = menu {
        render_menu_popup(frame, area, entries, selected);
    }
}

fn song_row(song: &Song) -> String {
    format!(
        "{:>3}  {}  {} - {}",
        song.track,
        format_duration_sec(song.duration_sec),
        song.artist,
        song.name
    )
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let content = Paragraph::new(
        "Pick a category in the media bar and press Enter\n\n\
         Use ↑/↓ to move, Tab to switch focus\n\
         F2 searches the whole library",
    )
    .style(Style::default().fg(Color::DarkGray))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(content, area);
}

fn bordered(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

fn render_plain_list<T>(
    frame: &mut Frame,
    area: Rect,
    title: String,
    list: &PagedList<T>,
    focused: bool,
    fmt: impl Fn(&T) -> String,
) {
    let block = bordered(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_rows(frame, inner, list, focused, fmt);
}

#[allow(clippy::too_many_arguments)]
fn render_header_list<T>(
    frame: &mut Frame,
    area: Rect,
    title: String,
    banner: Vec<Line>,
    header_focused: bool,
    list: &PagedList<T>,
    focused: bool,
    fmt: impl Fn(&T) -> String,
) {
    let block = bordered(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_ROWS), Constraint::Min(0)])
        .split(inner);

    let banner_style = if header_focused && focused {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let mut lines = banner;
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        if header_focused { "⏎ go back" } else { "" },
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(Paragraph::new(lines).style(banner_style), chunks[0]);

    render_rows(frame, chunks[1], list, focused && !header_focused, fmt);
}

/// Draw the visible slice of a list, highlighting the selection.
fn render_rows<T>(
    frame: &mut Frame,
    area: Rect,
    list: &PagedList<T>,
    focused: bool,
    fmt: impl Fn(&T) -> String,
) {
    if list.is_empty() {
        let empty = Paragraph::new("Nothing here yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }
    let rows = area.height as usize;
    let offset = list.offset();
    let end = (offset + rows).min(list.len());
    let width = area.width as usize;

    let items: Vec<ListItem> = list.items()[offset..end]
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let index = offset + i;
            let style = if index == list.selected() && focused {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else if index == list.selected() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(truncate_string(&fmt(item), width)).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), area);
}

fn render_search(frame: &mut Frame, area: Rect, search: &SearchScreen, focused: bool) {
    let block = bordered(" Search ".into(), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Query input
            Constraint::Length(1), // Section tabs
            Constraint::Min(0),    // Active section results
        ])
        .split(inner);

    let input_style = if search.input_active && focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if search.input_active { "▌" } else { "" };
    let query_text = if search.query.is_empty() && !search.input_active {
        "Type to search...".to_string()
    } else {
        format!("{}{}", search.query, cursor)
    };
    frame.render_widget(
        Paragraph::new(format!("> {query_text}")).style(input_style),
        chunks[0],
    );

    if search.sections.is_empty() {
        let hint = Paragraph::new("No results").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, chunks[2]);
        return;
    }

    let tabs: Vec<Span> = search
        .sections
        .iter()
        .enumerate()
        .flat_map(|(i, section)| {
            let label = format!(" {} ({}) ", section.kind.label(), section.list.len());
            let style = if i == search.section_selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Cyan)
            };
            [Span::styled(label, style), Span::raw(" ")]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tabs)), chunks[1]);

    if let Some(list) = search.active_list() {
        render_rows(frame, chunks[2], list, focused && !search.input_active, |item| {
            format!("{}  [{}]", item.name(), item.kind().label())
        });
    }
}

fn menu_state<T>(list: &PagedList<T>) -> Option<(&[ContextEntry], usize)> {
    list.menu_open()
        .then(|| (list.menu_entries(), list.menu_selected()))
}

fn render_menu_popup(frame: &mut Frame, area: Rect, entries: &[ContextEntry], selected: usize) {
    let width = entries
        .iter()
        .map(|e| e.label.len())
        .max()
        .unwrap_or(10) as u16
        + 4;
    let height = entries.len() as u16 + 2;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    };
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == selected {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(" {} ", entry.label)).style(style)
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(list, popup);
}
