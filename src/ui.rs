//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::audio::PlaybackState;
use crate::config::UiSettings;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "next/prev");
    map.insert("gg/G", "first/last");
    map.insert("enter/p", "play");
    map.insert("s", "stop");
    map.insert("R", "reload titles");
    map.insert("q", "quit");
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["j/k", "gg/G", "enter/p", "s", "R", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Idle",
        PlaybackState::Playing => "Playing",
        PlaybackState::Stopped => "Stopped",
    }
}

/// Compose the status box text.
fn status_text(app: &App, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = vec![format!(" {}", state_label(app.playback))];

    if let Some(title) = &app.now_playing {
        parts.push(format!("Song: {}", title));
    }
    if let Some(i) = app.selected {
        parts.push(format!("Track {}/{}", i + 1, app.titles.len()));
    }
    if let Some(art) = app.artwork(&ui.artwork) {
        parts.push(format!("Artwork: {}", art));
    }
    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {}", dir));
    }

    let mut text = parts.join(" • ");
    if let Some(msg) = &app.message {
        text.push('\n');
        text.push_str(msg);
    }
    text
}

/// First and last visible rows, keeping `selected` centered when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, ui_settings))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    if !app.has_tracks() {
        let empty = Paragraph::new("No tracks to show.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" tracks "));
        frame.render_widget(empty, chunks[2]);
    } else {
        // Only build ListItems for the visible window.
        let total = app.titles.len();
        // Borders take two rows.
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel = app.selected.unwrap_or(0);
        let (start, end) = visible_window(total, list_height, sel);

        let items: Vec<ListItem> = app.titles[start..end]
            .iter()
            .map(|t| ListItem::new(t.as_str()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if let Some(sel) = app.selected.filter(|&s| s >= start && s < end) {
            state.select(Some(sel - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::StateUpdate;

    #[test]
    fn controls_text_lists_every_binding_in_order() {
        let text = controls_text();
        assert!(text.starts_with("[j/k] next/prev"));
        assert!(text.ends_with("[q] quit"));
        assert_eq!(text.matches('[').count(), CONTROLS_MAP.len());
    }

    fn rows(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn draw_shows_placeholder_for_empty_playlist() {
        use ratatui::{Terminal, backend::TestBackend};

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let empty = App::new(Vec::new(), &StateUpdate::default());
        terminal
            .draw(|f| draw(f, &empty, &UiSettings::default()))
            .unwrap();

        let rows = rows(&terminal);
        assert!(rows.iter().any(|r| r.contains("No tracks to show.")));
        assert!(!rows.iter().any(|r| r.contains("> ")));
    }

    #[test]
    fn draw_highlights_selection_inside_scrolled_window() {
        use ratatui::{Terminal, backend::TestBackend};

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let titles: Vec<String> = (0..40).map(|i| format!("Track {i}")).collect();
        let app = App::new(
            titles,
            &StateUpdate {
                index: Some(30),
                ..StateUpdate::default()
            },
        );
        terminal
            .draw(|f| draw(f, &app, &UiSettings::default()))
            .unwrap();

        let rows = rows(&terminal);
        let highlighted: Vec<&String> = rows.iter().filter(|r| r.contains("> ")).collect();
        assert_eq!(highlighted.len(), 1);
        assert!(highlighted[0].contains("> Track 30"));
        assert!(!rows.iter().any(|r| r.contains("Track 0 ")));
        assert!(rows.iter().any(|r| r.contains("Track 31/40")));
    }

    #[test]
    fn visible_window_centers_selection() {
        assert_eq!(visible_window(5, 10, 3), (0, 5));
        assert_eq!(visible_window(100, 10, 0), (0, 10));
        assert_eq!(visible_window(100, 10, 50), (45, 55));
        assert_eq!(visible_window(100, 10, 99), (90, 100));
        assert_eq!(visible_window(100, 0, 50), (0, 100));
    }

    #[test]
    fn status_text_includes_song_position_and_message() {
        let mut app = App::new(
            vec!["A".into(), "B".into()],
            &StateUpdate {
                state: PlaybackState::Playing,
                index: Some(1),
                now_playing_title: Some("A".into()),
                ..StateUpdate::default()
            },
        );
        app.set_message("hello");
        let ui = UiSettings {
            artwork: vec!["p0".into(), "p1".into()],
            ..UiSettings::default()
        };

        let text = status_text(&app, &ui);
        assert_eq!(text, " Playing • Song: A • Track 2/2 • Artwork: p1\nhello");
    }
}
