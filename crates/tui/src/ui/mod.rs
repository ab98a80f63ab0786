pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{AppState, Focus, Screen};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::for_mode(state.theme);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    match state.screen {
        Screen::Auth => screens::auth::render(frame, layout[1], state, &theme),
        Screen::Dashboard => screens::dashboard::render(frame, layout[1], state, &theme),
    }
    render_bottom_bar(frame, layout[2], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![
        Span::styled("Net Worth", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
    ];

    if state.screen == Screen::Dashboard {
        let user = state.username.as_deref().unwrap_or("");
        let refresh = state
            .last_refresh
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        parts.extend([
            Span::styled("User", Style::default().fg(theme.text_muted)),
            Span::raw(format!(": {user}  ")),
            Span::styled("Refresh", Style::default().fg(theme.text_muted)),
            Span::raw(format!(": {refresh}")),
        ]);
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints: &[(&str, &str)] = match (state.screen, state.focus) {
        (Screen::Auth, _) => &[
            ("Tab", "next"),
            ("Enter", "submit"),
            ("Ctrl+N", "login/register"),
            ("Ctrl+T", "theme"),
        ],
        (Screen::Dashboard, Focus::Form(..)) => &[
            ("Tab", "next"),
            ("Enter", "add"),
            ("Ctrl+R", "refresh"),
            ("Ctrl+T", "theme"),
            ("Ctrl+L", "logout"),
        ],
        (Screen::Dashboard, Focus::List(_)) => &[
            ("Tab", "next"),
            ("↑↓", "select"),
            ("d", "delete"),
            ("Ctrl+R", "refresh"),
            ("Ctrl+T", "theme"),
            ("Ctrl+L", "logout"),
        ],
    };

    let mut parts = Vec::new();
    for (key, label) in hints
        .iter()
        .chain(std::iter::once(&("Ctrl+C", "quit")))
    {
        if !parts.is_empty() {
            parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        parts.push(Span::styled(*key, Style::default().fg(theme.accent)));
        parts.push(Span::raw(format!(" {label}")));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
