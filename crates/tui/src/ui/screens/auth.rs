use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, AuthField, AuthMode},
    ui::theme::Theme,
};

/// Calculates a centered rect for the auth box
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let auth = &state.auth;
    let card_area = centered_box(44, 9, area);
    frame.render_widget(Clear, card_area);

    let title = match auth.mode {
        AuthMode::Login => " Login ",
        AuthMode::Register => " Register ",
    };
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.surface));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Email
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Submit
        ])
        .margin(1)
        .split(inner);

    render_input(
        frame,
        rows[0],
        "Email",
        &auth.email,
        false,
        auth.focus == AuthField::Email,
        theme,
    );
    render_input(
        frame,
        rows[2],
        "Password",
        &auth.password,
        true,
        auth.focus == AuthField::Password,
        theme,
    );

    let submit = match (auth.busy, auth.mode) {
        (true, _) => "Please wait...",
        (false, AuthMode::Login) => "[ Enter ] Login",
        (false, AuthMode::Register) => "[ Enter ] Register",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(submit, Style::default().fg(theme.accent)))
            .alignment(Alignment::Center),
        rows[4],
    );

    let below = |offset: u16| Rect {
        x: card_area.x,
        y: card_area.y.saturating_add(card_area.height + offset),
        width: card_area.width,
        height: 1,
    }
    .intersection(area);

    if let Some(message) = &auth.message {
        let color = if message.is_error {
            theme.error
        } else {
            theme.positive
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message.text.as_str(), Style::default().fg(color)))
                .alignment(Alignment::Center),
            below(1),
        );
    }

    let switch = match auth.mode {
        AuthMode::Login => "Don't have an account? Ctrl+N to register",
        AuthMode::Register => "Already have an account? Ctrl+N to log in",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            switch,
            Style::default().fg(theme.text_muted),
        )))
        .alignment(Alignment::Center),
        below(2),
    );
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let shown = if is_password {
        mask_password(value)
    } else {
        value.to_string()
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(theme.text_muted)),
        Span::styled(format!("{shown}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Masks password with bullets, one per character
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
