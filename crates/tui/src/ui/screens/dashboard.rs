use engine::{CreateForm, Field, ItemKind, ListSection, Summary};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    app::{AppState, Focus},
    ui::{
        components::card::{Card, render_stat_card},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Stat cards
            Constraint::Length(7), // Forms
            Constraint::Min(4),    // Lists
        ])
        .split(area);

    render_summary(frame, layout[0], &state.view.summary, theme);

    let columns = |area: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area)
    };
    let form_cols = columns(layout[1]);
    let list_cols = columns(layout[2]);

    for (i, kind) in ItemKind::ALL.into_iter().enumerate() {
        render_form(frame, form_cols[i], state.form(kind), state.focus, theme);
        match state.view.section(kind) {
            Some(section) => render_section(frame, list_cols[i], section, state, theme),
            None => render_placeholder(frame, list_cols[i], kind, &state.view.summary, theme),
        }
    }
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, summary: &Summary, theme: &Theme) {
    match summary {
        Summary::Ready(cards) => {
            let constraints = vec![Constraint::Ratio(1, cards.len().max(1) as u32); cards.len()];
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints)
                .split(area);
            for (card, col) in cards.iter().zip(cols.iter()) {
                render_stat_card(frame, *col, card, theme);
            }
        }
        Summary::Loading => {
            let inner = Card::new("Net Worth", theme).render_frame(frame, area);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Loading...",
                    Style::default().fg(theme.text_muted),
                ))
                .alignment(Alignment::Center),
                inner,
            );
        }
        Summary::Failed(message) => {
            let inner = Card::new("Net Worth", theme).render_frame(frame, area);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(message.as_str(), Style::default().fg(theme.error))),
                    Line::from(Span::styled(
                        "Ctrl+R to retry",
                        Style::default().fg(theme.text_muted),
                    )),
                ])
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
                inner,
            );
        }
    }
}

fn render_form(frame: &mut Frame<'_>, area: Rect, form: &CreateForm, focus: Focus, theme: &Theme) {
    let kind = form.kind();
    let focused_field = match focus {
        Focus::Form(k, field) if k == kind => Some(field),
        _ => None,
    };
    let inner = Card::new(form.title(), theme)
        .focused(focused_field.is_some())
        .render_frame(frame, area);

    let mut lines: Vec<Line<'_>> = Field::ALL
        .iter()
        .map(|&field| {
            let focused = focused_field == Some(field);
            let value = form.value(field);
            let cursor = if focused { "│" } else { "" };
            let shown = if value.is_empty() && !focused {
                Span::styled(form.placeholder(field), Style::default().fg(theme.text_muted))
            } else {
                let style = if focused {
                    Style::default().fg(theme.accent)
                } else {
                    Style::default().fg(theme.text)
                };
                Span::styled(format!("{value}{cursor}"), style)
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<14}", form.label(field)),
                    Style::default().fg(theme.text_muted),
                ),
                shown,
            ])
        })
        .collect();

    lines.push(Line::default());
    let submit_style = if form.is_busy() {
        Style::default().fg(theme.text_muted)
    } else {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(
        format!("[ {} ]", form.submit_label()),
        submit_style,
    )));
    if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(error, Style::default().fg(theme.error))));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_section(
    frame: &mut Frame<'_>,
    area: Rect,
    section: &ListSection,
    state: &AppState,
    theme: &Theme,
) {
    let focused = state.focus == Focus::List(section.kind);
    let inner = Card::new(section.title, theme)
        .focused(focused)
        .render_frame(frame, area);

    if section.rows.is_empty() {
        let (title, hint) = section.empty_text();
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(title, Style::default().fg(theme.text))),
                Line::from(Span::styled(hint, Style::default().fg(theme.text_muted))),
            ])
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let items: Vec<ListItem<'_>> = section
        .rows
        .iter()
        .map(|row| {
            let pad = width.saturating_sub(row.title.chars().count() + row.value.chars().count());
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        row.title.as_str(),
                        Style::default()
                            .fg(theme.text)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" ".repeat(pad)),
                    Span::styled(row.value.as_str(), Style::default().fg(theme.tone(row.tone))),
                ]),
                Line::from(Span::styled(
                    row.subtitle.as_str(),
                    Style::default().fg(theme.text_muted),
                )),
            ])
        })
        .collect();

    let highlight = if focused {
        Style::default().bg(theme.border).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items).highlight_style(highlight);
    let mut list_state = ListState::default().with_selected(Some(state.selected(section.kind)));
    frame.render_stateful_widget(list, inner, &mut list_state);
}

fn render_placeholder(
    frame: &mut Frame<'_>,
    area: Rect,
    kind: ItemKind,
    summary: &Summary,
    theme: &Theme,
) {
    let title = match kind {
        ItemKind::Asset => "Assets",
        ItemKind::Debt => "Debts",
        ItemKind::Stock => "Stocks",
    };
    let inner = Card::new(title, theme).render_frame(frame, area);
    let text = match summary {
        Summary::Failed(_) => "-",
        _ => "Loading...",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(theme.text_muted)))
            .alignment(Alignment::Center),
        inner,
    );
}
