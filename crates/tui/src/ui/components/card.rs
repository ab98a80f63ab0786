use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// Rounded container used for every dashboard panel.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
        }
    }

    /// Mark this card as focused (uses accent border color).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface))
    }

    /// Draws the frame and returns the area left for content.
    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}

/// One summary metric: compact amount, subtitle, full amount.
pub fn render_stat_card(
    frame: &mut Frame<'_>,
    area: Rect,
    card: &engine::StatCard,
    theme: &Theme,
) {
    let inner = Card::new(card.label, theme).render_frame(frame, area);
    let lines = vec![
        Line::from(Span::styled(
            card.display.clone(),
            Style::default()
                .fg(theme.tone(card.tone))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.subtitle, Style::default().fg(theme.text_muted))),
        Line::from(Span::styled(card.full.clone(), Style::default().fg(theme.text_muted))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
