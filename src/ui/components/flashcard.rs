use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::trainer::FlashcardView;
use crate::ui::theme::Theme;

pub struct Flashcard<'a> {
    view: &'a FlashcardView,
    language: &'a str,
    theme: &'a Theme,
}

impl<'a> Flashcard<'a> {
    pub fn new(view: &'a FlashcardView, language: &'a str, theme: &'a Theme) -> Self {
        Self {
            view,
            language,
            theme,
        }
    }
}

impl Widget for Flashcard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(
                " Flashcard {}/{} ",
                self.view.position, self.view.total
            ))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let term = Paragraph::new(Line::from(Span::styled(
            self.view.term.as_str(),
            Style::default()
                .fg(colors.term())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        term.render(layout[1], buf);

        if !self.view.revealed {
            Paragraph::new(Line::from(Span::styled(
                "[Space] show translation",
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(layout[2], buf);
            return;
        }

        let translation = Line::from(vec![
            Span::styled(
                format!("{}: ", self.language),
                Style::default().fg(colors.muted()),
            ),
            Span::styled(
                self.view.translation.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(translation)
            .alignment(Alignment::Center)
            .render(layout[2], buf);

        if !self.view.example.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                self.view.example.as_str(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::ITALIC),
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[3], buf);
        }
    }
}
