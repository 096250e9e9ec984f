use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::session::SessionSummary;
use crate::ui::theme::Theme;

pub struct Summary<'a> {
    pub summary: &'a SessionSummary,
    pub unit: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Summary<'a> {
    pub fn new(summary: &'a SessionSummary, unit: &'a str, theme: &'a Theme) -> Self {
        Self {
            summary,
            unit,
            theme,
        }
    }
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Session Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Results",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({})", self.unit), Style::default().fg(colors.muted())),
        ]))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let words_line = Line::from(vec![
            Span::styled("  Words:    ", Style::default().fg(colors.fg())),
            Span::styled(
                self.summary.total.to_string(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(words_line).render(layout[1], buf);

        let correct_line = Line::from(vec![
            Span::styled("  Correct:  ", Style::default().fg(colors.fg())),
            Span::styled(
                self.summary.correct.to_string(),
                Style::default().fg(colors.success()),
            ),
        ]);
        Paragraph::new(correct_line).render(layout[2], buf);

        let wrong_line = Line::from(vec![
            Span::styled("  Wrong:    ", Style::default().fg(colors.fg())),
            Span::styled(
                self.summary.wrong.to_string(),
                Style::default().fg(if self.summary.wrong == 0 {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
        ]);
        Paragraph::new(wrong_line).render(layout[3], buf);

        let acc_line = match self.summary.accuracy() {
            Some(accuracy) => {
                let acc_color = if accuracy >= 90.0 {
                    colors.success()
                } else if accuracy >= 70.0 {
                    colors.warning()
                } else {
                    colors.error()
                };
                Line::from(vec![
                    Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
                    Span::styled(
                        format!("{accuracy:.1}%"),
                        Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
                    ),
                ])
            }
            // Flashcard-only sessions never score anything
            None => Line::from(vec![
                Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
                Span::styled("no quiz answers", Style::default().fg(colors.muted())),
            ]),
        };
        Paragraph::new(acc_line).render(layout[4], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r] Restart  ", Style::default().fg(colors.accent())),
            Span::styled("[Esc/q] Menu", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[6], buf);
    }
}
