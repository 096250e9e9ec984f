use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::trainer::ProgressView;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Running score for the active session.
pub struct ScorePanel<'a> {
    progress: &'a ProgressView,
    unit: &'a str,
    language: &'a str,
    theme: &'a Theme,
}

impl<'a> ScorePanel<'a> {
    pub fn new(
        progress: &'a ProgressView,
        unit: &'a str,
        language: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            progress,
            unit,
            language,
            theme,
        }
    }
}

impl Widget for ScorePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(9), Constraint::Length(3)])
            .split(area);

        let answered = self.progress.correct + self.progress.wrong;
        let accuracy = if answered == 0 {
            "-".to_string()
        } else {
            format!("{:.0}%", self.progress.correct as f64 * 100.0 / answered as f64)
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Unit:     ", Style::default().fg(colors.fg())),
                Span::styled(self.unit, Style::default().fg(colors.accent())),
            ]),
            Line::from(vec![
                Span::styled("Language: ", Style::default().fg(colors.fg())),
                Span::styled(self.language, Style::default().fg(colors.accent())),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Correct:  ", Style::default().fg(colors.fg())),
                Span::styled(
                    self.progress.correct.to_string(),
                    Style::default().fg(colors.success()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Wrong:    ", Style::default().fg(colors.fg())),
                Span::styled(
                    self.progress.wrong.to_string(),
                    Style::default().fg(colors.error()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Accuracy: ", Style::default().fg(colors.fg())),
                Span::styled(accuracy, Style::default().fg(colors.accent())),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Word:     ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}/{}", self.progress.position, self.progress.total),
                    Style::default().fg(colors.fg()),
                ),
            ]),
        ];

        let block = Block::bordered()
            .title(" Score ")
            .border_style(Style::default().fg(colors.border()));
        Paragraph::new(lines).block(block).render(sections[0], buf);

        ProgressBar::new("Progress", self.progress.percent, self.theme).render(sections[1], buf);
    }
}
