use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::trainer::{OptionMark, QuizView};
use crate::ui::theme::Theme;

pub struct QuizCard<'a> {
    view: &'a QuizView,
    selected: usize,
    language: &'a str,
    theme: &'a Theme,
}

impl<'a> QuizCard<'a> {
    pub fn new(view: &'a QuizView, selected: usize, language: &'a str, theme: &'a Theme) -> Self {
        Self {
            view,
            selected,
            language,
            theme,
        }
    }
}

impl Widget for QuizCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Quiz {}/{} ", self.view.position, self.view.total))
            .border_style(Style::default().fg(if self.view.locked {
                colors.border()
            } else {
                colors.border_focused()
            }))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            self.view.term.as_str(),
            Style::default()
                .fg(colors.term())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("Pick the {} translation", self.language),
            Style::default().fg(colors.muted()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        let lines: Vec<Line> = self
            .view
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                let is_selected = !self.view.locked && idx == self.selected;
                let (marker, color) = match option.mark {
                    OptionMark::Correct => ("\u{2713}", colors.success()),
                    OptionMark::Wrong => ("\u{2717}", colors.error()),
                    OptionMark::Neutral if is_selected => (">", colors.selected()),
                    OptionMark::Neutral => (" ", colors.fg()),
                };
                let mut style = Style::default().fg(color);
                if is_selected || option.mark != OptionMark::Neutral {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Line::from(vec![
                    Span::styled(format!("  {marker} "), style),
                    Span::styled(format!("[{}] ", idx + 1), Style::default().fg(colors.muted())),
                    Span::styled(option.label.as_str(), style),
                ])
            })
            .collect();
        Paragraph::new(lines).render(layout[3], buf);
    }
}
