use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Start,
    Unit,
    Language,
    Mode,
    Theme,
    Quit,
}

pub const MENU_ENTRIES: &[MenuEntry] = &[
    MenuEntry::Start,
    MenuEntry::Unit,
    MenuEntry::Language,
    MenuEntry::Mode,
    MenuEntry::Theme,
    MenuEntry::Quit,
];

impl MenuEntry {
    pub fn key(self) -> &'static str {
        match self {
            MenuEntry::Start => "Enter",
            MenuEntry::Unit => "u",
            MenuEntry::Language => "l",
            MenuEntry::Mode => "m",
            MenuEntry::Theme => "t",
            MenuEntry::Quit => "q",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Start => "Start practice",
            MenuEntry::Unit => "Unit",
            MenuEntry::Language => "Translation",
            MenuEntry::Mode => "Mode",
            MenuEntry::Theme => "Theme",
            MenuEntry::Quit => "Quit",
        }
    }

    /// Entries whose value cycles with left/right.
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            MenuEntry::Unit | MenuEntry::Language | MenuEntry::Mode | MenuEntry::Theme
        )
    }
}

pub enum MenuStatus {
    Ready(String),
    Warning(String),
    Error(String),
}

pub struct Menu<'a> {
    values: Vec<Option<String>>,
    selected: usize,
    status: MenuStatus,
    theme: &'a Theme,
}

impl<'a> Menu<'a> {
    /// `values` lines up with [`MENU_ENTRIES`].
    pub fn new(
        values: Vec<Option<String>>,
        selected: usize,
        status: MenuStatus,
        theme: &'a Theme,
    ) -> Self {
        Self {
            values,
            selected,
            status,
            theme,
        }
    }
}

impl Widget for Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "vocabdr",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Vokabeltrainer",
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let (status_text, status_color) = match &self.status {
            MenuStatus::Ready(text) => (text.as_str(), colors.muted()),
            MenuStatus::Warning(text) => (text.as_str(), colors.warning()),
            MenuStatus::Error(text) => (text.as_str(), colors.error()),
        };
        Paragraph::new(Line::from(Span::styled(
            status_text,
            Style::default().fg(status_color),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[1], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                MENU_ENTRIES
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, entry) in MENU_ENTRIES.iter().enumerate() {
            if i >= rows.len() {
                break;
            }
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let label_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let mut spans = vec![Span::styled(
                format!(" {indicator} [{}] {}", entry.key(), entry.label()),
                label_style,
            )];
            if let Some(Some(value)) = self.values.get(i) {
                spans.push(Span::styled(
                    format!("  < {value} >"),
                    Style::default().fg(if is_selected {
                        colors.selected()
                    } else {
                        colors.muted()
                    }),
                ));
            }
            Paragraph::new(Line::from(spans)).render(rows[i], buf);
        }
    }
}
