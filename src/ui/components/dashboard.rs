use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::SessionResult;
use crate::ui::theme::Theme;

pub struct Dashboard<'a> {
    pub result: &'a SessionResult,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(result: &'a SessionResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let title = if self.result.completed {
            " Session Complete "
        } else {
            " Session Ended "
        };

        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(theme.accent));
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
                Constraint::Length(1),
            ])
            .split(inner);

        let heading = Paragraph::new(Line::from(vec![Span::styled(
            format!("Results ({} mode)", self.result.mode.as_str()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center);
        heading.render(layout[0], buf);

        let wpm_line = Line::from(vec![
            Span::styled("  Speed:    ", Style::default().fg(theme.fg)),
            Span::styled(
                format!("{:.1} WPM", self.result.wpm),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(wpm_line).render(layout[1], buf);

        let acc_line = Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(theme.fg)),
            Span::styled(
                format!("{:.1}%", self.result.accuracy),
                Style::default()
                    .fg(theme.accuracy_color(self.result.accuracy))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} typos / {} keystrokes)", self.result.typos, self.result.typed_chars),
                Style::default().fg(theme.text_pending),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[2], buf);

        let words_line = Line::from(vec![
            Span::styled("  Words:    ", Style::default().fg(theme.fg)),
            Span::styled(self.result.words.to_string(), Style::default().fg(theme.fg)),
        ]);
        Paragraph::new(words_line).render(layout[3], buf);

        let time_line = Line::from(vec![
            Span::styled("  Time:     ", Style::default().fg(theme.fg)),
            Span::styled(format!("{}s", self.result.elapsed_secs), Style::default().fg(theme.fg)),
        ]);
        Paragraph::new(time_line).render(layout[4], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r/Tab] Restart  ", Style::default().fg(theme.accent)),
            Span::styled("[s] Settings  ", Style::default().fg(theme.accent)),
            Span::styled("[q] Quit", Style::default().fg(theme.accent)),
        ]));
        help.render(layout[6], buf);
    }
}
