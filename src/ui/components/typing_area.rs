use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::input::{LetterState, TypingState};
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    state: &'a TypingState,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(state: &'a TypingState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

/// One span per letter, plus a separator span after every word. The cursor
/// sits on the next letter, or on the separator once the word is fully typed.
fn build_spans<'a>(state: &TypingState, theme: &Theme) -> Vec<Span<'a>> {
    let cursor = state.cursor();
    let mut spans = Vec::new();

    for (widx, word) in state.text().words().enumerate() {
        let is_current = widx == cursor.word;
        let word_bg = if is_current {
            Style::default().bg(theme.current_word_bg)
        } else {
            Style::default()
        };

        for (lidx, &letter) in word.iter().enumerate() {
            let style = if is_current && lidx == cursor.letter {
                Style::default().fg(theme.cursor_fg).bg(theme.cursor_bg)
            } else {
                match state.letter_state(widx, lidx) {
                    LetterState::Typo => word_bg
                        .fg(theme.text_incorrect)
                        .add_modifier(Modifier::UNDERLINED),
                    LetterState::Correct if widx < cursor.word => word_bg.fg(theme.text_done),
                    LetterState::Correct => word_bg.fg(theme.text_correct),
                    LetterState::Pending => word_bg.fg(theme.text_pending),
                }
            };
            spans.push(Span::styled(letter.to_string(), style));
        }

        let separator_style = if is_current && cursor.letter == word.len() {
            Style::default().bg(theme.cursor_bg)
        } else {
            Style::default()
        };
        spans.push(Span::styled(" ", separator_style));
    }

    spans
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(Style::default().fg(self.theme.border));
        let line = Line::from(build_spans(self.state, self.theme));

        Paragraph::new(line)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
