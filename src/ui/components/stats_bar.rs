use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::config::Config;
use crate::session::Session;
use crate::ui::theme::Theme;

/// Header line shown while typing.
pub struct StatsBar<'a> {
    session: &'a Session,
    config: &'a Config,
    theme: &'a Theme,
}

impl<'a> StatsBar<'a> {
    pub fn new(session: &'a Session, config: &'a Config, theme: &'a Theme) -> Self {
        Self {
            session,
            config,
            theme,
        }
    }

    fn progress_text(&self) -> String {
        match self.session.seconds_remaining(self.config) {
            Some(secs) => format!("{secs}s"),
            None => {
                let total = self.session.state().text().word_count();
                let done = self.session.state().cursor().word.min(total);
                format!("{done}/{total}")
            }
        }
    }

    fn live_text(&self) -> Option<String> {
        if !self.config.realtime_stats_visible() {
            return None;
        }
        Some(format!(
            " | WPM: {:.1} | Acc: {:.1}% | Typos: {}",
            self.session.wpm(),
            self.session.accuracy(),
            self.session.stats().typos
        ))
    }
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.config.mode.as_str()),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.progress_text(), Style::default().fg(self.theme.fg)),
        ];
        if let Some(live) = self.live_text() {
            spans.push(Span::styled(live, Style::default().fg(self.theme.text_pending)));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::session::input::Key;
    use crate::session::text::TargetText;

    #[test]
    fn shows_word_progress_outside_time_mode() {
        let mut config = Config::default();
        config.change_mode(Mode::Words);
        let mut session = Session::new(TargetText::parse("a b c").unwrap());
        session.handle_key(Key::Char('a'), &config);
        session.handle_key(Key::Space, &config);
        let theme = Theme::default();
        let bar = StatsBar::new(&session, &config, &theme);
        assert_eq!(bar.progress_text(), "1/3");
        assert!(bar.live_text().is_some());
    }

    #[test]
    fn shows_countdown_in_time_mode() {
        let config = Config::default();
        let session = Session::new(TargetText::parse("a b").unwrap());
        let theme = Theme::default();
        let bar = StatsBar::new(&session, &config, &theme);
        assert_eq!(bar.progress_text(), "30s");
    }

    #[test]
    fn zen_hides_live_stats() {
        let mut config = Config::default();
        config.change_mode(Mode::Zen);
        config.toggle_realtime_stats(Some(true));
        let session = Session::new(TargetText::parse("a").unwrap());
        let theme = Theme::default();
        let bar = StatsBar::new(&session, &config, &theme);
        assert!(bar.live_text().is_none());
    }
}
