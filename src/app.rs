use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

use crate::config::Config;
use crate::generator::TextSource;
use crate::generator::passage::fallback_text;
use crate::session::Session;
use crate::session::input::Key;
use crate::session::result::SessionResult;
use crate::session::text::TargetText;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    Result,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Mode,
    CaseSensitive,
    RealtimeStats,
    WordCount,
    TimeLimit,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        SettingsField::Mode,
        SettingsField::CaseSensitive,
        SettingsField::RealtimeStats,
        SettingsField::WordCount,
        SettingsField::TimeLimit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Mode => "Mode",
            SettingsField::CaseSensitive => "Case Sensitive",
            SettingsField::RealtimeStats => "Realtime Stats",
            SettingsField::WordCount => "Word Count",
            SettingsField::TimeLimit => "Time Limit",
        }
    }
}

/// Translate a terminal key into the session's key vocabulary.
/// Chords with Ctrl or Alt are not text input, except Ctrl+Alt which some
/// terminals report for AltGr characters.
pub fn map_key(key: &KeyEvent) -> Key {
    let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
    let chord = key.modifiers.intersects(altgr) && !key.modifiers.contains(altgr);
    if chord {
        return Key::Other;
    }
    match key.code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(ch) => Key::Char(ch),
        _ => Key::Other,
    }
}

pub struct App {
    pub screen: AppScreen,
    /// Config in effect for this run, including command-line overrides.
    pub config: Config,
    pub session: Session,
    pub last_result: Option<SessionResult>,
    pub theme: Theme,
    pub should_quit: bool,
    pub settings_selected: usize,
    /// Config as loaded from disk plus edits made on the Settings screen.
    stored_config: Config,
    config_path: Option<PathBuf>,
    source: Box<dyn TextSource>,
    fallback: TargetText,
}

impl App {
    pub fn new(
        config: Config,
        source: Box<dyn TextSource>,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        Self::with_run_config(config.clone(), config, source, config_path)
    }

    /// `run` is what the session uses; only `stored` plus Settings edits is
    /// written back to `config_path`.
    pub fn with_run_config(
        stored: Config,
        run: Config,
        source: Box<dyn TextSource>,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let fallback = TargetText::parse(fallback_text())?;
        let mut app = Self {
            screen: AppScreen::Typing,
            config: run,
            session: Session::new(fallback.clone()),
            last_result: None,
            theme: Theme::default(),
            should_quit: false,
            settings_selected: 0,
            stored_config: stored,
            config_path,
            source,
            fallback,
        };
        app.start_session();
        Ok(app)
    }

    fn next_text(&mut self) -> TargetText {
        let raw = self.source.next_text(self.config.word_count);
        match TargetText::parse(&raw) {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, "text source returned unusable text, using fallback passage");
                self.fallback.clone()
            }
        }
    }

    pub fn start_session(&mut self) {
        let text = self.next_text();
        info!(
            mode = self.config.mode.as_str(),
            words = text.word_count(),
            "starting session"
        );
        self.session.reset(text);
        self.screen = AppScreen::Typing;
    }

    pub fn finish_session(&mut self) {
        let result = self.session.result(&self.config);
        info!(
            wpm = result.wpm,
            accuracy = result.accuracy,
            completed = result.completed,
            "session finished"
        );
        self.last_result = Some(result);
        self.screen = AppScreen::Result;
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if self.screen != AppScreen::Typing {
            return;
        }
        self.session.on_tick(elapsed, &self.config);
        if self.session.is_finished(&self.config) {
            self.finish_session();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT)
            && key.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        match self.screen {
            AppScreen::Typing => self.handle_typing_key(key),
            AppScreen::Result => self.handle_result_key(key),
            AppScreen::Settings => self.handle_settings_key(key),
        }
    }

    fn handle_typing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.finish_session(),
            KeyCode::Tab => self.start_session(),
            _ => {
                self.session.handle_key(map_key(&key), &self.config);
                if self.session.is_finished(&self.config) {
                    self.finish_session();
                }
            }
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Tab | KeyCode::Enter => self.start_session(),
            KeyCode::Char('s') => self.go_to_settings(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.leave_settings(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.settings_selected + 1 < SettingsField::ALL.len() {
                    self.settings_selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.settings_cycle(true),
            KeyCode::Left | KeyCode::Char('h') => self.settings_cycle(false),
            _ => {}
        }
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    fn leave_settings(&mut self) {
        if let Some(path) = &self.config_path {
            if let Err(err) = self.stored_config.save_to(path) {
                warn!(%err, path = %path.display(), "could not save config");
            }
        }
        self.start_session();
    }

    pub fn selected_field(&self) -> SettingsField {
        SettingsField::ALL[self.settings_selected.min(SettingsField::ALL.len() - 1)]
    }

    pub fn settings_cycle(&mut self, forward: bool) {
        let field = self.selected_field();
        let config = &mut self.config;
        match field {
            SettingsField::Mode => {
                let mode = if forward {
                    config.mode.next()
                } else {
                    config.mode.prev()
                };
                config.change_mode(mode);
            }
            SettingsField::CaseSensitive => config.toggle_case_sensitive(None),
            SettingsField::RealtimeStats => config.toggle_realtime_stats(None),
            SettingsField::WordCount => {
                config.word_count = if forward {
                    (config.word_count + 5).min(200)
                } else {
                    config.word_count.saturating_sub(5).max(5)
                };
            }
            SettingsField::TimeLimit => {
                config.time_limit_secs = if forward {
                    (config.time_limit_secs + 15).min(300)
                } else {
                    config.time_limit_secs.saturating_sub(15).max(15)
                };
            }
        }
        self.store_field(field);
    }

    /// Copy one edited setting from the run config into the stored one.
    fn store_field(&mut self, field: SettingsField) {
        let (run, stored) = (&self.config, &mut self.stored_config);
        match field {
            SettingsField::Mode => {
                stored.change_mode(run.mode);
                stored.show_realtime_stats = run.show_realtime_stats;
            }
            SettingsField::CaseSensitive => stored.case_sensitive = run.case_sensitive,
            SettingsField::RealtimeStats => stored.show_realtime_stats = run.show_realtime_stats,
            SettingsField::WordCount => stored.word_count = run.word_count,
            SettingsField::TimeLimit => stored.time_limit_secs = run.time_limit_secs,
        }
    }

    pub fn settings_value(&self, field: SettingsField) -> String {
        let on_off = |b: bool| String::from(if b { "on" } else { "off" });
        match field {
            SettingsField::Mode => self.config.mode.as_str().to_string(),
            SettingsField::CaseSensitive => on_off(self.config.case_sensitive),
            SettingsField::RealtimeStats => on_off(self.config.show_realtime_stats),
            SettingsField::WordCount => self.config.word_count.to_string(),
            SettingsField::TimeLimit => format!("{}s", self.config.time_limit_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::generator::FixedSource;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(prompt: &str, mode: Mode) -> App {
        let mut config = Config::default();
        config.change_mode(mode);
        App::new(config, Box::new(FixedSource::new(prompt)), None).unwrap()
    }

    fn type_str(app: &mut App, s: &str) {
        for ch in s.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn map_key_variants() {
        assert_eq!(map_key(&press(KeyCode::Backspace)), Key::Backspace);
        assert_eq!(map_key(&press(KeyCode::Char(' '))), Key::Space);
        assert_eq!(map_key(&press(KeyCode::Char('Q'))), Key::Char('Q'));
        assert_eq!(map_key(&press(KeyCode::Left)), Key::Other);
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_a), Key::Other);
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&shifted), Key::Char('A'));
    }

    #[test]
    fn map_key_accepts_altgr_characters() {
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        assert_eq!(map_key(&KeyEvent::new(KeyCode::Char('@'), altgr)), Key::Char('@'));
        assert_eq!(map_key(&KeyEvent::new(KeyCode::Char('{'), altgr)), Key::Char('{'));
        let alt_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT);
        assert_eq!(map_key(&alt_b), Key::Other);
    }

    #[test]
    fn words_mode_finishes_on_last_space() {
        let mut app = app_with("hi yo", Mode::Words);
        type_str(&mut app, "hi yo");
        assert_eq!(app.screen, AppScreen::Typing);
        app.handle_key(press(KeyCode::Char(' ')));
        assert_eq!(app.screen, AppScreen::Result);
        let result = app.last_result.as_ref().unwrap();
        assert!(result.completed);
        assert_eq!(result.words, 2);
        assert_eq!(result.accuracy, 100.0);
    }

    #[test]
    fn time_mode_finishes_on_ticks() {
        let mut app = app_with("hi yo", Mode::Time);
        app.config.time_limit_secs = 1;
        type_str(&mut app, "h");
        app.on_tick(Duration::from_millis(500));
        assert_eq!(app.screen, AppScreen::Typing);
        app.on_tick(Duration::from_millis(500));
        assert_eq!(app.screen, AppScreen::Result);
        assert!(!app.last_result.as_ref().unwrap().completed);
    }

    #[test]
    fn esc_ends_early_and_r_restarts() {
        let mut app = app_with("hi", Mode::Words);
        type_str(&mut app, "h");
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, AppScreen::Result);

        app.handle_key(press(KeyCode::Char('r')));
        assert_eq!(app.screen, AppScreen::Typing);
        assert_eq!(app.session.stats().typed_char_count, 0);
        assert_eq!(app.session.state().cursor().letter, 0);
    }

    #[test]
    fn ctrl_c_quits_from_typing() {
        let mut app = app_with("hi", Mode::Words);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.session.stats().typed_char_count, 0);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app_with("hi", Mode::Words);
        let mut key = press(KeyCode::Char('h'));
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert_eq!(app.session.stats().typed_char_count, 0);
    }

    #[test]
    fn settings_cycle_and_leave_restarts() {
        let mut app = app_with("hi", Mode::Words);
        app.handle_key(press(KeyCode::Esc));
        app.handle_key(press(KeyCode::Char('s')));
        assert_eq!(app.screen, AppScreen::Settings);

        // Mode: words -> zen hides live stats
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.config.mode, Mode::Zen);
        assert!(!app.config.show_realtime_stats);

        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.selected_field(), SettingsField::CaseSensitive);
        app.handle_key(press(KeyCode::Enter));
        assert!(app.config.case_sensitive);
        assert_eq!(app.settings_value(SettingsField::CaseSensitive), "on");

        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, AppScreen::Typing);
        assert!(app.config.case_sensitive);
    }

    #[test]
    fn run_overrides_are_not_saved_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let stored = Config::default();
        let mut run = stored.clone();
        run.time_limit_secs = 5;
        run.toggle_case_sensitive(Some(true));
        let mut app = App::with_run_config(
            stored,
            run,
            Box::new(FixedSource::new("hi")),
            Some(path.clone()),
        )
        .unwrap();

        app.go_to_settings();
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, AppScreen::Typing);

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved, Config::default());
        assert_eq!(app.config.time_limit_secs, 5);
        assert!(app.config.case_sensitive);
    }

    #[test]
    fn settings_edits_are_saved_without_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let stored = Config::default();
        let mut run = stored.clone();
        run.time_limit_secs = 5;
        let mut app = App::with_run_config(
            stored,
            run,
            Box::new(FixedSource::new("hi")),
            Some(path.clone()),
        )
        .unwrap();

        app.go_to_settings();
        // Mode: time -> words
        app.handle_key(press(KeyCode::Right));
        for _ in 0..3 {
            app.handle_key(press(KeyCode::Down));
        }
        assert_eq!(app.selected_field(), SettingsField::WordCount);
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Esc));

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.mode, Mode::Words);
        assert_eq!(saved.word_count, 30);
        assert_eq!(saved.time_limit_secs, 30);
        assert_eq!(app.config.time_limit_secs, 5);
        assert_eq!(app.config.word_count, 30);
    }

    #[test]
    fn settings_selection_is_bounded() {
        let mut app = app_with("hi", Mode::Words);
        app.go_to_settings();
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.settings_selected, 0);
        for _ in 0..10 {
            app.handle_key(press(KeyCode::Down));
        }
        assert_eq!(app.selected_field(), SettingsField::TimeLimit);
        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.config.time_limit_secs, 15);
        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.config.time_limit_secs, 15);
    }

    #[test]
    fn unusable_prompt_falls_back_to_passage() {
        let app = app_with("   ", Mode::Words);
        assert_eq!(
            app.session.state().text(),
            &TargetText::parse(fallback_text()).unwrap()
        );
    }
}
