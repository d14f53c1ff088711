use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{Config, Mode};
use crate::session::Session;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionResult {
    pub wpm: f64,
    pub accuracy: f64,
    pub typos: u64,
    pub words: u64,
    pub typed_chars: u64,
    pub elapsed_secs: u64,
    pub mode: Mode,
    pub case_sensitive: bool,
    /// Whether the whole text was typed, as opposed to running out of time or quitting.
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

impl SessionResult {
    pub fn from_session(session: &Session, config: &Config) -> Self {
        let stats = session.stats();
        Self {
            wpm: session.wpm(),
            accuracy: session.accuracy(),
            typos: stats.typos,
            words: stats.word_count,
            typed_chars: stats.typed_char_count,
            elapsed_secs: stats.sec_elapsed,
            mode: config.mode,
            case_sensitive: config.case_sensitive,
            completed: session.state().is_complete(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::input::Key;
    use crate::session::text::TargetText;

    #[test]
    fn snapshot_reflects_counters() {
        let mut config = Config::default();
        config.change_mode(Mode::Words);
        let mut session = Session::new(TargetText::parse("hi yo").unwrap());
        for key in ["h", "x", " ", "y", "o", " "] {
            session.handle_key(Key::from_identifier(key), &config);
        }
        session.on_tick(Duration::from_secs(1), &config);

        let result = session.result(&config);
        assert_eq!(result.typed_chars, 4);
        assert_eq!(result.typos, 1);
        assert_eq!(result.words, 2);
        assert_eq!(result.accuracy, 75.0);
        assert_eq!(result.mode, Mode::Words);
        assert!(result.completed);
    }

    #[test]
    fn serializes_mode_in_lowercase() {
        let config = Config::default();
        let session = Session::new(TargetText::parse("hi").unwrap());
        let json = serde_json::to_value(session.result(&config)).unwrap();
        assert_eq!(json["mode"], "time");
        assert_eq!(json["completed"], false);
        assert_eq!(json["wpm"], 0.0);
    }
}
