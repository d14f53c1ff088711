pub mod input;
pub mod result;
pub mod stats;
pub mod text;

use std::time::Duration;

use tracing::{debug, debug_span};

use crate::config::{Config, Mode};
use crate::generator::TextSource;

use input::{Key, KeyResponse, Transition, TypingState};
use result::SessionResult;
use stats::{Counter, StatsLedger};
use text::{TargetText, TextError};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// One pass over a target text: cursor, typo ledger and counters.
pub struct Session {
    state: TypingState,
    stats: StatsLedger,
    started: bool,
    tick_carry: Duration,
}

impl Session {
    pub fn new(text: TargetText) -> Self {
        Self {
            state: TypingState::new(text),
            stats: StatsLedger::new(),
            started: false,
            tick_carry: Duration::ZERO,
        }
    }

    pub fn from_source(source: &mut dyn TextSource, word_count: usize) -> Result<Self, TextError> {
        let text = TargetText::parse(&source.next_text(word_count))?;
        Ok(Self::new(text))
    }

    pub fn state(&self) -> &TypingState {
        &self.state
    }

    pub fn stats(&self) -> &StatsLedger {
        &self.stats
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Feed one key through the state machine and apply its counter
    /// increments. All increments of a key land in the same call.
    pub fn handle_key(&mut self, key: Key, config: &Config) -> KeyResponse {
        let _span = debug_span!("handle_key", ?key).entered();

        let cursor_before = self.state.cursor();
        let response = self.state.handle_key(key, config.case_sensitive);
        // Only keys that changed something start the clock.
        let effective = !response.increments.is_empty() || self.state.cursor() != cursor_before;
        if effective && !self.started {
            self.started = true;
            debug!("session clock started");
        }
        for &counter in &response.increments {
            self.stats.incr(counter);
        }

        match response.transition {
            Transition::Advanced => debug!(word = self.state.cursor().word, "word completed"),
            Transition::SessionComplete => debug!(stats = ?self.stats, "session complete"),
            Transition::None => {}
        }
        response
    }

    /// Advance the session clock. Whole seconds are added to the elapsed
    /// counter; the remainder carries over to the next tick.
    pub fn on_tick(&mut self, elapsed: Duration, config: &Config) {
        if !self.started {
            return;
        }
        self.tick_carry += elapsed;
        while self.tick_carry >= ONE_SECOND {
            if self.is_finished(config) {
                self.tick_carry = Duration::ZERO;
                return;
            }
            self.tick_carry -= ONE_SECOND;
            self.stats.incr(Counter::SecElapsed);
        }
    }

    pub fn is_finished(&self, config: &Config) -> bool {
        if self.state.is_complete() {
            return true;
        }
        config.mode == Mode::Time && self.stats.sec_elapsed >= config.time_limit_secs
    }

    /// Seconds left in time mode, `None` for the untimed modes.
    pub fn seconds_remaining(&self, config: &Config) -> Option<u64> {
        (config.mode == Mode::Time)
            .then(|| config.time_limit_secs.saturating_sub(self.stats.sec_elapsed))
    }

    /// Start over on a new text. Counters go back to zero; config is not touched.
    pub fn reset(&mut self, text: TargetText) {
        self.state = TypingState::new(text);
        self.stats.reset();
        self.started = false;
        self.tick_carry = Duration::ZERO;
    }

    pub fn wpm(&self) -> f64 {
        self.stats.calc_wpm(None, None)
    }

    pub fn accuracy(&self) -> f64 {
        self.stats.calc_accuracy(None, None)
    }

    pub fn result(&self, config: &Config) -> SessionResult {
        SessionResult::from_session(self, config)
    }
}
