/// Characters per word, the usual convention for words per minute.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Counter {
    Typos,
    Words,
    TypedChars,
    SecElapsed,
}

/// Monotonic counters for one session. Rates are derived on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsLedger {
    pub typos: u64,
    pub word_count: u64,
    pub typed_char_count: u64,
    pub sec_elapsed: u64,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr(&mut self, counter: Counter) {
        let slot = match counter {
            Counter::Typos => &mut self.typos,
            Counter::Words => &mut self.word_count,
            Counter::TypedChars => &mut self.typed_char_count,
            Counter::SecElapsed => &mut self.sec_elapsed,
        };
        *slot += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Words per minute. `None` arguments fall back to the ledger's own
    /// counters; a zero duration is treated as one second.
    pub fn calc_wpm(&self, seconds: Option<u64>, char_count: Option<u64>) -> f64 {
        let seconds = seconds.unwrap_or(self.sec_elapsed).max(1);
        let char_count = char_count.unwrap_or(self.typed_char_count);
        round_tenth((char_count as f64 * 60.0) / (seconds as f64 * CHARS_PER_WORD))
    }

    /// Accuracy in percent. Not clamped: more typos than characters goes negative.
    pub fn calc_accuracy(&self, typos: Option<u64>, char_count: Option<u64>) -> f64 {
        let typos = typos.unwrap_or(self.typos);
        let char_count = char_count.unwrap_or(self.typed_char_count).max(1);
        round_tenth(100.0 - (typos as f64 * 100.0) / char_count as f64)
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
