pub mod passage;

pub use passage::PassageSource;

/// Supplies the text for a new session.
pub trait TextSource {
    /// Text with roughly `word_count` space-separated words. Never empty.
    fn next_text(&mut self, word_count: usize) -> String;
}

/// Always hands back the same prompt, regardless of the requested length.
pub struct FixedSource {
    prompt: String,
}

impl FixedSource {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl TextSource for FixedSource {
    fn next_text(&mut self, _word_count: usize) -> String {
        self.prompt.clone()
    }
}
