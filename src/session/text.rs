use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("target text contains no words")]
    Empty,
}

/// Words the user is asked to type. Immutable for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetText {
    words: Vec<Vec<char>>,
}

impl TargetText {
    /// Split `text` on single spaces, the same way the prompt is displayed.
    ///
    /// Empty fragments produced by repeated spaces are kept so the word
    /// indices line up with what is on screen, but a text made only of
    /// empty fragments is rejected.
    pub fn parse(text: &str) -> Result<Self, TextError> {
        let words: Vec<Vec<char>> = text.split(' ').map(|w| w.chars().collect()).collect();
        if words.iter().all(|w| w.is_empty()) {
            return Err(TextError::Empty);
        }
        Ok(Self { words })
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn word(&self, idx: usize) -> Option<&[char]> {
        self.words.get(idx).map(|w| w.as_slice())
    }

    pub fn words(&self) -> impl Iterator<Item = &[char]> {
        self.words.iter().map(|w| w.as_slice())
    }
}
