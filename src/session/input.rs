use std::collections::HashSet;

use crate::session::stats::Counter;
use crate::session::text::TargetText;

/// Key name that maps to `Key::Backspace`.
pub const BACKSPACE: &str = "Backspace";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Space,
    Char(char),
    /// Modifiers, arrows, named keys and anything else the machine ignores.
    Other,
}

impl Key {
    /// Map a key identifier (`"a"`, `" "`, `"Backspace"`, `"Shift"`, ...) to a `Key`.
    /// Multi-character identifiers that are not `Backspace` are `Other`.
    pub fn from_identifier(id: &str) -> Self {
        if id == BACKSPACE {
            return Key::Backspace;
        }
        let mut chars = id.chars();
        match (chars.next(), chars.next()) {
            (Some(' '), None) => Key::Space,
            (Some(ch), None) => Key::Char(ch),
            _ => Key::Other,
        }
    }
}

/// Position of a single letter in the target text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub word: usize,
    pub letter: usize,
}

impl Coord {
    pub fn new(word: usize, letter: usize) -> Self {
        Self { word, letter }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub word: usize,
    pub letter: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    /// Space finished a word and the cursor moved to the next one.
    Advanced,
    /// The last word has been completed, or a key arrived after that.
    SessionComplete,
}

/// What happened to one key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyResponse {
    /// The event was handled here and the host should not act on it.
    pub consumed: bool,
    pub increments: Vec<Counter>,
    pub transition: Transition,
}

impl KeyResponse {
    fn consumed() -> Self {
        Self {
            consumed: true,
            increments: Vec::new(),
            transition: Transition::None,
        }
    }

    fn not_consumed() -> Self {
        Self {
            consumed: false,
            increments: Vec::new(),
            transition: Transition::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterState {
    Pending,
    Correct,
    Typo,
}

pub struct TypingState {
    text: TargetText,
    cursor: Cursor,
    typos: HashSet<Coord>,
}

impl TypingState {
    pub fn new(text: TargetText) -> Self {
        Self {
            text,
            cursor: Cursor::default(),
            typos: HashSet::new(),
        }
    }

    pub fn text(&self) -> &TargetText {
        &self.text
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn typos(&self) -> &HashSet<Coord> {
        &self.typos
    }

    pub fn is_typo(&self, coord: Coord) -> bool {
        self.typos.contains(&coord)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor.word >= self.text.word_count()
    }

    /// The word under the cursor, or `None` once the text is finished.
    pub fn current_word(&self) -> Option<&[char]> {
        self.text.word(self.cursor.word)
    }

    pub fn letter_state(&self, word: usize, letter: usize) -> LetterState {
        let typed = word < self.cursor.word || (word == self.cursor.word && letter < self.cursor.letter);
        if !typed {
            LetterState::Pending
        } else if self.is_typo(Coord::new(word, letter)) {
            LetterState::Typo
        } else {
            LetterState::Correct
        }
    }

    pub fn handle_key(&mut self, key: Key, case_sensitive: bool) -> KeyResponse {
        let key = match key {
            Key::Char(' ') => Key::Space,
            other => other,
        };

        if self.is_complete() {
            let mut response = match key {
                Key::Other => KeyResponse::not_consumed(),
                _ => KeyResponse::consumed(),
            };
            response.transition = Transition::SessionComplete;
            return response;
        }

        match key {
            Key::Backspace => {
                self.backspace();
                KeyResponse::consumed()
            }
            Key::Space => self.space(),
            Key::Char(ch) => self.type_char(ch, case_sensitive),
            Key::Other => KeyResponse::not_consumed(),
        }
    }

    fn backspace(&mut self) {
        // Deletion stops at the start of the current word.
        if self.cursor.letter > 0 {
            self.cursor.letter -= 1;
            self.typos
                .remove(&Coord::new(self.cursor.word, self.cursor.letter));
        }
    }

    fn space(&mut self) -> KeyResponse {
        let word_len = self.current_word().map_or(0, |w| w.len());
        let mut response = KeyResponse::consumed();
        if self.cursor.letter != word_len {
            return response;
        }

        self.cursor.word += 1;
        self.cursor.letter = 0;
        response.increments.push(Counter::Words);
        response.transition = if self.is_complete() {
            Transition::SessionComplete
        } else {
            Transition::Advanced
        };
        response
    }

    fn type_char(&mut self, ch: char, case_sensitive: bool) -> KeyResponse {
        let mut response = KeyResponse::consumed();
        let Some(&expected) = self
            .current_word()
            .and_then(|w| w.get(self.cursor.letter))
        else {
            // Extra keystrokes at the end of a word are absorbed.
            return response;
        };

        if !chars_match(ch, expected, case_sensitive) {
            self.typos
                .insert(Coord::new(self.cursor.word, self.cursor.letter));
            response.increments.push(Counter::Typos);
        }
        response.increments.push(Counter::TypedChars);
        self.cursor.letter += 1;
        response
    }
}

fn chars_match(typed: char, expected: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        typed == expected
    } else {
        typed.to_lowercase().eq(expected.to_lowercase())
    }
}
