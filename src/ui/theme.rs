use ratatui::style::Color;

/// Fixed terminal palette. Uses the named ANSI colors so the user's
/// terminal scheme decides the actual shades.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub fg: Color,
    pub text_correct: Color,
    pub text_incorrect: Color,
    pub text_pending: Color,
    pub text_done: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub current_word_bg: Color,
    pub accent: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            text_correct: Color::Cyan,
            text_incorrect: Color::Red,
            text_pending: Color::Gray,
            text_done: Color::DarkGray,
            cursor_bg: Color::Yellow,
            cursor_fg: Color::Black,
            current_word_bg: Color::Indexed(236),
            accent: Color::Yellow,
            border: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Color for an accuracy percentage on the result screen.
    pub fn accuracy_color(&self, accuracy: f64) -> Color {
        if accuracy >= 95.0 {
            self.success
        } else if accuracy >= 85.0 {
            self.warning
        } else {
            self.error
        }
    }
}
