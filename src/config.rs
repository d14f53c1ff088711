use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Type against the clock until the time limit runs out.
    #[default]
    Time,
    /// Type a fixed number of words.
    Words,
    /// Type without live stats or a time limit.
    Zen,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Time => "time",
            Mode::Words => "words",
            Mode::Zen => "zen",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Mode::Time => Mode::Words,
            Mode::Words => Mode::Zen,
            Mode::Zen => Mode::Time,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Mode::Time => Mode::Zen,
            Mode::Words => Mode::Time,
            Mode::Zen => Mode::Words,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_show_realtime_stats")]
    pub show_realtime_stats: bool,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,
}

fn default_show_realtime_stats() -> bool {
    true
}
fn default_word_count() -> usize {
    25
}
fn default_time_limit_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            show_realtime_stats: default_show_realtime_stats(),
            case_sensitive: false,
            word_count: default_word_count(),
            time_limit_secs: default_time_limit_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typewell")
            .join("config.toml")
    }

    /// Zen mode hides live stats; other modes keep the current setting.
    pub fn change_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode == Mode::Zen {
            self.show_realtime_stats = false;
        }
    }

    /// `None` flips the flag, `Some` sets it.
    pub fn toggle_realtime_stats(&mut self, value: Option<bool>) {
        self.show_realtime_stats = value.unwrap_or(!self.show_realtime_stats);
    }

    /// `None` flips the flag, `Some` sets it.
    pub fn toggle_case_sensitive(&mut self, value: Option<bool>) {
        self.case_sensitive = value.unwrap_or(!self.case_sensitive);
    }

    /// Whether the header should show live WPM and accuracy.
    pub fn realtime_stats_visible(&self) -> bool {
        self.show_realtime_stats && self.mode != Mode::Zen
    }

    pub fn normalize(&mut self) {
        self.word_count = self.word_count.max(1);
        self.time_limit_secs = self.time_limit_secs.max(1);
    }
}
