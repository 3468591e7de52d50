use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Strokes per hole for one player, keyed by 1-based hole number.
pub type HoleScores = BTreeMap<u32, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    Golf,
    MiniGolf,
}

impl GameMode {
    #[must_use]
    pub fn from_mini_golf_flag(flag: i64) -> Self {
        if flag == 1 { Self::MiniGolf } else { Self::Golf }
    }

    #[must_use]
    pub fn is_mini_golf(self) -> bool {
        matches!(self, Self::MiniGolf)
    }

    /// Par suggested when a hole has no par recorded yet.
    #[must_use]
    pub fn default_par(self) -> u32 {
        match self {
            Self::MiniGolf => 2,
            Self::Golf => 4,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MiniGolf => "Mini golf",
            Self::Golf => "Golf",
        }
    }
}

/// One scored outing. `player_names` keeps the order players were added in,
/// which doubles as the tee order for hole 1.
///
/// `scores` may retain entries for holes beyond `holes` after the hole count
/// was reduced; those entries are kept as-is and ignored by display and
/// statistics until the count grows back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub round_id: i64,
    pub name: String,
    /// Epoch milliseconds.
    pub date: i64,
    pub holes: u32,
    pub player_names: Vec<String>,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub scores: HashMap<String, HoleScores>,
    #[serde(default)]
    pub pars: Option<Vec<u32>>,
    #[serde(default)]
    pub game_mode: GameMode,
}

impl Round {
    /// Par for a 1-based hole number, when the round carries pars at all.
    #[must_use]
    pub fn par_for_hole(&self, hole: u32) -> Option<u32> {
        let pars = self.pars.as_deref()?;
        if hole < 1 {
            return None;
        }
        pars.get((hole - 1) as usize).copied()
    }
}

/// A reusable course template; only consulted when a new round is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub course_id: i64,
    pub name: String,
    pub holes: u32,
    pub pars: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AppSettings {
    pub default_game_mode: GameMode,
    pub show_tabs_on_home: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_game_mode: GameMode::Golf,
            show_tabs_on_home: true,
        }
    }
}

/// Aggregates across many rounds, shown on the profiles screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CareerStats {
    pub rounds: u32,
    pub holes_scored: u32,
    pub holes_in_one: u32,
}

/// A validated display name for players and courses: printable, trimmed,
/// at most 40 characters, no leading/trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// # Panics
    ///
    /// Will panic if the regex is invalid
    #[must_use]
    pub fn new(input: &str) -> Option<Self> {
        use std::sync::OnceLock;
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"^\S(?:[^\r\n\t]{0,38}\S)?$")
                .expect("Invalid regex pattern - this is a programming error")
        });

        let trimmed = input.trim();
        if re.is_match(trimmed) {
            Some(DisplayName(trimmed.to_string()))
        } else {
            None
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// # Errors
    ///
    /// Will return `Err` if the input is blank or longer than 40 characters
    pub fn parse(input: &str) -> Result<Self, String> {
        Self::new(input).ok_or_else(|| format!("'{}' is not a usable name", input.trim()))
    }
}

impl TryFrom<&str> for DisplayName {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
