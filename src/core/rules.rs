use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::utils::{GameError, GameResult};

/// Upper bound for lives, one per letter of the alphabet.
pub const MAX_LIVES: u32 = 26;
/// Upper bound for the starting hint budget and the per-win reward.
pub const MAX_HINTS: u32 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Three misses allowed, undo and an explicit "guess" button.
    Classic,
    /// A life is lost every ten seconds; wins earn an extra hint.
    Timed,
}

impl GameMode {
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Timed => "Timed",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" | "basic" => Ok(GameMode::Classic),
            "timed" => Ok(GameMode::Timed),
            other => Err(format!("unknown game mode '{}' (expected classic or timed)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    pub mode: GameMode,
    pub has_timer: bool,
    pub hints_reward_on_win: bool,
    pub supports_undo: bool,
    pub starting_lives: u32,
    pub starting_hints: u32,
    pub penalty_interval_secs: u32,
    pub hint_reward: u32,
}

impl GameRules {
    pub fn classic() -> Self {
        Self {
            mode: GameMode::Classic,
            has_timer: false,
            hints_reward_on_win: false,
            supports_undo: true,
            starting_lives: 3,
            starting_hints: 3,
            penalty_interval_secs: 10,
            hint_reward: 0,
        }
    }

    pub fn timed() -> Self {
        Self {
            mode: GameMode::Timed,
            has_timer: true,
            hints_reward_on_win: true,
            supports_undo: false,
            starting_lives: 6,
            starting_hints: 3,
            penalty_interval_secs: 10,
            hint_reward: 1,
        }
    }

    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Classic => Self::classic(),
            GameMode::Timed => Self::timed(),
        }
    }

    /// The explicit "guess" button only exists where there is an undo button.
    pub fn supports_submit(&self) -> bool {
        self.supports_undo
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.starting_lives == 0 {
            return Err(GameError::rules(format!(
                "{} mode needs at least one life",
                self.mode
            )));
        }
        if self.starting_lives > MAX_LIVES {
            return Err(GameError::rules(format!(
                "{} mode allows at most {} lives",
                self.mode, MAX_LIVES
            )));
        }
        if self.starting_hints > MAX_HINTS || self.hint_reward > MAX_HINTS {
            return Err(GameError::rules(format!(
                "{} mode allows at most {} hints",
                self.mode, MAX_HINTS
            )));
        }
        if self.has_timer && self.penalty_interval_secs == 0 {
            return Err(GameError::rules(format!(
                "{} mode penalty interval must be greater than 0",
                self.mode
            )));
        }
        Ok(())
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let classic = GameRules::classic();
        assert!(!classic.has_timer);
        assert!(classic.supports_undo);
        assert!(classic.supports_submit());
        assert_eq!(classic.starting_lives, 3);

        let timed = GameRules::timed();
        assert!(timed.has_timer);
        assert!(timed.hints_reward_on_win);
        assert!(!timed.supports_submit());
        assert_eq!(timed.starting_lives, 6);
        assert_eq!(timed.penalty_interval_secs, 10);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("classic".parse::<GameMode>(), Ok(GameMode::Classic));
        assert_eq!("BASIC".parse::<GameMode>(), Ok(GameMode::Classic));
        assert_eq!("Timed".parse::<GameMode>(), Ok(GameMode::Timed));
        assert!("blitz".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_validation() {
        assert!(GameRules::classic().validate().is_ok());
        assert!(GameRules::timed().validate().is_ok());

        let mut rules = GameRules::classic();
        rules.starting_lives = 0;
        assert!(rules.validate().is_err());

        let mut rules = GameRules::timed();
        rules.penalty_interval_secs = 0;
        assert!(rules.validate().is_err());

        let mut rules = GameRules::timed();
        rules.starting_lives = 1000;
        assert!(rules.validate().is_err());

        let mut rules = GameRules::timed();
        rules.hint_reward = u32::MAX;
        assert!(rules.validate().is_err());

        let mut rules = GameRules::classic();
        rules.starting_hints = MAX_HINTS + 1;
        assert!(rules.validate().is_err());

        // Interval is irrelevant without a timer
        let mut rules = GameRules::classic();
        rules.penalty_interval_secs = 0;
        assert!(rules.validate().is_ok());
    }
}
