use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::core::{GameMode, GameRules};
use crate::words::WordEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub round_id: Uuid,
    pub active_word: WordEntry,
    /// Distinct letters in the order they were picked.
    pub guessed_letters: Vec<char>,
    pub remaining_lives: u32,
    pub hints_remaining: u32,
    pub seconds_until_penalty: u32,
    /// Set only by an explicit submit; otherwise the outcome is derived.
    pub verdict: Option<Outcome>,
    pub started_at: DateTime<Utc>,
}

impl GameState {
    pub fn new(active_word: WordEntry, rules: &GameRules) -> Self {
        Self::with_hints(active_word, rules, rules.starting_hints)
    }

    pub fn with_hints(active_word: WordEntry, rules: &GameRules, hints_remaining: u32) -> Self {
        Self {
            round_id: Uuid::new_v4(),
            active_word,
            guessed_letters: Vec::new(),
            remaining_lives: rules.starting_lives,
            hints_remaining,
            seconds_until_penalty: rules.penalty_interval_secs,
            verdict: None,
            started_at: Utc::now(),
        }
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed_letters.contains(&letter)
    }

    pub fn is_word_complete(&self) -> bool {
        self.active_word
            .word
            .chars()
            .all(|c| self.has_guessed(c))
    }

    pub fn outcome(&self) -> Outcome {
        if let Some(verdict) = self.verdict {
            verdict
        } else if self.remaining_lives == 0 {
            Outcome::Lost
        } else if self.is_word_complete() {
            Outcome::Won
        } else {
            Outcome::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_over()
    }

    /// Leftmost letter of the word that has not been guessed yet.
    pub fn next_hidden_letter(&self) -> Option<char> {
        self.active_word
            .word
            .chars()
            .find(|c| !self.has_guessed(*c))
    }

    /// Guessed letters that are not in the word.
    pub fn misses(&self) -> Vec<char> {
        self.guessed_letters
            .iter()
            .copied()
            .filter(|c| !self.active_word.contains(*c))
            .collect()
    }

    pub fn masked_word(&self) -> String {
        self.active_word
            .word
            .chars()
            .map(|c| if self.has_guessed(c) { c } else { '_' })
            .collect()
    }

    pub fn lose_life(&mut self) {
        self.remaining_lives = self.remaining_lives.saturating_sub(1);
    }

    pub fn elapsed_seconds(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    pub fn snapshot(&self, rules: &GameRules) -> Snapshot {
        let outcome = self.outcome();
        let in_progress = !outcome.is_over();

        Snapshot {
            round_id: self.round_id,
            mode: rules.mode,
            masked_word: self.masked_word(),
            revealed_word: (outcome == Outcome::Lost).then(|| self.active_word.word.clone()),
            description: self.active_word.description.clone(),
            guessed_letters: self.guessed_letters.clone(),
            misses: self.misses(),
            remaining_lives: self.remaining_lives,
            starting_lives: rules.starting_lives,
            hangman_stage: rules.starting_lives.saturating_sub(self.remaining_lives),
            hints_remaining: self.hints_remaining,
            seconds_until_penalty: rules.has_timer.then_some(self.seconds_until_penalty),
            outcome,
            can_hint: in_progress && self.hints_remaining > 0 && self.next_hidden_letter().is_some(),
            can_undo: in_progress && rules.supports_undo && !self.guessed_letters.is_empty(),
            can_submit: in_progress && rules.supports_submit() && !self.guessed_letters.is_empty(),
            can_continue: outcome == Outcome::Won,
        }
    }
}

/// Read model handed to the presentation layer after every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub round_id: Uuid,
    pub mode: GameMode,
    pub masked_word: String,
    pub revealed_word: Option<String>,
    pub description: String,
    pub guessed_letters: Vec<char>,
    pub misses: Vec<char>,
    pub remaining_lives: u32,
    pub starting_lives: u32,
    pub hangman_stage: u32,
    pub hints_remaining: u32,
    pub seconds_until_penalty: Option<u32>,
    pub outcome: Outcome,
    pub can_hint: bool,
    pub can_undo: bool,
    pub can_submit: bool,
    pub can_continue: bool,
}
