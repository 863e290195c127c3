use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::core::{GameMode, GameState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventType {
    RoundStarted,
    LetterGuessed,
    LetterMissed,
    HintUsed,
    GuessRemoved,
    GuessSubmitted,
    PenaltyApplied,
    RoundWon,
    RoundLost,
    HintsRewarded,
}

impl GameEvent {
    pub fn new(event_type: GameEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn round_started(state: &GameState, mode: GameMode) -> Self {
        let data = serde_json::json!({
            "round_id": state.round_id,
            "mode": mode,
            "word_length": state.active_word.len(),
            "lives": state.remaining_lives,
            "hints": state.hints_remaining
        });
        Self::new(GameEventType::RoundStarted, data)
    }

    pub fn letter_guessed(letter: char, occurrences: usize) -> Self {
        let data = serde_json::json!({
            "letter": letter,
            "occurrences": occurrences
        });
        Self::new(GameEventType::LetterGuessed, data)
    }

    pub fn letter_missed(letter: char, remaining_lives: u32) -> Self {
        let data = serde_json::json!({
            "letter": letter,
            "remaining_lives": remaining_lives
        });
        Self::new(GameEventType::LetterMissed, data)
    }

    pub fn hint_used(letter: char, hints_remaining: u32) -> Self {
        let data = serde_json::json!({
            "letter": letter,
            "hints_remaining": hints_remaining
        });
        Self::new(GameEventType::HintUsed, data)
    }

    pub fn guess_removed(letter: char) -> Self {
        let data = serde_json::json!({
            "letter": letter
        });
        Self::new(GameEventType::GuessRemoved, data)
    }

    pub fn guess_submitted(correct: bool) -> Self {
        let data = serde_json::json!({
            "correct": correct
        });
        Self::new(GameEventType::GuessSubmitted, data)
    }

    pub fn penalty_applied(remaining_lives: u32) -> Self {
        let data = serde_json::json!({
            "remaining_lives": remaining_lives
        });
        Self::new(GameEventType::PenaltyApplied, data)
    }

    pub fn round_won(state: &GameState) -> Self {
        let data = serde_json::json!({
            "round_id": state.round_id,
            "word": state.active_word.word,
            "misses": state.misses().len(),
            "elapsed_seconds": state.elapsed_seconds()
        });
        Self::new(GameEventType::RoundWon, data)
    }

    pub fn round_lost(state: &GameState) -> Self {
        let data = serde_json::json!({
            "round_id": state.round_id,
            "word": state.active_word.word,
            "misses": state.misses().len(),
            "elapsed_seconds": state.elapsed_seconds()
        });
        Self::new(GameEventType::RoundLost, data)
    }

    pub fn hints_rewarded(reward: u32, hints_remaining: u32) -> Self {
        let data = serde_json::json!({
            "reward": reward,
            "hints_remaining": hints_remaining
        });
        Self::new(GameEventType::HintsRewarded, data)
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

pub struct EventLogger {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn get_events_by_type(&self, event_type: &GameEventType) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|event| &event.event_type == event_type)
            .collect()
    }

    pub fn get_recent_events(&self, count: usize) -> Vec<&GameEvent> {
        self.events
            .iter()
            .rev()
            .take(count)
            .collect()
    }

    pub fn get_event_count(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(500)
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());

        if self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }
}
