use crate::core::{
    EventLogger, GameEvent, GameEventHandler, GameRng, GameRules, GameState, Outcome,
    SessionStats, Snapshot,
};
use crate::words::{draw_word, WordCatalog};
use crate::utils::{GameError, GameResult};
use tracing::{info, debug};

/// Result of a player or timer action. Invalid actions never fail, they are
/// ignored and leave the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Applied,
    Ignored(Rejection),
}

impl ActionResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionResult::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    RoundOver,
    NotALetter,
    AlreadyGuessed,
    NoHintsLeft,
    NothingHidden,
    NothingToUndo,
    NothingGuessed,
    NotSupported,
    RoundNotWon,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::RoundOver => "The round is over. Restart to play again.",
            Rejection::NotALetter => "Only letters A-Z can be guessed.",
            Rejection::AlreadyGuessed => "You already picked that letter.",
            Rejection::NoHintsLeft => "No hints left.",
            Rejection::NothingHidden => "Every letter is already revealed.",
            Rejection::NothingToUndo => "There is no letter to remove.",
            Rejection::NothingGuessed => "Pick at least one letter first.",
            Rejection::NotSupported => "Not available in this mode.",
            Rejection::RoundNotWon => "Win the round to move on.",
        }
    }
}

pub struct GameEngine {
    rules: GameRules,
    catalog: WordCatalog,
    rng: GameRng,
    state: GameState,
    stats: SessionStats,
    event_handler: EventLogger,
}

impl GameEngine {
    pub fn new(rules: GameRules, catalog: WordCatalog, mut rng: GameRng) -> GameResult<Self> {
        rules.validate()?;

        let word = draw_word(&catalog, &mut rng)
            .cloned()
            .ok_or_else(|| GameError::catalog(format!("Catalog '{}' has no words", catalog.name)))?;
        let state = GameState::new(word, &rules);

        let mut engine = Self {
            rules,
            catalog,
            rng,
            state,
            stats: SessionStats::default(),
            event_handler: EventLogger::default(),
        };
        engine.announce_round();
        Ok(engine)
    }

    pub fn select_letter(&mut self, letter: char) -> ActionResult {
        if self.state.is_over() {
            return self.ignore("select_letter", Rejection::RoundOver);
        }

        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return self.ignore("select_letter", Rejection::NotALetter);
        }
        if self.state.has_guessed(letter) {
            return self.ignore("select_letter", Rejection::AlreadyGuessed);
        }

        self.state.guessed_letters.push(letter);

        let occurrences = self.state.active_word.word.matches(letter).count();
        if occurrences == 0 {
            self.state.lose_life();
            self.stats.record_miss();
            debug!("Miss '{}', {} lives left", letter, self.state.remaining_lives);
            self.emit_event(GameEvent::letter_missed(letter, self.state.remaining_lives));
        } else {
            debug!("Hit '{}' x{}", letter, occurrences);
            self.emit_event(GameEvent::letter_guessed(letter, occurrences));
        }

        self.settle();
        ActionResult::Applied
    }

    pub fn request_hint(&mut self) -> ActionResult {
        if self.state.is_over() {
            return self.ignore("request_hint", Rejection::RoundOver);
        }
        if self.state.hints_remaining == 0 {
            return self.ignore("request_hint", Rejection::NoHintsLeft);
        }
        let Some(letter) = self.state.next_hidden_letter() else {
            return self.ignore("request_hint", Rejection::NothingHidden);
        };

        self.state.guessed_letters.push(letter);
        self.state.hints_remaining -= 1;
        self.stats.record_hint();

        debug!("Hint revealed '{}', {} hints left", letter, self.state.hints_remaining);
        self.emit_event(GameEvent::hint_used(letter, self.state.hints_remaining));

        self.settle();
        ActionResult::Applied
    }

    /// Takes back the most recent letter. A life lost to that letter stays lost.
    pub fn remove_last_guess(&mut self) -> ActionResult {
        if !self.rules.supports_undo {
            return self.ignore("remove_last_guess", Rejection::NotSupported);
        }
        if self.state.is_over() {
            return self.ignore("remove_last_guess", Rejection::RoundOver);
        }
        let Some(letter) = self.state.guessed_letters.pop() else {
            return self.ignore("remove_last_guess", Rejection::NothingToUndo);
        };

        debug!("Removed '{}'", letter);
        self.emit_event(GameEvent::guess_removed(letter));
        ActionResult::Applied
    }

    pub fn submit_guess(&mut self) -> ActionResult {
        if !self.rules.supports_submit() {
            return self.ignore("submit_guess", Rejection::NotSupported);
        }
        if self.state.is_over() {
            return self.ignore("submit_guess", Rejection::RoundOver);
        }
        if self.state.guessed_letters.is_empty() {
            return self.ignore("submit_guess", Rejection::NothingGuessed);
        }

        let correct = self.state.is_word_complete();
        self.state.verdict = Some(if correct { Outcome::Won } else { Outcome::Lost });
        self.emit_event(GameEvent::guess_submitted(correct));

        self.settle();
        ActionResult::Applied
    }

    /// One second of the penalty countdown.
    pub fn tick(&mut self) -> ActionResult {
        if !self.rules.has_timer {
            return self.ignore("tick", Rejection::NotSupported);
        }
        if self.state.is_over() {
            return self.ignore("tick", Rejection::RoundOver);
        }

        self.state.seconds_until_penalty = self.state.seconds_until_penalty.saturating_sub(1);
        if self.state.seconds_until_penalty == 0 {
            self.state.lose_life();
            self.state.seconds_until_penalty = self.rules.penalty_interval_secs;
            debug!("Timer penalty, {} lives left", self.state.remaining_lives);
            self.emit_event(GameEvent::penalty_applied(self.state.remaining_lives));
            self.settle();
        }

        ActionResult::Applied
    }

    /// Throws the current round away and starts over from the starting constants.
    pub fn restart(&mut self) -> ActionResult {
        let hints = self.rules.starting_hints;
        self.start_round(hints);
        ActionResult::Applied
    }

    /// Moves on after a win, keeping the hints earned so far.
    pub fn next_round(&mut self) -> ActionResult {
        if self.state.outcome() != Outcome::Won {
            return self.ignore("next_round", Rejection::RoundNotWon);
        }
        let hints = self.state.hints_remaining;
        self.start_round(hints);
        ActionResult::Applied
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(&self.rules)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn event_log(&self) -> &EventLogger {
        &self.event_handler
    }

    pub fn recent_events(&self, count: usize) -> Vec<GameEvent> {
        self.event_handler
            .get_recent_events(count)
            .into_iter()
            .cloned()
            .collect()
    }

    fn start_round(&mut self, hints: u32) {
        // The catalog was non-empty when the engine was built and never changes
        let word = draw_word(&self.catalog, &mut self.rng)
            .cloned()
            .unwrap_or_else(|| self.state.active_word.clone());
        self.state = GameState::with_hints(word, &self.rules, hints);
        self.announce_round();
    }

    fn announce_round(&mut self) {
        info!(
            "Starting {} round {} ({} letters)",
            self.rules.mode,
            self.state.round_id,
            self.state.active_word.len()
        );
        self.emit_event(GameEvent::round_started(&self.state, self.rules.mode));
    }

    /// Called after every applied transition that can end the round. Each
    /// round passes from InProgress to a final outcome at most once.
    fn settle(&mut self) {
        match self.state.outcome() {
            Outcome::InProgress => {}
            Outcome::Won => {
                info!("Round won: {}", self.state.active_word.word);
                self.stats.record_round(&self.state);
                self.emit_event(GameEvent::round_won(&self.state));

                if self.rules.hints_reward_on_win && self.rules.hint_reward > 0 {
                    self.state.hints_remaining =
                        self.state.hints_remaining.saturating_add(self.rules.hint_reward);
                    self.emit_event(GameEvent::hints_rewarded(
                        self.rules.hint_reward,
                        self.state.hints_remaining,
                    ));
                }
            }
            Outcome::Lost => {
                info!("Round lost: {}", self.state.active_word.word);
                self.stats.record_round(&self.state);
                self.emit_event(GameEvent::round_lost(&self.state));
            }
        }
    }

    fn ignore(&self, action: &str, reason: Rejection) -> ActionResult {
        debug!("Ignored {}: {:?}", action, reason);
        ActionResult::Ignored(reason)
    }

    fn emit_event(&mut self, event: GameEvent) {
        self.event_handler.handle_event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEventType;
    use crate::words::WordEntry;
    use pretty_assertions::assert_eq;

    fn single_word(word: &str) -> WordCatalog {
        WordCatalog::new("test", vec![WordEntry::new(word, "test word").unwrap()]).unwrap()
    }

    fn engine(word: &str, rules: GameRules) -> GameEngine {
        GameEngine::new(rules, single_word(word), GameRng::new(1)).unwrap()
    }

    #[test]
    fn test_game_engine_creation() {
        let engine = engine("HELLO", GameRules::classic());
        assert_eq!(engine.outcome(), Outcome::InProgress);
        assert_eq!(engine.state().active_word.word, "HELLO");
        assert_eq!(engine.event_log().get_events_by_type(&GameEventType::RoundStarted).len(), 1);
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let mut rules = GameRules::classic();
        rules.starting_lives = 0;
        assert!(GameEngine::new(rules, WordCatalog::builtin(), GameRng::new(1)).is_err());
    }

    #[test]
    fn test_hello_win_without_misses() {
        let mut engine = engine("HELLO", GameRules::classic());
        for letter in ['H', 'E', 'L', 'O'] {
            assert_eq!(engine.select_letter(letter), ActionResult::Applied);
        }

        assert_eq!(engine.outcome(), Outcome::Won);
        assert_eq!(engine.state().remaining_lives, 3);
        assert!(engine.state().misses().is_empty());
        assert_eq!(engine.stats().rounds_won, 1);
    }

    #[test]
    fn test_hello_loss_reveals_word() {
        let mut engine = engine("HELLO", GameRules::classic());
        for letter in ['X', 'Y', 'Z'] {
            engine.select_letter(letter);
        }

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.outcome, Outcome::Lost);
        assert_eq!(snapshot.revealed_word.as_deref(), Some("HELLO"));
        assert_eq!(snapshot.misses, vec!['X', 'Y', 'Z']);
        assert_eq!(engine.stats().rounds_lost, 1);
    }

    #[test]
    fn test_lowercase_and_invalid_letters() {
        let mut engine = engine("HELLO", GameRules::classic());
        assert!(engine.select_letter('h').is_applied());
        assert!(engine.state().has_guessed('H'));

        let before = engine.state().clone();
        assert_eq!(engine.select_letter('3'), ActionResult::Ignored(Rejection::NotALetter));
        assert_eq!(engine.select_letter('H'), ActionResult::Ignored(Rejection::AlreadyGuessed));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut engine = engine("HELLO", GameRules::classic());
        for letter in ['X', 'Y', 'Z'] {
            engine.select_letter(letter);
        }
        let before = engine.state().clone();

        assert_eq!(engine.select_letter('H'), ActionResult::Ignored(Rejection::RoundOver));
        assert_eq!(engine.request_hint(), ActionResult::Ignored(Rejection::RoundOver));
        assert_eq!(engine.remove_last_guess(), ActionResult::Ignored(Rejection::RoundOver));
        assert_eq!(engine.submit_guess(), ActionResult::Ignored(Rejection::RoundOver));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.stats().rounds_played, 1);
    }

    #[test]
    fn test_hint_reveals_leftmost_hidden_letter() {
        let mut engine = engine("HELLO", GameRules::classic());
        engine.select_letter('H');

        assert!(engine.request_hint().is_applied());
        assert_eq!(engine.state().guessed_letters, vec!['H', 'E']);
        assert_eq!(engine.state().hints_remaining, 2);
        assert_eq!(engine.state().remaining_lives, 3);
    }

    #[test]
    fn test_hint_with_none_left_is_noop() {
        let mut engine = engine("PROGRAMMING", GameRules::classic());
        for _ in 0..3 {
            assert!(engine.request_hint().is_applied());
        }
        let before = engine.state().clone();

        assert_eq!(engine.request_hint(), ActionResult::Ignored(Rejection::NoHintsLeft));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_hint_can_finish_the_word() {
        let mut engine = engine("HI", GameRules::classic());
        engine.select_letter('H');
        engine.request_hint();
        assert_eq!(engine.outcome(), Outcome::Won);
    }

    #[test]
    fn test_undo_does_not_restore_life() {
        let mut engine = engine("HELLO", GameRules::classic());
        engine.select_letter('Q');
        assert_eq!(engine.state().remaining_lives, 2);

        assert!(engine.remove_last_guess().is_applied());
        assert!(engine.state().guessed_letters.is_empty());
        assert_eq!(engine.state().remaining_lives, 2);

        // Picking the same wrong letter again costs another life
        engine.select_letter('Q');
        assert_eq!(engine.state().remaining_lives, 1);
    }

    #[test]
    fn test_undo_with_nothing_guessed() {
        let mut engine = engine("HELLO", GameRules::classic());
        assert_eq!(engine.remove_last_guess(), ActionResult::Ignored(Rejection::NothingToUndo));
    }

    #[test]
    fn test_undo_and_submit_unsupported_in_timed_mode() {
        let mut engine = engine("HELLO", GameRules::timed());
        engine.select_letter('H');
        assert_eq!(engine.remove_last_guess(), ActionResult::Ignored(Rejection::NotSupported));
        assert_eq!(engine.submit_guess(), ActionResult::Ignored(Rejection::NotSupported));
    }

    #[test]
    fn test_submit_incomplete_word_loses() {
        let mut engine = engine("HELLO", GameRules::classic());
        assert_eq!(engine.submit_guess(), ActionResult::Ignored(Rejection::NothingGuessed));

        engine.select_letter('H');
        assert!(engine.submit_guess().is_applied());

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.outcome, Outcome::Lost);
        assert_eq!(snapshot.revealed_word.as_deref(), Some("HELLO"));
        assert_eq!(snapshot.remaining_lives, 3);
    }

    #[test]
    fn test_tick_ignored_without_timer() {
        let mut engine = engine("HELLO", GameRules::classic());
        let before = engine.state().clone();
        assert_eq!(engine.tick(), ActionResult::Ignored(Rejection::NotSupported));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_ten_ticks_cost_one_life() {
        let mut engine = engine("HELLO", GameRules::timed());
        for _ in 0..9 {
            engine.tick();
        }
        assert_eq!(engine.state().seconds_until_penalty, 1);
        assert_eq!(engine.state().remaining_lives, 6);

        engine.tick();
        assert_eq!(engine.state().seconds_until_penalty, 10);
        assert_eq!(engine.state().remaining_lives, 5);
    }

    #[test]
    fn test_timer_can_end_the_round() {
        let mut engine = engine("HELLO", GameRules::timed());
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.outcome(), Outcome::Lost);

        let before = engine.state().clone();
        assert_eq!(engine.tick(), ActionResult::Ignored(Rejection::RoundOver));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.stats().rounds_lost, 1);
    }

    #[test]
    fn test_timed_win_rewards_hint_and_carries_over() {
        let mut engine = engine("HI", GameRules::timed());
        engine.select_letter('H');
        engine.select_letter('I');

        assert_eq!(engine.outcome(), Outcome::Won);
        assert_eq!(engine.state().hints_remaining, 4);

        assert!(engine.next_round().is_applied());
        assert_eq!(engine.outcome(), Outcome::InProgress);
        assert_eq!(engine.state().hints_remaining, 4);
        assert_eq!(engine.state().remaining_lives, 6);
        assert!(engine.state().guessed_letters.is_empty());
    }

    #[test]
    fn test_classic_win_has_no_reward() {
        let mut engine = engine("HI", GameRules::classic());
        engine.select_letter('H');
        engine.select_letter('I');
        assert_eq!(engine.state().hints_remaining, 3);
    }

    #[test]
    fn test_next_round_requires_a_win() {
        let mut engine = engine("HELLO", GameRules::timed());
        assert_eq!(engine.next_round(), ActionResult::Ignored(Rejection::RoundNotWon));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut engine = engine("HELLO", GameRules::timed());
        engine.select_letter('Z');
        engine.request_hint();
        engine.tick();
        let old_round = engine.state().round_id;

        assert!(engine.restart().is_applied());

        let state = engine.state();
        assert_ne!(state.round_id, old_round);
        assert!(state.guessed_letters.is_empty());
        assert_eq!(state.remaining_lives, 6);
        assert_eq!(state.hints_remaining, 3);
        assert_eq!(state.seconds_until_penalty, 10);
        assert_eq!(state.verdict, None);
        assert_eq!(engine.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_events_recorded_per_transition() {
        let mut engine = engine("HELLO", GameRules::classic());
        engine.select_letter('H');
        engine.select_letter('Q');
        engine.select_letter('Q');

        let recent = engine.recent_events(2);
        assert_eq!(recent[0].event_type, GameEventType::LetterMissed);
        assert_eq!(recent[1].event_type, GameEventType::LetterGuessed);
        // Round start plus two applied guesses; the repeat is not logged
        assert_eq!(engine.event_log().get_event_count(), 3);
    }

    #[test]
    fn test_win_reward_saturates() {
        let mut engine = engine("HI", GameRules::timed());
        engine.state.hints_remaining = u32::MAX;

        engine.select_letter('H');
        engine.select_letter('I');

        assert_eq!(engine.outcome(), Outcome::Won);
        assert_eq!(engine.state().hints_remaining, u32::MAX);
        assert!(engine.next_round().is_applied());
        assert_eq!(engine.state().hints_remaining, u32::MAX);
    }
}
