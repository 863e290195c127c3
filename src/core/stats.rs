use serde::{Deserialize, Serialize};
use crate::core::{GameState, Outcome};

/// In-memory counters for the current process. Never written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_played: u32,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub hints_used: u32,
    pub total_misses: u32,
    pub total_seconds: i64,
}

impl SessionStats {
    pub fn record_hint(&mut self) {
        self.hints_used += 1;
    }

    pub fn record_miss(&mut self) {
        self.total_misses += 1;
    }

    pub fn record_round(&mut self, state: &GameState) {
        match state.outcome() {
            Outcome::Won => {
                self.rounds_won += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            Outcome::Lost => {
                self.rounds_lost += 1;
                self.current_streak = 0;
            }
            Outcome::InProgress => return,
        }
        self.rounds_played += 1;
        self.total_seconds += state.elapsed_seconds().max(0);
    }

    /// Folds a later play session into these totals.
    pub fn merge(&mut self, later: &SessionStats) {
        self.rounds_played += later.rounds_played;
        self.rounds_won += later.rounds_won;
        self.rounds_lost += later.rounds_lost;
        self.hints_used += later.hints_used;
        self.total_misses += later.total_misses;
        self.total_seconds += later.total_seconds;

        if later.rounds_lost == 0 {
            self.current_streak += later.current_streak;
        } else {
            self.current_streak = later.current_streak;
        }
        self.best_streak = self
            .best_streak
            .max(later.best_streak)
            .max(self.current_streak);
    }

    pub fn win_rate(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.rounds_won as f64 / self.rounds_played as f64
        }
    }

    pub fn get_playtime_formatted(&self) -> String {
        let hours = self.total_seconds / 3600;
        let minutes = (self.total_seconds % 3600) / 60;
        let seconds = self.total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRules;
    use crate::words::WordEntry;

    fn finished(won: bool) -> GameState {
        let mut state = GameState::new(WordEntry::new("HI", "").unwrap(), &GameRules::classic());
        if won {
            state.guessed_letters = vec!['H', 'I'];
        } else {
            state.remaining_lives = 0;
        }
        state
    }

    #[test]
    fn test_streaks() {
        let mut stats = SessionStats::default();

        stats.record_round(&finished(true));
        stats.record_round(&finished(true));
        stats.record_round(&finished(false));
        stats.record_round(&finished(true));

        assert_eq!(stats.rounds_played, 4);
        assert_eq!(stats.rounds_won, 3);
        assert_eq!(stats.rounds_lost, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.best_streak, 2);
        assert!((stats.win_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unfinished_round_not_counted() {
        let mut stats = SessionStats::default();
        let state = GameState::new(WordEntry::new("HI", "").unwrap(), &GameRules::classic());
        stats.record_round(&state);
        assert_eq!(stats, SessionStats::default());
        assert_eq!(stats.win_rate(), 0.0);
    }

    #[test]
    fn test_merge_carries_streak_across_sessions() {
        let mut totals = SessionStats::default();

        let mut first = SessionStats::default();
        first.record_round(&finished(true));
        first.record_round(&finished(true));
        totals.merge(&first);

        let mut second = SessionStats::default();
        second.record_round(&finished(true));
        second.record_hint();
        totals.merge(&second);

        assert_eq!(totals.rounds_played, 3);
        assert_eq!(totals.current_streak, 3);
        assert_eq!(totals.best_streak, 3);
        assert_eq!(totals.hints_used, 1);

        let mut third = SessionStats::default();
        third.record_round(&finished(false));
        third.record_miss();
        totals.merge(&third);

        assert_eq!(totals.current_streak, 0);
        assert_eq!(totals.best_streak, 3);
        assert_eq!(totals.rounds_lost, 1);
        assert_eq!(totals.total_misses, 1);
    }

    #[test]
    fn test_playtime_format() {
        let mut stats = SessionStats::default();
        stats.total_seconds = 42;
        assert_eq!(stats.get_playtime_formatted(), "42s");
        stats.total_seconds = 125;
        assert_eq!(stats.get_playtime_formatted(), "2m 5s");
        stats.total_seconds = 3725;
        assert_eq!(stats.get_playtime_formatted(), "1h 2m 5s");
    }
}
