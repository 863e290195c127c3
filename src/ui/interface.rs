use console::{Key, Term};
use dialoguer::{FuzzySelect, Select};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{
    ActionResult, GameEngine, GameMode, GameRng, Outcome, PenaltyTimer, SessionStats, TimerTick,
};
use crate::words::{CatalogLoader, WordCatalog};
use crate::ui::{Display, ThemeManager};
use crate::config::Config;
use crate::utils::{GameError, GameResult};
use tracing::{info, warn, error, debug};
use uuid::Uuid;

type Status = Option<(String, &'static str)>;

/// What the play loop should do after a key press.
enum KeyOutcome {
    Continue(Status),
    Leave,
}

pub struct GameInterface {
    catalog: WordCatalog,
    catalog_loader: CatalogLoader,
    display: Display,
    stats: SessionStats,
    config: Config,
}

impl GameInterface {
    pub async fn new(config: Config) -> GameResult<Self> {
        info!("Initializing game interface");

        let theme_manager = ThemeManager::new();
        let mut display = Display::new(theme_manager, config.ui.text_width)
            .map_err(|e| GameError::configuration(format!("Failed to create display: {}", e)))?;

        if !display.set_theme(&config.ui.theme) {
            warn!("Unknown theme '{}', using default", config.ui.theme);
        }

        let catalog = match &config.game.words_file {
            Some(path) => CatalogLoader::load_file(path).await?,
            None => WordCatalog::builtin(),
        };

        Ok(Self {
            catalog,
            catalog_loader: CatalogLoader::new(&config.game.words_dir),
            display,
            stats: SessionStats::default(),
            config,
        })
    }

    pub async fn run(&mut self) -> GameResult<()> {
        info!("Starting game interface");

        loop {
            match self.show_main_menu().await {
                Ok(should_continue) => {
                    if !should_continue {
                        break;
                    }
                }
                Err(e) => {
                    error!("Main menu error: {}", e);
                    self.display.show_error(&format!("An error occurred: {}", e)).ok();
                    self.display.wait_for_enter().ok();
                }
            }
        }

        self.display.show_message("Thanks for playing!", "success").ok();
        Ok(())
    }

    pub async fn show_main_menu(&mut self) -> GameResult<bool> {
        self.display.clear_screen().ok();
        self.display.show_title("Word Guess Game")?;
        self.display.show_message(&format!("Word list: {} ({} words)", self.catalog.name, self.catalog.len()), "info")?;
        self.display.show_message(&format!("Version {}", crate::VERSION), "info")?;
        println!();

        let choices = vec![
            "🎮 Play Classic",
            "⏱️ Play Timed",
            "📚 Word Lists",
            "🎨 Settings",
            "📊 Session Statistics",
            "🚪 Exit",
        ];

        let default = match self.config.game.default_mode {
            GameMode::Classic => 0,
            GameMode::Timed => 1,
        };

        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&choices)
            .default(default)
            .interact()
            .map_err(|e| GameError::interface(format!("Menu selection error: {}", e)))?;

        match selection {
            0 => self.play(GameMode::Classic).await?,
            1 => self.play(GameMode::Timed).await?,
            2 => self.word_list_menu().await?,
            3 => self.settings_menu()?,
            4 => self.show_statistics()?,
            5 => return Ok(false),
            _ => unreachable!(),
        }

        Ok(true)
    }

    /// Plays rounds of `mode` until the player presses Esc.
    pub async fn play(&mut self, mode: GameMode) -> GameResult<()> {
        let rules = self.config.rules_for(mode).clone();
        let rng = match self.config.game.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        info!("Playing {} mode with word seed {}", mode, rng.seed());
        let mut engine = GameEngine::new(rules, self.catalog.clone(), rng)?;

        let (tick_tx, mut tick_rx) = mpsc::channel(4);
        let mut timer = PenaltyTimer::new(Duration::from_secs(1), tick_tx);
        let mut round_id = engine.state().round_id;
        if engine.rules().has_timer {
            timer.start();
        }

        let mut status: Status = None;
        let mut pending_key = read_key();

        loop {
            if let Err(e) = self.draw(&engine, &status) {
                timer.cancel();
                finish_read(pending_key).await;
                return Err(e);
            }

            tokio::select! {
                joined = &mut pending_key => {
                    let key = joined
                        .map_err(|e| GameError::interface(format!("Key reader failed: {}", e)))??;

                    match self.handle_key(&mut engine, key) {
                        KeyOutcome::Leave => break,
                        KeyOutcome::Continue(next) => status = next,
                    }
                    pending_key = read_key();
                }
                Some(tick) = tick_rx.recv() => {
                    forward_tick(&mut engine, &timer, tick);
                }
            }

            sync_timer(&engine, &mut timer, &mut round_id);
        }

        timer.cancel();
        self.stats.merge(engine.stats());
        info!("Left {} mode after {} rounds", mode, engine.stats().rounds_played);
        Ok(())
    }

    fn draw(&self, engine: &GameEngine, status: &Status) -> GameResult<()> {
        self.display.clear_screen().ok();
        let status = status.as_ref().map(|(message, style)| (message.as_str(), *style));
        self.display.render(
            &engine.snapshot(),
            status,
            self.config.ui.show_keyboard,
            self.config.ui.show_description,
        )?;
        Ok(())
    }

    fn handle_key(&self, engine: &mut GameEngine, key: Key) -> KeyOutcome {
        debug!("Key pressed: {:?}", key);

        let (result, applied_message) = match key {
            Key::Escape => return KeyOutcome::Leave,
            Key::Char(c) if c.is_ascii_alphabetic() => {
                let letter = c.to_ascii_uppercase();
                let result = engine.select_letter(letter);
                let message = if engine.state().active_word.contains(letter) {
                    (format!("Good guess! '{}' is in the word.", letter), "success")
                } else {
                    (format!("Sorry, '{}' is not in the word.", letter), "error")
                };
                (result, Some(message))
            }
            Key::Char('?') | Key::Tab => (
                engine.request_hint(),
                Some(("A letter has been revealed.".to_string(), "hint")),
            ),
            Key::Backspace => (
                engine.remove_last_guess(),
                Some(("Removed the last letter.".to_string(), "info")),
            ),
            Key::Enter => {
                let snapshot = engine.snapshot();
                if snapshot.can_continue && !engine.rules().supports_submit() {
                    (engine.next_round(), Some(("Next word!".to_string(), "info")))
                } else {
                    (engine.submit_guess(), None)
                }
            }
            Key::Char('!') => (
                engine.restart(),
                Some(("New word, good luck!".to_string(), "info")),
            ),
            _ => return KeyOutcome::Continue(None),
        };

        let status = match result {
            // The play screen announces wins and losses itself
            ActionResult::Applied if engine.outcome() != Outcome::InProgress => None,
            ActionResult::Applied => applied_message,
            ActionResult::Ignored(reason) => Some((reason.message().to_string(), "warning")),
        };
        KeyOutcome::Continue(status)
    }

    async fn word_list_menu(&mut self) -> GameResult<()> {
        let available = self.catalog_loader.list_available_catalogs().await?;

        let mut choices = vec!["📦 Built-in words".to_string()];
        choices.extend(
            available
                .iter()
                .map(|list| format!("{} ({} words) {}", list.name, list.word_count, list.description)),
        );
        choices.push("🔙 Back".to_string());

        let selection = FuzzySelect::new()
            .with_prompt("Choose a word list (type to filter)")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(|e| GameError::interface(format!("Word list selection error: {}", e)))?;

        if selection == choices.len() - 1 {
            return Ok(());
        }

        if selection == 0 {
            self.catalog = WordCatalog::builtin();
        } else {
            let chosen = &available[selection - 1];
            match self.catalog_loader.load_catalog(&chosen.id).await {
                Ok(catalog) => self.catalog = catalog,
                Err(e) => {
                    warn!("Could not load word list {}: {}", chosen.id, e);
                    self.display.show_error(&format!("Could not load '{}': {}", chosen.name, e))?;
                    self.display.wait_for_enter()?;
                    return Ok(());
                }
            }
        }

        self.display.show_success(&format!("Using word list '{}'", self.catalog.name))?;
        self.display.wait_for_enter()?;
        Ok(())
    }

    fn settings_menu(&mut self) -> GameResult<()> {
        let keyboard = if self.config.ui.show_keyboard { "Hide" } else { "Show" };
        let choices = vec![
            "🎨 Change Theme".to_string(),
            format!("⌨️ {} Keyboard", keyboard),
            "🔙 Back".to_string(),
        ];

        let selection = Select::new()
            .with_prompt("Settings")
            .items(&choices)
            .interact()
            .map_err(|e| GameError::interface(format!("Settings selection error: {}", e)))?;

        match selection {
            0 => self.change_theme()?,
            1 => {
                self.config.ui.show_keyboard = !self.config.ui.show_keyboard;
                let status = if self.config.ui.show_keyboard { "shown" } else { "hidden" };
                self.display.show_success(&format!("Keyboard {}", status))?;
                self.display.wait_for_enter()?;
            }
            2 => {}
            _ => unreachable!(),
        }

        Ok(())
    }

    fn change_theme(&mut self) -> GameResult<()> {
        let themes = self.display.get_available_themes();
        let current = themes
            .iter()
            .position(|theme| theme == self.display.current_theme())
            .unwrap_or(0);

        let selection = Select::new()
            .with_prompt(format!("Choose theme (current: {})", self.display.current_theme()))
            .items(&themes)
            .default(current)
            .interact()
            .map_err(|e| GameError::interface(format!("Theme selection error: {}", e)))?;

        let selected_theme = &themes[selection];

        if self.display.set_theme(selected_theme) {
            self.config.ui.theme = selected_theme.clone();
            self.display.show_success(&format!("Theme changed to '{}'", selected_theme))?;
        } else {
            self.display.show_warning(&format!("Failed to set theme '{}'", selected_theme))?;
        }

        self.display.wait_for_enter()?;
        Ok(())
    }

    fn show_statistics(&mut self) -> GameResult<()> {
        self.display.clear_screen().ok();
        self.display.show_title("📊 Session Statistics")?;

        let stats = &self.stats;
        if stats.rounds_played == 0 {
            self.display.show_info("No finished rounds yet.")?;
        } else {
            self.display.show_message(&format!("Rounds played: {}", stats.rounds_played), "info")?;
            self.display.show_message(
                &format!("Won: {}  Lost: {}  ({:.0}% wins)", stats.rounds_won, stats.rounds_lost, stats.win_rate() * 100.0),
                "info",
            )?;
            self.display.show_message(&format!("Current streak: {}  Best streak: {}", stats.current_streak, stats.best_streak), "info")?;
            self.display.show_message(&format!("Hints used: {}  Misses: {}", stats.hints_used, stats.total_misses), "info")?;
            self.display.show_message(&format!("Time played: {}", stats.get_playtime_formatted()), "info")?;
        }

        self.display.show_separator()?;
        self.display.wait_for_enter()?;
        Ok(())
    }
}

/// Keeps the countdown in step with the round it belongs to: a new round
/// gets a fresh schedule, a finished round stops ticking.
fn sync_timer(engine: &GameEngine, timer: &mut PenaltyTimer, round_id: &mut Uuid) {
    if engine.state().round_id != *round_id {
        *round_id = engine.state().round_id;
        if engine.rules().has_timer {
            timer.start();
        }
    } else if engine.outcome().is_over() && timer.is_running() {
        timer.cancel();
    }
}

/// Hands a tick to the engine unless it belongs to an earlier schedule.
fn forward_tick(engine: &mut GameEngine, timer: &PenaltyTimer, tick: TimerTick) -> bool {
    timer.is_current(&tick) && engine.tick().is_applied()
}

/// Reads one key on a blocking thread. Only one read is ever outstanding, so
/// no key press is stolen from the menus after the play loop ends.
fn read_key() -> JoinHandle<std::io::Result<Key>> {
    tokio::task::spawn_blocking(|| Term::stdout().read_key())
}

/// Waits out a read that can no longer be used; its key press is discarded.
async fn finish_read<T>(pending: JoinHandle<T>) {
    if let Err(e) = pending.await {
        warn!("Key reader failed: {}", e);
    }
}
