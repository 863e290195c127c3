use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::core::{GameMode, GameRules};
use crate::utils::{GameError, GameResult};

/// Prefix for environment overrides, e.g. `WORDGUESS__UI__THEME=dark`.
pub const ENV_PREFIX: &str = "WORDGUESS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub classic: GameRules,
    pub timed: GameRules,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub default_mode: GameMode,
    pub seed: Option<u64>,
    pub words_file: Option<PathBuf>,
    pub words_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub text_width: usize,
    pub show_keyboard: bool,
    pub show_description: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                default_mode: GameMode::Classic,
                seed: None,
                words_file: None,
                words_dir: PathBuf::from("./assets/words"),
            },
            classic: GameRules::classic(),
            timed: GameRules::timed(),
            ui: UiConfig {
                theme: "default".to_string(),
                text_width: 60,
                show_keyboard: true,
                show_description: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Loads `path`, creating it with defaults when it does not exist yet, then
    /// applies environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            Self::default().save_to_file(path)?;
        }

        Self::load(Some(path), ENV_PREFIX)
    }

    /// Defaults plus environment overrides, no file.
    pub fn from_env() -> GameResult<Self> {
        Self::load(None, ENV_PREFIX)
    }

    pub fn load(path: Option<&Path>, env_prefix: &str) -> GameResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GameError::configuration(format!("Failed to create config directory: {}", e)))?;
        }

        let toml_content = toml::to_string_pretty(self)?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn rules_for(&self, mode: GameMode) -> &GameRules {
        match mode {
            GameMode::Classic => &self.classic,
            GameMode::Timed => &self.timed,
        }
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::configuration("Invalid logging level")),
        }

        if self.ui.text_width < 40 {
            return Err(GameError::configuration("Text width must be at least 40"));
        }

        if self.classic.mode != GameMode::Classic || self.timed.mode != GameMode::Timed {
            return Err(GameError::configuration("Rule sections must keep their own mode"));
        }
        self.classic.validate()?;
        self.timed.validate()?;

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(mode) = cli_config.mode {
            self.game.default_mode = mode;
        }
        if let Some(seed) = cli_config.seed {
            self.game.seed = Some(seed);
        }
        if let Some(words_file) = cli_config.words_file {
            self.game.words_file = Some(words_file);
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub mode: Option<GameMode>,
    pub seed: Option<u64>,
    pub words_file: Option<PathBuf>,
    pub theme: Option<String>,
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.game.default_mode, GameMode::Classic);
        assert_eq!(config.classic, GameRules::classic());
        assert_eq!(config.timed, GameRules::timed());
        assert_eq!(config.ui.theme, "default");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ui.text_width = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timed.penalty_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classic.mode = GameMode::Timed;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::from_file(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(config, Config::default());

        let loaded = Config::load(Some(&config_path), "WGTEST_MISSING").unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[ui]\ntheme = \"dark\"\n\n[timed]\nstarting_lives = 4\n\n[game]\nseed = 7\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path), "WGTEST_FILE").unwrap();
        assert_eq!(config.ui.theme, "dark");
        assert_eq!(config.ui.text_width, 60);
        assert_eq!(config.timed.starting_lives, 4);
        assert_eq!(config.timed.penalty_interval_secs, 10);
        assert_eq!(config.game.seed, Some(7));
    }

    #[test]
    fn test_env_overrides_file() {
        std::env::set_var("WGTEST_ENV__UI__THEME", "light");
        std::env::set_var("WGTEST_ENV__CLASSIC__STARTING_HINTS", "1");

        let config = Config::load(None, "WGTEST_ENV").unwrap();
        assert_eq!(config.ui.theme, "light");
        assert_eq!(config.classic.starting_hints, 1);

        std::env::remove_var("WGTEST_ENV__UI__THEME");
        std::env::remove_var("WGTEST_ENV__CLASSIC__STARTING_HINTS");
    }

    #[test]
    fn test_cli_config_merge() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            mode: Some(GameMode::Timed),
            seed: Some(99),
            theme: Some("dark".to_string()),
            debug: true,
            ..Default::default()
        };

        config.merge_with_cli(cli_config);

        assert_eq!(config.game.default_mode, GameMode::Timed);
        assert_eq!(config.game.seed, Some(99));
        assert_eq!(config.ui.theme, "dark");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.rules_for(GameMode::Timed).starting_lives, 6);
    }
}
