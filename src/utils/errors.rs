use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Word catalog error: {message}")]
    Catalog { message: String },

    #[error("Invalid word '{word}': {reason}")]
    InvalidWord { word: String, reason: String },

    #[error("Rules error: {message}")]
    Rules { message: String },

    #[error("Interface error: {message}")]
    Interface { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl GameError {
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    pub fn invalid_word<W: Into<String>, R: Into<String>>(word: W, reason: R) -> Self {
        Self::InvalidWord {
            word: word.into(),
            reason: reason.into(),
        }
    }

    pub fn rules<S: Into<String>>(message: S) -> Self {
        Self::Rules {
            message: message.into(),
        }
    }

    pub fn interface<S: Into<String>>(message: S) -> Self {
        Self::Interface {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
