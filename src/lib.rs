pub mod core;
pub mod words;
pub mod ui;
pub mod config;
pub mod utils;

pub use crate::core::{GameEngine, GameMode, GameRules, GameState, Snapshot};
pub use crate::words::{WordCatalog, WordEntry};
pub use crate::ui::GameInterface;
pub use crate::config::Config;

// Re-export commonly used types
pub type Result<T> = anyhow::Result<T>;

// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
