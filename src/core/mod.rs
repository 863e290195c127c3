pub mod engine;
pub mod game_state;
pub mod rules;
pub mod rng;
pub mod events;
pub mod stats;
pub mod timer;

pub use engine::{ActionResult, GameEngine, Rejection};
pub use game_state::{GameState, Outcome, Snapshot};
pub use rules::{GameMode, GameRules, MAX_LIVES};
pub use rng::GameRng;
pub use events::{EventLogger, GameEvent, GameEventHandler, GameEventType};
pub use stats::SessionStats;
pub use timer::{PenaltyTimer, TimerTick};
