pub mod interface;
pub mod theme;
pub mod components;

pub use interface::GameInterface;
pub use theme::{Theme, ThemeManager};
pub use components::*;