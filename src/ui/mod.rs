//! User Interface module
//!
//! Terminal UI using ratatui with orientation-aware layouts.

pub mod app;
pub mod layout;
pub mod state;
pub mod widgets;

pub use app::App;
pub use layout::ScreenLayout;
pub use state::{Action, Effect, Focus, ScreenState};
