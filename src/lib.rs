//! Lịch - A terminal date-entry form and calendar
//!
//! Type a day, month and year, check that they form a real date, and see
//! it on the calendar. The layout follows the window's orientation.

pub mod date;
pub mod form;
pub mod orientation;
pub mod calendar;
pub mod render;
pub mod config;
pub mod ui;

// Re-export commonly used types
pub use date::{SelectedDate, DateError};
pub use form::{FormInput, SubmitOutcome};
pub use orientation::{Dimensions, OrientationState, WindowSize};
pub use ui::App;
