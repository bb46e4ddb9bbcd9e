//! Calendar widget
//!
//! A single-month grid driven by a current date and a set of marked dates.
//! Taps are resolved back to dates through the same grid geometry that
//! renders the month.

mod marking;
mod grid;
mod widget;

pub use marking::{DateMarking, MarkedDates, CalendarTheme};
pub use grid::{CalendarGrid, CALENDAR_HEIGHT, MIN_CALENDAR_WIDTH};
pub use widget::{CalendarState, CalendarWidget};
