//! Marked date annotations and calendar colors

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ratatui::style::Color;

/// Orange used for today's date
pub const TODAY_ORANGE: Color = Color::Rgb(255, 165, 0);

/// Display hint attached to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMarking {
    pub selected: bool,
    pub selected_color: Color,
    pub selected_text_color: Color,
    pub dot_color: Option<Color>,
}

impl DateMarking {
    /// Highlight used for the submitted date
    pub fn selection() -> Self {
        Self {
            selected: true,
            selected_color: Color::Blue,
            selected_text_color: Color::White,
            dot_color: Some(Color::Red),
        }
    }
}

/// Date to marking map handed to the calendar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedDates {
    marks: BTreeMap<NaiveDate, DateMarking>,
}

impl MarkedDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with a single selected date
    pub fn single(date: NaiveDate) -> Self {
        let mut marked = Self::new();
        marked.mark(date, DateMarking::selection());
        marked
    }

    pub fn mark(&mut self, date: NaiveDate, marking: DateMarking) {
        self.marks.insert(date, marking);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DateMarking> {
        self.marks.get(&date)
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// Calendar colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTheme {
    pub background: Color,
    pub selected_day_background: Color,
    pub selected_day_text: Color,
    pub today_text: Color,
    pub day_text: Color,
    pub month_text: Color,
    pub weekday_text: Color,
    pub border: Color,
}

impl Default for CalendarTheme {
    fn default() -> Self {
        Self {
            background: Color::White,
            selected_day_background: Color::Blue,
            selected_day_text: Color::White,
            today_text: TODAY_ORANGE,
            day_text: Color::Black,
            month_text: Color::Black,
            weekday_text: Color::DarkGray,
            border: Color::Gray,
        }
    }
}
