//! Calendar widget for ratatui

use chrono::{Datelike, Days, Months, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Widget},
};

use super::grid::CalendarGrid;
use super::marking::{CalendarTheme, MarkedDates};

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Visible month and keyboard cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    current: NaiveDate,
    cursor: NaiveDate,
}

impl CalendarState {
    pub fn new(current: NaiveDate) -> Self {
        Self {
            current: first_of_month(current),
            cursor: current,
        }
    }

    /// First day of the visible month
    pub fn visible_month(&self) -> NaiveDate {
        self.current
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// Jump to the month containing `date` and put the cursor on it
    pub fn set_current(&mut self, date: NaiveDate) {
        self.current = first_of_month(date);
        self.cursor = date;
    }

    /// Move the cursor by a number of days, following it across months
    pub fn move_cursor(&mut self, days: i64) {
        let step = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            self.cursor.checked_add_days(step)
        } else {
            self.cursor.checked_sub_days(step)
        };
        if let Some(date) = moved {
            self.set_current(date);
        }
    }

    /// Show the next (or previous) month, keeping the cursor's day where possible
    pub fn shift_month(&mut self, forward: bool) {
        let months = Months::new(1);
        let shifted = if forward {
            self.cursor.checked_add_months(months)
        } else {
            self.cursor.checked_sub_months(months)
        };
        if let Some(date) = shifted {
            self.set_current(date);
        }
    }

    /// Grid for the visible month laid out in `area`
    pub fn grid(&self, area: Rect) -> CalendarGrid {
        CalendarGrid::new(area, self.current)
    }

    /// Date tapped at a screen position
    pub fn day_at(&self, area: Rect, column: u16, row: u16) -> Option<NaiveDate> {
        self.grid(area).date_at(column, row)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Widget that draws one month
pub struct CalendarWidget<'a> {
    state: &'a CalendarState,
    marked: &'a MarkedDates,
    theme: CalendarTheme,
    today: Option<NaiveDate>,
    focused: bool,
}

impl<'a> CalendarWidget<'a> {
    pub fn new(state: &'a CalendarState, marked: &'a MarkedDates) -> Self {
        Self {
            state,
            marked,
            theme: CalendarTheme::default(),
            today: None,
            focused: false,
        }
    }

    pub fn theme(mut self, theme: CalendarTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Style and dot color for one day
    fn day_style(&self, date: NaiveDate) -> (Style, Option<ratatui::style::Color>) {
        let mut style = Style::default().fg(self.theme.day_text).bg(self.theme.background);
        let mut dot = None;

        if self.today == Some(date) {
            style = style.fg(self.theme.today_text).add_modifier(Modifier::BOLD);
        }

        if let Some(marking) = self.marked.get(date) {
            if marking.selected {
                style = style.fg(marking.selected_text_color).bg(marking.selected_color);
            }
            dot = marking.dot_color;
        }

        if self.focused && self.state.cursor == date {
            style = style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
        }

        (style, dot)
    }
}

impl Widget for CalendarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let month = self.state.visible_month();
        let border_style = if self.focused {
            Style::default().fg(self.theme.selected_day_background)
        } else {
            Style::default().fg(self.theme.border)
        };

        let title = Line::styled(
            format!(" {} ", month.format("%B %Y")),
            Style::default().fg(self.theme.month_text).add_modifier(Modifier::BOLD),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.background))
            .title(title)
            .title_alignment(Alignment::Center);
        block.render(area, buf);

        let grid = self.state.grid(area);
        let cell_width = grid.cell_width();
        if cell_width < 2 {
            return;
        }

        let weekday_style = Style::default().fg(self.theme.weekday_text).bg(self.theme.background);
        for (col, name) in WEEKDAYS.iter().enumerate() {
            let x = grid.column_x(col as u16) + (cell_width - 2) / 2;
            if grid.header_row() < area.bottom().saturating_sub(1) {
                buf.set_string(x, grid.header_row(), name, weekday_style);
            }
        }

        for date in grid.days() {
            let Some(cell) = grid.cell_rect(date) else {
                continue;
            };
            let (style, dot) = self.day_style(date);
            let label = format!("{:>2}", date.day());
            let x = cell.x + (cell_width - 2) / 2;

            buf.set_style(cell, style);
            buf.set_string(x, cell.y, &label, style);

            if let Some(dot_color) = dot {
                let dot_x = x + 2;
                if dot_x < cell.right() {
                    buf.set_string(dot_x, cell.y, "•", style.fg(dot_color));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{DateMarking, CALENDAR_HEIGHT};
    use ratatui::style::Color;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cursor_crosses_months() {
        let mut state = CalendarState::new(date(2024, 1, 31));
        state.move_cursor(1);
        assert_eq!(state.cursor(), date(2024, 2, 1));
        assert_eq!(state.visible_month(), date(2024, 2, 1));

        state.move_cursor(-7);
        assert_eq!(state.cursor(), date(2024, 1, 25));
    }

    #[test]
    fn test_shift_month_clamps_day() {
        let mut state = CalendarState::new(date(2024, 1, 31));
        state.shift_month(true);
        assert_eq!(state.cursor(), date(2024, 2, 29));
        state.shift_month(false);
        assert_eq!(state.cursor(), date(2024, 1, 29));
    }

    #[test]
    fn test_render_marks_selected_day() {
        let state = CalendarState::new(date(2024, 9, 15));
        let marked = MarkedDates::single(date(2024, 9, 15));
        let area = Rect::new(0, 0, 30, CALENDAR_HEIGHT);
        let mut buf = Buffer::empty(area);

        CalendarWidget::new(&state, &marked).render(area, &mut buf);

        let cell = state.grid(area).cell_rect(date(2024, 9, 15)).unwrap();
        let rendered = &buf[(cell.x + 1, cell.y)];
        assert_eq!(rendered.symbol(), "1");
        assert_eq!(rendered.bg, DateMarking::selection().selected_color);
        assert_eq!(rendered.fg, Color::White);
    }

    #[test]
    fn test_render_title_and_header() {
        let state = CalendarState::new(date(2024, 9, 15));
        let marked = MarkedDates::new();
        let area = Rect::new(0, 0, 30, CALENDAR_HEIGHT);
        let mut buf = Buffer::empty(area);

        CalendarWidget::new(&state, &marked).render(area, &mut buf);

        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("September 2024"));
        let header: String = (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(header.contains("Su"));
        assert!(header.contains("Sa"));
    }

    #[test]
    fn test_day_at_matches_render() {
        let state = CalendarState::new(date(2024, 2, 1));
        let area = Rect::new(5, 3, 40, CALENDAR_HEIGHT);
        let cell = state.grid(area).cell_rect(date(2024, 2, 29)).unwrap();
        assert_eq!(state.day_at(area, cell.x, cell.y), Some(date(2024, 2, 29)));
        assert_eq!(state.day_at(area, 0, 0), None);
    }
}
