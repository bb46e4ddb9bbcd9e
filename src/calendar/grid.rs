//! Month grid geometry
//!
//! Weeks start on Sunday. The grid is always six weeks tall so the widget
//! does not change height from month to month.

use chrono::{Datelike, Months, NaiveDate};
use ratatui::layout::Rect;

/// Rows needed: borders, weekday header and six weeks
pub const CALENDAR_HEIGHT: u16 = 2 + 1 + 6;
/// Narrowest area that still fits seven two-character columns
pub const MIN_CALENDAR_WIDTH: u16 = 2 + 7 * 3;

const WEEKS: u16 = 6;
const DAYS_PER_WEEK: u16 = 7;

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Cell layout of one month inside a bordered area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGrid {
    /// First day of the displayed month
    month: NaiveDate,
    /// Area inside the border
    inner: Rect,
    cell_width: u16,
    /// Horizontal offset that centers the seven columns
    left: u16,
}

impl CalendarGrid {
    pub fn new(area: Rect, month: NaiveDate) -> Self {
        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let cell_width = inner.width / DAYS_PER_WEEK;
        let left = inner.x + (inner.width - cell_width * DAYS_PER_WEEK) / 2;

        Self {
            month: month.with_day(1).unwrap_or(month),
            inner,
            cell_width,
            left,
        }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    /// Column of the first day of the month (0 = Sunday)
    fn leading_blanks(&self) -> u16 {
        self.month.weekday().num_days_from_sunday() as u16
    }

    /// Row of the weekday header
    pub fn header_row(&self) -> u16 {
        self.inner.y
    }

    /// Left edge of column `col`
    pub fn column_x(&self, col: u16) -> u16 {
        self.left + col * self.cell_width
    }

    /// Screen rectangle of a day cell, if it is in this month and visible
    pub fn cell_rect(&self, date: NaiveDate) -> Option<Rect> {
        if date.year() != self.month.year() || date.month() != self.month.month() {
            return None;
        }
        if self.cell_width == 0 {
            return None;
        }

        let index = self.leading_blanks() + (date.day() as u16 - 1);
        let (week, col) = (index / DAYS_PER_WEEK, index % DAYS_PER_WEEK);
        let y = self.inner.y + 1 + week;
        if week >= WEEKS || y >= self.inner.bottom() {
            return None;
        }

        Some(Rect::new(self.column_x(col), y, self.cell_width, 1))
    }

    /// Date under a screen position
    pub fn date_at(&self, column: u16, row: u16) -> Option<NaiveDate> {
        if self.cell_width == 0 || column < self.left || row <= self.inner.y {
            return None;
        }
        let col = (column - self.left) / self.cell_width;
        let week = row - self.inner.y - 1;
        if col >= DAYS_PER_WEEK || week >= WEEKS || row >= self.inner.bottom() {
            return None;
        }

        let index = week * DAYS_PER_WEEK + col;
        let day = index.checked_sub(self.leading_blanks())? as u32 + 1;
        if day > days_in_month(self.month) {
            return None;
        }
        self.month.with_day(day)
    }

    /// Every day of the month, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=days_in_month(self.month)).filter_map(move |d| self.month.with_day(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2023, 2, 1)), 28);
        assert_eq!(days_in_month(date(2024, 4, 30)), 30);
        assert_eq!(days_in_month(date(2024, 12, 31)), 31);
    }

    #[test]
    fn test_cell_round_trip() {
        // 2024-09-01 is a Sunday
        let grid = CalendarGrid::new(Rect::new(0, 0, 30, CALENDAR_HEIGHT), date(2024, 9, 15));
        for day in grid.days() {
            let rect = grid.cell_rect(day).unwrap();
            assert_eq!(grid.date_at(rect.x, rect.y), Some(day));
        }

        let first = grid.cell_rect(date(2024, 9, 1)).unwrap();
        assert_eq!(first.y, 2);
    }

    #[test]
    fn test_blank_cells() {
        // 2024-03-01 is a Friday, five blanks before it
        let grid = CalendarGrid::new(Rect::new(0, 0, 30, CALENDAR_HEIGHT), date(2024, 3, 1));
        let first = grid.cell_rect(date(2024, 3, 1)).unwrap();
        assert_eq!(first.x, grid.column_x(5));
        assert_eq!(grid.date_at(grid.column_x(0), first.y), None);
        assert_eq!(grid.date_at(grid.column_x(0), grid.header_row()), None);
    }

    #[test]
    fn test_other_month_has_no_cell() {
        let grid = CalendarGrid::new(Rect::new(0, 0, 30, CALENDAR_HEIGHT), date(2024, 3, 1));
        assert_eq!(grid.cell_rect(date(2024, 4, 1)), None);
    }
}
