//! Screen layout
//!
//! Rectangles for every element, derived from the frame area and the
//! orientation state. The same layout is used to draw and to hit-test
//! mouse clicks.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

use crate::calendar::{CALENDAR_HEIGHT, MIN_CALENDAR_WIDTH};
use crate::orientation::{FlexDirection, HeaderSize, OrientationState};
use crate::render::fit_cells;

/// Share of the window used by the input and button groups
const CONTAINER_PERCENT: u16 = 80;
const INPUT_HEIGHT: u16 = 3;
const BUTTON_HEIGHT: u16 = 3;

/// Where everything goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub status: Rect,
    pub header: Rect,
    pub inputs: [Rect; 3],
    pub buttons: [Rect; 2],
    pub calendar: Rect,
    pub info: Rect,
    pub image: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect, orientation: &OrientationState, cell_aspect: f32, show_info: bool) -> Self {
        let header_height = match orientation.header_size() {
            HeaderSize::Large => 2,
            HeaderSize::Small => 1,
        };
        let buttons_height = match orientation.button_direction {
            FlexDirection::Column => BUTTON_HEIGHT * 2,
            FlexDirection::Row => BUTTON_HEIGHT,
        };

        let [status, header, inputs, buttons, calendar, info, image, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(header_height),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(buttons_height),
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Length(u16::from(show_info)),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let container = centered_width(inputs, CONTAINER_PERCENT);
        let input_percent = orientation.input_width_percent();
        let [day, month, year] = Layout::horizontal([Constraint::Percentage(input_percent); 3])
            .flex(Flex::SpaceBetween)
            .areas(container);

        let button_container = centered_width(buttons, CONTAINER_PERCENT);
        let button_rects: [Rect; 2] = match orientation.button_direction {
            FlexDirection::Column => {
                Layout::vertical([Constraint::Length(BUTTON_HEIGHT); 2]).areas(button_container)
            }
            FlexDirection::Row => {
                let width = (orientation.button_width().floor() as u16).min(button_container.width / 2);
                Layout::horizontal([Constraint::Length(width); 2])
                    .flex(Flex::SpaceBetween)
                    .areas(button_container)
            }
        };

        let mut calendar = centered_width(calendar, orientation.calendar_width_percent());
        if calendar.width < MIN_CALENDAR_WIDTH {
            calendar = centered_columns(calendar_row(calendar, area), MIN_CALENDAR_WIDTH);
        }

        let (image_width, image_height) = orientation.image_size();
        let (cols, rows) = fit_cells(image_width, image_height, cell_aspect, image);
        let image = Rect {
            height: rows,
            ..centered_columns(image, cols)
        };

        Self {
            status,
            header,
            inputs: [day, month, year],
            buttons: button_rects,
            calendar,
            info,
            image,
            footer,
        }
    }
}

/// The full-width row a calendar rect sits in
fn calendar_row(calendar: Rect, area: Rect) -> Rect {
    Rect {
        x: area.x,
        width: area.width,
        ..calendar
    }
}

/// Horizontally centered slice of `area`, `percent` wide
fn centered_width(area: Rect, percent: u16) -> Rect {
    let [middle] = Layout::horizontal([Constraint::Percentage(percent)])
        .flex(Flex::Center)
        .areas(area);
    middle
}

/// Horizontally centered slice of `area`, `columns` wide
fn centered_columns(area: Rect, columns: u16) -> Rect {
    let width = columns.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
