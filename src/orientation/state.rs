//! Orientation-dependent presentation state
//!
//! Everything here is a pure function of the window size.

use ratatui::style::Color;

use super::WindowSize;

/// Background in portrait orientation (#32CD32)
pub const LIGHT_GREEN: Color = Color::Rgb(0x32, 0xCD, 0x32);
/// Background in landscape orientation (#004d00)
pub const DARK_GREEN: Color = Color::Rgb(0x00, 0x4D, 0x00);

/// Space reserved between the two buttons in a row
const BUTTON_GAP: f32 = 20.0;

/// Window orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Portrait when the window is taller than it is wide
    pub fn of(size: WindowSize) -> Self {
        if size.height > size.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Status bar text style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBarStyle {
    /// Dark text, used over the light background
    Dark,
    /// Light text, used over the dark background
    Light,
}

impl StatusBarStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusBarStyle::Dark => "dark",
            StatusBarStyle::Light => "light",
        }
    }

    pub fn text_color(&self) -> Color {
        match self {
            StatusBarStyle::Dark => Color::Black,
            StatusBarStyle::Light => Color::White,
        }
    }
}

/// Direction the button group is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Column,
    Row,
}

/// Header emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSize {
    Large,
    Small,
}

/// Presentation values derived from the window size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    pub size: WindowSize,
    pub portrait: bool,
    pub status_bar: StatusBarStyle,
    pub background: Color,
    pub button_direction: FlexDirection,
}

impl OrientationState {
    pub fn from_size(size: WindowSize) -> Self {
        let portrait = Orientation::of(size) == Orientation::Portrait;

        let (status_bar, background, button_direction) = if portrait {
            (StatusBarStyle::Dark, LIGHT_GREEN, FlexDirection::Column)
        } else {
            (StatusBarStyle::Light, DARK_GREEN, FlexDirection::Row)
        };

        Self {
            size,
            portrait,
            status_bar,
            background,
            button_direction,
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.portrait {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Width of each date field, as a percentage of the window
    pub fn input_width_percent(&self) -> u16 {
        if self.portrait { 30 } else { 20 }
    }

    /// Width of the calendar, as a percentage of the window
    pub fn calendar_width_percent(&self) -> u16 {
        if self.portrait { 90 } else { 80 }
    }

    /// Width of one button in logical units
    pub fn button_width(&self) -> f32 {
        match self.button_direction {
            FlexDirection::Column => self.size.width,
            FlexDirection::Row => (self.size.width / 2.0 - BUTTON_GAP).max(0.0),
        }
    }

    /// Image size in logical units: 80% of the width at a 4:3 ratio
    pub fn image_size(&self) -> (f32, f32) {
        let width = self.size.width * 0.8;
        (width, width * 3.0 / 4.0)
    }

    pub fn header_size(&self) -> HeaderSize {
        if self.portrait { HeaderSize::Large } else { HeaderSize::Small }
    }
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::from_size(WindowSize::new(0.0, 1.0))
    }
}
